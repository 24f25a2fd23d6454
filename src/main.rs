use clap::Parser;
use color_eyre::eyre::bail;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Instant;

use mocap::{parse_rgb, MoCapFile, PlotConfig, Rgb, Subject};

#[macro_use]
extern crate log;
extern crate simplelog;
use simplelog::*;

// =====================================================================
// Command line arguments.
// =====================================================================

#[derive(Parser, Debug, Clone)]
struct Args {
    // Filename
    #[arg(short, long, default_value_t = String::from("AtlasTake_02.csv"))]
    file: String,

    #[arg(
        short = 'o',
        long,
        help = "Output filename, .png or .svg (auto-generated if unspecified)."
    )]
    fileout: Option<String>,

    #[arg(long, default_value_t = ',', value_parser = parse_delimiter, help = "Field separator.")]
    delimiter: char,

    // The two subjects, by their label in the marker-name row.
    #[arg(long, default_value_t = String::from("Atlas"))]
    subject_a: String,

    #[arg(long, default_value_t = String::from("Human2"))]
    subject_b: String,

    #[arg(long, default_value = "1,0,0", value_parser = parse_color, help = "Colour r,g,b in [0, 1].")]
    color_a: Rgb,

    #[arg(long, default_value = "0,0,1", value_parser = parse_color, help = "Colour r,g,b in [0, 1].")]
    color_b: Rgb,

    #[arg(long, default_value_t = String::from("Atlas"), help = "Legend text for subject A.")]
    legend_a: String,

    #[arg(long, default_value_t = String::from("Human"), help = "Legend text for subject B.")]
    legend_b: String,

    #[arg(long, default_value_t = String::from("Time [sec]"))]
    xlabel: String,

    #[arg(long, default_value_t = String::from("Time [sec]"))]
    ylabel: String,

    // Figure size in inches.
    #[arg(long, default_value_t = 10.0)]
    width: f64,

    #[arg(long, default_value_t = 7.0)]
    height: f64,

    #[arg(long, default_value_t = 100)]
    dpi: u32,

    // Extra output
    #[clap(long, short, action, help = "Produce superfluous output.")]
    verbose: bool,

    // Force overwrite of output
    #[clap(long, action, help = "Overwrite output if it exists.")]
    force: bool,
}

fn parse_color(s: &str) -> std::result::Result<Rgb, String> {
    parse_rgb(s).map_err(|e| e.to_string())
}

fn parse_delimiter(s: &str) -> std::result::Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("delimiter must be a single ASCII character, got {:?}", s)),
    }
}

impl Args {
    fn to_config(&self) -> PlotConfig {
        let output = match &self.fileout {
            Some(f) => PathBuf::from(f),
            None => PathBuf::from(create_outputfilename(&self.file)),
        };
        PlotConfig {
            input: PathBuf::from(&self.file),
            delimiter: self.delimiter,
            subjects: vec![
                Subject::new(&self.subject_a, &self.legend_a, self.color_a),
                Subject::new(&self.subject_b, &self.legend_b, self.color_b),
            ],
            x_label: self.xlabel.clone(),
            y_label: self.ylabel.clone(),
            figure_size: (self.width, self.height),
            dpi: self.dpi,
            output,
        }
    }
}

// =====================================================================
// Main.
// =====================================================================

/// Reads the MoCap export and writes the X/Z scatter plot.
///
/// The file is read twice, once to measure the widest line and once to
/// load it into memory.
fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    CombinedLogger::init(vec![
        TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            level,
            Config::default(),
            OpenOptions::new()
                .create(true) // To allow creating the file, if it doesn't exist,
                .append(true) // do not truncate the file, but instead add to it.
                .open("mocap.log")?,
        ),
    ])?;
    info!("{:?}", args);

    let config = args.to_config();
    if !args.force && config.output.exists() {
        bail!(
            "{} exists! Use --force to overwrite.",
            config.output.display()
        );
    }

    let time_start = Instant::now();
    let mocap_file = MoCapFile::read(&config)?;
    info!(
        "Parsed {} samples into {} layers, {} points (in {} ms).",
        mocap_file.num_samples,
        mocap_file.layers.len(),
        mocap_file.num_points(),
        time_start.elapsed().as_millis()
    );
    if args.verbose {
        debug!("{:?}", mocap_file.take);
    }

    mocap_file.render(&config)?;
    info!("Ready, wrote {}.", config.output.display());

    Ok(())
}

/// Create a new output filename by replacing the extension with
/// "_xz.png".
///
/// An empty input filename returns `output_xz.png`.
///
fn create_outputfilename(filename: &str) -> String {
    let path = Path::new(filename);
    match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if !stem.is_empty() => path
            .with_file_name(format!("{}_xz.png", stem))
            .to_string_lossy()
            .into_owned(),
        _ => "output_xz.png".to_string(),
    }
}

// =====================================================================
// Tests.
// =====================================================================
