use std::path::PathBuf;

use crate::error::{MocapError, Result};

/// Base colour, three components in [0, 1].
pub type Rgb = [f64; 3];

pub const RED: Rgb = [1.0, 0.0, 0.0];
pub const BLUE: Rgb = [0.0, 0.0, 1.0];

/// A tracked subject: the marker-name label in the file, the text shown in
/// the legend and the base colour of its points.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub label: String,
    pub legend: String,
    pub color: Rgb,
}

impl Subject {
    pub fn new(label: &str, legend: &str, color: Rgb) -> Subject {
        Subject {
            label: label.to_string(),
            legend: legend.to_string(),
            color,
        }
    }
}

/// Everything the pipeline needs, passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub delimiter: char,
    pub subjects: Vec<Subject>,
    pub x_label: String,
    pub y_label: String,
    /// Width and height in inches.
    pub figure_size: (f64, f64),
    pub dpi: u32,
    pub output: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            input: PathBuf::from("AtlasTake_02.csv"),
            delimiter: ',',
            subjects: vec![
                Subject::new("Atlas", "Atlas", RED),
                Subject::new("Human2", "Human", BLUE),
            ],
            x_label: "Time [sec]".to_string(),
            y_label: "Time [sec]".to_string(),
            figure_size: (10.0, 7.0),
            dpi: 100,
            output: PathBuf::from("AtlasTake_02_xz.png"),
        }
    }
}

impl PlotConfig {
    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        let dpi = self.dpi as f64;
        ((w * dpi).round().max(1.0) as u32, (h * dpi).round().max(1.0) as u32)
    }
}

/// Parses "r,g,b" with every component in [0, 1].
pub fn parse_rgb(s: &str) -> Result<Rgb> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|_| MocapError::InvalidColor(s.to_string()))?;
    match parts.as_slice() {
        &[r, g, b] if parts.iter().all(|c| (0.0..=1.0).contains(c)) => Ok([r, g, b]),
        _ => Err(MocapError::InvalidColor(s.to_string())),
    }
}
