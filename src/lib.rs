//! Reads a MoCap CSV export (Motive style, with a ragged multi-row header)
//! and plots the X/Z trajectories of the position markers of a few
//! subjects, colour-graded by time.
//!
//! ```text
//! Format Version,1.23,Take Name,AtlasTake_02,...
//! (blank)
//! Type,,Rigid Body Marker,Rigid Body Marker,Rigid Body Marker,...
//! Name,Name,Atlas,Atlas,Atlas,...            <- marker-name row
//! ID,,1,1,1,...
//! Frame,,Position,Position,Position,...      <- kind row (+2)
//! Frame,Time (Seconds),X,Y,Z,...             <- axis row (+3)
//! 0,0.000000,0.12,1.03,0.44,...              <- data (+4)
//! ```

#[macro_use]
extern crate log;

pub mod columns;
pub mod config;
pub mod error;
pub mod grid;
pub mod header;
pub mod plot;

pub use columns::{assemble_triplets, select_columns, select_time_column, TripletScan, XyzTriplet};
pub use config::{parse_rgb, PlotConfig, Rgb, Subject};
pub use error::{MocapError, Result};
pub use grid::{probe_column_names, probe_width_str, Column, Grid};
pub use header::{locate_name_row, HeaderLayout, TakeInfo};
pub use plot::{build_layers, color_gradient, render, to_rgb_color, ScatterLayer, Trajectory};

/// The float type for the coordinates.
pub type SensorFloat = f64;

/// A parsed export, ready to be drawn.
#[derive(Debug, Clone)]
pub struct MoCapFile {
    pub take: TakeInfo,
    /// Index of the marker-name row in the grid.
    pub name_row: usize,
    pub num_samples: usize,
    pub layers: Vec<ScatterLayer>,
}

impl MoCapFile {
    /// Parses an already loaded grid.
    pub fn from_grid(grid: &Grid, layout: &HeaderLayout, subjects: &[Subject]) -> Result<MoCapFile> {
        let name_row = locate_name_row(grid)?;
        info!("Marker names in row {}.", name_row);

        let take = TakeInfo::from_grid(grid);
        let num_samples = grid.num_rows().saturating_sub(layout.data_row(name_row));
        take.check_frames(num_samples);

        let layers = build_layers(grid, name_row, layout, subjects)?;

        Ok(MoCapFile {
            take,
            name_row,
            num_samples,
            layers,
        })
    }

    /// Probes and loads the input file from `config`, then parses it.
    pub fn read(config: &PlotConfig) -> Result<MoCapFile> {
        let column_names = probe_column_names(&config.input, config.delimiter)?;
        info!(
            "Reading {} ({} columns).",
            config.input.display(),
            column_names.len()
        );
        let grid = Grid::load(&config.input, config.delimiter, &column_names)?;
        MoCapFile::from_grid(&grid, &HeaderLayout::default(), &config.subjects)
    }

    /// Total number of points over all layers.
    pub fn num_points(&self) -> usize {
        self.layers.iter().map(ScatterLayer::len).sum()
    }

    pub fn render(&self, config: &PlotConfig) -> Result<()> {
        render(&self.layers, config, self.take.take_name.as_deref())
    }
}
