//! Locating the marker-name row and reading the take metadata line.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{MocapError, Result};
use crate::grid::Grid;

/// Literal in column 1 of the marker-name row.
pub const NAME_TOKEN: &str = "Name";
/// Kind-row value of a position column.
pub const POSITION_TOKEN: &str = "Position";

/// Where the header rows sit relative to the marker-name row (the anchor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub kind_row_offset: usize,
    pub axis_row_offset: usize,
    pub data_row_offset: usize,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        HeaderLayout {
            kind_row_offset: 2,
            axis_row_offset: 3,
            data_row_offset: 4,
        }
    }
}

impl HeaderLayout {
    pub fn kind_row(&self, anchor: usize) -> usize {
        anchor + self.kind_row_offset
    }

    pub fn axis_row(&self, anchor: usize) -> usize {
        anchor + self.axis_row_offset
    }

    pub fn data_row(&self, anchor: usize) -> usize {
        anchor + self.data_row_offset
    }
}

/// Index of the first row with "Name" in its second cell.
pub fn locate_name_row(grid: &Grid) -> Result<usize> {
    grid.rows()
        .position(|row| row.get(1).map(String::as_str) == Some(NAME_TOKEN))
        .ok_or(MocapError::HeaderNotFound)
}

// =====================================================================
// Take metadata, first line of the export, e.g.
// Format Version,1.23,Take Name,AtlasTake_02,Capture Frame Rate,120.000000,...
// =====================================================================

lazy_static! {
    static ref RE_TAKE_NAME: Regex = Regex::new(r"Take Name,([^,]+)").unwrap();
    static ref RE_CAPTURE_RATE: Regex =
        Regex::new(r"Capture Frame Rate,(\d+(?:\.\d+)?)").unwrap();
    static ref RE_EXPORT_RATE: Regex = Regex::new(r"Export Frame Rate,(\d+(?:\.\d+)?)").unwrap();
    static ref RE_EXPORTED_FRAMES: Regex = Regex::new(r"Total Exported Frames,(\d+)").unwrap();
    static ref RE_LENGTH_UNITS: Regex = Regex::new(r"Length Units,([^,]+)").unwrap();
}

pub fn extract_take_name(line: &str) -> Option<&str> {
    RE_TAKE_NAME
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

pub fn extract_capture_frame_rate(line: &str) -> Option<f64> {
    RE_CAPTURE_RATE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn extract_export_frame_rate(line: &str) -> Option<f64> {
    RE_EXPORT_RATE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn extract_exported_frames(line: &str) -> Option<usize> {
    RE_EXPORTED_FRAMES
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn extract_length_units(line: &str) -> Option<&str> {
    RE_LENGTH_UNITS
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Whatever the export tells us about the take. All optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TakeInfo {
    pub take_name: Option<String>,
    pub capture_frame_rate: Option<f64>,
    pub export_frame_rate: Option<f64>,
    pub exported_frames: Option<usize>,
    pub length_units: Option<String>,
}

impl TakeInfo {
    pub fn from_line(line: &str) -> TakeInfo {
        TakeInfo {
            take_name: extract_take_name(line).map(str::to_string),
            capture_frame_rate: extract_capture_frame_rate(line),
            export_frame_rate: extract_export_frame_rate(line),
            exported_frames: extract_exported_frames(line),
            length_units: extract_length_units(line).map(str::to_string),
        }
    }

    /// Reads the metadata from the first row of the grid.
    pub fn from_grid(grid: &Grid) -> TakeInfo {
        match grid.row(0) {
            Some(row) => TakeInfo::from_line(&row.join(",")),
            None => TakeInfo::default(),
        }
    }

    /// Logs a warning if the data row count disagrees with the metadata.
    pub fn check_frames(&self, num_samples: usize) -> bool {
        match self.exported_frames {
            Some(n) if n != num_samples => {
                warn!("Metadata says {} exported frames, found {} data rows.", n, num_samples);
                false
            }
            _ => true,
        }
    }
}
