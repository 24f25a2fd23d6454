//! Reading the export into a rectangular grid of string cells.
//!
//! The export is ragged: metadata lines are short, marker lines are long.
//! The file is measured once to find the widest line and then loaded with
//! every row padded to that width, so a cell keeps its column index no
//! matter how many fields its own line had.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{MocapError, Result};

/// One full vertical slice of the grid, header cells included.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Position of the column in the file.
    pub index: usize,
    pub cells: Vec<String>,
}

impl Column {
    /// Cell at `row`, or "" if the column is shorter.
    pub fn cell(&self, row: usize) -> &str {
        self.cells.get(row).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The csv reader splits on a single byte.
fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(MocapError::InvalidDelimiter(delimiter))
    }
}

/// Counts the columns in one line the way the width probe does.
fn line_width(line: &str, delimiter: char) -> usize {
    line.split(delimiter).count() + 1
}

/// Largest column count over all lines of `text`, plus one.
pub fn probe_width_str(text: &str, delimiter: char) -> usize {
    text.lines()
        .map(|l| line_width(l, delimiter))
        .max()
        .unwrap_or(0)
}

/// Reads the whole file once and returns synthetic column names
/// `0..width`, wide enough for the longest line.
pub fn probe_column_names<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Vec<usize>> {
    delimiter_byte(delimiter)?;
    let file = File::open(path.as_ref())?;
    let mut largest_column_count = 0;
    for line in BufReader::new(file).lines() {
        let l = line?;
        largest_column_count = largest_column_count.max(line_width(&l, delimiter));
    }
    Ok((0..largest_column_count).collect())
}

/// Rows of string cells, all of the same width.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    /// Loads `path`, padding (or truncating) every row to `column_names.len()`.
    pub fn load<P: AsRef<Path>>(path: P, delimiter: char, column_names: &[usize]) -> Result<Grid> {
        let file = File::open(path.as_ref())?;
        Grid::from_reader(file, delimiter, column_names.len())
    }

    pub fn from_reader<R: Read>(reader: R, delimiter: char, width: usize) -> Result<Grid> {
        let delimiter = delimiter_byte(delimiter)?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }
        debug!("Loaded {} rows of width {}", rows.len(), width);

        Ok(Grid { rows, width })
    }

    /// Probes and loads an in-memory export in one go.
    pub fn parse_str(text: &str, delimiter: char) -> Result<Grid> {
        let width = probe_width_str(text, delimiter);
        Grid::from_reader(text.as_bytes(), delimiter, width)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Cell at (`row`, `col`); out of range reads as an empty cell.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn column(&self, col: usize) -> Column {
        Column {
            index: col,
            cells: self
                .rows
                .iter()
                .map(|r| r.get(col).cloned().unwrap_or_default())
                .collect(),
        }
    }
}
