use thiserror::Error;

/// Everything that can go wrong between reading the file and writing the plot.
#[derive(Error, Debug)]
pub enum MocapError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// No row has "Name" in its second cell.
    #[error("header row not found (no row with \"Name\" in column 1)")]
    HeaderNotFound,

    #[error("non-numeric value {value:?} in row {row}, column {column}")]
    NonNumeric {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("plotting failed: {0}")]
    Plot(String),

    #[error("delimiter {0:?} is not a single-byte ASCII character")]
    InvalidDelimiter(char),

    #[error("invalid colour {0:?}, expected r,g,b with values in [0, 1]")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, MocapError>;
