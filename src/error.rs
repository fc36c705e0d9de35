use std::fmt;

/// Errors produced by the reshape/filter/merge pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Column-range specifier could not be parsed or spans too few columns.
    #[error("invalid column range '{spec}': {reason}")]
    InvalidRange { spec: String, reason: String },

    /// The first column of a block does not carry the expected label header.
    #[error("sheet '{sheet}': expected label column '{expected}', found '{found}'")]
    MissingLabelColumn {
        sheet: String,
        expected: String,
        found: String,
    },

    /// Intensities and scores disagree in key count or key sequence.
    #[error("intensities/scores misaligned: {0}")]
    ShapeMismatch(ShapeMismatch),

    /// The workbook itself failed to open or a sheet failed to read.
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    /// I/O error on an input file or the output stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error while serializing the merged table.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Diagnostic payload for an intensities/scores alignment failure.
#[derive(Debug)]
pub enum ShapeMismatch {
    RowCount {
        intensities: usize,
        scores: usize,
    },
    KeySequence {
        index: usize,
        intensities: String,
        scores: String,
    },
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeMismatch::RowCount {
                intensities,
                scores,
            } => write!(
                f,
                "intensities block has {intensities} keyed rows but scores block has {scores}"
            ),
            ShapeMismatch::KeySequence {
                index,
                intensities,
                scores,
            } => write!(
                f,
                "key mismatch at row {index}: intensities key '{intensities}' vs scores key '{scores}'"
            ),
        }
    }
}
