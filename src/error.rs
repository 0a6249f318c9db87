use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Cannot read input {}: {source}", path.display())]
    InputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Segmentation error: line at offset {offset} is longer than {max_line_size} bytes \
         (truncated or corrupt input)"
    )]
    Segmentation { offset: u64, max_line_size: usize },

    #[error("Parse error in segment starting at {segment_start}: {kind} at offset {offset}")]
    Parse {
        segment_start: u64,
        offset: u64,
        kind: ParseErrorKind,
    },

    #[error("Data merge error: {0}")]
    DataMerge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Baseline mismatch for {stations} station(s)")]
    BaselineMismatch { stations: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("record has no ';' delimiter")]
    MissingDelimiter,

    #[error("temperature is not of the form [-]digits.digit")]
    InvalidTemperature,

    #[error("station name is empty or not valid UTF-8")]
    InvalidStationName,
}
