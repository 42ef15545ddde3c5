use thiserror::Error;

/// Fatal conditions met while loading the raw table. There is no
/// partial-load mode: any of these stops the dashboard from starting.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row}: TIME '{raw}' is not an integer year")]
    InvalidYear { row: usize, raw: String },

    #[error("Row {row}: Value '{raw}' is not a number after cleaning")]
    MalformedValue { row: usize, raw: String },

    #[error("no observations left after cleaning")]
    Empty,
}
