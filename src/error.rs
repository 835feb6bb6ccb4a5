use thiserror::Error;

//errors surfaced by the engine
//malformed rows, unknown strategies and degenerate statistics are not errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No price bars could be parsed from the input")]
    EmptySeries,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
