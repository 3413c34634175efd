use nudge_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("record parse error: {0}")]
    Parse(String),

    #[error("invalid record: {0}")]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SurveyResult<T> = Result<T, SurveyError>;
