use nudge_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
