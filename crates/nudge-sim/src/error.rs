use nudge_behavior::BehaviorError;
use nudge_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("response model error: {0}")]
    Behavior(#[from] BehaviorError),
}

impl SimError {
    /// The underlying core error, whether it was raised by the tick loop
    /// itself or inside the response model.
    pub fn core(&self) -> Option<&CoreError> {
        match self {
            SimError::Core(e)                        => Some(e),
            SimError::Behavior(BehaviorError::Core(e)) => Some(e),
            SimError::Behavior(_)                    => None,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self.core(), Some(CoreError::Config(_)))
            || matches!(self, SimError::Behavior(BehaviorError::Config(_)))
    }

    pub fn is_distribution(&self) -> bool {
        matches!(self.core(), Some(CoreError::Distribution { .. }))
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self.core(), Some(CoreError::Lookup(_)))
    }
}

pub type SimResult<T> = Result<T, SimError>;
