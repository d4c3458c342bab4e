use thiserror::Error;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{event} is not allowed in state {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
    #[error("{0}")]
    Validation(String),
}

impl From<SessionError> for CoreError {
    fn from(value: SessionError) -> Self {
        CoreError::Validation(value.to_string())
    }
}
