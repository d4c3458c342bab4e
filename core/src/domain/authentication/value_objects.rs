use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

/// Who is calling. Authentication itself happens upstream; the core only
/// needs to know whether a user was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    User(Uuid),
    Anonymous,
}

impl Identity {
    pub fn user_id(&self) -> Result<Uuid, CoreError> {
        match self {
            Identity::User(id) => Ok(*id),
            Identity::Anonymous => Err(CoreError::Unauthenticated),
        }
    }
}

impl From<Option<Uuid>> for Identity {
    fn from(value: Option<Uuid>) -> Self {
        value.map(Identity::User).unwrap_or(Identity::Anonymous)
    }
}
