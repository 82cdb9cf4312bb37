use crate::database::error::DatabaseError;
use thiserror::Error;

pub type Result<T, E = MemberError> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq)]
pub enum MemberError {
    #[error("The member is invalid: {0}")]
    Validation(String),
    #[error("A member with the same national ID already exists.")]
    DuplicateKey,
    #[error("No member matches [id: {0}]")]
    NotFound(String),
    #[error("The member store can't be reached.")]
    StorageUnavailable(DatabaseError),
}

impl From<DatabaseError> for MemberError {
    fn from(value: DatabaseError) -> Self {
        match value {
            DatabaseError::DuplicateKey => MemberError::DuplicateKey,
            error => MemberError::StorageUnavailable(error),
        }
    }
}
