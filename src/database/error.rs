use crate::database::error::DatabaseError::{
    DuplicateKey, InvalidStoredValue, NotFound, UnderlyingDatabase,
};
use diesel::result::DatabaseErrorKind;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DatabaseError {
    #[error("The connection to the database failed.")]
    ConnectionFailed,
    #[error("A unique value is already used by another record.")]
    DuplicateKey,
    #[error("The requested record doesn't exist.")]
    NotFound,
    #[error("A stored value can't be read [value: {0}]")]
    InvalidStoredValue(String),
    #[error("An error occurred within the database.")]
    UnderlyingDatabase(String),
}

impl From<diesel::result::Error> for DatabaseError {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DuplicateKey
            }
            diesel::result::Error::NotFound => NotFound,
            error => UnderlyingDatabase(error.to_string()),
        }
    }
}

impl From<chrono::ParseError> for DatabaseError {
    fn from(value: chrono::ParseError) -> Self {
        InvalidStoredValue(value.to_string())
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for DatabaseError {
    fn from(value: Box<dyn Error + Send + Sync + 'static>) -> Self {
        UnderlyingDatabase(value.to_string())
    }
}
