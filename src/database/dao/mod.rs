use crate::database::error::DatabaseError;

pub(crate) mod member;

type Result<T, E = DatabaseError> = std::result::Result<T, E>;
