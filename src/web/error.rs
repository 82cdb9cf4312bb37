use crate::member::error::MemberError;
use log::{debug, error};
use rocket::http::Status;

/// HTTP status matching a failed member operation.
/// Storage failures are logged here: the client only gets a bare 500.
pub fn to_status(error: MemberError) -> Status {
    match error {
        MemberError::Validation(message) => {
            debug!("Invalid member: {message}");
            Status::BadRequest
        }
        MemberError::DuplicateKey => Status::Conflict,
        MemberError::NotFound(_) => Status::NotFound,
        MemberError::StorageUnavailable(error) => {
            error!("Member storage failure\n{error:#?}");
            Status::InternalServerError
        }
    }
}
