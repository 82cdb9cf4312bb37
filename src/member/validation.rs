use crate::member::error::MemberError::Validation;
use crate::member::error::Result;
use dto::member_input::MemberInput;
use dto::member_update::MemberUpdate;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// `apellido` may be left empty.
pub fn validate_input(input: &MemberInput) -> Result<()> {
    require("nombre", input.first_name())?;
    require("dni", input.national_id())?;
    check_email(input.email().as_deref())
}

/// Only the fields carried by the update are checked.
pub fn validate_update(update: &MemberUpdate) -> Result<()> {
    if let Some(first_name) = update.first_name() {
        require("nombre", first_name)?;
    }
    if let Some(national_id) = update.national_id() {
        require("dni", national_id)?;
    }
    check_email(update.email().as_deref())
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Validation(format!("{field} can't be empty")))
    } else {
        Ok(())
    }
}

/// An empty email is accepted: it is optional.
fn check_email(email: Option<&str>) -> Result<()> {
    match email.map(str::trim) {
        Some(email) if !email.is_empty() && !EMAIL_REGEX.is_match(email) => {
            Err(Validation(format!("{email} is not a valid email address")))
        }
        _ => Ok(()),
    }
}
