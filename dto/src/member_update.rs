use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Partial replacement of a member's fields. Absent fields are left untouched.
///
/// The due date is only changed when explicitly given:
/// changing the payment date alone keeps the previous due date.
#[derive(Debug, Default, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct MemberUpdate {
    #[serde(rename = "nombre", default)]
    first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    last_name: Option<String>,
    #[serde(rename = "dni", default)]
    national_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(
        rename = "fechaPago",
        default,
        deserialize_with = "crate::date::deserialize_option"
    )]
    payment_date: Option<NaiveDate>,
    #[serde(
        rename = "fechaVencimiento",
        default,
        deserialize_with = "crate::date::deserialize_option"
    )]
    due_date: Option<NaiveDate>,
    #[serde(rename = "fotoUrl", default)]
    photo_url: Option<String>,
}

impl MemberUpdate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        national_id: Option<String>,
        email: Option<String>,
        payment_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
        photo_url: Option<String>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            national_id,
            email,
            payment_date,
            due_date,
            photo_url,
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
