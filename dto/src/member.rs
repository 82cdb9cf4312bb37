use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A gym member as stored and as sent to clients.
/// Field names on the wire are the ones the web client has always used.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Member {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    #[serde(rename = "nombre")]
    first_name: String,
    #[serde(rename = "apellido")]
    last_name: String,
    #[serde(rename = "dni")]
    national_id: String,
    email: String,
    #[serde(rename = "fechaPago")]
    payment_date: NaiveDate,
    #[serde(rename = "fechaVencimiento")]
    due_date: NaiveDate,
    #[serde(rename = "fotoUrl")]
    photo_url: String,
    #[serde(rename = "createdAt")]
    created_at: NaiveDateTime,
    #[serde(rename = "updatedAt")]
    updated_at: NaiveDateTime,
}

impl Member {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        first_name: String,
        last_name: String,
        national_id: String,
        email: String,
        payment_date: NaiveDate,
        due_date: NaiveDate,
        photo_url: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            national_id,
            email,
            payment_date,
            due_date,
            photo_url,
            created_at,
            updated_at,
        }
    }
}
