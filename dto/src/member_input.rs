use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Fields a client provides to register a new member.
/// The due date is never provided: it is derived from the payment date.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct MemberInput {
    #[serde(rename = "nombre")]
    first_name: String,
    #[serde(rename = "apellido", default)]
    last_name: String,
    #[serde(rename = "dni")]
    national_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(rename = "fechaPago", deserialize_with = "crate::date::deserialize")]
    payment_date: NaiveDate,
    #[serde(rename = "fotoUrl", default)]
    photo_url: Option<String>,
}

impl MemberInput {
    pub fn new(
        first_name: String,
        last_name: String,
        national_id: String,
        email: Option<String>,
        payment_date: NaiveDate,
        photo_url: Option<String>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            national_id,
            email,
            payment_date,
            photo_url,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    pub fn ana() -> MemberInput {
        MemberInput::new(
            "Ana".to_owned(),
            "García".to_owned(),
            "111".to_owned(),
            Some("ana@gym.com".to_owned()),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            None,
        )
    }

    pub fn bruno() -> MemberInput {
        MemberInput::new(
            "Bruno".to_owned(),
            "Díaz".to_owned(),
            "222".to_owned(),
            Some("bruno@gym.com".to_owned()),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            Some("https://cdn.gym.com/bruno.png".to_owned()),
        )
    }

    pub fn juan() -> MemberInput {
        MemberInput::new(
            "Juan".to_owned(),
            "Pérez".to_owned(),
            "333".to_owned(),
            None,
            NaiveDate::from_ymd_opt(2023, 12, 15).unwrap(),
            None,
        )
    }

    /// A member sharing Ana's national ID.
    pub fn ana_impostor() -> MemberInput {
        MemberInput::new(
            "Anabel".to_owned(),
            "Gómez".to_owned(),
            "111".to_owned(),
            None,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            None,
        )
    }

    #[test]
    fn should_deserialize_client_payload() {
        let payload = r#"{"nombre":"Ana","apellido":"García","dni":"111","email":"ana@gym.com","fechaPago":"2024-01-01"}"#;
        let input: MemberInput = serde_json::from_str(payload).unwrap();

        assert_eq!(ana(), input);
    }

    #[test]
    fn should_deserialize_payload_with_date_time_and_unknown_fields() {
        let payload = r#"{"_id":"ignored","nombre":"Juan","apellido":"Pérez","dni":"333","fechaPago":"2023-12-15T00:00:00.000Z","fotoUrl":null}"#;
        let input: MemberInput = serde_json::from_str(payload).unwrap();

        assert_eq!(juan(), input);
    }

    #[test]
    fn should_deserialize_payload_with_only_required_fields() {
        let payload = r#"{"nombre":"Ana","dni":"111","fechaPago":"2024-01-01"}"#;
        let input: MemberInput = serde_json::from_str(payload).unwrap();

        assert_eq!("", input.last_name().as_str());
        assert_eq!(&None, input.email());
        assert_eq!(&NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), input.payment_date());
    }

    #[test]
    fn should_reject_payload_without_payment_date() {
        let payload = r#"{"nombre":"Ana","apellido":"García","dni":"111"}"#;

        assert!(serde_json::from_str::<MemberInput>(payload).is_err());
    }
}
