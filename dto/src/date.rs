//! Dates travel as `YYYY-MM-DD`, but browsers and older clients also send full
//! RFC 3339 date-times. Only the date part is kept.

use chrono::{DateTime, NaiveDate, ParseError};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    let value = value.trim();
    NaiveDate::from_str(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|date_time| date_time.date_naive()))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_date(&value).map_err(serde::de::Error::custom)
}

pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_date(&value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
