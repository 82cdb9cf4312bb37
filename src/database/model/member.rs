use crate::database::error::DatabaseError;
use crate::database::model::{DATE_FORMAT, TIMESTAMP_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Insertable, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::member)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Member {
    id: String,
    first_name: String,
    last_name: String,
    national_id: String,
    email: String,
    payment_date: String,
    due_date: String,
    photo_url: String,
    created_at: String,
    updated_at: String,
}

impl Member {
    /// Build a row for a brand-new member: identity and timestamps belong to the store.
    pub(crate) fn new_record(
        input: &dto::member_input::MemberInput,
        due_date: NaiveDate,
        now: NaiveDateTime,
    ) -> Self {
        let now = format_timestamp(now);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: input.first_name().trim().to_owned(),
            last_name: input.last_name().trim().to_owned(),
            national_id: input.national_id().trim().to_owned(),
            email: input.email().as_deref().unwrap_or_default().trim().to_owned(),
            payment_date: format_date(*input.payment_date()),
            due_date: format_date(due_date),
            photo_url: input.photo_url().clone().unwrap_or_default(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }
}

impl TryFrom<Member> for dto::member::Member {
    type Error = DatabaseError;

    fn try_from(value: Member) -> Result<Self, Self::Error> {
        Ok(dto::member::Member::new(
            value.id,
            value.first_name,
            value.last_name,
            value.national_id,
            value.email,
            NaiveDate::parse_from_str(&value.payment_date, DATE_FORMAT)?,
            NaiveDate::parse_from_str(&value.due_date, DATE_FORMAT)?,
            value.photo_url,
            NaiveDateTime::parse_from_str(&value.created_at, TIMESTAMP_FORMAT)?,
            NaiveDateTime::parse_from_str(&value.updated_at, TIMESTAMP_FORMAT)?,
        ))
    }
}

/// Fields to overwrite on an existing member. `None` leaves the column untouched.
#[derive(AsChangeset, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::member)]
pub(crate) struct MemberChangeset {
    first_name: Option<String>,
    last_name: Option<String>,
    national_id: Option<String>,
    email: Option<String>,
    payment_date: Option<String>,
    due_date: Option<String>,
    photo_url: Option<String>,
    updated_at: String,
}

impl MemberChangeset {
    pub(crate) fn new(update: &dto::member_update::MemberUpdate, now: NaiveDateTime) -> Self {
        Self {
            first_name: update.first_name().as_deref().map(|value| value.trim().to_owned()),
            last_name: update.last_name().as_deref().map(|value| value.trim().to_owned()),
            national_id: update.national_id().as_deref().map(|value| value.trim().to_owned()),
            email: update.email().as_deref().map(|value| value.trim().to_owned()),
            payment_date: update.payment_date().map(format_date),
            due_date: update.due_date().map(format_date),
            photo_url: update.photo_url().clone(),
            updated_at: format_timestamp(now),
        }
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
