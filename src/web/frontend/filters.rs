use crate::member::due_date::payment_status;
use chrono::{NaiveDate, Utc};
use dto::member_due::PaymentStatus;
use serde_json::Value;
use std::collections::HashMap;

pub fn is_overdue(date: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let status = status_as_of_today(date)?;
    Ok(Value::Bool(status == PaymentStatus::Overdue))
}

/// `upToDate`, `dueSoon` or `overdue`, to be used as a CSS class.
pub fn payment_status_of(date: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let status = status_as_of_today(date)?;
    Ok(serde_json::to_value(status)?)
}

fn status_as_of_today(date: &Value) -> tera::Result<PaymentStatus> {
    let due_date: NaiveDate = serde::Deserialize::deserialize(date)?;
    Ok(payment_status(due_date, Utc::now().date_naive()))
}
