use chrono::{Days, NaiveDate};
use dto::member_due::PaymentStatus;

/// A payment covers this many calendar days, whatever the length of the month.
pub const PAYMENT_PERIOD_DAYS: u64 = 30;
/// How many days before its due date a payment is considered due soon.
pub const DUE_SOON_DAYS: u64 = 5;

/// Date at which a payment made on `payment_date` lapses.
/// `None` only when the result doesn't fit in the calendar.
pub fn compute_due_date(payment_date: NaiveDate) -> Option<NaiveDate> {
    payment_date.checked_add_days(Days::new(PAYMENT_PERIOD_DAYS))
}

pub fn payment_status(due_date: NaiveDate, today: NaiveDate) -> PaymentStatus {
    if today > due_date {
        PaymentStatus::Overdue
    } else if today
        .checked_add_days(Days::new(DUE_SOON_DAYS))
        .is_none_or(|limit| limit >= due_date)
    {
        PaymentStatus::DueSoon
    } else {
        PaymentStatus::UpToDate
    }
}
