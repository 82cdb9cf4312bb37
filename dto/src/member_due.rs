use crate::member::Member;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    UpToDate,
    DueSoon,
    Overdue,
}

/// A member whose payment has lapsed or is about to.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct MemberDue {
    #[serde(flatten)]
    member: Member,
    #[serde(rename = "estadoPago")]
    status: PaymentStatus,
}

impl MemberDue {
    pub fn new(member: Member, status: PaymentStatus) -> Self {
        Self { member, status }
    }
}
