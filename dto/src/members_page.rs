use crate::member::Member;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One page of members along with what a view needs to link to its neighbours.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MembersPage {
    #[serde(rename = "alumnos")]
    members: Vec<Member>,
    has_prev_page: bool,
    has_next_page: bool,
    prev_page: Option<u32>,
    next_page: Option<u32>,
    page: u32,
    total_pages: u32,
    total_members: u64,
}

impl MembersPage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        members: Vec<Member>,
        has_prev_page: bool,
        has_next_page: bool,
        prev_page: Option<u32>,
        next_page: Option<u32>,
        page: u32,
        total_pages: u32,
        total_members: u64,
    ) -> Self {
        Self {
            members,
            has_prev_page,
            has_next_page,
            prev_page,
            next_page,
            page,
            total_pages,
            total_members,
        }
    }
}
