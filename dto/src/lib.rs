pub mod date;
pub mod live_event;
pub mod member;
pub mod member_due;
pub mod member_input;
pub mod member_update;
pub mod members_page;
