pub(crate) mod member;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
/// Fixed width, so that timestamps sort the same way as text and as dates.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";
