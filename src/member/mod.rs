pub mod due_date;
pub mod error;
pub mod pagination;
pub mod service;
pub mod validation;
