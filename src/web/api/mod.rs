pub mod members_controller;
pub mod server;
