pub mod live_controller;
pub mod server;
