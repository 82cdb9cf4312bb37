use crate::web::live::live_controller;
use crate::web::server::Server;
use rocket::{Build, Rocket};

pub struct LiveServer {}

impl LiveServer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Server for LiveServer {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build.mount("/", routes![live_controller::live_members])
    }
}
