use crate::web::api::members_controller;
use crate::web::cors;
use crate::web::server::Server;
use rocket::{Build, Rocket};

pub struct ApiServer {}

impl ApiServer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Server for ApiServer {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
            .mount(
                "/api/",
                routes![
                    members_controller::list_members,
                    members_controller::list_dues,
                    members_controller::get_member,
                    members_controller::create_member,
                    members_controller::update_member,
                    members_controller::delete_member,
                ],
            )
            .mount("/", routes![cors::preflight])
    }
}
