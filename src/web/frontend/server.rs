use crate::web::frontend::{filters, frontend_controller};
use crate::web::server::Server;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

const STATIC_FILES_FOLDER: &str = "./public/static";

pub struct FrontendServer {}

impl FrontendServer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Server for FrontendServer {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
            .mount(
                "/",
                routes![
                    frontend_controller::index,
                    frontend_controller::list_members,
                    frontend_controller::live_members,
                ],
            )
            .mount("/", FileServer::from(STATIC_FILES_FOLDER))
            .register("/", catchers![frontend_controller::not_found])
            .attach(Template::custom(|engines| {
                engines
                    .tera
                    .register_filter("is_overdue", filters::is_overdue);
                engines
                    .tera
                    .register_filter("payment_status", filters::payment_status_of);
            }))
    }
}
