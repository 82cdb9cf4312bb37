use crate::config::AppConfig;
use crate::member::service::MemberService;
use crate::web::api::server::ApiServer;
use crate::web::cors::{AllowedOrigins, Cors};
use crate::web::frontend::server::FrontendServer;
use crate::web::live::server::LiveServer;
use rocket::{Build, Rocket};

const BIND_ADDRESS: &str = "0.0.0.0";

pub trait Server {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build>;
}

/// Every server shares the same member service: a mutation made through any of them
/// reaches the live subscribers of all of them.
pub fn build_server(config: &AppConfig, service: MemberService) -> Rocket<Build> {
    let rocket_build = rocket::build()
        .configure(
            rocket::Config::figment()
                .merge(("port", *config.port()))
                .merge(("address", BIND_ADDRESS)),
        )
        .manage(service)
        .manage(AllowedOrigins::new(config.allowed_origins().clone()))
        .attach(Cors);

    let servers: Vec<Box<dyn Server>> = vec![
        Box::new(ApiServer::new()),
        Box::new(FrontendServer::new()),
        Box::new(LiveServer::new()),
    ];
    servers
        .iter()
        .fold(rocket_build, |rocket_build, server| {
            server.configure(rocket_build)
        })
}
