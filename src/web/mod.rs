use crate::config::AppConfig;
use crate::member::service::MemberService;
use crate::web::server::build_server;
use rocket::{Build, Rocket};

mod api;
mod cors;
mod error;
mod frontend;
mod live;
mod server;

pub fn start_servers(config: &AppConfig, service: MemberService) -> Rocket<Build> {
    build_server(config, service)
}
