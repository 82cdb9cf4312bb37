mod config;
mod database;
mod error;
mod live;
mod member;
mod tools;
mod web;

#[macro_use]
extern crate rocket;

use crate::config::AppConfig;
use crate::database::init_db;
use crate::error::Result;
use crate::live::registry::SubscriberRegistry;
use crate::member::service::MemberService;
use crate::web::start_servers;
use log::error;
use std::sync::Arc;

#[launch]
fn rocket() -> _ {
    env_logger::init();

    match initialize() {
        Ok((config, service)) => start_servers(&config, service),
        Err(error) => {
            error!("{error:#?}");
            panic!("Initialization failed, aborting.");
        }
    }
}

fn initialize() -> Result<(AppConfig, MemberService)> {
    let config = AppConfig::load()?;
    let pool = init_db(config.database_url())?;
    let service = MemberService::new(pool, Arc::new(SubscriberRegistry::default()));

    Ok((config, service))
}
