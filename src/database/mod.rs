use crate::database::error::DatabaseError;
use crate::database::error::DatabaseError::ConnectionFailed;
use crate::database::functions::register_functions;
use crate::database::migrations::run_migrations;
use crate::tools::{log_error_and_return, log_message_and_return};
use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use log::info;
use std::time::Duration;

pub(crate) mod dao;
pub(crate) mod error;
mod functions;
mod migrations;
mod model;
mod schema;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite refuses concurrent writers: make them wait for each other instead.
/// Custom SQL functions are registered as well.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!(
                "PRAGMA busy_timeout = {};",
                self.busy_timeout.as_millis()
            ))
            .map_err(diesel::r2d2::Error::QueryError)?;
        register_functions(connection).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Open a pool onto the database and bring its schema up to date.
/// The URL must point to a file: each pooled connection to `:memory:` would get its own database.
pub fn init_db(database_url: &str) -> Result<DbPool, DatabaseError> {
    let pool = Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: BUSY_TIMEOUT,
        }))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
        .map_err(log_message_and_return(
            "Can't open database pool",
            ConnectionFailed,
        ))?;

    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;
    run_migrations(&mut *connection)?;
    info!("Database is ready [url: {database_url}]");

    Ok(pool)
}

#[cfg(test)]
pub fn with_temp_database<F, T>(function: F) -> T
where
    F: FnOnce(DbPool) -> T,
{
    let temp_dir = crate::tools::test::tests::temp_dir();
    let database_url = temp_dir.join("database.db").to_str().unwrap().to_string();
    let pool = init_db(&database_url).unwrap();

    let result = function(pool);
    let _ = std::fs::remove_dir_all(temp_dir);

    result
}
