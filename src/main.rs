#[macro_use]
extern crate simple_error;

mod config;
mod database;
mod error;
mod games;
mod genres;
mod model;
mod publishers;
mod render;
mod seed;
mod server;

use clap::Command;
use config::Config;
use database::*;
use dotenvy::dotenv;
use simple_error::SimpleError;

type SimpleResult<T> = Result<T, SimpleError>;

#[tokio::main]
async fn main() -> SimpleResult<()> {
    dotenv().ok();
    env_logger::init();

    let matches = Command::new(env!("CARGO_BIN_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .subcommands([config::subcommand()])
        .arg_required_else_help(true)
        .get_matches();

    if let Some(("serve", matches)) = matches.subcommand() {
        let config = Config::from_matches(matches)?;
        log::info!("Using database {}", &config.database_url);

        let pool = establish_connection(&config.database_url).await?;
        if let Err(error) = seed::seed_genres(&pool).await {
            log::error!("{}", error);
            close_connection(&pool).await;
            return Err(error);
        }

        server::main(pool, &config).await?;
    }

    Ok(())
}
