use super::SimpleResult;
use clap::{Arg, ArgMatches, Command, value_parser};
use std::fs;
use std::path::Path;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "3000";

pub fn subcommand() -> Command {
    Command::new("serve")
        .about("Launches the catalog server")
        .arg(
            Arg::new("ADDRESS")
                .short('a')
                .long("address")
                .help("Specifies the server address")
                .required(false)
                .num_args(1)
                .env("ADDRESS")
                .default_value(DEFAULT_ADDRESS),
        )
        .arg(
            Arg::new("PORT")
                .short('p')
                .long("port")
                .help("Specifies the server port")
                .required(false)
                .num_args(1)
                .env("PORT")
                .default_value(DEFAULT_PORT)
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("DATABASE")
                .short('d')
                .long("database")
                .help("Specifies the database url or path")
                .required(false)
                .num_args(1)
                .env("DATABASE_URL"),
        )
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub address: String,
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> SimpleResult<Self> {
        let address = matches
            .get_one::<String>("ADDRESS")
            .cloned()
            .unwrap_or_else(|| String::from(DEFAULT_ADDRESS));
        let port = match matches.get_one::<u16>("PORT") {
            Some(port) => *port,
            None => try_with!(DEFAULT_PORT.parse::<u16>(), "Invalid default port"),
        };
        let database_url = match matches.get_one::<String>("DATABASE") {
            Some(database_url) => database_url.clone(),
            None => get_default_database_url()?,
        };
        Ok(Self {
            address,
            port,
            database_url,
        })
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

pub fn get_default_database_url() -> SimpleResult<String> {
    let data_directory = match dirs::data_dir() {
        Some(data_directory) => data_directory,
        None => bail!("Failed to locate the data directory"),
    };
    get_database_url_in(&data_directory.join(env!("CARGO_PKG_NAME")))
}

pub fn get_database_url_in(directory: &Path) -> SimpleResult<String> {
    try_with!(
        fs::create_dir_all(directory),
        "Failed to create {}",
        directory.display()
    );
    let db_file = directory.join(format!("{}.db", env!("CARGO_PKG_NAME")));
    Ok(format!("sqlite://{}", db_file.display()))
}
