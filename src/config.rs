//! Command line and environment configuration for the server.

use std::net::{Ipv4Addr, SocketAddr};

use clap::Parser;

/// The port the server listens on when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 5001;

/// The REST API server for recording transactions.
///
/// Every option can also be set through an environment variable, which may
/// come from a `.env` file in the working directory.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Connection string for the application SQLite database.
    ///
    /// Either a file path, `:memory:`, or either of those prefixed with
    /// `sqlite://`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Config {
    /// The location of the SQLite database with any URL scheme removed.
    pub fn database_path(&self) -> &str {
        let url = self.database_url.as_str();

        url.strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url)
    }

    /// The address to bind the HTTP listener to, on all interfaces.
    pub fn socket_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
