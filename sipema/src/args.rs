//! [`Args`] definitions.

use clap::Parser;

/// Session host of the SIPEMA estate-portal data store.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Run against the in-memory demo dataset instead of PostgreSQL.
    #[arg(long)]
    pub demo: bool,

    /// ID of the user profile to sign the session in as.
    #[arg(long, value_name = "USER_ID")]
    pub user: Option<String>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
