use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "campus-coffee")]
#[command(about = "Manage campus points of sale and import them from OpenStreetMap")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the OSM node API (the node ID is appended)
    #[arg(long)]
    pub api_endpoint: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch an OSM node and store it as a POS
    Import {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        node_id: u64,
    },
    /// Convert a local OSM XML document without network access
    Convert {
        file: PathBuf,

        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        node_id: u64,
    },
}

impl CliConfig {
    pub fn resolve(&self) -> Result<AppConfig> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        Ok(AppConfig::merge(
            file,
            self.api_endpoint.clone(),
            self.verbose,
            self.json_logs,
        ))
    }
}
