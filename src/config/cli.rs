use crate::config::site_config::SiteConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "agency-site")]
#[command(about = "Backend API for the company website: case studies, search and contact form")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to bind (overrides [server].host)")]
    pub host: Option<IpAddr>,

    #[arg(long, short, help = "Port to listen on (overrides [server].port)")]
    pub port: Option<u16>,

    #[arg(long, help = "Catalog TOML file (overrides [catalog].path)")]
    pub catalog: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the file configuration (or defaults) and applies CLI overrides.
    pub fn resolve(&self) -> Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                SiteConfig::from_file(path)?
            }
            None => SiteConfig::default(),
        };

        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(catalog) = &self.catalog {
            config.catalog.path = Some(catalog.clone());
        }

        Ok(config)
    }
}
