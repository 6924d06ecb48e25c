//! Command-line and environment configuration of the HTTP server.

use autoprice::PipelineConfig;
use clap::Parser;
use std::net::SocketAddr;

/// Settings for `autoprice-server`.
#[derive(Parser, Debug, Clone)]
#[command(name = "autoprice-server", version, about = "Vehicle price analytics service")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "AUTOPRICE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "AUTOPRICE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Skip chart rendering in analysis responses.
    #[arg(long)]
    pub no_charts: bool,

    /// Default log filter, overridden by `RUST_LOG`.
    #[arg(long, env = "AUTOPRICE_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address {}: {}", addr, e))
    }

    /// Pipeline settings applied to every request.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig::default().with_render_charts(!self.no_charts)
    }
}
