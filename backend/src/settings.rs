//! Process settings loaded via OrthoConfig.
//!
//! Values come from `WORKLOG_*` environment variables, command-line flags or
//! a configuration file. Session cookie settings are read separately by
//! [`crate::inbound::http::session_config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Bind address and storage selection.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WORKLOG")]
pub struct AppSettings {
    /// Interface to listen on.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one, records live in process memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Socket address the server binds to, `127.0.0.1:5000` by default.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured pool size, falling back to the default.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
