//! Listener settings read from the environment.

use std::net::{Ipv4Addr, SocketAddr};

use crate::error::GatewayError;

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Port used when [`PORT_ENV`] is unset or empty.
pub const DEFAULT_PORT: u16 = 8080;

/// Gateway listener configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    pub port: u16,
}

impl GatewayConfig {
    /// Read the listen port from `PORT`.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidConfig`] if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_env_value(std::env::var(PORT_ENV).ok().as_deref())
    }

    /// Build a config from an optional `PORT` value; empty counts as unset.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidConfig`] if the value is not a valid port number.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, GatewayError> {
        let port = match value.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<u16>().map_err(|_| {
                GatewayError::InvalidConfig { key: PORT_ENV, value: raw.to_owned() }
            })?,
            _ => DEFAULT_PORT,
        };
        Ok(Self { port })
    }

    /// Address to bind: all interfaces on the configured port.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}
