use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::domain::FacilityTotals;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub facility: FacilityTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 10,
            max_body_bytes: 1024 * 1024,
            enable_cors: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            facility: FacilityTotals::default(),
        }
    }
}

impl Config {
    /// Struct defaults, overlaid by `config/default.toml` (if present),
    /// overlaid by `ENERGYCALC__`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("ENERGYCALC__").split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_surveyed_facility_totals() {
        let cfg = Config::default();
        assert_eq!(cfg.facility.equipment_count, 81);
        assert_eq!(cfg.facility.total_power, 2330.0);
        assert_eq!(cfg.facility.total_squared_power, 96388.0);
    }

    #[test]
    fn socket_addr_parses_host_and_port() {
        let server = ServerConfig { port: 9090, ..ServerConfig::default() };
        let addr = server.socket_addr().unwrap();
        assert_eq!(addr.port(), 9090);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn socket_addr_rejects_garbage_host() {
        let server = ServerConfig { host: "not a host".to_string(), ..ServerConfig::default() };
        assert!(server.socket_addr().is_err());
    }
}
