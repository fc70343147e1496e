use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::domain::{EmissionFactors, DEFAULT_CARBON_PRICE};
use crate::optimizer::DispatchSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub market: MarketConfig,
    pub dispatch: DispatchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            request_timeout_secs: 10,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Market values the payload may leave out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// €/t CO2 when neither `carbon` nor `co2(euro/ton)` is sent
    pub default_carbon_price: f64,
    pub emissions: EmissionFactors,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            default_carbon_price: DEFAULT_CARBON_PRICE,
            emissions: EmissionFactors::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("PLANNER__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        if cfg.dispatch.epsilon <= 0.0 || !cfg.dispatch.epsilon.is_finite() {
            anyhow::bail!("dispatch.epsilon must be a small positive number, got {}", cfg.dispatch.epsilon);
        }
        if cfg.dispatch.max_search_nodes == 0 {
            anyhow::bail!("dispatch.max_search_nodes must be at least 1");
        }
        Ok(cfg)
    }
}
