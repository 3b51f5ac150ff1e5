//! Configuration for the Turnstile API service.
//!
//! Loaded from `turnstile.toml` (`[api]` and `[neo4j]` sections) with
//! `TURNSTILE`-prefixed environment variable overrides, `__` separated
//! (e.g. `TURNSTILE_API__PORT=9090`, `TURNSTILE__NEO4J__PASSWORD=...`).
//! Credentials never live in code.

use serde::Deserialize;

use turnstile_graph::GraphConfig;

/// The `[api]` section: where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bind address (default: "0.0.0.0").
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Listen port (default: 8080).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// The socket address string to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Load the `[api]` section, falling back to defaults when absent.
pub fn load_api_config(file_prefix: &str) -> anyhow::Result<ApiConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("TURNSTILE_API")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<ApiConfig>("api") {
        Ok(c) => Ok(c),
        Err(_) => Ok(ApiConfig::default()),
    }
}

/// Load the `[neo4j]` section into a [`GraphConfig`].
pub fn load_graph_config(file_prefix: &str) -> GraphConfig {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("TURNSTILE")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match cfg {
        Ok(c) => GraphConfig {
            uri: c
                .get_string("neo4j.uri")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            user: c
                .get_string("neo4j.user")
                .unwrap_or_else(|_| "neo4j".to_string()),
            password: c
                .get_string("neo4j.password")
                .unwrap_or_else(|_| "turnstile-dev".to_string()),
            ..Default::default()
        },
        Err(_) => GraphConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_config() {
        let config = ApiConfig::default();
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_api_config("no-such-config-file").unwrap();
        assert_eq!(config.port, 8080);

        let graph = load_graph_config("no-such-config-file");
        assert_eq!(graph.uri, "bolt://localhost:7687");
        assert_eq!(graph.user, "neo4j");
    }
}
