//! For reading application configuration.

use serde::Deserialize;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// API documentation configuration.
    #[serde(default)]
    pub docs: DocsConfig,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Server address.
    pub http_address: String,
    /// Server http port.
    pub http_port: u16,
    /// How long a request may take before it is answered with a timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Maximum number of requests handled at once.
    pub concurrency_limit: usize,
}

impl ServerConfig {
    /// The address to bind to. Works for both IPv4 and IPv6 addresses.
    pub fn bind_address(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.http_address.parse()?;
        Ok(SocketAddr::new(ip, self.http_port))
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling JSON log files. Stdout only if unset.
    pub directory: Option<String>,
}

/// API documentation configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct DocsConfig {
    /// Serve the OpenAPI document and Swagger UI.
    pub enabled: bool,
}

/// Retrieve [`Config`] from defaults, an optional `config.toml` and `APP__` environment variables.
#[tracing::instrument]
pub fn load_config() -> Result<Config, config::ConfigError> {
    load_config_from(
        config::File::with_name("config").required(false),
        environment(),
    )
}

/// Environment variables such as `APP__SERVER__HTTP_PORT`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("app")
        .prefix_separator("__")
        .separator("__")
}

/// Layers `file` over the built-in defaults, and `env` over both.
pub(crate) fn load_config_from<F>(
    file: F,
    env: config::Environment,
) -> Result<Config, config::ConfigError>
where
    F: config::Source + Send + Sync + 'static,
{
    let config = config::Config::builder()
        .set_default("server.http_address", "0.0.0.0")?
        .set_default("server.http_port", 8080)?
        .set_default("server.request_timeout", "10s")?
        .set_default("server.concurrency_limit", 500)?
        .set_default("docs.enabled", false)?
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()?;
    Ok(config)
}
