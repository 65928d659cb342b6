//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use http::header::{HeaderValue, InvalidHeaderValue};
use serde::Deserialize;
use service::infra::postgres;
use smart_default::SmartDefault;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

impl Cors {
    /// Builds a [`CorsLayer`] letting the listed origins call the GraphQL API.
    ///
    /// `*` allows any origin.
    ///
    /// # Errors
    ///
    /// If any of the origins is not a valid header value.
    pub fn layer(&self) -> Result<CorsLayer, InvalidHeaderValue> {
        let origins = if self.origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            self.origins
                .iter()
                .map(|o| o.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?
                .into()
        };
        Ok(CorsLayer::new()
            .allow_methods([
                http::Method::GET,
                http::Method::OPTIONS,
                http::Method::POST,
            ])
            .allow_headers([http::header::CONTENT_TYPE])
            .allow_origin(origins))
    }
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,

    /// Connections pool configuration.
    pub pool: Pool,
}

/// Postgres connections pool configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Pool {
    /// Maximum number of simultaneously open connections.
    #[default(16)]
    pub max_size: usize,

    /// Timeout to wait for a free connection from the pool.
    #[default(time::Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub wait_timeout: time::Duration,

    /// Timeout to establish a new connection.
    #[default(time::Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub create_timeout: time::Duration,

    /// Timeout to check a returned connection before reusing it.
    #[default(time::Duration::from_secs(1))]
    #[serde(with = "humantime_serde")]
    pub recycle_timeout: time::Duration,
}

impl From<Pool> for postgres::PoolConfig {
    fn from(value: Pool) -> Self {
        let Pool {
            max_size,
            wait_timeout,
            create_timeout,
            recycle_timeout,
        } = value;

        let mut conf = Self::new(max_size);
        conf.timeouts = postgres::Timeouts {
            wait: Some(wait_timeout),
            create: Some(create_timeout),
            recycle: Some(recycle_timeout),
        };
        conf
    }
}

impl From<Postgres> for postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
            pool,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            pool: Some(pool.into()),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Config, Cors, LogLevel};

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("non-existent.toml").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.server.cors.origins, ["*"]);
        assert_eq!(conf.postgres.pool.max_size, 16);
        assert!(matches!(conf.log.level, LogLevel::Info));
    }

    #[test]
    fn builds_cors_layer() {
        assert!(Cors::default().layer().is_ok());

        let cors = Cors {
            origins: vec!["https://hotel.example".to_owned()],
        };
        assert!(cors.layer().is_ok());

        let cors = Cors {
            origins: vec!["bad\norigin".to_owned()],
        };
        assert!(cors.layer().is_err());
    }
}
