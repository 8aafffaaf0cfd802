//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `TIENDA_HOST` - Bind address (default: 127.0.0.1)
//! - `TIENDA_PORT` - Listen port (default: 3000)
//! - `TIENDA_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `TIENDA_CATALOG` - Catalog document path or `http(s)` URL (default: `data/products.json`)
//! - `TIENDA_STATIC_DIR` - Static asset directory (default: `crates/storefront/static`)
//! - `TIENDA_DATABASE_URL` - `PostgreSQL` connection string for the session store;
//!   falls back to `DATABASE_URL`. Without either, sessions live in memory.
//! - `TIENDA_CONTACT_WEBHOOK_URL` - Endpoint that receives contact submissions as JSON
//! - `TIENDA_LOG_FORMAT` - `pretty` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the catalog document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// A document fetched over HTTP(S).
    Url(Url),
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::Path(PathBuf::from("data/products.json"))
    }
}

impl FromStr for CatalogSource {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Url::parse(s).map(Self::Url)
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Catalog document location
    pub catalog: CatalogSource,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// `PostgreSQL` URL for the session store (contains password)
    pub database_url: Option<SecretString>,
    /// Contact submission webhook
    pub contact_webhook: Option<Url>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog: CatalogSource::default(),
            static_dir: PathBuf::from("crates/storefront/static"),
            database_url: None,
            contact_webhook: None,
            log_format: LogFormat::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_optional_env::<IpAddr>("TIENDA_HOST")?.unwrap_or(defaults.host);
        let port = parse_optional_env::<u16>("TIENDA_PORT")?.unwrap_or(defaults.port);
        let base_url = get_optional_env("TIENDA_BASE_URL").unwrap_or(defaults.base_url);
        let catalog = parse_optional_env::<CatalogSource>("TIENDA_CATALOG")?
            .unwrap_or(defaults.catalog);
        let static_dir = get_optional_env("TIENDA_STATIC_DIR")
            .map_or(defaults.static_dir, PathBuf::from);
        let database_url = get_database_url("TIENDA_DATABASE_URL");
        let contact_webhook = parse_optional_env::<Url>("TIENDA_CONTACT_WEBHOOK_URL")?;
        let log_format = parse_optional_env::<LogFormat>("TIENDA_LOG_FORMAT")?
            .unwrap_or(defaults.log_format);

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            static_dir,
            database_url,
            contact_webhook,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional environment variable.
fn parse_optional_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    get_optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
}
