use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "jackfruit.toml",
    "config/jackfruit.toml",
    "crates/config/jackfruit.toml",
    "../jackfruit.toml",
    "../config/jackfruit.toml",
];

/// Secret used when nothing else is configured. Only suitable for local development.
pub const DEVELOPMENT_JWT_SECRET: &str = "jackfruit-development-secret-change-me";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://jackfruit.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for issuing and verifying JSON Web Tokens.
///
/// ```
/// use jackfruit_config::AuthConfig;
///
/// let auth = AuthConfig::default();
/// assert_eq!(auth.access_ttl_seconds, 300);
/// assert_eq!(auth.refresh_ttl_seconds, 86_400);
/// assert_eq!(auth.issuer, "jackfruit");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_secret")]
    pub jwt_secret: String,
    #[serde(default = "AuthConfig::default_issuer")]
    pub issuer: String,
    #[serde(default = "AuthConfig::default_audience")]
    pub audience: String,
    #[serde(default = "AuthConfig::default_access_ttl")]
    pub access_ttl_seconds: u64,
    #[serde(default = "AuthConfig::default_refresh_ttl")]
    pub refresh_ttl_seconds: u64,
}

impl AuthConfig {
    fn default_secret() -> String {
        DEVELOPMENT_JWT_SECRET.to_string()
    }

    fn default_issuer() -> String {
        "jackfruit".to_string()
    }

    fn default_audience() -> String {
        "jackfruit-api".to_string()
    }

    const fn default_access_ttl() -> u64 {
        300
    }

    const fn default_refresh_ttl() -> u64 {
        86_400
    }

    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Self::default_secret(),
            issuer: Self::default_issuer(),
            audience: Self::default_audience(),
            access_ttl_seconds: Self::default_access_ttl(),
            refresh_ttl_seconds: Self::default_refresh_ttl(),
        }
    }
}

fn clamp_ttl(value: u64) -> u64 {
    value.min(i64::MAX as u64)
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use jackfruit_config::load;
///
/// std::env::remove_var("JACKFRUIT_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("auth.jwt_secret", defaults.auth.jwt_secret.clone())?
        .set_default("auth.issuer", defaults.auth.issuer.clone())?
        .set_default("auth.audience", defaults.auth.audience.clone())?
        .set_default(
            "auth.access_ttl_seconds",
            i64::try_from(defaults.auth.access_ttl_seconds).unwrap_or(i64::MAX),
        )?
        .set_default(
            "auth.refresh_ttl_seconds",
            i64::try_from(defaults.auth.refresh_ttl_seconds).unwrap_or(i64::MAX),
        )?;

    let environment_overrides = config::Environment::with_prefix("JACKFRUIT").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("JACKFRUIT_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via JACKFRUIT_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    config.auth.access_ttl_seconds = clamp_ttl(config.auth.access_ttl_seconds);
    config.auth.refresh_ttl_seconds = clamp_ttl(config.auth.refresh_ttl_seconds);

    if config.auth.jwt_secret.trim().is_empty() {
        anyhow::bail!("auth.jwt_secret must not be empty");
    }

    if config.auth.uses_development_secret() {
        warn!("using the built-in development JWT secret; set JACKFRUIT__AUTH__JWT_SECRET");
    }

    debug!(
        http = ?config.http,
        database = ?config.database,
        issuer = %config.auth.issuer,
        "loaded backend configuration"
    );
    Ok(config)
}
