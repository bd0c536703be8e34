use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "roster.toml",
    "config/roster.toml",
    "crates/config/roster.toml",
    "../roster.toml",
    "../config/roster.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
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
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub url: String,
    /// Database name holding the user collection.
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://127.0.0.1:27017".to_string(),
            database: "roster".to_string(),
        }
    }
}

/// Token signing configuration.
///
/// There is deliberately no default secret: the server refuses to issue
/// tokens unless one is supplied via file or environment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub token_secret: Option<String>,
}

impl AuthConfig {
    /// The signing secret, rejecting absent or empty values.
    pub fn require_secret(&self) -> anyhow::Result<&str> {
        match self.token_secret.as_deref() {
            Some(secret) if !secret.trim().is_empty() => Ok(secret),
            _ => anyhow::bail!(
                "auth.token_secret is not configured; set it in roster.toml or ROSTER_AUTH__TOKEN_SECRET"
            ),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use roster_config::load;
///
/// std::env::remove_var("ROSTER_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default("database.database", defaults.database.database.clone())
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("ROSTER").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ROSTER_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ROSTER_CONFIG");
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

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn defaults_apply_without_file_or_env() {
        std::env::remove_var("ROSTER_CONFIG");
        std::env::remove_var("ROSTER_HTTP__PORT");
        std::env::remove_var("ROSTER_AUTH__TOKEN_SECRET");

        let config = load().unwrap();
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.database.database, "roster");
        assert!(config.auth.token_secret.is_none());
    }

    #[test]
    #[serial]
    fn environment_overrides_take_precedence() {
        std::env::remove_var("ROSTER_CONFIG");
        std::env::set_var("ROSTER_HTTP__PORT", "8088");
        std::env::set_var("ROSTER_AUTH__TOKEN_SECRET", "env-secret");

        let config = load().unwrap();
        assert_eq!(config.http.port, 8088);
        assert_eq!(config.auth.token_secret.as_deref(), Some("env-secret"));

        std::env::remove_var("ROSTER_HTTP__PORT");
        std::env::remove_var("ROSTER_AUTH__TOKEN_SECRET");
    }

    #[test]
    #[serial]
    fn config_file_is_loaded_when_pointed_at() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[database]\nurl = \"mongodb://db.internal:27017\"\ndatabase = \"accounts\"\n\n[auth]\ntoken_secret = \"file-secret\"\n"
        )
        .unwrap();

        std::env::set_var("ROSTER_CONFIG", path.display().to_string());
        let config = load().unwrap();
        std::env::remove_var("ROSTER_CONFIG");

        assert_eq!(config.database.url, "mongodb://db.internal:27017");
        assert_eq!(config.database.database, "accounts");
        assert_eq!(config.auth.token_secret.as_deref(), Some("file-secret"));
    }

    #[test]
    fn require_secret_rejects_empty_values() {
        let missing = AuthConfig { token_secret: None };
        assert!(missing.require_secret().is_err());

        let blank = AuthConfig {
            token_secret: Some("   ".to_string()),
        };
        assert!(blank.require_secret().is_err());

        let present = AuthConfig {
            token_secret: Some("s3cret".to_string()),
        };
        assert_eq!(present.require_secret().unwrap(), "s3cret");
    }
}
