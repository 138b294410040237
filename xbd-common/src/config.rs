//! Configuration loading
//!
//! Resolution order for the config file, highest priority first:
//! 1. Command-line argument
//! 2. `XBD_CONFIG` environment variable
//! 3. `<user config dir>/xbd/config.toml`
//! 4. Compiled defaults
//!
//! OAuth credentials may additionally be supplied through `XBD_CLIENT_ID`,
//! `XBD_CLIENT_SECRET` and `XBD_REDIRECT_URI`, which override the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{Error, Result};

/// Sentinel title of the item group that marks cross-board dependency items.
pub const DEFAULT_DEPENDENCY_GROUP: &str = "🔒 CrossBoard Dependency – DO NOT TOUCH";

const DEFAULT_API_URL: &str = "https://api.monday.com/v2";
const DEFAULT_AUTH_URL: &str = "https://auth.monday.com/oauth2/authorize";
const DEFAULT_TOKEN_URL: &str = "https://auth.monday.com/oauth2/token";

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// GraphQL endpoint of the work-management API
    pub api_url: String,
    /// OAuth authorize endpoint
    pub auth_url: String,
    /// OAuth token exchange endpoint
    pub token_url: String,
    /// Where the OAuth callback redirects the browser after success
    pub client_url: String,
    /// Title of the dependency group scanned for linked items
    pub dependency_group: String,
    pub oauth: OauthConfig,
}

/// OAuth application credentials
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OauthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5730,
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_url: "http://localhost:3000".to_string(),
            dependency_group: DEFAULT_DEPENDENCY_GROUP.to_string(),
            oauth: OauthConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration following the resolution order above.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let mut config = match resolve_config_file(cli_path) {
            Some(path) => {
                let content = std::fs::read_to_string(&path)?;
                let config: Config = toml::from_str(&content)
                    .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => {
                info!("No config file found, using compiled defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(client_id) = std::env::var("XBD_CLIENT_ID") {
            self.oauth.client_id = client_id;
        }
        if let Ok(client_secret) = std::env::var("XBD_CLIENT_SECRET") {
            self.oauth.client_secret = client_secret;
        }
        if let Ok(redirect_uri) = std::env::var("XBD_REDIRECT_URI") {
            self.oauth.redirect_uri = redirect_uri;
        }
    }
}

fn resolve_config_file(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var("XBD_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|d| d.join("xbd").join("config.toml"))
        .filter(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.port, 5730);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.dependency_group, DEFAULT_DEPENDENCY_GROUP);
        assert!(config.oauth.client_id.is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let config: Config = toml::from_str(
            r#"
            port = 8080
            dependency_group = "Linked items"

            [oauth]
            client_id = "abc123"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.dependency_group, "Linked items");
        assert_eq!(config.oauth.client_id, "abc123");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn loads_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9999").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 9999);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(Error::Config(_))
        ));
    }
}
