//! Global configuration types.
//!
//! `GlobalConfig` represents the top-level `config.toml` in the data
//! directory. Every section and field has a default, so an empty file (or no
//! file) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `~/.persona/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub retell: RetellConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Bind address for `persona serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Voice agent platform connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetellConfig {
    #[serde(default = "default_retell_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_retell_base_url() -> String {
    "https://api.retellai.com".to_string()
}

fn default_api_key_env() -> String {
    "RETELL_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RetellConfig {
    fn default() -> Self {
        Self {
            base_url: default_retell_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Settings for the terminal dashboard (the API client side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of a running `persona serve`.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Command used to play voice previews; the file path is appended.
    #[serde(default = "default_audio_player")]
    pub audio_player: String,
    /// Directory that audio references such as `/audio/Lisa.wav` resolve against.
    #[serde(default)]
    pub audio_root: Option<String>,
}

fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_audio_player() -> String {
    if cfg!(target_os = "macos") {
        "afplay".to_string()
    } else {
        "aplay".to_string()
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            audio_player: default_audio_player(),
            audio_root: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.retell.api_key_env, "RETELL_API_KEY");
        assert_eq!(config.retell.base_url, "https://api.retellai.com");
        assert_eq!(config.dashboard.server_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_global_config_deserialize_empty() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.retell.timeout_secs, 30);
        assert!(config.dashboard.audio_root.is_none());
    }

    #[test]
    fn test_global_config_deserialize_partial_sections() {
        let toml_str = r#"
[server]
port = 8080

[retell]
base_url = "http://localhost:9999"

[dashboard]
audio_root = "/srv/public"
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.retell.base_url, "http://localhost:9999");
        assert_eq!(config.retell.api_key_env, "RETELL_API_KEY");
        assert_eq!(config.dashboard.audio_root.as_deref(), Some("/srv/public"));
    }
}
