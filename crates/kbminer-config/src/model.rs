// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for kbminer.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Credentials are optional here: a missing value
//! surfaces later as a connection or login failure, not as a config error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level kbminer configuration.
///
/// Resolved once at startup and passed by reference to each component.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KbMinerConfig {
    /// Helpdesk database connection.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// AI chat-completion endpoint.
    #[serde(default)]
    pub ai: AiConfig,

    /// Helpdesk REST API.
    #[serde(default)]
    pub glpi: GlpiConfig,

    /// Processed-ticket history file.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Mining pass behavior.
    #[serde(default)]
    pub miner: MinerConfig,
}

/// Helpdesk database connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database host. Connections are direct, never tunneled.
    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default, deserialize_with = "lenient_string")]
    pub user: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,

    /// Schema name of the helpdesk database.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: None,
            password: None,
            name: None,
        }
    }
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    3306
}

/// AI chat-completion endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AiConfig {
    /// Bearer key for the completion endpoint.
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key: Option<String>,

    /// Full URL of the chat-completions endpoint.
    #[serde(default = "default_ai_url")]
    pub url: String,

    /// Model identifier sent with every request.
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: Option<String>,

    /// Value for the `HTTP-Referer` header; some models require it.
    #[serde(default, deserialize_with = "lenient_string")]
    pub site_url: Option<String>,

    /// Sampling temperature. Kept near zero so classification is stable.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: default_ai_url(),
            model: None,
            site_url: None,
            temperature: default_temperature(),
            timeout_secs: default_ai_timeout_secs(),
        }
    }
}

fn default_ai_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_ai_timeout_secs() -> u64 {
    120
}

/// Helpdesk REST API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GlpiConfig {
    /// Base URL of the REST API, e.g. `https://helpdesk.example.com/apirest.php`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub app_token: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub user_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_glpi_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GlpiConfig {
    fn default() -> Self {
        Self {
            url: None,
            app_token: None,
            user_token: None,
            timeout_secs: default_glpi_timeout_secs(),
        }
    }
}

fn default_glpi_timeout_secs() -> u64 {
    30
}

/// History file settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Path of the newline-delimited processed-ticket file.
    ///
    /// A relative path is resolved against the directory holding the
    /// `kbminer` executable, not the working directory, so a cron job
    /// started from `$HOME` still finds the same history.
    #[serde(default = "default_history_path")]
    pub path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

impl HistoryConfig {
    /// The history location, with a relative `path` joined onto `base_dir`.
    pub fn resolve(&self, base_dir: &Path) -> PathBuf {
        let path = Path::new(&self.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }
}

fn default_history_path() -> String {
    "processed_tickets.txt".to_string()
}

/// Mining pass settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MinerConfig {
    /// Maximum number of tickets fetched per pass.
    #[serde(default = "default_ticket_limit")]
    pub ticket_limit: u32,

    /// Pause between tickets, throttling calls to the AI endpoint.
    #[serde(default = "default_ticket_delay_secs")]
    pub ticket_delay_secs: u64,

    /// Case-sensitive substrings that exclude a ticket by title.
    #[serde(default = "default_excluded_title_patterns")]
    pub excluded_title_patterns: Vec<String>,

    /// Solutions must be strictly longer than this many characters.
    #[serde(default = "default_min_resolution_len")]
    pub min_resolution_len: u32,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            ticket_limit: default_ticket_limit(),
            ticket_delay_secs: default_ticket_delay_secs(),
            excluded_title_patterns: default_excluded_title_patterns(),
            min_resolution_len: default_min_resolution_len(),
            log_level: default_log_level(),
        }
    }
}

fn default_ticket_limit() -> u32 {
    10
}

fn default_ticket_delay_secs() -> u64 {
    3
}

fn default_excluded_title_patterns() -> Vec<String> {
    vec![
        "Project".to_string(),
        "Deploy".to_string(),
        "Meeting".to_string(),
    ]
}

fn default_min_resolution_len() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Accepts strings, numbers and booleans for text fields.
///
/// Covers unquoted TOML values such as `password = 123456`. Environment
/// values never get here as numbers: the loader reads text settings raw.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
        Bool(bool),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_behavior() {
        let config = KbMinerConfig::default();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 3306);
        assert_eq!(
            config.ai.url,
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert!((config.ai.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.history.path, "processed_tickets.txt");
        assert_eq!(config.miner.ticket_limit, 10);
        assert_eq!(config.miner.ticket_delay_secs, 3);
        assert_eq!(config.miner.min_resolution_len, 10);
        assert_eq!(
            config.miner.excluded_title_patterns,
            vec!["Project", "Deploy", "Meeting"]
        );
    }

    #[test]
    fn relative_history_path_follows_base_dir() {
        let history = HistoryConfig::default();
        assert_eq!(
            history.resolve(Path::new("/opt/kbminer")),
            PathBuf::from("/opt/kbminer/processed_tickets.txt")
        );
    }

    #[test]
    fn absolute_history_path_is_unchanged() {
        let history = HistoryConfig {
            path: "/var/lib/kbminer/history.txt".into(),
        };
        assert_eq!(
            history.resolve(Path::new("/opt/kbminer")),
            PathBuf::from("/var/lib/kbminer/history.txt")
        );
    }

    #[test]
    fn numeric_password_is_kept_as_text() {
        let config: KbMinerConfig = toml::from_str(
            r#"
[database]
password = 123456
"#,
        )
        .unwrap();
        assert_eq!(config.database.password.as_deref(), Some("123456"));
    }

    #[test]
    fn unknown_miner_key_is_rejected() {
        let result = toml::from_str::<KbMinerConfig>(
            r#"
[miner]
ticket_limt = 5
"#,
        );
        assert!(result.is_err());
    }
}
