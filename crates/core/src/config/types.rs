use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::card::MarkerNames;

pub const DEFAULT_API_BASE: &str = "https://store.steampowered.com";

/// The store filters non-browser agents, so the default looks like a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One named set of resolver options. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub mode: Option<RenderMode>,
    /// Fetch review summaries alongside details (default: true).
    pub reviews: Option<bool>,
    pub marker_tag: Option<String>,
    pub directive: Option<String>,
    pub error_prefix: Option<String>,
    pub max_in_flight: Option<usize>,
    pub api_base: Option<String>,
    pub locale: Option<String>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Where generated pages load the client module from (client mode).
    pub client_script_url: Option<String>,
    /// API base used by the client module; usually a CORS proxy in front of the store.
    pub client_api_base: Option<String>,
}

/// When cards are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Fetch while the document is built and emit finished cards.
    #[default]
    Build,
    /// Emit loading cards and let the client module fetch in the browser.
    Client,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Build => "build",
            RenderMode::Client => "client",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Options for the resolver pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSettings {
    pub mode: RenderMode,
    pub fetch_reviews: bool,
    pub markers: MarkerNames,
    pub error_prefix: String,
    pub max_in_flight: usize,
    pub client_script_url: String,
    pub client_api_base: String,
    pub locale: String,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Build,
            fetch_reviews: true,
            markers: MarkerNames::default(),
            error_prefix: "Failed to load Steam game".to_string(),
            max_in_flight: 6,
            client_script_url: "/steam-card.js".to_string(),
            client_api_base: DEFAULT_API_BASE.to_string(),
            locale: "english".to_string(),
        }
    }
}

/// Options for the store API client.
#[derive(Debug, Clone, PartialEq)]
pub struct SteamSettings {
    pub api_base: String,
    pub locale: String,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout: Duration,
}

impl Default for SteamSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            locale: "english".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    /// Config file the settings came from; `None` when built-in defaults are used.
    pub source: Option<PathBuf>,
    pub card: CardSettings,
    pub steam: SteamSettings,
    pub logging: LoggingConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            active_profile: "default".to_string(),
            source: None,
            card: CardSettings::default(),
            steam: SteamSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}
