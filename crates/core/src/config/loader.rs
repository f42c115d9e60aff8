use crate::config::types::{
    CardSettings, ConfigFile, LoggingConfig, Profile, ResolvedConfig, SteamSettings,
};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("invalid value for '{0}': {1}")]
    InvalidValue(&'static str, String),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and resolve configuration.
    ///
    /// An explicit `config_path` must exist. When no path is given and the
    /// default file is absent, built-in defaults are used.
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            if config_path.is_some() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Self::defaults(profile_override);
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let mut resolved = Self::from_toml(&s, &path.display().to_string(), profile_override)?;
        resolved.source = Some(path);
        Ok(resolved)
    }

    /// Resolve configuration from TOML text; `origin` names the source in errors.
    pub fn from_toml(
        s: &str,
        origin: &str,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let cf: ConfigFile =
            toml::from_str(s).map_err(|e| ConfigError::ParseError(origin.to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let fallback = Profile::default();
        let prof = match cf.profiles.get(&active) {
            Some(p) => p,
            // A file without profiles still gets the built-in default one.
            None if cf.profiles.is_empty() && active == DEFAULT_PROFILE => &fallback,
            None => return Err(ConfigError::ProfileNotFound(active)),
        };

        Self::resolve_profile(&active, prof, &cf.logging)
    }

    fn defaults(profile_override: Option<&str>) -> Result<ResolvedConfig, ConfigError> {
        match profile_override {
            Some(p) if p != DEFAULT_PROFILE => Err(ConfigError::ProfileNotFound(p.to_string())),
            _ => Ok(ResolvedConfig::default()),
        }
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let card_defaults = CardSettings::default();
        let steam_defaults = SteamSettings::default();

        let max_in_flight = prof.max_in_flight.unwrap_or(card_defaults.max_in_flight);
        if max_in_flight == 0 {
            return Err(ConfigError::InvalidValue("max_in_flight", "must be at least 1".into()));
        }

        let timeout_secs = prof.timeout_secs.unwrap_or(steam_defaults.timeout.as_secs());
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("timeout_secs", "must be at least 1".into()));
        }

        let marker_tag = non_empty("marker_tag", &prof.marker_tag, card_defaults.markers.tag)?;
        let directive =
            non_empty("directive", &prof.directive, card_defaults.markers.directive)?;
        let locale = non_empty("locale", &prof.locale, steam_defaults.locale)?;
        let api_base = http_url("api_base", &prof.api_base, steam_defaults.api_base)?;
        let client_api_base =
            http_url("client_api_base", &prof.client_api_base, card_defaults.client_api_base)?;

        let card = CardSettings {
            mode: prof.mode.unwrap_or(card_defaults.mode),
            fetch_reviews: prof.reviews.unwrap_or(card_defaults.fetch_reviews),
            markers: crate::card::MarkerNames { tag: marker_tag, directive },
            error_prefix: prof.error_prefix.clone().unwrap_or(card_defaults.error_prefix),
            max_in_flight,
            client_script_url: prof
                .client_script_url
                .clone()
                .unwrap_or(card_defaults.client_script_url),
            client_api_base,
            locale: locale.clone(),
        };

        let steam = SteamSettings {
            api_base,
            locale,
            user_agent: prof.user_agent.clone().unwrap_or(steam_defaults.user_agent),
            accept_language: prof
                .accept_language
                .clone()
                .unwrap_or(steam_defaults.accept_language),
            timeout: Duration::from_secs(timeout_secs),
        };

        // Resolve log file path if present
        let logging = if let Some(ref file) = log_cfg.file {
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            log_cfg.clone()
        };

        Ok(ResolvedConfig { active_profile: active.to_string(), source: None, card, steam, logging })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("steamcard").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("steamcard").join("config.toml")
}

fn non_empty(
    key: &'static str,
    value: &Option<String>,
    default: String,
) -> Result<String, ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(ConfigError::InvalidValue(key, "must not be empty".into()))
        }
        Some(v) => Ok(v.trim().to_string()),
        None => Ok(default),
    }
}

fn http_url(
    key: &'static str,
    value: &Option<String>,
    default: String,
) -> Result<String, ConfigError> {
    let url = non_empty(key, value, default)?;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue(key, format!("'{url}' is not an http(s) URL")));
    }
    Ok(url)
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
