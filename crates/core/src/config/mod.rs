//! TOML configuration: profiles of resolver options plus logging.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{CardSettings, RenderMode, ResolvedConfig, SteamSettings};
