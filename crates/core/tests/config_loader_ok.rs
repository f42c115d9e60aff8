use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use steamcard_core::config::loader::ConfigLoader;
use steamcard_core::config::RenderMode;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
mode = "build"
reviews = false
locale = "german"
timeout_secs = 3
max_in_flight = 2
user_agent = "SteamCardFetcher/1.0"

[logging]
level = "debug"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.source.as_deref(), Some(cfg_path.as_path()));
    assert_eq!(rc.card.mode, RenderMode::Build);
    assert!(!rc.card.fetch_reviews);
    assert_eq!(rc.card.max_in_flight, 2);
    assert_eq!(rc.card.locale, "german");
    assert_eq!(rc.steam.locale, "german");
    assert_eq!(rc.steam.timeout, Duration::from_secs(3));
    assert_eq!(rc.steam.user_agent, "SteamCardFetcher/1.0");
    assert_eq!(rc.steam.api_base, "https://store.steampowered.com");
    assert_eq!(rc.logging.level, "debug");
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("steamcard/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
mode = "build"

[profiles.docs]
mode = "client"
client_script_url = "/assets/steam-card.js"
client_api_base = "https://proxy.example/fetch/https://store.steampowered.com"
marker_tag = "game-card"
directive = "game"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("docs")).expect("should load");
    assert_eq!(rc.active_profile, "docs");
    assert_eq!(rc.card.mode, RenderMode::Client);
    assert_eq!(rc.card.client_script_url, "/assets/steam-card.js");
    assert_eq!(rc.card.markers.tag, "game-card");
    assert_eq!(rc.card.markers.directive, "game");
    assert!(rc.card.client_api_base.starts_with("https://proxy.example/"));
}

#[test]
fn file_without_profiles_uses_defaults() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "version = 1\n");

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.card.mode, RenderMode::Build);
    assert!(rc.card.fetch_reviews);
    assert_eq!(rc.card.max_in_flight, 6);
    assert_eq!(rc.card.markers.tag, "steam-game");
    assert_eq!(rc.steam.timeout, Duration::from_secs(10));
    assert_eq!(rc.steam.accept_language, "en-US");
    assert_eq!(rc.logging.level, "warn");
}

#[test]
fn log_file_path_is_expanded() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let log_path = tmp.path().join("logs/steamcard.log");
    let toml = format!(
        r#"
version = 1

[logging]
level = "info"
file_level = "trace"
file = "{}"
"#,
        log_path.display()
    );
    write_file(&cfg_path, &toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.logging.file.as_deref(), Some(log_path.as_path()));
    assert_eq!(rc.logging.file_level.as_deref(), Some("trace"));
}

#[test]
fn from_toml_parses_inline_text() {
    let rc = ConfigLoader::from_toml("version = 1\n[profiles.default]\nreviews = true\n", "inline", None)
        .expect("should parse");
    assert!(rc.card.fetch_reviews);
    assert!(rc.source.is_none());
}
