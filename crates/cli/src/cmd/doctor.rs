use std::path::Path;

use super::load_config;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = load_config("doctor", config, profile);

    println!("OK   steamcard doctor");
    println!(
        "path: {}",
        rc.source.as_ref().map_or_else(
            || format!("(built-in defaults, looked for {})", steamcard_core::config::default_config_path().display()),
            |p| p.display().to_string()
        )
    );
    println!("profile: {}", rc.active_profile);
    println!("mode: {}", rc.card.mode.as_str());
    println!("reviews: {}", rc.card.fetch_reviews);
    println!("markers: <{}> ::{}", rc.card.markers.tag, rc.card.markers.directive);
    println!("error_prefix: {}", rc.card.error_prefix);
    println!("max_in_flight: {}", rc.card.max_in_flight);
    println!("api_base: {}", rc.steam.api_base);
    println!("locale: {}", rc.steam.locale);
    println!("accept_language: {}", rc.steam.accept_language);
    println!("timeout: {}s", rc.steam.timeout.as_secs());
    println!("client_script_url: {}", rc.card.client_script_url);
    println!("client_api_base: {}", rc.card.client_api_base);
    println!("logging.level: {}", rc.logging.level);
    if let Some(ref file) = rc.logging.file {
        println!("logging.file: {}", file.display());
    }
}
