pub mod build;
pub mod client_script;
pub mod doctor;
pub mod lookup;
pub mod render;
pub mod tree;

use std::fmt::Display;
use std::path::Path;

use steamcard_core::card::{CancelSignal, ResolveReport, Resolver, cancel_pair};
use steamcard_core::config::{ConfigLoader, ResolvedConfig, default_config_path};
use steamcard_core::SteamClient;

use crate::logging;

/// Print the failure banner and exit with status 1.
pub fn fail(command: &str, err: impl Display) -> ! {
    println!("FAIL steamcard {command}");
    println!("{err}");
    logging::flush();
    std::process::exit(1);
}

/// Load config and install logging, or fail the command.
pub fn load_config(command: &str, config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL steamcard {command}");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&rc) {
        fail(command, format!("cannot open log file: {e}"));
    }
    tracing::debug!(profile = %rc.active_profile, mode = rc.card.mode.as_str(), "config loaded");

    rc
}

/// Resolver backed by the live store client.
pub fn steam_resolver(command: &str, rc: &ResolvedConfig) -> Resolver<SteamClient> {
    match SteamClient::new(&rc.steam) {
        Ok(client) => Resolver::new(rc.card.clone(), client),
        Err(e) => fail(command, e),
    }
}

/// A cancellation signal that fires on Ctrl-C. Outstanding lookups then
/// render as errors and the command still writes its output.
pub fn cancel_on_ctrl_c() -> CancelSignal {
    let (handle, signal) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling outstanding lookups");
            handle.cancel();
        }
    });
    signal
}

pub fn summary(report: &ResolveReport) -> String {
    format!(
        "{} resolved, {} failed, {} skipped",
        report.resolved, report.failed, report.skipped
    )
}
