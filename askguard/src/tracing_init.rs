use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;

use crate::settings::GuardSettings;

/// Environment variable overriding the log file location.
pub const LOG_ENV: &str = "ASKGUARD_LOG";

/// Where log output goes: `ASKGUARD_LOG`, else `~/.askguard/askguard.log`.
pub fn log_path() -> PathBuf {
    std::env::var_os(LOG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            GuardSettings::settings_dir()
                .map(|dir| dir.join("askguard.log"))
                .unwrap_or_else(|| PathBuf::from("askguard.log"))
        })
}

/// Install the global subscriber. stdout is never written to; it carries
/// the hook response.
pub fn init_tracing() {
    let log_path = log_path();

    let log_file = log_path
        .parent()
        .and_then(|parent| {
            if parent.as_os_str().is_empty() {
                Some(())
            } else {
                std::fs::create_dir_all(parent).ok()
            }
        })
        .and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .ok()
        });

    let layer: Box<dyn Layer<_> + Send + Sync> = match log_file {
        Some(file) => tracing_subscriber::fmt::layer()
            .with_writer(file)
            .pretty()
            .with_ansi(false)
            .with_filter(LevelFilter::from_level(Level::DEBUG))
            .boxed(),
        None => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty()
            .with_ansi(false)
            .with_filter(LevelFilter::from_level(Level::INFO))
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).init()
}
