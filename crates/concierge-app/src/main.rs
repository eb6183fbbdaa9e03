//! Concierge application binary - composition root.
//!
//! Ties the crates together into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Resolve the upstream credential (config value or OPENAI_API_KEY)
//! 3. Build the relay service and transcript store
//! 4. Serve the axum API (or run the terminal chat harness with --chat)

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use concierge_api::state::AppState;
use concierge_core::config::ConciergeConfig;
use concierge_relay::{RelayService, TranscriptStore};

mod cli;
mod console;

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

/// Resolve the upstream credential: config value first, then environment.
fn resolve_api_key(config: &ConciergeConfig) -> Option<String> {
    config
        .relay
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
        })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = ConciergeConfig::load_or_default(&config_file);
    config.general.port = args.resolve_port(config.general.port);
    if let Some(dir) = args.resolve_data_dir() {
        config.general.data_dir = dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.general.log_level.clone())),
        )
        .init();

    tracing::info!("Starting Concierge v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Data directory.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }

    // Relay + transcript services.
    let api_key = resolve_api_key(&config);
    if api_key.is_none() {
        tracing::warn!("No upstream credential in config or OPENAI_API_KEY; messages will get the configuration error");
    }
    let relay = RelayService::new(&config.relay, api_key);
    let transcripts = TranscriptStore::new(&config.transcript, &data_dir);

    // Terminal harness mode.
    if args.chat {
        console::run_chat(config, Arc::new(relay), Arc::new(transcripts), &data_dir).await?;
        return Ok(());
    }

    // API server.
    let token = concierge_api::auth::load_or_generate_token(&data_dir.join("api_token"));
    let state = AppState::new(config, relay, transcripts, token);

    concierge_api::start_server(state).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_expands_home() {
        let resolved = resolve_data_dir("~/concierge-data");
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.to_string_lossy().ends_with("concierge-data"));
    }

    #[test]
    fn test_resolve_data_dir_keeps_absolute_path() {
        let resolved = resolve_data_dir("/srv/concierge");
        assert_eq!(resolved, PathBuf::from("/srv/concierge"));
    }

    #[test]
    fn test_resolve_api_key_prefers_config_value() {
        let mut config = ConciergeConfig::default();
        config.relay.api_key = Some("sk-config".to_string());
        assert_eq!(resolve_api_key(&config).as_deref(), Some("sk-config"));
    }

    #[test]
    fn test_resolve_api_key_ignores_blank_config_value() {
        let mut config = ConciergeConfig::default();
        config.relay.api_key = Some("   ".to_string());
        // Falls through to the environment, which may or may not be set;
        // either way the blank config value must not win.
        let resolved = resolve_api_key(&config);
        assert_ne!(resolved.as_deref(), Some("   "));
    }
}
