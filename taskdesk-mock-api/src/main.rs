//! `TaskDesk` mock API -- in-memory task API for local demos.
//!
//! # Usage
//!
//! ```bash
//! # Run on the client's default address 127.0.0.1:4000
//! cargo run --bin taskdesk-mock-api
//!
//! # Run on a custom address
//! cargo run --bin taskdesk-mock-api -- --bind 127.0.0.1:8080
//!
//! # Or via environment variable
//! MOCK_API_ADDR=127.0.0.1:8080 cargo run --bin taskdesk-mock-api
//! ```

use std::sync::Arc;

use clap::Parser;
use taskdesk_mock_api::config::{MockCliArgs, MockConfig};
use taskdesk_mock_api::server;
use taskdesk_mock_api::store::MockState;

#[tokio::main]
async fn main() {
    let cli = MockCliArgs::parse();

    let config = match MockConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting taskdesk mock api");

    let mut state = MockState::new();
    if config.stale_status_echo {
        state = state.with_stale_status_echo();
    }

    match server::start_server_with_state(&config.bind_addr, Arc::new(state)).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "mock api listening on http://{bound_addr}/api");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "mock api task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start mock api");
            std::process::exit(1);
        }
    }
}
