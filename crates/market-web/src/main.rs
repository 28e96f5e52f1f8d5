//! Campus Market web front end
//!
//! Buy, sell, lend and borrow between students. Runs in the browser and
//! talks to the hosted directory directly, or to an in-memory one when the
//! build carries no config.

mod app;
mod bootstrap_config;
mod components;
mod page;
mod services;
mod state;
mod views;

fn main() {
    init_logging();

    tracing::info!("Starting Campus Market...");

    dioxus::launch(app::App);
}

#[cfg(target_family = "wasm")]
fn init_logging() {
    let _ = dioxus::logger::init(tracing::Level::DEBUG);
}

#[cfg(not(target_family = "wasm"))]
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("market=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
