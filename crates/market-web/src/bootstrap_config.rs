//! Directory configuration baked in at build time.

use market_core::config::DirectoryConfig;

const BOOTSTRAP_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/market-bootstrap.json"));

/// Loads the hosted directory config generated by `build.rs`.
///
/// Returns `None` when the build carries no config, or when the generated
/// config is unusable; the app then runs against the in-memory directory.
pub fn load_directory_config() -> Option<DirectoryConfig> {
    resolve(BOOTSTRAP_JSON)
}

fn resolve(raw: &str) -> Option<DirectoryConfig> {
    DirectoryConfig::parse_web_config(raw).unwrap_or_else(|error| {
        tracing::warn!("Ignoring web bootstrap config: {}", error);
        None
    })
}
