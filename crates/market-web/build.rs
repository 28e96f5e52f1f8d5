use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

/// Public web-app config in the provider's camelCase shape.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebBootstrapConfig {
    api_key: Option<String>,
    auth_domain: Option<String>,
    project_id: Option<String>,
    storage_bucket: Option<String>,
    messaging_sender_id: Option<String>,
    app_id: Option<String>,
}

const CONFIG_VARS: [&str; 6] = [
    "FIREBASE_API_KEY",
    "FIREBASE_AUTH_DOMAIN",
    "FIREBASE_PROJECT_ID",
    "FIREBASE_STORAGE_BUCKET",
    "FIREBASE_MESSAGING_SENDER_ID",
    "FIREBASE_APP_ID",
];

fn main() {
    for name in CONFIG_VARS {
        println!("cargo:rerun-if-env-changed={name}");
    }

    if let Err(error) = write_web_bootstrap_config() {
        println!("cargo:warning=failed to generate web bootstrap config: {error}");
    }
}

fn write_web_bootstrap_config() -> io::Result<()> {
    load_workspace_dotenv();

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::create_dir_all(&out_dir)?;

    let config = WebBootstrapConfig {
        api_key: env_var_trimmed("FIREBASE_API_KEY"),
        auth_domain: env_var_trimmed("FIREBASE_AUTH_DOMAIN"),
        project_id: env_var_trimmed("FIREBASE_PROJECT_ID"),
        storage_bucket: env_var_trimmed("FIREBASE_STORAGE_BUCKET"),
        messaging_sender_id: env_var_trimmed("FIREBASE_MESSAGING_SENDER_ID"),
        app_id: env_var_trimmed("FIREBASE_APP_ID"),
    };

    let content = serde_json::to_string_pretty(&config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
    fs::write(out_dir.join("market-bootstrap.json"), content)?;
    Ok(())
}

fn load_workspace_dotenv() {
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let candidate = manifest_dir.join("..").join("..").join(".env");
    if candidate.exists() {
        let _ = dotenvy::from_path(candidate);
    }
}

fn env_var_trimmed(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
