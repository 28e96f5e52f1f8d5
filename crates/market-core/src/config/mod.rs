//! Remote directory configuration.
//!
//! The hosted backend is configured by the public web-app config object the
//! provider console hands out (`apiKey`, `projectId`, ...). These values are
//! safe-to-ship public identifiers; secret credentials must never be stored
//! here.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{endpoint_base, non_blank, non_blank_owned};

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("incomplete directory config: '{0}' is required")]
    Incomplete(&'static str),
    #[error("invalid directory config field '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("invalid web app config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Web-app config object in the provider's camelCase shape.
///
/// Every field is optional so that partially provisioned builds can be
/// detected and reported instead of failing to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebAppConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub auth_domain: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub storage_bucket: Option<String>,
    #[serde(default)]
    pub messaging_sender_id: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub measurement_id: Option<String>,
}

/// Resolved configuration used by the REST directory client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub api_key: String,
    pub project_id: String,
    pub auth_domain: Option<String>,
    pub identity_url: String,
    pub secure_token_url: String,
    pub firestore_url: String,
    pub request_timeout: Duration,
}

impl DirectoryConfig {
    pub fn new(
        api_key: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let (api_key, project_id): (String, String) = (api_key.into(), project_id.into());
        let api_key = non_blank_owned(Some(&api_key)).ok_or(ConfigError::Incomplete("apiKey"))?;
        let project_id =
            non_blank_owned(Some(&project_id)).ok_or(ConfigError::Incomplete("projectId"))?;
        if project_id.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "projectId",
                reason: "must not contain '/'".to_string(),
            });
        }

        Ok(Self {
            api_key,
            project_id,
            auth_domain: None,
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            secure_token_url: DEFAULT_SECURE_TOKEN_URL.to_string(),
            firestore_url: DEFAULT_FIRESTORE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Resolve a web-app config. Returns `Ok(None)` when nothing is
    /// configured and an error when only some required values are present.
    pub fn from_web_config(config: WebAppConfig) -> Result<Option<Self>, ConfigError> {
        let api_key = non_blank_owned(config.api_key.as_deref());
        let project_id = non_blank_owned(config.project_id.as_deref());

        match (api_key, project_id) {
            (None, None) => Ok(None),
            (Some(api_key), Some(project_id)) => {
                let mut resolved = Self::new(api_key, project_id)?;
                resolved.auth_domain = non_blank_owned(config.auth_domain.as_deref());
                Ok(Some(resolved))
            }
            (None, Some(_)) => Err(ConfigError::Incomplete("apiKey")),
            (Some(_), None) => Err(ConfigError::Incomplete("projectId")),
        }
    }

    /// Parse the web-app config object from a raw JSON payload.
    pub fn parse_web_config(payload: &str) -> Result<Option<Self>, ConfigError> {
        let config: WebAppConfig = serde_json::from_str(payload)?;
        Self::from_web_config(config)
    }

    /// Resolve from `FIREBASE_API_KEY`, `FIREBASE_PROJECT_ID` and
    /// `FIREBASE_AUTH_DOMAIN`.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_web_config(WebAppConfig {
            api_key: std::env::var("FIREBASE_API_KEY").ok(),
            auth_domain: std::env::var("FIREBASE_AUTH_DOMAIN").ok(),
            project_id: std::env::var("FIREBASE_PROJECT_ID").ok(),
            ..WebAppConfig::default()
        })
    }

    /// Point the client at different service roots (local emulators, proxies).
    pub fn with_endpoints(
        mut self,
        identity_url: &str,
        secure_token_url: &str,
        firestore_url: &str,
    ) -> Result<Self, ConfigError> {
        self.identity_url = normalize_endpoint(identity_url, "identityUrl")?;
        self.secure_token_url = normalize_endpoint(secure_token_url, "secureTokenUrl")?;
        self.firestore_url = normalize_endpoint(firestore_url, "firestoreUrl")?;
        Ok(self)
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resource path of the default database's document root
    #[must_use]
    pub fn documents_path(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    /// Full URL of the default database's document root
    #[must_use]
    pub fn documents_url(&self) -> String {
        format!("{}/{}", self.firestore_url, self.documents_path())
    }
}

fn normalize_endpoint(raw: &str, field: &'static str) -> Result<String, ConfigError> {
    let value = non_blank(raw).ok_or(ConfigError::Incomplete(field))?;
    endpoint_base(value)
        .map(str::to_string)
        .ok_or_else(|| ConfigError::InvalidValue {
            field,
            reason: "must include http:// or https://".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_web_config_accepts_console_snippet() {
        let payload = r#"
        {
          "apiKey": "AIzaSy-demo",
          "authDomain": "campus-demo.firebaseapp.com",
          "projectId": "campus-demo",
          "storageBucket": "campus-demo.firebasestorage.app",
          "messagingSenderId": "1234",
          "appId": "1:1234:web:abcd",
          "measurementId": "G-XYZ"
        }
        "#;

        let config = DirectoryConfig::parse_web_config(payload)
            .unwrap()
            .expect("config should be present");
        assert_eq!(config.api_key, "AIzaSy-demo");
        assert_eq!(config.project_id, "campus-demo");
        assert_eq!(
            config.auth_domain.as_deref(),
            Some("campus-demo.firebaseapp.com")
        );
        assert_eq!(
            config.documents_url(),
            "https://firestore.googleapis.com/v1/projects/campus-demo/databases/(default)/documents"
        );
    }

    #[test]
    fn empty_config_means_not_configured() {
        assert!(DirectoryConfig::from_web_config(WebAppConfig::default())
            .unwrap()
            .is_none());

        let blank = WebAppConfig {
            api_key: Some("  ".to_string()),
            project_id: Some(String::new()),
            ..WebAppConfig::default()
        };
        assert!(DirectoryConfig::from_web_config(blank).unwrap().is_none());
    }

    #[test]
    fn partial_config_is_an_error() {
        let partial = WebAppConfig {
            api_key: Some("key".to_string()),
            ..WebAppConfig::default()
        };
        let error = DirectoryConfig::from_web_config(partial).unwrap_err();
        assert!(error.to_string().contains("projectId"));
    }

    #[test]
    fn with_endpoints_requires_http_scheme() {
        let config = DirectoryConfig::new("key", "demo").unwrap();
        assert!(config
            .clone()
            .with_endpoints("localhost:9099", "http://localhost:9099", "http://localhost:8080")
            .is_err());

        let local = config
            .with_endpoints(
                "http://localhost:9099/identitytoolkit.googleapis.com/v1/",
                "http://localhost:9099/securetoken.googleapis.com/v1",
                "http://localhost:8080/v1",
            )
            .unwrap();
        assert_eq!(
            local.identity_url,
            "http://localhost:9099/identitytoolkit.googleapis.com/v1"
        );
        assert_eq!(
            local.documents_url(),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents"
        );
    }
}
