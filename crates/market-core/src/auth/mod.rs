//! Email/password auth client for the hosted identity service.
//!
//! Talks to the Identity Toolkit REST API for sign-in, sign-up and profile
//! updates, and to the secure-token endpoint for ID token refresh. Sessions
//! are persisted through a [`SessionPersistence`] implementation supplied by
//! the front end.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::DirectoryConfig;
use crate::directory::{DirectoryError, DirectoryResult};
use crate::models::Identity;
use crate::util::{error_excerpt, now_seconds};

const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: String,
    /// Unix seconds at which `id_token` stops being accepted
    pub expires_at: i64,
    pub identity: Identity,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= now_seconds() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("id_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("identity", &self.identity)
            .finish()
    }
}

/// Where the last signed-in session is kept between page loads.
pub trait SessionPersistence: Clone + 'static {
    fn load_session(&self) -> DirectoryResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> DirectoryResult<()>;
    fn clear_session(&self) -> DirectoryResult<()>;
}

/// Session store that forgets everything when the page goes away.
#[derive(Debug, Clone, Default)]
pub struct EphemeralSessionStore {
    slot: Rc<RefCell<Option<AuthSession>>>,
}

impl SessionPersistence for EphemeralSessionStore {
    fn load_session(&self) -> DirectoryResult<Option<AuthSession>> {
        Ok(self.slot.borrow().clone())
    }

    fn save_session(&self, session: &AuthSession) -> DirectoryResult<()> {
        *self.slot.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> DirectoryResult<()> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

#[derive(Clone)]
pub struct IdentityToolkitClient<S: SessionPersistence> {
    api_key: String,
    identity_url: String,
    secure_token_url: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> IdentityToolkitClient<S> {
    pub fn new(config: &DirectoryConfig, store: S) -> DirectoryResult<Self> {
        Ok(Self {
            api_key: config.api_key.clone(),
            identity_url: config.identity_url.clone(),
            secure_token_url: config.secure_token_url.clone(),
            client: build_http_client(config)?,
            store,
        })
    }

    /// Load the persisted session, refreshing it when the ID token expired.
    ///
    /// A session that cannot be refreshed is cleared and `None` returned.
    pub async fn restore_session(&self) -> DirectoryResult<Option<AuthSession>> {
        let Some(stored_session) = self.store.load_session()? else {
            return Ok(None);
        };

        if !stored_session.is_expired() {
            return Ok(Some(stored_session));
        }

        match self.refresh_session(&stored_session).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(error) => {
                tracing::warn!("Failed to refresh persisted session: {}", error);
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> DirectoryResult<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email.trim(),
            "password": password,
            "returnSecureToken": true,
        });
        let request = self
            .client
            .post(self.identity_endpoint("accounts:signInWithPassword"))
            .json(&payload);
        let response: PasswordAuthResponse = send_json(request).await?;
        let session = response.into_session();

        self.store.save_session(&session)?;
        tracing::info!("Signed in as {}", session.identity.uid);
        Ok(session)
    }

    /// Create an account and, when given, set its display name.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DirectoryResult<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email.trim(),
            "password": password,
            "returnSecureToken": true,
        });
        let request = self
            .client
            .post(self.identity_endpoint("accounts:signUp"))
            .json(&payload);
        let response: PasswordAuthResponse = send_json(request).await?;
        let mut session = response.into_session();

        if let Some(display_name) = display_name.map(str::trim).filter(|name| !name.is_empty()) {
            session = self.update_display_name(session, display_name).await?;
        }

        self.store.save_session(&session)?;
        tracing::info!("Created account {}", session.identity.uid);
        Ok(session)
    }

    pub async fn refresh_session(&self, session: &AuthSession) -> DirectoryResult<AuthSession> {
        if session.refresh_token.trim().is_empty() {
            return Err(DirectoryError::InvalidConfiguration(
                "Refresh token must not be empty".to_string(),
            ));
        }

        let request = self
            .client
            .post(format!("{}/token", self.secure_token_url))
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ]);
        let response: RefreshResponse = send_json(request).await?;
        let refreshed = AuthSession {
            id_token: response.id_token,
            refresh_token: response.refresh_token,
            expires_at: expires_at_from(&response.expires_in),
            identity: Identity {
                uid: response.user_id,
                ..session.identity.clone()
            },
        };

        self.store.save_session(&refreshed)?;
        Ok(refreshed)
    }

    /// Sign-out is local: ID tokens are short-lived and cannot be revoked
    /// from the client, so forgetting them is sufficient.
    pub fn sign_out(&self) -> DirectoryResult<()> {
        self.store.clear_session()
    }

    async fn update_display_name(
        &self,
        session: AuthSession,
        display_name: &str,
    ) -> DirectoryResult<AuthSession> {
        let payload = serde_json::json!({
            "idToken": session.id_token,
            "displayName": display_name,
            "returnSecureToken": true,
        });
        let request = self
            .client
            .post(self.identity_endpoint("accounts:update"))
            .json(&payload);
        let response: UpdateProfileResponse = send_json(request).await?;
        Ok(response.apply_to(session))
    }

    fn identity_endpoint(&self, method: &str) -> String {
        format!("{}/{method}?key={}", self.identity_url, self.api_key)
    }
}

pub(crate) fn build_http_client(config: &DirectoryConfig) -> DirectoryResult<Client> {
    let builder = Client::builder();
    #[cfg(not(target_family = "wasm"))]
    let builder = builder.timeout(config.request_timeout);
    #[cfg(target_family = "wasm")]
    let _ = config;
    Ok(builder.build()?)
}

/// Send a request and decode a JSON body, turning error statuses into
/// [`DirectoryError::Api`].
pub(crate) async fn send_json<T>(request: RequestBuilder) -> DirectoryResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let response = request.send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(DirectoryError::Api(parse_api_error(status, &body)));
    }
    Ok(response.json::<T>().await?)
}

fn validate_credentials(email: &str, password: &str) -> DirectoryResult<()> {
    if email.trim().is_empty() {
        return Err(DirectoryError::Api("Email is required".to_string()));
    }
    if password.is_empty() {
        return Err(DirectoryError::Api("Password is required".to_string()));
    }
    Ok(())
}

fn expires_at_from(expires_in: &str) -> i64 {
    let seconds = expires_in.trim().parse::<i64>().unwrap_or(0);
    now_seconds().saturating_add(seconds)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordAuthResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
}

impl PasswordAuthResponse {
    fn into_session(self) -> AuthSession {
        AuthSession {
            expires_at: expires_at_from(&self.expires_in),
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            identity: Identity {
                uid: self.local_id,
                display_name: self.display_name.filter(|name| !name.trim().is_empty()),
                email: self.email,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileResponse {
    display_name: Option<String>,
    id_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<String>,
}

impl UpdateProfileResponse {
    fn apply_to(self, mut session: AuthSession) -> AuthSession {
        if let Some(display_name) = self.display_name {
            session.identity.display_name = Some(display_name);
        }
        if let (Some(id_token), Some(refresh_token)) = (self.id_token, self.refresh_token) {
            session.id_token = id_token;
            session.refresh_token = refresh_token;
            if let Some(expires_in) = self.expires_in {
                session.expires_at = expires_at_from(&expires_in);
            }
        }
        session
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Turn an error response into a short, user-presentable message.
pub(crate) fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        if let Some(message) = payload.error.message.or(payload.error.status) {
            return format!("{} ({})", friendly_message(message.trim()), status.as_u16());
        }
    }

    let trimmed = error_excerpt(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

/// Map identity service error codes (`EMAIL_EXISTS`, `WEAK_PASSWORD : ...`)
/// to readable text. Unknown codes pass through unchanged.
fn friendly_message(code: &str) -> String {
    let (code, detail) = code
        .split_once(" : ")
        .map_or((code, None), |(code, detail)| (code, Some(detail.trim())));

    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password".to_string()
        }
        "EMAIL_EXISTS" => "An account with this email already exists".to_string(),
        "INVALID_EMAIL" => "Email address is not valid".to_string(),
        "USER_DISABLED" => "This account has been disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, try again later".to_string(),
        "WEAK_PASSWORD" => detail
            .unwrap_or("Password is too weak")
            .to_string(),
        _ => detail.map_or_else(|| code.to_string(), |detail| format!("{code}: {detail}")),
    }
}
