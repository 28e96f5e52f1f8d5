//! Session persistence between page loads.

#[cfg(not(target_family = "wasm"))]
pub use market_core::auth::EphemeralSessionStore as SessionStore;

#[cfg(target_family = "wasm")]
pub use browser::BrowserSessionStore as SessionStore;

#[cfg(target_family = "wasm")]
mod browser {
    use market_core::auth::{AuthSession, SessionPersistence};
    use market_core::directory::{DirectoryError, DirectoryResult};
    use web_sys::Storage;

    const SESSION_KEY: &str = "campus-market.session";

    /// Browser session store backed by `window.localStorage`.
    #[derive(Debug, Clone, Default)]
    pub struct BrowserSessionStore;

    fn storage() -> DirectoryResult<Storage> {
        web_sys::window()
            .ok_or_else(|| DirectoryError::SecureStorage("no window".to_string()))?
            .local_storage()
            .map_err(|_| DirectoryError::SecureStorage("localStorage is blocked".to_string()))?
            .ok_or_else(|| DirectoryError::SecureStorage("localStorage unavailable".to_string()))
    }

    impl SessionPersistence for BrowserSessionStore {
        fn load_session(&self) -> DirectoryResult<Option<AuthSession>> {
            match storage()?.get_item(SESSION_KEY) {
                Ok(Some(raw)) => Ok(Some(serde_json::from_str(&raw)?)),
                Ok(None) => Ok(None),
                Err(_) => Err(DirectoryError::SecureStorage(
                    "failed to read session".to_string(),
                )),
            }
        }

        fn save_session(&self, session: &AuthSession) -> DirectoryResult<()> {
            let serialized = serde_json::to_string(session)?;
            storage()?
                .set_item(SESSION_KEY, &serialized)
                .map_err(|_| DirectoryError::SecureStorage("failed to save session".to_string()))
        }

        fn clear_session(&self) -> DirectoryResult<()> {
            storage()?
                .remove_item(SESSION_KEY)
                .map_err(|_| DirectoryError::SecureStorage("failed to clear session".to_string()))
        }
    }
}

#[cfg(all(test, not(target_family = "wasm")))]
mod tests {
    use market_core::auth::{AuthSession, SessionPersistence};
    use market_core::Identity;

    use super::*;

    #[test]
    fn native_store_keeps_session_until_cleared() {
        let store = SessionStore::default();
        let session = AuthSession {
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: 0,
            identity: Identity::new("uid-1", Some("Ada".to_string())),
        };

        store.save_session(&session).unwrap();
        assert_eq!(store.load_session().unwrap(), Some(session));

        store.clear_session().unwrap();
        assert_eq!(store.load_session().unwrap(), None);
    }
}
