//! Hosted directory: identity service + document store over REST.

use std::cell::RefCell;
use std::rc::Rc;

use tokio::sync::watch;

use super::{
    Collection, DirectoryError, DirectoryResult, FirestoreClient, OrderBy, RemoteDirectory,
    SessionWatch,
};
use crate::auth::{AuthSession, IdentityToolkitClient, SessionPersistence};
use crate::config::DirectoryConfig;
use crate::models::{Document, DocumentId, Fields, Identity};

#[derive(Clone)]
pub struct FirebaseDirectory<S: SessionPersistence> {
    auth: IdentityToolkitClient<S>,
    documents: FirestoreClient,
    session: Rc<RefCell<Option<AuthSession>>>,
    state: Rc<watch::Sender<Option<Identity>>>,
}

impl<S: SessionPersistence> FirebaseDirectory<S> {
    pub fn new(config: &DirectoryConfig, persistence: S) -> DirectoryResult<Self> {
        let (state, _) = watch::channel(None);
        Ok(Self {
            auth: IdentityToolkitClient::new(config, persistence)?,
            documents: FirestoreClient::new(config)?,
            session: Rc::new(RefCell::new(None)),
            state: Rc::new(state),
        })
    }

    /// Restore the persisted session, if any, and publish its identity.
    pub async fn restore_session(&self) -> DirectoryResult<Option<AuthSession>> {
        let restored = self.auth.restore_session().await?;
        self.publish(restored.clone());
        Ok(restored)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> DirectoryResult<Identity> {
        let session = self.auth.sign_in(email, password).await?;
        let identity = session.identity.clone();
        self.publish(Some(session));
        Ok(identity)
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> DirectoryResult<Identity> {
        if display_name.trim().is_empty() {
            return Err(DirectoryError::Api("Display name is required".to_string()));
        }
        let session = self
            .auth
            .sign_up(email, password, Some(display_name))
            .await?;
        let identity = session.identity.clone();
        self.publish(Some(session));
        Ok(identity)
    }

    fn publish(&self, session: Option<AuthSession>) {
        let identity = session.as_ref().map(|session| session.identity.clone());
        *self.session.borrow_mut() = session;
        self.state.send_replace(identity);
    }

    /// Current ID token, refreshed first when it is about to expire.
    async fn id_token(&self) -> DirectoryResult<Option<String>> {
        let Some(session) = self.session.borrow().clone() else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session.id_token));
        }

        match self.auth.refresh_session(&session).await {
            Ok(refreshed) => {
                let token = refreshed.id_token.clone();
                *self.session.borrow_mut() = Some(refreshed);
                Ok(Some(token))
            }
            Err(error) => {
                tracing::warn!("Session refresh failed, signing out: {}", error);
                self.auth.sign_out()?;
                self.publish(None);
                Err(DirectoryError::Unauthenticated)
            }
        }
    }
}

impl<S: SessionPersistence> RemoteDirectory for FirebaseDirectory<S> {
    fn subscribe(&self) -> SessionWatch {
        self.state.subscribe()
    }

    async fn sign_out(&self) -> DirectoryResult<()> {
        self.auth.sign_out()?;
        self.publish(None);
        tracing::info!("Signed out");
        Ok(())
    }

    async fn add_document(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> DirectoryResult<DocumentId> {
        let token = self.id_token().await?.ok_or(DirectoryError::Unauthenticated)?;
        self.documents
            .create_document(collection, fields, Some(&token))
            .await
    }

    async fn query_documents(
        &self,
        collection: Collection,
        order: OrderBy,
    ) -> DirectoryResult<Vec<Document>> {
        let token = self.id_token().await?;
        self.documents
            .run_query(collection, order, token.as_deref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::EphemeralSessionStore;

    fn directory() -> FirebaseDirectory<EphemeralSessionStore> {
        let config = DirectoryConfig::new("key", "demo").unwrap();
        FirebaseDirectory::new(&config, EphemeralSessionStore::default()).unwrap()
    }

    #[test]
    fn starts_signed_out() {
        let directory = directory();
        assert_eq!(directory.current_identity(), None);
    }

    #[test]
    fn publish_notifies_subscribers() {
        let directory = directory();
        let mut watch = directory.subscribe();
        directory.publish(Some(AuthSession {
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: i64::MAX,
            identity: Identity::new("uid-1", Some("Kim".to_string())),
        }));

        assert!(watch.has_changed().unwrap());
        assert_eq!(
            watch.borrow_and_update().as_ref().map(|id| id.uid.as_str()),
            Some("uid-1")
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn add_document_requires_sign_in() {
        let directory = directory();
        let error = directory
            .add_document(Collection::SaleItems, Fields::new())
            .await
            .unwrap_err();
        assert!(matches!(error, DirectoryError::Unauthenticated));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn sign_up_requires_display_name() {
        let directory = directory();
        let error = directory
            .sign_up("kim@campus.edu", "hunter22", "  ")
            .await
            .unwrap_err();
        assert!(error.to_string().contains("Display name"));
        assert_eq!(directory.current_identity(), None);
    }
}
