//! Remote directory: the hosted auth + document store behind the marketplace.
//!
//! [`RemoteDirectory`] is the only seam between the page flows and the
//! backend. [`FirebaseDirectory`] talks to the hosted REST APIs;
//! [`MemoryDirectory`] keeps everything in process for tests and demo mode.

mod firebase;
mod firestore;
mod memory;

use std::fmt;

use thiserror::Error;
use tokio::sync::watch;

use crate::auth::{AuthSession, SessionPersistence};
use crate::config::ConfigError;
use crate::models::{Document, DocumentId, Fields, Identity, CREATED_AT_FIELD};

pub use firebase::FirebaseDirectory;
pub use firestore::FirestoreClient;
pub use memory::MemoryDirectory;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("The remote directory is not configured for this build.")]
    NotConfigured,
    #[error("Invalid directory configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory API error: {0}")]
    Api(String),
    #[error("You need to be signed in to do that.")]
    Unauthenticated,
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Receiving end of the authentication-state subscription.
///
/// The current value is the signed-in identity (or `None`); every
/// transition marks the receiver as changed.
pub type SessionWatch = watch::Receiver<Option<Identity>>;

/// Named collections used by the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Items offered for sale
    SaleItems,
    /// Items offered for lending
    LendingItems,
    BorrowRequests,
}

impl Collection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SaleItems => "sellItems",
            Self::LendingItems => "lendItems",
            Self::BorrowRequests => "borrowRequests",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering applied to a collection query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: Direction,
}

impl OrderBy {
    /// Creation timestamp, descending
    #[must_use]
    pub const fn newest_first() -> Self {
        Self {
            field: CREATED_AT_FIELD,
            direction: Direction::Descending,
        }
    }
}

/// Authentication and document storage as seen by the page flows.
///
/// The page runs on a single thread, so implementations are not required to
/// be `Send` and the returned futures are polled on the page's executor.
#[allow(async_fn_in_trait)]
pub trait RemoteDirectory {
    /// Subscribe to authentication-state transitions.
    fn subscribe(&self) -> SessionWatch;

    /// Identity signed in right now, if any.
    fn current_identity(&self) -> Option<Identity> {
        self.subscribe().borrow().clone()
    }

    async fn sign_out(&self) -> DirectoryResult<()>;

    /// Write a new document. The directory stamps [`CREATED_AT_FIELD`] with
    /// its own clock; a caller-supplied value for that field is replaced.
    async fn add_document(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> DirectoryResult<DocumentId>;

    /// Read every document in `collection`, ordered by `order`.
    async fn query_documents(
        &self,
        collection: Collection,
        order: OrderBy,
    ) -> DirectoryResult<Vec<Document>>;
}

/// Directory chosen at startup: hosted when configured, in-memory otherwise.
#[derive(Clone)]
pub enum Backend<S: SessionPersistence> {
    Hosted(FirebaseDirectory<S>),
    Memory(MemoryDirectory),
}

impl<S: SessionPersistence> Backend<S> {
    #[must_use]
    pub const fn is_hosted(&self) -> bool {
        matches!(self, Self::Hosted(_))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> DirectoryResult<Identity> {
        match self {
            Self::Hosted(directory) => directory.sign_in(email, password).await,
            Self::Memory(directory) => directory.sign_in_with_email(email, None),
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> DirectoryResult<Identity> {
        match self {
            Self::Hosted(directory) => directory.sign_up(email, password, display_name).await,
            Self::Memory(directory) => directory.sign_in_with_email(email, Some(display_name)),
        }
    }

    /// Restore a persisted session (hosted only) and publish it.
    pub async fn restore_session(&self) -> DirectoryResult<Option<AuthSession>> {
        match self {
            Self::Hosted(directory) => directory.restore_session().await,
            Self::Memory(_) => Ok(None),
        }
    }
}

impl<S: SessionPersistence> RemoteDirectory for Backend<S> {
    fn subscribe(&self) -> SessionWatch {
        match self {
            Self::Hosted(directory) => directory.subscribe(),
            Self::Memory(directory) => directory.subscribe(),
        }
    }

    async fn sign_out(&self) -> DirectoryResult<()> {
        match self {
            Self::Hosted(directory) => directory.sign_out().await,
            Self::Memory(directory) => directory.sign_out().await,
        }
    }

    async fn add_document(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> DirectoryResult<DocumentId> {
        match self {
            Self::Hosted(directory) => directory.add_document(collection, fields).await,
            Self::Memory(directory) => directory.add_document(collection, fields).await,
        }
    }

    async fn query_documents(
        &self,
        collection: Collection,
        order: OrderBy,
    ) -> DirectoryResult<Vec<Document>> {
        match self {
            Self::Hosted(directory) => directory.query_documents(collection, order).await,
            Self::Memory(directory) => directory.query_documents(collection, order).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_match_stored_collections() {
        assert_eq!(Collection::SaleItems.as_str(), "sellItems");
        assert_eq!(Collection::LendingItems.to_string(), "lendItems");
        assert_eq!(Collection::BorrowRequests.as_str(), "borrowRequests");
    }

    #[test]
    fn newest_first_orders_by_creation_time() {
        let order = OrderBy::newest_first();
        assert_eq!(order.field, CREATED_AT_FIELD);
        assert_eq!(order.direction, Direction::Descending);
    }
}
