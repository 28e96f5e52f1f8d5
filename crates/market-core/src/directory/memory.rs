//! In-process directory used by tests and by the front end's demo mode.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;

use super::{
    Collection, DirectoryError, DirectoryResult, Direction, OrderBy, RemoteDirectory,
    SessionWatch,
};
use crate::models::{Document, DocumentId, FieldValue, Fields, Identity, CREATED_AT_FIELD};

#[derive(Default)]
struct MemoryState {
    collections: HashMap<Collection, Vec<Document>>,
    last_timestamp: Option<DateTime<Utc>>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryState {
    /// Server clock: wall time, bumped so consecutive writes never share a
    /// timestamp.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }
}

/// Directory backed by in-memory collections.
///
/// Clones share state. Reads and writes can be made to fail to exercise
/// error paths.
#[derive(Clone)]
pub struct MemoryDirectory {
    state: Rc<RefCell<MemoryState>>,
    session: Rc<watch::Sender<Option<Identity>>>,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            state: Rc::new(RefCell::new(MemoryState::default())),
            session: Rc::new(session),
        }
    }

    /// Publish `identity` as signed in.
    pub fn sign_in_as(&self, identity: Identity) {
        self.session.send_replace(Some(identity));
    }

    /// Demo sign-in: any non-empty email is accepted and becomes the uid.
    pub fn sign_in_with_email(
        &self,
        email: &str,
        display_name: Option<&str>,
    ) -> DirectoryResult<Identity> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DirectoryError::Api("Email is required".to_string()));
        }
        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| email.split('@').next().map(str::to_string));
        let identity = Identity {
            uid: format!("demo-{}", email.to_ascii_lowercase()),
            display_name,
            email: Some(email.to_string()),
        };
        self.sign_in_as(identity.clone());
        Ok(identity)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Number of successful writes across all collections
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    #[must_use]
    pub fn len(&self, collection: Collection) -> usize {
        self.state
            .borrow()
            .collections
            .get(&collection)
            .map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }

    /// Stored documents of `collection` in insertion order
    #[must_use]
    pub fn documents(&self, collection: Collection) -> Vec<Document> {
        self.state
            .borrow()
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Insert a document with an explicit creation time, bypassing the
    /// server clock and the write counter.
    pub fn seed(
        &self,
        collection: Collection,
        mut fields: Fields,
        created_at: DateTime<Utc>,
    ) -> DocumentId {
        let id = DocumentId::random();
        fields.insert(CREATED_AT_FIELD.to_string(), FieldValue::Timestamp(created_at));
        let mut state = self.state.borrow_mut();
        state
            .collections
            .entry(collection)
            .or_default()
            .push(Document::new(id.clone(), fields));
        if state.last_timestamp.map_or(true, |last| last < created_at) {
            state.last_timestamp = Some(created_at);
        }
        id
    }
}

impl RemoteDirectory for MemoryDirectory {
    fn subscribe(&self) -> SessionWatch {
        self.session.subscribe()
    }

    async fn sign_out(&self) -> DirectoryResult<()> {
        self.session.send_replace(None);
        Ok(())
    }

    async fn add_document(
        &self,
        collection: Collection,
        mut fields: Fields,
    ) -> DirectoryResult<DocumentId> {
        if self.session.borrow().is_none() {
            return Err(DirectoryError::Unauthenticated);
        }
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(DirectoryError::Unavailable("write rejected".to_string()));
        }

        let id = DocumentId::random();
        let created_at = state.next_timestamp();
        fields.insert(CREATED_AT_FIELD.to_string(), FieldValue::Timestamp(created_at));
        state
            .collections
            .entry(collection)
            .or_default()
            .push(Document::new(id.clone(), fields));
        state.writes += 1;
        Ok(id)
    }

    async fn query_documents(
        &self,
        collection: Collection,
        order: OrderBy,
    ) -> DirectoryResult<Vec<Document>> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(DirectoryError::Unavailable("read failed".to_string()));
        }

        let mut documents = state
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default();
        documents.sort_by(|a, b| {
            let ordering = match (a.fields.get(order.field), b.fields.get(order.field)) {
                (Some(a), Some(b)) => a.sort_cmp(b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            };
            match order.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        Ok(documents)
    }
}
