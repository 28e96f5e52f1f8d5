use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Notify;

use crate::card::{Card, RequestCard};
use crate::directory::{
    Collection, DirectoryError, DirectoryResult, MemoryDirectory, OrderBy, RemoteDirectory,
    SessionWatch,
};
use crate::models::{Document, DocumentId, FieldValue, Fields};
use crate::page::{FormKind, GridId, GridState, IdentitySlot, PageSurface, Severity, View};

/// Everything the flows did to the page, in order
#[derive(Debug)]
pub struct PageLog {
    pub view: View,
    pub opened: Vec<View>,
    pub notices: Vec<(String, Severity)>,
    pub slots: Vec<IdentitySlot>,
    pub listings: Vec<(GridId, GridState<Card>)>,
    pub requests: Vec<GridState<RequestCard>>,
    pub resets: Vec<FormKind>,
    pub hidden: Vec<FormKind>,
    pub unmounted: HashSet<GridId>,
}

#[derive(Debug, Clone)]
pub struct RecordingPage(Rc<RefCell<PageLog>>);

impl RecordingPage {
    pub fn on(view: View) -> Self {
        Self(Rc::new(RefCell::new(PageLog {
            view,
            opened: Vec::new(),
            notices: Vec::new(),
            slots: Vec::new(),
            listings: Vec::new(),
            requests: Vec::new(),
            resets: Vec::new(),
            hidden: Vec::new(),
            unmounted: HashSet::new(),
        })))
    }

    pub fn log(&self) -> std::cell::Ref<'_, PageLog> {
        self.0.borrow()
    }

    pub fn navigate(&self, view: View) {
        self.0.borrow_mut().view = view;
    }

    pub fn unmount(&self, grid: GridId) {
        self.0.borrow_mut().unmounted.insert(grid);
    }

    /// Last state rendered into `grid`
    pub fn grid(&self, grid: GridId) -> Option<GridState<Card>> {
        self.log()
            .listings
            .iter()
            .rev()
            .find(|(id, _)| *id == grid)
            .map(|(_, state)| state.clone())
    }

    pub fn card_names(&self, grid: GridId) -> Vec<String> {
        self.grid(grid)
            .map(|state| state.cards().iter().map(|card| card.name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn last_notice(&self) -> Option<(String, Severity)> {
        self.log().notices.last().cloned()
    }
}

impl PageSurface for RecordingPage {
    fn current_view(&self) -> View {
        self.log().view
    }

    fn open_page(&self, view: View) {
        let mut log = self.0.borrow_mut();
        log.view = view;
        log.opened.push(view);
    }

    fn alert_box(&self, message: &str, severity: Severity) {
        self.0
            .borrow_mut()
            .notices
            .push((message.to_string(), severity));
    }

    fn render_identity_slot(&self, slot: IdentitySlot) -> bool {
        self.0.borrow_mut().slots.push(slot);
        true
    }

    fn render_listings(&self, grid: GridId, state: GridState<Card>) -> bool {
        let mut log = self.0.borrow_mut();
        if log.unmounted.contains(&grid) {
            return false;
        }
        log.listings.push((grid, state));
        true
    }

    fn render_requests(&self, state: GridState<RequestCard>) -> bool {
        let mut log = self.0.borrow_mut();
        if log.unmounted.contains(&GridId::Requests) {
            return false;
        }
        log.requests.push(state);
        true
    }

    fn reset_form(&self, form: FormKind) {
        self.0.borrow_mut().resets.push(form);
    }

    fn hide_form(&self, form: FormKind) {
        self.0.borrow_mut().hidden.push(form);
    }
}

/// In-memory directory that can hold one query until released and can
/// refuse to sign out.
#[derive(Clone)]
pub struct ScriptedDirectory {
    pub inner: MemoryDirectory,
    release: Rc<Notify>,
    hold_next_query: Rc<Cell<bool>>,
    fail_sign_out: Rc<Cell<bool>>,
}

impl ScriptedDirectory {
    pub fn new(inner: MemoryDirectory) -> Self {
        Self {
            inner,
            release: Rc::new(Notify::new()),
            hold_next_query: Rc::new(Cell::new(false)),
            fail_sign_out: Rc::new(Cell::new(false)),
        }
    }

    pub fn hold_next_query(&self) {
        self.hold_next_query.set(true);
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn fail_sign_out(&self) {
        self.fail_sign_out.set(true);
    }
}

impl RemoteDirectory for ScriptedDirectory {
    fn subscribe(&self) -> SessionWatch {
        self.inner.subscribe()
    }

    async fn sign_out(&self) -> DirectoryResult<()> {
        if self.fail_sign_out.get() {
            return Err(DirectoryError::Unavailable("network down".to_string()));
        }
        self.inner.sign_out().await
    }

    async fn add_document(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> DirectoryResult<DocumentId> {
        self.inner.add_document(collection, fields).await
    }

    async fn query_documents(
        &self,
        collection: Collection,
        order: OrderBy,
    ) -> DirectoryResult<Vec<Document>> {
        if self.hold_next_query.replace(false) {
            self.release.notified().await;
        }
        self.inner.query_documents(collection, order).await
    }
}

pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, hour, 0, 0).unwrap()
}

pub fn listing_fields(name: &str, category: &str, price: f64) -> Fields {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), FieldValue::from(name));
    fields.insert("category".to_string(), FieldValue::from(category));
    fields.insert("price".to_string(), FieldValue::from(price));
    fields.insert("condition".to_string(), FieldValue::from("Good"));
    fields.insert("description".to_string(), FieldValue::from(""));
    fields.insert("sellerId".to_string(), FieldValue::from("uid-seller"));
    fields.insert("sellerName".to_string(), FieldValue::from("Priya"));
    fields
}

pub fn request_fields(item: &str, days: i64) -> Fields {
    let mut fields = Fields::new();
    fields.insert("itemName".to_string(), FieldValue::from(item));
    fields.insert("durationDays".to_string(), FieldValue::from(days));
    fields.insert("maxPricePerDay".to_string(), FieldValue::from(3.0));
    fields.insert("description".to_string(), FieldValue::from(""));
    fields.insert("requesterId".to_string(), FieldValue::from("uid-req"));
    fields.insert("requesterName".to_string(), FieldValue::from("Ola"));
    fields
}
