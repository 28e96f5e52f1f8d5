//! Data models for Campus Market

mod borrow_request;
mod category;
mod document;
mod identity;
mod listing;

pub use borrow_request::{BorrowRequest, NewBorrowRequest};
pub use category::Category;
pub use document::{Document, DocumentId, FieldValue, Fields, RecordError, CREATED_AT_FIELD};
pub use identity::{Identity, ANONYMOUS_DISPLAY_NAME};
pub use listing::{Listing, NewListing, DEFAULT_RENT_PERIOD};
