//! UI Components
//!
//! Building blocks shared by the marketplace views.

mod detail_modal;
mod item_card;
mod item_grid;
mod listing_form;
mod navbar;
mod notice;
mod request_form;
mod request_grid;

pub use detail_modal::DetailModal;
pub use item_card::ItemCard;
pub use item_grid::ItemGrid;
pub use listing_form::ListingFormModal;
pub use navbar::Navbar;
pub use notice::NoticeBanner;
pub use request_form::RequestFormModal;
pub use request_grid::RequestGrid;
