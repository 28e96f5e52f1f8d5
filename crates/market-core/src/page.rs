//! The page surface: everything the flows are allowed to do to the page.
//!
//! Flows never reach for globals. The front end hands them a
//! [`PageSurface`] and they render grids, the identity slot and notices
//! through it. Render calls return `false` when the target is not on the
//! page (navigated away, never mounted); callers treat that as a no-op.

use std::time::Duration;

use crate::card::{Card, RequestCard};
use crate::directory::Collection;

/// How long a transient notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Top-level views of the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    /// Items for sale, with the sell form
    BuySell,
    /// Items for lending, with the lend form
    LendBorrow,
    /// Both item grids, read-only
    Browse,
    /// Borrow requests, with the request form
    Requests,
}

impl View {
    /// Views that require a signed-in identity
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(
            self,
            Self::BuySell | Self::LendBorrow | Self::Browse | Self::Requests
        )
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::BuySell => "/buy-sell",
            Self::LendBorrow => "/lend-borrow",
            Self::Browse => "/browse",
            Self::Requests => "/requests",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::BuySell => "Buy & Sell",
            Self::LendBorrow => "Lend & Borrow",
            Self::Browse => "Browse",
            Self::Requests => "Borrow Requests",
        }
    }
}

/// Card containers on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridId {
    SaleItems,
    LendingItems,
    Requests,
}

impl GridId {
    #[must_use]
    pub const fn collection(self) -> Collection {
        match self {
            Self::SaleItems => Collection::SaleItems,
            Self::LendingItems => Collection::LendingItems,
            Self::Requests => Collection::BorrowRequests,
        }
    }

    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::SaleItems => "No items for sale yet. Be the first to list one!",
            Self::LendingItems => "No items available for lending yet.",
            Self::Requests => "No borrow requests yet.",
        }
    }

    #[must_use]
    pub const fn error_message(self) -> &'static str {
        match self {
            Self::SaleItems | Self::LendingItems => "Failed to load items. Please try again later.",
            Self::Requests => "Failed to load requests. Please try again later.",
        }
    }
}

/// Contents of a card grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridState<C> {
    Loading,
    Empty,
    Ready(Vec<C>),
    Failed,
}

impl<C> GridState<C> {
    /// Rendered cards (empty unless `Ready`)
    #[must_use]
    pub fn cards(&self) -> &[C] {
        match self {
            Self::Ready(cards) => cards,
            _ => &[],
        }
    }

    /// Placeholder text shown instead of cards, if any
    #[must_use]
    pub const fn placeholder(&self, grid: GridId) -> Option<&'static str> {
        match self {
            Self::Loading => Some("Loading..."),
            Self::Empty => Some(grid.empty_message()),
            Self::Failed => Some(grid.error_message()),
            Self::Ready(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Success => "#4CAF50",
            Self::Info => "#2196F3",
            Self::Error => "#f44336",
        }
    }
}

/// A transient, non-blocking message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Right-hand slot of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySlot {
    /// Identity label and a sign-out control
    SignedIn { label: String },
    /// A login control
    SignedOut,
}

/// Forms that post new records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    SellItem,
    LendItem,
    BorrowRequest,
}

/// Operations the flows perform on the page.
pub trait PageSurface {
    fn current_view(&self) -> View;

    /// Navigate to `view`.
    fn open_page(&self, view: View);

    /// Show a transient notice, replacing any notice already visible.
    fn alert_box(&self, message: &str, severity: Severity);

    fn render_identity_slot(&self, slot: IdentitySlot) -> bool;

    fn render_listings(&self, grid: GridId, state: GridState<Card>) -> bool;

    fn render_requests(&self, state: GridState<RequestCard>) -> bool;

    fn reset_form(&self, form: FormKind);

    fn hide_form(&self, form: FormKind);
}
