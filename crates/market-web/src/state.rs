//! Application state
//!
//! Page-wide signals shared through a Dioxus context provider. The page
//! surface writes them and the components render from them.

use std::collections::HashSet;

use dioxus::prelude::*;

use market_core::card::{Card, RequestCard};
use market_core::detail::DetailOverlay;
use market_core::page::{FormKind, GridId, GridState, IdentitySlot, Notice};
use market_core::submit::{BorrowRequestForm, ListingForm, Marketplace};

#[derive(Clone, Copy)]
pub struct AppState {
    /// Right-hand slot of the navigation bar
    pub identity_slot: Signal<IdentitySlot>,
    /// Transient notice, if one is showing
    pub notice: Signal<Option<Notice>>,
    /// Bumped on every notice so an older timer cannot clear a newer notice
    pub notice_serial: Signal<u64>,
    pub sale_items: Signal<GridState<Card>>,
    pub lending_items: Signal<GridState<Card>>,
    pub requests: Signal<GridState<RequestCard>>,
    /// Grids currently on the page
    pub mounted_grids: Signal<HashSet<GridId>>,
    /// Form modal currently open
    pub open_form: Signal<Option<FormKind>>,
    pub sell_form: Signal<ListingForm>,
    pub lend_form: Signal<ListingForm>,
    pub request_form: Signal<BorrowRequestForm>,
    pub detail: Signal<DetailOverlay>,
}

impl AppState {
    /// Create the signals. Must run inside a component scope.
    pub fn new() -> Self {
        Self {
            identity_slot: Signal::new(IdentitySlot::SignedOut),
            notice: Signal::new(None),
            notice_serial: Signal::new(0),
            sale_items: Signal::new(GridState::Loading),
            lending_items: Signal::new(GridState::Loading),
            requests: Signal::new(GridState::Loading),
            mounted_grids: Signal::new(HashSet::new()),
            open_form: Signal::new(None),
            sell_form: Signal::new(ListingForm::default()),
            lend_form: Signal::new(ListingForm::default()),
            request_form: Signal::new(BorrowRequestForm::default()),
            detail: Signal::new(DetailOverlay::default()),
        }
    }

    /// Card signal behind a listing grid (`None` for the request grid)
    pub const fn listing_grid(&self, grid: GridId) -> Option<Signal<GridState<Card>>> {
        match grid {
            GridId::SaleItems => Some(self.sale_items),
            GridId::LendingItems => Some(self.lending_items),
            GridId::Requests => None,
        }
    }

    pub const fn listing_form(&self, market: Marketplace) -> Signal<ListingForm> {
        match market {
            Marketplace::Sale => self.sell_form,
            Marketplace::Lending => self.lend_form,
        }
    }

    pub fn mount(&self, grid: GridId) {
        let mut mounted = self.mounted_grids;
        mounted.write().insert(grid);
    }

    pub fn unmount(&self, grid: GridId) {
        let mut mounted = self.mounted_grids;
        mounted.write().remove(&grid);
    }

    pub fn is_mounted(&self, grid: GridId) -> bool {
        self.mounted_grids.peek().contains(&grid)
    }
}
