//! Page surface backed by Dioxus signals and the router.

use dioxus::prelude::*;

use market_core::card::{Card, RequestCard};
use market_core::page::{
    FormKind, GridId, GridState, IdentitySlot, Notice, PageSurface, Severity, View,
    NOTICE_DURATION,
};
use market_core::submit::{BorrowRequestForm, ListingForm};

use crate::app::Route;
use crate::services::sleep;
use crate::state::AppState;

#[derive(Clone)]
pub struct WebPage {
    state: AppState,
    router: RouterContext,
    navigator: Navigator,
}

impl WebPage {
    pub const fn new(state: AppState, router: RouterContext, navigator: Navigator) -> Self {
        Self {
            state,
            router,
            navigator,
        }
    }
}

impl PageSurface for WebPage {
    fn current_view(&self) -> View {
        self.router.current::<Route>().view()
    }

    fn open_page(&self, view: View) {
        tracing::debug!("Navigating to {}", view.path());
        self.navigator.push(Route::from(view));
    }

    fn alert_box(&self, message: &str, severity: Severity) {
        let mut notice = self.state.notice;
        let mut serial = self.state.notice_serial;
        let ticket = *serial.peek() + 1;
        serial.set(ticket);
        notice.set(Some(Notice::new(message, severity)));

        spawn_forever(async move {
            sleep(NOTICE_DURATION).await;
            if *serial.peek() == ticket {
                notice.set(None);
            }
        });
    }

    fn render_identity_slot(&self, slot: IdentitySlot) -> bool {
        let mut identity_slot = self.state.identity_slot;
        identity_slot.set(slot);
        true
    }

    fn render_listings(&self, grid: GridId, state: GridState<Card>) -> bool {
        if !self.state.is_mounted(grid) {
            return false;
        }
        let Some(mut cards) = self.state.listing_grid(grid) else {
            return false;
        };
        cards.set(state);
        true
    }

    fn render_requests(&self, state: GridState<RequestCard>) -> bool {
        if !self.state.is_mounted(GridId::Requests) {
            return false;
        }
        let mut requests = self.state.requests;
        requests.set(state);
        true
    }

    fn reset_form(&self, form: FormKind) {
        let AppState {
            mut sell_form,
            mut lend_form,
            mut request_form,
            ..
        } = self.state;
        match form {
            FormKind::SellItem => sell_form.set(ListingForm::default()),
            FormKind::LendItem => lend_form.set(ListingForm::default()),
            FormKind::BorrowRequest => request_form.set(BorrowRequestForm::default()),
        }
    }

    fn hide_form(&self, form: FormKind) {
        let mut open_form = self.state.open_form;
        if *open_form.peek() == Some(form) {
            open_form.set(None);
        }
    }
}
