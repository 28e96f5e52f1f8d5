//! Buy & sell and lend & borrow views

use dioxus::prelude::*;

use market_core::submit::Marketplace;

use crate::app::Route;
use crate::components::{DetailModal, ItemGrid, ListingFormModal};
use crate::state::AppState;

#[component]
pub fn BuySell() -> Element {
    rsx! {
        MarketView { market: Marketplace::Sale }
    }
}

#[component]
pub fn LendBorrow() -> Element {
    rsx! {
        MarketView { market: Marketplace::Lending }
    }
}

/// Grid of one listing collection plus its posting form.
#[component]
fn MarketView(market: Marketplace) -> Element {
    let state = use_context::<AppState>();
    let mut open_form = state.open_form;

    let (title, subtitle, action) = match market {
        Marketplace::Sale => (
            "Buy & Sell",
            "Second-hand finds from fellow students.",
            "Sell an Item",
        ),
        Marketplace::Lending => (
            "Lend & Borrow",
            "Borrow what you need for a few days.",
            "Lend an Item",
        ),
    };

    rsx! {
        section { class: "market-view",
            div { class: "view-header",
                div {
                    h2 { "{title}" }
                    p { class: "view-subtitle", "{subtitle}" }
                }
                div { class: "view-actions",
                    if market == Marketplace::Lending {
                        Link { class: "secondary-btn", to: Route::Requests {}, "Need something?" }
                    }
                    button {
                        class: "post-btn",
                        onclick: move |_| open_form.set(Some(market.form())),
                        i { class: "fas fa-plus" }
                        " {action}"
                    }
                }
            }
            ItemGrid { grid: market.grid() }
            ListingFormModal { market }
            DetailModal {}
        }
    }
}
