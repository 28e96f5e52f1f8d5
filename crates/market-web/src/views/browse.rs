//! Both listing grids, read-only

use dioxus::prelude::*;

use market_core::page::GridId;

use crate::components::{DetailModal, ItemGrid};

#[component]
pub fn Browse() -> Element {
    rsx! {
        section { class: "market-view",
            div { class: "view-header",
                h2 { "Browse" }
            }
            h3 { class: "grid-title", "For Sale" }
            ItemGrid { grid: GridId::SaleItems }
            h3 { class: "grid-title", "For Lending" }
            ItemGrid { grid: GridId::LendingItems }
            DetailModal {}
        }
    }
}
