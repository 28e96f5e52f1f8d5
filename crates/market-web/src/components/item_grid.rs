//! Listing grid

use dioxus::prelude::*;

use market_core::page::GridId;

use super::ItemCard;
use crate::app::Feed;
use crate::state::AppState;

/// Grid of listing cards. Fetches its collection when it appears on the page.
#[component]
pub fn ItemGrid(grid: GridId) -> Element {
    let state = use_context::<AppState>();
    let feed = use_context::<Feed>();

    use_future(move || {
        let feed = feed.clone();
        async move {
            state.mount(grid);
            feed.fetch_items(grid.collection(), grid).await;
        }
    });
    use_drop(move || state.unmount(grid));

    let Some(cards) = state.listing_grid(grid) else {
        return rsx! {};
    };
    let contents = cards();
    let placeholder = contents.placeholder(grid);

    rsx! {
        div { class: "items-grid",
            if let Some(message) = placeholder {
                p { class: "grid-placeholder", "{message}" }
            }
            for card in contents.cards().iter().cloned() {
                ItemCard { key: "{card.id}", card }
            }
        }
    }
}
