//! Listing card

use dioxus::prelude::*;

use market_core::card::Card;

use crate::state::AppState;

/// One listing in a grid. Clicking it opens the detail overlay.
#[component]
pub fn ItemCard(card: Card) -> Element {
    let state = use_context::<AppState>();
    let mut detail = state.detail;
    let clicked = card.clone();

    rsx! {
        div {
            class: "item-card",
            onclick: move |_| detail.write().open(clicked.clone()),

            div {
                class: "item-image",
                style: "background-color: {card.bg_color}; color: {card.color};",
                i { class: "{card.icon_class} fa-3x" }
            }
            div { class: "item-info",
                h3 { class: "item-name", "{card.name}" }
                p { class: "item-price", "{card.price}" }
                div { class: "item-meta",
                    span { class: "item-category", "{card.category_label}" }
                    if !card.condition.is_empty() {
                        span { class: "item-condition", "{card.condition}" }
                    }
                }
            }
        }
    }
}
