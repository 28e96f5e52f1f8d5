//! Item detail overlay

use dioxus::prelude::*;

use market_core::detail::ClickTarget;

use crate::state::AppState;

#[component]
pub fn DetailModal() -> Element {
    let state = use_context::<AppState>();
    let mut detail = state.detail;

    // The overlay is page-wide; leaving the view dismisses it
    use_drop(move || detail.write().close());

    let Some(card) = detail.read().card().cloned() else {
        return rsx! {};
    };

    rsx! {
        div {
            id: "itemDetailModal",
            class: "modal-overlay active",
            onclick: move |_| detail.write().click(ClickTarget::Backdrop),

            div {
                class: "modal-content",
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    detail.write().click(ClickTarget::Panel);
                },

                button {
                    class: "close-btn",
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        detail.write().close();
                    },
                    i { class: "fas fa-times" }
                }
                div {
                    class: "modal-image",
                    style: "background-color: {card.bg_color}; color: {card.color};",
                    i { class: "{card.icon_class} fa-5x" }
                }
                h2 { "{card.name}" }
                p { class: "modal-price", "{card.price}" }
                dl { class: "modal-facts",
                    dt { "Category" }
                    dd { "{card.category_label}" }
                    if !card.condition.is_empty() {
                        dt { "Condition" }
                        dd { "{card.condition}" }
                    }
                    dt { "Listed by" }
                    dd { "{card.seller}" }
                }
                if !card.description.is_empty() {
                    p { class: "modal-desc", "{card.description}" }
                }
            }
        }
    }
}
