//! Borrow request grid

use dioxus::prelude::*;

use market_core::card::RequestCard;
use market_core::page::GridId;

use crate::app::Feed;
use crate::state::AppState;

#[component]
pub fn RequestGrid() -> Element {
    let state = use_context::<AppState>();
    let feed = use_context::<Feed>();

    use_future(move || {
        let feed = feed.clone();
        async move {
            state.mount(GridId::Requests);
            feed.fetch_requests().await;
        }
    });
    use_drop(move || state.unmount(GridId::Requests));

    let contents = (state.requests)();
    let placeholder = contents.placeholder(GridId::Requests);

    rsx! {
        div { class: "requests-grid",
            if let Some(message) = placeholder {
                p { class: "grid-placeholder", "{message}" }
            }
            for request in contents.cards().iter().cloned() {
                RequestItem { key: "{request.id}", request }
            }
        }
    }
}

#[component]
fn RequestItem(request: RequestCard) -> Element {
    rsx! {
        div { class: "request-card",
            h3 { class: "request-name", "{request.item_name}" }
            div { class: "request-meta",
                span {
                    i { class: "fas fa-clock" }
                    " {request.duration}"
                }
                span {
                    i { class: "fas fa-dollar-sign" }
                    " {request.budget}"
                }
            }
            if !request.description.is_empty() {
                p { class: "request-desc", "{request.description}" }
            }
            p { class: "request-by", "Requested by {request.requester}" }
        }
    }
}
