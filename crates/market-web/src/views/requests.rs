//! Borrow requests view

use dioxus::prelude::*;

use market_core::page::FormKind;

use crate::components::{RequestFormModal, RequestGrid};
use crate::state::AppState;

#[component]
pub fn Requests() -> Element {
    let state = use_context::<AppState>();
    let mut open_form = state.open_form;

    rsx! {
        section { class: "market-view",
            div { class: "view-header",
                div {
                    h2 { "Borrow Requests" }
                    p { class: "view-subtitle", "What fellow students are looking for." }
                }
                button {
                    id: "openNeedBtn",
                    class: "post-btn",
                    onclick: move |_| open_form.set(Some(FormKind::BorrowRequest)),
                    i { class: "fas fa-plus" }
                    " Post a Request"
                }
            }
            RequestGrid {}
            RequestFormModal {}
        }
    }
}
