//! Transient notice in the top-right corner

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn NoticeBanner() -> Element {
    let state = use_context::<AppState>();
    let Some(notice) = (state.notice)() else {
        return rsx! {};
    };
    let background = notice.severity.background();

    rsx! {
        div {
            id: "customAlert",
            class: "notice",
            role: "status",
            style: "background-color: {background};",
            "{notice.message}"
        }
    }
}
