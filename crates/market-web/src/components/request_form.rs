//! Borrow-request form modal

use dioxus::prelude::*;

use market_core::page::FormKind;
use market_core::submit::RequestSubmission;

use crate::app::Feed;
use crate::state::AppState;

#[component]
pub fn RequestFormModal() -> Element {
    let state = use_context::<AppState>();
    let feed = use_context::<Feed>();
    let mut form = state.request_form;
    let mut open_form = state.open_form;

    if open_form() != Some(FormKind::BorrowRequest) {
        return rsx! {};
    }

    let submission = RequestSubmission::new(feed);
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = form.peek().clone();
        let submission = submission.clone();
        // Root-scoped: navigating away must not cancel the write
        spawn_forever(async move {
            submission.submit(&draft).await;
        });
    };
    let draft = form();

    rsx! {
        div { id: "needFormContainer", class: "form-container active",
            div { class: "form-content active",
                button {
                    class: "close-btn",
                    r#type: "button",
                    onclick: move |_| open_form.set(None),
                    i { class: "fas fa-times" }
                }
                h2 { "Post a Borrow Request" }
                form { class: "need-form", onsubmit: on_submit,
                    label { "What do you need?" }
                    input {
                        r#type: "text",
                        required: true,
                        value: "{draft.item_name}",
                        oninput: move |evt| form.write().item_name = evt.value(),
                    }

                    label { "For how many days?" }
                    input {
                        r#type: "number",
                        min: "1",
                        step: "1",
                        required: true,
                        value: "{draft.duration_days}",
                        oninput: move |evt| form.write().duration_days = evt.value(),
                    }

                    label { "Maximum price per day ($)" }
                    input {
                        r#type: "number",
                        min: "0",
                        step: "0.01",
                        required: true,
                        value: "{draft.max_price}",
                        oninput: move |evt| form.write().max_price = evt.value(),
                    }

                    label { "Details" }
                    textarea {
                        rows: "4",
                        value: "{draft.description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }

                    button { class: "submit-btn", r#type: "submit", "Post Request" }
                }
            }
        }
    }
}
