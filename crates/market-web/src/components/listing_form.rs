//! Sell / lend form modal

use dioxus::prelude::*;

use market_core::models::Category;
use market_core::submit::{ListingSubmission, Marketplace};

use crate::app::Feed;
use crate::state::AppState;

const CONDITIONS: [&str; 4] = ["New", "Like New", "Good", "Fair"];
const PERIODS: [&str; 3] = ["day", "week", "month"];

#[component]
pub fn ListingFormModal(market: Marketplace) -> Element {
    let state = use_context::<AppState>();
    let feed = use_context::<Feed>();
    let mut form = state.listing_form(market);
    let mut open_form = state.open_form;

    if open_form() != Some(market.form()) {
        return rsx! {};
    }

    let (title, price_label) = match market {
        Marketplace::Sale => ("Sell an Item", "Price ($)"),
        Marketplace::Lending => ("Lend an Item", "Rent ($)"),
    };
    let submission = ListingSubmission::new(market, feed);
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
        div { class: "form-container active",
            div { class: "form-content active",
                button {
                    class: "close-btn",
                    r#type: "button",
                    onclick: move |_| open_form.set(None),
                    i { class: "fas fa-times" }
                }
                h2 { "{title}" }
                form { class: "listing-form", onsubmit: on_submit,
                    label { "Item name" }
                    input {
                        r#type: "text",
                        required: true,
                        value: "{draft.name}",
                        oninput: move |evt| form.write().name = evt.value(),
                    }

                    label { "Category" }
                    select {
                        required: true,
                        value: "{draft.category}",
                        onchange: move |evt| form.write().category = evt.value(),
                        option { value: "", disabled: true, "Choose a category" }
                        for category in Category::KNOWN {
                            option { value: "{category.as_str()}", "{category.label()}" }
                        }
                    }

                    label { "{price_label}" }
                    input {
                        r#type: "number",
                        min: "0",
                        step: "0.01",
                        required: true,
                        value: "{draft.price}",
                        oninput: move |evt| form.write().price = evt.value(),
                    }

                    if market == Marketplace::Lending {
                        label { "Per" }
                        select {
                            value: "{draft.period}",
                            onchange: move |evt| form.write().period = evt.value(),
                            for period in PERIODS {
                                option { value: period, "{period}" }
                            }
                        }
                    }

                    label { "Condition" }
                    select {
                        value: "{draft.condition}",
                        onchange: move |evt| form.write().condition = evt.value(),
                        option { value: "", "Not stated" }
                        for condition in CONDITIONS {
                            option { value: condition, "{condition}" }
                        }
                    }

                    label { "Description" }
                    textarea {
                        rows: "4",
                        value: "{draft.description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }

                    button { class: "submit-btn", r#type: "submit", "Post Listing" }
                }
            }
        }
    }
}
