//! Landing view

use dioxus::prelude::*;

use crate::app::Route;

struct Section {
    route: Route,
    icon: &'static str,
    title: &'static str,
    blurb: &'static str,
}

fn sections() -> [Section; 4] {
    [
        Section {
            route: Route::BuySell {},
            icon: "fas fa-tags",
            title: "Buy & Sell",
            blurb: "Textbooks, gadgets and furniture from students nearby.",
        },
        Section {
            route: Route::LendBorrow {},
            icon: "fas fa-handshake",
            title: "Lend & Borrow",
            blurb: "Rent out what you rarely use, by the day.",
        },
        Section {
            route: Route::Browse {},
            icon: "fas fa-search",
            title: "Browse",
            blurb: "Everything on offer, newest first.",
        },
        Section {
            route: Route::Requests {},
            icon: "fas fa-bullhorn",
            title: "Borrow Requests",
            blurb: "Tell lenders what you need and for how long.",
        },
    ]
}

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "hero",
            h1 { "Campus Market" }
            p { "A peer-to-peer marketplace for buying, selling, lending and borrowing on campus." }
        }
        div { class: "home-sections",
            for section in sections() {
                Link { key: "{section.title}", class: "home-section", to: section.route,
                    i { class: "{section.icon} fa-2x" }
                    h3 { "{section.title}" }
                    p { "{section.blurb}" }
                }
            }
        }
    }
}
