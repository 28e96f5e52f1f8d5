//! Navigation bar with the identity slot

use dioxus::prelude::*;

use market_core::page::{IdentitySlot, View};

use crate::app::{Gate, Route};
use crate::state::AppState;

const NAV_VIEWS: [View; 5] = [
    View::Home,
    View::BuySell,
    View::LendBorrow,
    View::Browse,
    View::Requests,
];

#[component]
pub fn Navbar() -> Element {
    let state = use_context::<AppState>();
    let gate = use_context::<Gate>();

    let sign_out = move |_| {
        let gate = gate.clone();
        spawn(async move {
            gate.sign_out().await;
        });
    };

    rsx! {
        nav { class: "navbar",
            Link { class: "brand", to: Route::Home {},
                i { class: "fas fa-store" }
                " Campus Market"
            }
            ul { class: "nav-links",
                for view in NAV_VIEWS {
                    li { key: "{view.path()}",
                        Link {
                            class: "nav-link",
                            active_class: "active",
                            to: Route::from(view),
                            "{view.title()}"
                        }
                    }
                }
            }
            div { class: "nav-identity",
                {match (state.identity_slot)() {
                    IdentitySlot::SignedIn { label } => rsx! {
                        span { class: "nav-user",
                            i { class: "fas fa-user-circle" }
                            " {label}"
                        }
                        button { class: "nav-signout", onclick: sign_out, "Sign out" }
                    },
                    IdentitySlot::SignedOut => rsx! {
                        Link { class: "nav-login", to: Route::Login {}, "Login" }
                    },
                }}
            }
        }
    }
}
