//! Main application component and routes

use dioxus::prelude::*;

use market_core::directory::RemoteDirectory;
use market_core::feed::ListingFeed;
use market_core::gate::{decide, SessionGate};
use market_core::page::View;

use crate::bootstrap_config::load_directory_config;
use crate::components::{Navbar, NoticeBanner};
use crate::page::WebPage;
use crate::services::{connect_directory, Directory};
use crate::state::AppState;
use crate::views::{Browse, BuySell, Home, LendBorrow, Login, Requests};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const FONT_AWESOME: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

/// Listing feed shared by every grid and form on the page
pub type Feed = ListingFeed<Directory, WebPage>;

/// Session gate holding the page's auth subscription
pub type Gate = SessionGate<Directory, WebPage>;

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/buy-sell")]
    BuySell {},
    #[route("/lend-borrow")]
    LendBorrow {},
    #[route("/browse")]
    Browse {},
    #[route("/requests")]
    Requests {},
}

impl Route {
    pub const fn view(&self) -> View {
        match self {
            Self::Home {} => View::Home,
            Self::Login {} => View::Login,
            Self::BuySell {} => View::BuySell,
            Self::LendBorrow {} => View::LendBorrow,
            Self::Browse {} => View::Browse,
            Self::Requests {} => View::Requests,
        }
    }
}

impl From<View> for Route {
    fn from(view: View) -> Self {
        match view {
            View::Home => Self::Home {},
            View::Login => Self::Login {},
            View::BuySell => Self::BuySell {},
            View::LendBorrow => Self::LendBorrow {},
            View::Browse => Self::Browse {},
            View::Requests => Self::Requests {},
        }
    }
}

/// Root application component
#[component]
pub fn App() -> Element {
    let directory = use_context_provider(|| connect_directory(load_directory_config()));
    use_context_provider(AppState::new);
    let mut restored = use_signal(|| false);

    // Restore the previous session before any view is gated
    use_future(move || {
        let directory = directory.clone();
        async move {
            match directory.restore_session().await {
                Ok(Some(session)) => {
                    tracing::info!("Restored session for {}", session.identity.uid);
                }
                Ok(None) => {}
                Err(error) => tracing::warn!("Could not restore previous session: {}", error),
            }
            restored.set(true);
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: FONT_AWESOME }

        if restored() {
            Router::<Route> {}
        } else {
            div { class: "preloader", "Loading..." }
        }
    }
}

/// Shell around every view: navigation bar, notice, and the session gate.
#[component]
fn AppLayout() -> Element {
    let state = use_context::<AppState>();
    let directory = use_context::<Directory>();
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let router = router();

    let page = use_context_provider(|| WebPage::new(state, router, navigator));
    use_context_provider({
        let (directory, page) = (directory.clone(), page.clone());
        move || Feed::new(directory, page)
    });
    let gate = use_context_provider({
        let (directory, page) = (directory.clone(), page.clone());
        move || Gate::new(directory, page)
    });

    use_future(move || {
        let gate = gate.clone();
        async move { gate.run().await }
    });

    // Views reached by in-app navigation are gated as well as transitions
    let redirect = decide(directory.current_identity().as_ref(), route.view()).redirect;
    use_effect(use_reactive!(|redirect| {
        if let Some(target) = redirect {
            navigator.replace(Route::from(target));
        }
    }));
    if redirect.is_some() {
        return rsx! {};
    }

    rsx! {
        div { class: "market-app",
            Navbar {}
            NoticeBanner {}
            main { class: "market-main",
                Outlet::<Route> {}
            }
        }
    }
}
