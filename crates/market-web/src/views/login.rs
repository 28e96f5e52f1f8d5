//! Sign-in and sign-up view

use dioxus::prelude::*;

use market_core::page::{PageSurface, Severity, View};

use crate::page::WebPage;
use crate::services::Directory;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
}

#[component]
pub fn Login() -> Element {
    let directory = use_context::<Directory>();
    let page = use_context::<WebPage>();
    let mut mode = use_signal(|| Mode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut display_name = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let demo = !directory.is_hosted();

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let (directory, page) = (directory.clone(), page.clone());
        let current_mode = mode();
        let email = email.peek().trim().to_string();
        let password = password.peek().clone();
        let display_name = display_name.peek().trim().to_string();

        if email.is_empty() || password.is_empty() {
            page.alert_box("Please enter your email and password.", Severity::Error);
            return;
        }
        if current_mode == Mode::SignUp && display_name.is_empty() {
            page.alert_box("Please enter a display name.", Severity::Error);
            return;
        }

        busy.set(true);
        spawn(async move {
            let result = match current_mode {
                Mode::SignIn => directory.sign_in(&email, &password).await,
                Mode::SignUp => directory.sign_up(&email, &password, &display_name).await,
            };
            busy.set(false);

            match result {
                Ok(identity) => {
                    tracing::info!("Signed in as {}", identity.uid);
                    let greeting = format!("Welcome, {}!", identity.display_name_or_fallback());
                    page.alert_box(&greeting, Severity::Success);
                    page.open_page(View::Home);
                }
                Err(error) => {
                    tracing::error!("Authentication failed: {}", error);
                    page.alert_box(&error.to_string(), Severity::Error);
                }
            }
        });
    };

    let (heading, action, switch_prompt, switch_label, other_mode) = match mode() {
        Mode::SignIn => (
            "Welcome back",
            "Login",
            "New here?",
            "Create an account",
            Mode::SignUp,
        ),
        Mode::SignUp => (
            "Create your account",
            "Sign up",
            "Already have an account?",
            "Log in",
            Mode::SignIn,
        ),
    };

    rsx! {
        section { class: "login-view",
            div { class: "login-card",
                h2 { "{heading}" }
                if demo {
                    p { class: "demo-banner",
                        "Demo mode: any email signs you in and listings stay in this tab."
                    }
                }
                form { class: "login-form", onsubmit: on_submit,
                    if mode() == Mode::SignUp {
                        label { "Display name" }
                        input {
                            r#type: "text",
                            value: "{display_name}",
                            oninput: move |evt| display_name.set(evt.value()),
                        }
                    }
                    label { "Email" }
                    input {
                        r#type: "email",
                        required: true,
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                    label { "Password" }
                    input {
                        r#type: "password",
                        required: true,
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                    button { class: "submit-btn", r#type: "submit", disabled: busy(), "{action}" }
                }
                p { class: "login-switch",
                    "{switch_prompt} "
                    button {
                        class: "link-btn",
                        r#type: "button",
                        onclick: move |_| mode.set(other_mode),
                        "{switch_label}"
                    }
                }
            }
        }
    }
}
