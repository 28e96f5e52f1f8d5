//! Session gate: reacts to authentication-state transitions.
//!
//! On every transition the navigation bar's identity slot is re-rendered,
//! and a signed-out visitor on a protected view is sent to the login view.

use crate::directory::RemoteDirectory;
use crate::models::Identity;
use crate::page::{IdentitySlot, PageSurface, Severity, View};

pub const SIGNED_OUT_MESSAGE: &str = "Signed out successfully.";
pub const SIGN_OUT_FAILED_MESSAGE: &str = "Failed to sign out. Please try again.";

/// What the gate does for one identity/view pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub slot: IdentitySlot,
    pub redirect: Option<View>,
}

#[must_use]
pub fn decide(identity: Option<&Identity>, view: View) -> GateDecision {
    match identity {
        Some(identity) => GateDecision {
            slot: IdentitySlot::SignedIn {
                label: identity.nav_label(),
            },
            redirect: None,
        },
        None => GateDecision {
            slot: IdentitySlot::SignedOut,
            redirect: view.is_protected().then_some(View::Login),
        },
    }
}

#[derive(Clone)]
pub struct SessionGate<D, P> {
    directory: D,
    page: P,
}

impl<D: RemoteDirectory, P: PageSurface> SessionGate<D, P> {
    pub const fn new(directory: D, page: P) -> Self {
        Self { directory, page }
    }

    /// Apply the decision for `identity` on the current view.
    pub fn apply(&self, identity: Option<&Identity>) -> GateDecision {
        let view = self.page.current_view();
        let decision = decide(identity, view);
        self.page.render_identity_slot(decision.slot.clone());
        if let Some(target) = decision.redirect {
            tracing::info!("Signed out on protected view {:?}, redirecting", view);
            self.page.open_page(target);
        }
        decision
    }

    /// Hold the page's single subscription, applying every transition,
    /// starting with the current state. Returns when the directory drops
    /// its side of the subscription.
    pub async fn run(&self) {
        let mut session = self.directory.subscribe();
        loop {
            let identity = session.borrow_and_update().clone();
            self.apply(identity.as_ref());
            if session.changed().await.is_err() {
                tracing::debug!("Session subscription closed");
                break;
            }
        }
    }

    /// Sign-out control: end the session, confirm, go to the login view.
    pub async fn sign_out(&self) -> bool {
        match self.directory.sign_out().await {
            Ok(()) => {
                self.page.alert_box(SIGNED_OUT_MESSAGE, Severity::Success);
                self.page.open_page(View::Login);
                true
            }
            Err(error) => {
                tracing::error!("Sign-out failed: {}", error);
                self.page.alert_box(SIGN_OUT_FAILED_MESSAGE, Severity::Error);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_in_shows_identity_and_never_redirects() {
        let identity = Identity::new("uid-1", Some("Noor".to_string()));
        for view in [View::Home, View::BuySell, View::Requests] {
            let decision = decide(Some(&identity), view);
            assert_eq!(
                decision.slot,
                IdentitySlot::SignedIn {
                    label: "Noor".to_string()
                }
            );
            assert_eq!(decision.redirect, None);
        }
    }

    #[test]
    fn signed_out_redirects_only_from_protected_views() {
        assert_eq!(decide(None, View::Home).redirect, None);
        assert_eq!(decide(None, View::Login).redirect, None);
        assert_eq!(decide(None, View::Browse).redirect, Some(View::Login));
        assert_eq!(decide(None, View::LendBorrow).slot, IdentitySlot::SignedOut);
    }
}
