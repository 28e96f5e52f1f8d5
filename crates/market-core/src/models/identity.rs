//! Authenticated identity

use serde::{Deserialize, Serialize};

use crate::util::non_blank_owned;

/// Display name recorded when an identity has none.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// The currently signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned unique id
    pub uid: String,
    /// Profile display name, if the user set one
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(uid: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name,
            email: None,
        }
    }

    /// Display name to stamp onto records, falling back to a fixed placeholder.
    #[must_use]
    pub fn display_name_or_fallback(&self) -> String {
        non_blank_owned(self.display_name.as_deref())
            .unwrap_or_else(|| ANONYMOUS_DISPLAY_NAME.to_string())
    }

    /// Label for the navigation bar: display name, then email, then placeholder.
    #[must_use]
    pub fn nav_label(&self) -> String {
        non_blank_owned(self.display_name.as_deref())
            .or_else(|| non_blank_owned(self.email.as_deref()))
            .unwrap_or_else(|| ANONYMOUS_DISPLAY_NAME.to_string())
    }
}
