//! Listing categories

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a listing. Unrecognized values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Electronics,
    Books,
    Stationery,
    Furniture,
    Vehicle,
    Other,
    /// A category string this client does not know about
    Unknown(String),
}

impl Category {
    /// Categories offered by the listing forms, in display order.
    pub const KNOWN: [Self; 6] = [
        Self::Electronics,
        Self::Books,
        Self::Stationery,
        Self::Furniture,
        Self::Vehicle,
        Self::Other,
    ];

    /// Stored (wire) form of the category
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Electronics => "electronics",
            Self::Books => "books",
            Self::Stationery => "stationery",
            Self::Furniture => "furniture",
            Self::Vehicle => "vehicle",
            Self::Other => "other",
            Self::Unknown(raw) => raw,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Electronics => "Electronics",
            Self::Books => "Books",
            Self::Stationery => "Stationery",
            Self::Furniture => "Furniture",
            Self::Vehicle => "Vehicle",
            Self::Other => "Other",
            Self::Unknown(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "electronics" => Self::Electronics,
            "books" => Self::Books,
            "stationery" => Self::Stationery,
            "furniture" => Self::Furniture,
            "vehicle" => Self::Vehicle,
            "other" => Self::Other,
            _ => Self::Unknown(value.trim().to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
