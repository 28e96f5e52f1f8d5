//! Card view-models built from records.
//!
//! The mapping from a record to its card is deterministic: the category
//! picks an icon and a color pair from a fixed table, and prices are
//! formatted the same way everywhere.

use std::fmt;

use crate::models::{BorrowRequest, Category, DocumentId, Listing};

/// Icon and colors for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub icon_class: &'static str,
    pub background: &'static str,
    pub color: &'static str,
}

/// Style for categories missing from the table
pub const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    icon_class: "fas fa-tag",
    background: "#f5f5f5",
    color: "#616161",
};

#[must_use]
pub const fn category_style(category: &Category) -> CategoryStyle {
    match category {
        Category::Electronics => CategoryStyle {
            icon_class: "fas fa-laptop",
            background: "#e3f2fd",
            color: "#1565c0",
        },
        Category::Books => CategoryStyle {
            icon_class: "fas fa-book",
            background: "#fff3e0",
            color: "#e65100",
        },
        Category::Stationery => CategoryStyle {
            icon_class: "fas fa-pen",
            background: "#f3e5f5",
            color: "#6a1b9a",
        },
        Category::Furniture => CategoryStyle {
            icon_class: "fas fa-couch",
            background: "#e8f5e9",
            color: "#2e7d32",
        },
        Category::Vehicle => CategoryStyle {
            icon_class: "fas fa-bicycle",
            background: "#fce4ec",
            color: "#ad1457",
        },
        Category::Other => CategoryStyle {
            icon_class: "fas fa-box",
            background: "#eceff1",
            color: "#455a64",
        },
        Category::Unknown(_) => DEFAULT_STYLE,
    }
}

/// Dollar amount, optionally per period: `$25`, `$2.50 / day`
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTag {
    pub amount: f64,
    pub period: Option<String>,
}

impl fmt::Display for PriceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", format_amount(self.amount))?;
        if let Some(period) = &self.period {
            write!(f, " / {period}")?;
        }
        Ok(())
    }
}

/// Whole amounts render without decimals, everything else with two.
///
/// The check runs on the value rounded to cents, so `2.999` is `3`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    // `+ 0.0` folds negative zero into zero
    let rounded = cents / 100.0 + 0.0;
    if cents % 100.0 == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.2}")
    }
}

/// Everything the grid and the detail overlay show for one listing
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: DocumentId,
    pub name: String,
    pub category_label: String,
    pub price: String,
    pub icon_class: &'static str,
    pub bg_color: &'static str,
    pub color: &'static str,
    pub condition: String,
    pub description: String,
    pub seller: String,
}

impl From<&Listing> for Card {
    fn from(listing: &Listing) -> Self {
        let style = category_style(&listing.category);
        let price = PriceTag {
            amount: listing.price,
            period: listing.period.clone(),
        };
        Self {
            id: listing.id.clone(),
            name: listing.name.clone(),
            category_label: listing.category.label().to_string(),
            price: price.to_string(),
            icon_class: style.icon_class,
            bg_color: style.background,
            color: style.color,
            condition: listing.condition.clone(),
            description: listing.description.clone(),
            seller: listing.owner_name.clone(),
        }
    }
}

/// Card for a borrow request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCard {
    pub id: DocumentId,
    pub item_name: String,
    pub duration: String,
    pub budget: String,
    pub description: String,
    pub requester: String,
}

impl From<&BorrowRequest> for RequestCard {
    fn from(request: &BorrowRequest) -> Self {
        let duration = if request.duration_days == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", request.duration_days)
        };
        let budget = PriceTag {
            amount: request.max_price_per_day,
            period: Some("day".to_string()),
        };
        Self {
            id: request.id.clone(),
            item_name: request.item_name.clone(),
            duration,
            budget: format!("up to {budget}"),
            description: request.description.clone(),
            requester: request.requester_name.clone(),
        }
    }
}
