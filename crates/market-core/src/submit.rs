//! Submission flow: turn a filled-in form into a new record.
//!
//! Both variants are gated on a signed-in identity. On success the form is
//! reset and closed and the matching grid is fetched again so the new record
//! shows up first. On failure the form is left as it was.

use thiserror::Error;

use crate::directory::{Collection, RemoteDirectory};
use crate::feed::{FetchOutcome, ListingFeed};
use crate::models::{
    Category, DocumentId, Fields, Identity, NewBorrowRequest, NewListing, DEFAULT_RENT_PERIOD,
};
use crate::page::{FormKind, GridId, PageSurface, Severity};
use crate::util::non_blank;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to continue.";
pub const LISTING_SUBMITTED_MESSAGE: &str =
    "Item Listing Submitted! Buyers will be able to see it.";
pub const REQUEST_SUBMITTED_MESSAGE: &str = "Borrow Request Submitted! Lenders will be notified.";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit. Please try again.";

/// Form input that cannot become a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in the {0} field.")]
    Required(&'static str),

    #[error("Please enter a valid {field} (got {value:?}).")]
    InvalidNumber { field: &'static str, value: String },
}

/// Which listing collection a listing form posts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marketplace {
    Sale,
    Lending,
}

impl Marketplace {
    #[must_use]
    pub const fn collection(self) -> Collection {
        match self {
            Self::Sale => Collection::SaleItems,
            Self::Lending => Collection::LendingItems,
        }
    }

    #[must_use]
    pub const fn grid(self) -> GridId {
        match self {
            Self::Sale => GridId::SaleItems,
            Self::Lending => GridId::LendingItems,
        }
    }

    #[must_use]
    pub const fn form(self) -> FormKind {
        match self {
            Self::Sale => FormKind::SellItem,
            Self::Lending => FormKind::LendItem,
        }
    }
}

/// Raw text of the sell/lend form controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub condition: String,
    pub description: String,
    /// Rent period, only read for lending listings
    pub period: String,
}

impl ListingForm {
    pub fn to_new_listing(&self, market: Marketplace) -> Result<NewListing, FormError> {
        let name = required("item name", &self.name)?;
        let category = required("category", &self.category)?;
        let price = parse_amount("price", &self.price)?;
        let period = match market {
            Marketplace::Sale => None,
            Marketplace::Lending => Some(
                non_blank(&self.period).unwrap_or(DEFAULT_RENT_PERIOD).to_string(),
            ),
        };

        Ok(NewListing {
            name: name.to_string(),
            category: Category::from(category),
            price,
            period,
            condition: self.condition.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Raw text of the borrow-request form controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowRequestForm {
    pub item_name: String,
    pub duration_days: String,
    pub max_price: String,
    pub description: String,
}

impl BorrowRequestForm {
    pub fn to_new_request(&self) -> Result<NewBorrowRequest, FormError> {
        let item_name = required("item name", &self.item_name)?;
        let raw_duration = required("duration", &self.duration_days)?;
        let duration_days = raw_duration
            .parse::<u32>()
            .ok()
            .filter(|days| *days > 0)
            .ok_or_else(|| FormError::InvalidNumber {
                field: "duration",
                value: raw_duration.to_string(),
            })?;
        let max_price_per_day = parse_amount("maximum price", &self.max_price)?;

        Ok(NewBorrowRequest {
            item_name: item_name.to_string(),
            duration_days,
            max_price_per_day,
            description: self.description.trim().to_string(),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    non_blank(value).ok_or(FormError::Required(field))
}

/// Parse an unsigned, finite dollar amount.
fn parse_amount(field: &'static str, value: &str) -> Result<f64, FormError> {
    let raw = required(field, value)?;
    let digits = raw.trim_start_matches('$');
    digits
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && !digits.starts_with(['-', '+']))
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record written under this id
    Written(DocumentId),
    /// Nobody is signed in; nothing was written
    LoginRequired,
    /// The form did not parse; nothing was written
    Invalid(FormError),
    /// The write was rejected; the form is kept
    Failed,
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Sell or lend form, bound to one listing collection for its lifetime
#[derive(Clone)]
pub struct ListingSubmission<D, P> {
    market: Marketplace,
    feed: ListingFeed<D, P>,
}

impl<D: RemoteDirectory, P: PageSurface> ListingSubmission<D, P> {
    pub const fn new(market: Marketplace, feed: ListingFeed<D, P>) -> Self {
        Self { market, feed }
    }

    pub const fn market(&self) -> Marketplace {
        self.market
    }

    pub async fn submit(&self, form: &ListingForm) -> SubmitOutcome {
        let market = self.market;
        let outcome = write_record(
            &self.feed,
            market.collection(),
            market.form(),
            LISTING_SUBMITTED_MESSAGE,
            |owner| Ok(form.to_new_listing(market)?.into_fields(owner)),
        )
        .await;

        if outcome.is_written() {
            refresh(self.feed.fetch_items(market.collection(), market.grid()).await);
        }
        outcome
    }
}

/// Borrow-request form
#[derive(Clone)]
pub struct RequestSubmission<D, P> {
    feed: ListingFeed<D, P>,
}

impl<D: RemoteDirectory, P: PageSurface> RequestSubmission<D, P> {
    pub const fn new(feed: ListingFeed<D, P>) -> Self {
        Self { feed }
    }

    pub async fn submit(&self, form: &BorrowRequestForm) -> SubmitOutcome {
        let outcome = write_record(
            &self.feed,
            Collection::BorrowRequests,
            FormKind::BorrowRequest,
            REQUEST_SUBMITTED_MESSAGE,
            |requester| Ok(form.to_new_request()?.into_fields(requester)),
        )
        .await;

        if outcome.is_written() {
            refresh(self.feed.fetch_requests().await);
        }
        outcome
    }
}

fn refresh(outcome: FetchOutcome) {
    tracing::debug!("Refetch after submission: {:?}", outcome);
}

async fn write_record<D: RemoteDirectory, P: PageSurface>(
    feed: &ListingFeed<D, P>,
    collection: Collection,
    form: FormKind,
    success_message: &str,
    build: impl FnOnce(&Identity) -> Result<Fields, FormError>,
) -> SubmitOutcome {
    let directory = feed.directory();
    let page = feed.page();

    let Some(identity) = directory.current_identity() else {
        tracing::info!("Submission to {} without a signed-in user", collection);
        page.alert_box(LOGIN_REQUIRED_MESSAGE, Severity::Error);
        return SubmitOutcome::LoginRequired;
    };

    let fields = match build(&identity) {
        Ok(fields) => fields,
        Err(error) => {
            tracing::warn!("Rejected {} form: {}", collection, error);
            page.alert_box(&error.to_string(), Severity::Error);
            return SubmitOutcome::Invalid(error);
        }
    };

    match directory.add_document(collection, fields).await {
        Ok(id) => {
            tracing::info!("Added {} to {}", id, collection);
            page.alert_box(success_message, Severity::Success);
            page.reset_form(form);
            page.hide_form(form);
            SubmitOutcome::Written(id)
        }
        Err(error) => {
            tracing::error!("Failed to add document to {}: {}", collection, error);
            page.alert_box(SUBMIT_FAILED_MESSAGE, Severity::Error);
            SubmitOutcome::Failed
        }
    }
}
