//! Borrow request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::{Document, DocumentId, Fields, RecordError};
use super::{FieldValue, Identity};

pub(crate) const ITEM_NAME: &str = "itemName";
pub(crate) const DURATION_DAYS: &str = "durationDays";
pub(crate) const MAX_PRICE: &str = "maxPricePerDay";
pub(crate) const DESCRIPTION: &str = "description";
pub(crate) const REQUESTER_ID: &str = "requesterId";
pub(crate) const REQUESTER_NAME: &str = "requesterName";
pub(crate) const CREATED_AT: &str = super::CREATED_AT_FIELD;

/// A request to borrow an item for a number of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub id: DocumentId,
    pub item_name: String,
    pub duration_days: u32,
    /// Highest acceptable price per day, in dollars
    pub max_price_per_day: f64,
    pub description: String,
    pub requester_id: String,
    pub requester_name: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Document> for BorrowRequest {
    type Error = RecordError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        let duration = doc.required_i64(DURATION_DAYS)?;
        let duration_days = u32::try_from(duration)
            .ok()
            .filter(|days| *days > 0)
            .ok_or_else(|| doc.invalid(DURATION_DAYS, "duration must be a positive day count"))?;
        let max_price_per_day = doc.required_f64(MAX_PRICE)?;
        if max_price_per_day < 0.0 {
            return Err(doc.invalid(MAX_PRICE, "price must not be negative"));
        }

        Ok(Self {
            id: doc.id.clone(),
            item_name: doc.required_str(ITEM_NAME)?.to_string(),
            duration_days,
            max_price_per_day,
            description: doc.optional_str(DESCRIPTION)?.unwrap_or_default().to_string(),
            requester_id: doc.required_str(REQUESTER_ID)?.to_string(),
            requester_name: doc
                .optional_str(REQUESTER_NAME)?
                .unwrap_or_default()
                .to_string(),
            created_at: doc.required_timestamp(CREATED_AT)?,
        })
    }
}

/// Fields of a borrow request about to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrowRequest {
    pub item_name: String,
    pub duration_days: u32,
    pub max_price_per_day: f64,
    pub description: String,
}

impl NewBorrowRequest {
    /// Field map for the document store, stamped with the requester's identity.
    #[must_use]
    pub fn into_fields(self, requester: &Identity) -> Fields {
        let mut fields = Fields::new();
        fields.insert(ITEM_NAME.to_string(), self.item_name.into());
        fields.insert(
            DURATION_DAYS.to_string(),
            FieldValue::Integer(i64::from(self.duration_days)),
        );
        fields.insert(MAX_PRICE.to_string(), self.max_price_per_day.into());
        fields.insert(DESCRIPTION.to_string(), self.description.into());
        fields.insert(REQUESTER_ID.to_string(), requester.uid.clone().into());
        fields.insert(
            REQUESTER_NAME.to_string(),
            FieldValue::String(requester.display_name_or_fallback()),
        );
        fields
    }
}
