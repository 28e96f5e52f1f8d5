//! Listing model (items offered for sale or for lending)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::{Document, DocumentId, Fields, RecordError};
use super::{Category, FieldValue, Identity};

/// Rent period used when a lending listing does not state one.
pub const DEFAULT_RENT_PERIOD: &str = "day";

pub(crate) const NAME: &str = "name";
pub(crate) const CATEGORY: &str = "category";
pub(crate) const PRICE: &str = "price";
pub(crate) const PERIOD: &str = "period";
pub(crate) const CONDITION: &str = "condition";
pub(crate) const DESCRIPTION: &str = "description";
pub(crate) const OWNER_ID: &str = "sellerId";
pub(crate) const OWNER_NAME: &str = "sellerName";
pub(crate) const CREATED_AT: &str = super::CREATED_AT_FIELD;

/// An item listed by a student, read back from one of the listing collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: DocumentId,
    pub name: String,
    pub category: Category,
    /// Price in dollars
    pub price: f64,
    /// Rent period for lending listings (`None` for items on sale)
    pub period: Option<String>,
    pub condition: String,
    pub description: String,
    pub owner_id: String,
    pub owner_name: String,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Document> for Listing {
    type Error = RecordError;

    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        let price = doc.required_f64(PRICE)?;
        if price < 0.0 {
            return Err(doc.invalid(PRICE, "price must not be negative"));
        }

        Ok(Self {
            id: doc.id.clone(),
            name: doc.required_str(NAME)?.to_string(),
            category: doc
                .optional_str(CATEGORY)?
                .map_or(Category::Other, Category::from),
            price,
            period: doc.optional_str(PERIOD)?.map(str::to_string),
            condition: doc.optional_str(CONDITION)?.unwrap_or_default().to_string(),
            description: doc.optional_str(DESCRIPTION)?.unwrap_or_default().to_string(),
            owner_id: doc.required_str(OWNER_ID)?.to_string(),
            owner_name: doc.optional_str(OWNER_NAME)?.unwrap_or_default().to_string(),
            created_at: doc.required_timestamp(CREATED_AT)?,
        })
    }
}

/// Fields of a listing about to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub period: Option<String>,
    pub condition: String,
    pub description: String,
}

impl NewListing {
    /// Field map for the document store, stamped with the owner's identity.
    ///
    /// The creation timestamp is not included; the directory assigns it.
    #[must_use]
    pub fn into_fields(self, owner: &Identity) -> Fields {
        let mut fields = Fields::new();
        fields.insert(NAME.to_string(), self.name.into());
        fields.insert(CATEGORY.to_string(), self.category.as_str().into());
        fields.insert(PRICE.to_string(), self.price.into());
        if let Some(period) = self.period {
            fields.insert(PERIOD.to_string(), period.into());
        }
        fields.insert(CONDITION.to_string(), self.condition.into());
        fields.insert(DESCRIPTION.to_string(), self.description.into());
        fields.insert(OWNER_ID.to_string(), owner.uid.clone().into());
        fields.insert(
            OWNER_NAME.to_string(),
            FieldValue::String(owner.display_name_or_fallback()),
        );
        fields
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn stored(fields: Fields) -> Document {
        Document::new(DocumentId::from("item-1"), fields)
    }

    fn sample() -> NewListing {
        NewListing {
            name: "Desk lamp".to_string(),
            category: Category::Furniture,
            price: 12.0,
            period: None,
            condition: "Like new".to_string(),
            description: "Warm light, USB powered".to_string(),
        }
    }

    #[test]
    fn written_fields_read_back_as_listing() {
        let owner = Identity::new("uid-7", Some("Sam".to_string()));
        let created_at = Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap();
        let mut fields = sample().into_fields(&owner);
        fields.insert(CREATED_AT.to_string(), created_at.into());

        let listing = Listing::try_from(&stored(fields)).unwrap();
        assert_eq!(listing.name, "Desk lamp");
        assert_eq!(listing.category, Category::Furniture);
        assert_eq!(listing.owner_id, "uid-7");
        assert_eq!(listing.owner_name, "Sam");
        assert_eq!(listing.period, None);
        assert_eq!(listing.created_at, created_at);
    }

    #[test]
    fn owner_without_display_name_gets_placeholder() {
        let owner = Identity::new("uid-8", None);
        let fields = sample().into_fields(&owner);
        assert_eq!(
            fields.get(OWNER_NAME),
            Some(&FieldValue::String("Anonymous".to_string()))
        );
        assert!(!fields.contains_key(CREATED_AT));
    }

    #[test]
    fn missing_timestamp_is_rejected() {
        let owner = Identity::new("uid-7", None);
        let error = Listing::try_from(&stored(sample().into_fields(&owner))).unwrap_err();
        assert_eq!(
            error,
            RecordError::MissingField {
                id: "item-1".to_string(),
                field: CREATED_AT,
            }
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let owner = Identity::new("uid-7", None);
        let mut listing = sample();
        listing.price = -3.0;
        let mut fields = listing.into_fields(&owner);
        fields.insert(CREATED_AT.to_string(), Utc::now().into());
        assert!(matches!(
            Listing::try_from(&stored(fields)),
            Err(RecordError::InvalidValue { field: PRICE, .. })
        ));
    }
}
