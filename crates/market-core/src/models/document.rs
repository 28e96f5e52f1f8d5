//! Raw documents as stored in the remote directory
//!
//! Documents are loosely typed field maps. They are converted into
//! [`Listing`](super::Listing) and [`BorrowRequest`](super::BorrowRequest)
//! at the read boundary, and every conversion failure is a [`RecordError`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Field holding the server-assigned creation timestamp on every record.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Identifier of a document within its collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a new random document id (20 hex characters, like the
    /// auto-ids the hosted store generates).
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string()[..20].to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
    String(String),
}

impl FieldValue {
    /// Type name used in error messages
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::Timestamp(_) => "timestamp",
            Self::String(_) => "string",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric value; integers widen to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// Total order across values, following the document store's cross-type
    /// ordering (null < boolean < number < timestamp < string).
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (a, b) if a.type_rank() == 2 && b.type_rank() == 2 => a
                .as_f64()
                .zip(b.as_f64())
                .and_then(|(a, b)| a.partial_cmp(&b))
                .unwrap_or(Ordering::Equal),
            (a, b) => a.type_rank().cmp(&b.type_rank()),
        }
    }

    const fn type_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Boolean(_) => 1,
            Self::Integer(_) | Self::Double(_) => 2,
            Self::Timestamp(_) => 3,
            Self::String(_) => 4,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Field map of a document
pub type Fields = BTreeMap<String, FieldValue>;

/// Errors converting a stored document into a typed record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("document {id} is missing field '{field}'")]
    MissingField { id: String, field: &'static str },

    #[error("document {id} field '{field}' should be {expected}, found {found}")]
    WrongType {
        id: String,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("document {id} field '{field}' is invalid: {reason}")]
    InvalidValue {
        id: String,
        field: &'static str,
        reason: String,
    },
}

/// A document read from a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    #[must_use]
    pub const fn new(id: DocumentId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Server-assigned creation time, if present and well-typed
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.fields
            .get(CREATED_AT_FIELD)
            .and_then(FieldValue::as_timestamp)
    }

    fn present(&self, field: &'static str) -> Result<&FieldValue, RecordError> {
        match self.fields.get(field) {
            None | Some(FieldValue::Null) => Err(RecordError::MissingField {
                id: self.id.to_string(),
                field,
            }),
            Some(value) => Ok(value),
        }
    }

    fn wrong_type(
        &self,
        field: &'static str,
        expected: &'static str,
        found: &FieldValue,
    ) -> RecordError {
        RecordError::WrongType {
            id: self.id.to_string(),
            field,
            expected,
            found: found.kind(),
        }
    }

    pub(crate) fn invalid(&self, field: &'static str, reason: impl Into<String>) -> RecordError {
        RecordError::InvalidValue {
            id: self.id.to_string(),
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn required_str(&self, field: &'static str) -> Result<&str, RecordError> {
        let value = self.present(field)?;
        value
            .as_str()
            .ok_or_else(|| self.wrong_type(field, "string", value))
    }

    /// String field that may be absent; present values of another type are errors.
    pub(crate) fn optional_str(&self, field: &'static str) -> Result<Option<&str>, RecordError> {
        match self.fields.get(field) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::String(value)) => Ok(Some(value)),
            Some(other) => Err(self.wrong_type(field, "string", other)),
        }
    }

    /// Numeric field. Numbers written as text by older clients are accepted.
    pub(crate) fn required_f64(&self, field: &'static str) -> Result<f64, RecordError> {
        let value = self.present(field)?;
        let number = match value {
            FieldValue::String(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|error| self.invalid(field, error.to_string()))?,
            other => other
                .as_f64()
                .ok_or_else(|| self.wrong_type(field, "number", other))?,
        };
        if number.is_finite() {
            Ok(number)
        } else {
            Err(self.invalid(field, "number is not finite"))
        }
    }

    pub(crate) fn required_i64(&self, field: &'static str) -> Result<i64, RecordError> {
        let value = self.present(field)?;
        match value {
            FieldValue::Integer(number) => Ok(*number),
            FieldValue::String(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|error| self.invalid(field, error.to_string())),
            other => Err(self.wrong_type(field, "integer", other)),
        }
    }

    pub(crate) fn required_timestamp(
        &self,
        field: &'static str,
    ) -> Result<DateTime<Utc>, RecordError> {
        let value = self.present(field)?;
        value
            .as_timestamp()
            .ok_or_else(|| self.wrong_type(field, "timestamp", value))
    }
}
