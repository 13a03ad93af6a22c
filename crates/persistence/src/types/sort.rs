//! Sort directives for phrase search.
//!
//! A directive is written `field[:direction]`, e.g. `createdAt:desc`. Only the
//! fields mapped as `integer`, `keyword` or `date` are sortable; `phrase` is
//! analyzed text and cannot be ordered by the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl SortDirection {
    /// Returns the engine's order keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// A sortable phrase field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    /// `id`
    Id,
    /// `status`
    Status,
    /// `createdAt`
    CreatedAt,
    /// `updatedAt`
    UpdatedAt,
}

impl SortField {
    /// Returns the document field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Status => "status",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }
}

/// A sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    /// The field to sort by.
    pub field: SortField,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Creates a directive.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for SortDirective {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| StorageError::InvalidSort {
            value: s.to_string(),
            message: message.to_string(),
        };

        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field.trim(), Some(direction.trim())),
            None => (s.trim(), None),
        };

        let field = match field {
            "id" => SortField::Id,
            "status" => SortField::Status,
            "createdAt" => SortField::CreatedAt,
            "updatedAt" => SortField::UpdatedAt,
            "" => return Err(invalid("missing field")),
            _ => return Err(invalid("field is not sortable")),
        };

        let direction = match direction.map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Ascending,
            Some("desc") => SortDirection::Descending,
            Some(_) => return Err(invalid("direction must be 'asc' or 'desc'")),
        };

        Ok(Self { field, direction })
    }
}
