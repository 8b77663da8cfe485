//! Animal catalog record and its validation rule set.
//!
//! # Responsibility
//! - Define the single persisted entity of the catalog.
//! - Provide the ordered, all-or-nothing field validation shared by add and
//!   update paths.
//!
//! # Invariants
//! - `catalog_number` is the primary key and never changes after creation.
//! - `validate()` reports the first violation in field declaration order.
//! - `is_healthy` has no default; deserialization requires it explicitly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Exact length of a catalog number.
pub const CATALOG_NUMBER_LEN: usize = 12;
/// Inclusive length bounds for `name`, `breed` and `type`.
pub const TEXT_MIN_CHARS: usize = 2;
pub const TEXT_MAX_CHARS: usize = 30;
/// Inclusive age bounds in years.
pub const AGE_MIN: i32 = 0;
pub const AGE_MAX: i32 = 300;
/// Upper length bound checked before gender membership.
pub const GENDER_MAX_CHARS: usize = 6;
/// Gender values accepted by validation (case-sensitive).
pub const RECOGNIZED_GENDERS: &[&str] = &["Male", "Female"];

static CATALOG_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{12}$").expect("valid catalog number regex"));

/// One catalog entry.
///
/// Fields are public so callers can build records directly; nothing is
/// checked until [`AnimalRecord::validate`] runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    /// Unique 12-character uppercase alphanumeric code.
    pub catalog_number: String,
    pub name: String,
    pub breed: String,
    /// Free-form category label used by type search. Serialized as `type`.
    #[serde(rename = "type")]
    pub animal_type: String,
    pub age: i32,
    pub gender: String,
    pub is_healthy: bool,
}

/// First rule violation found by [`AnimalRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimalValidationError {
    /// Required text field is empty or whitespace-only.
    BlankField { field: &'static str },
    /// Catalog number does not match `^[A-Z0-9]{12}$`.
    InvalidCatalogNumber,
    /// Text length (in chars) outside the inclusive bounds.
    FieldLength {
        field: &'static str,
        len: usize,
        min: usize,
        max: usize,
    },
    AgeOutOfRange { age: i32 },
    GenderTooLong { len: usize },
    UnrecognizedGender,
}

impl AnimalValidationError {
    /// Name of the record field that failed, using wire naming.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankField { field } | Self::FieldLength { field, .. } => *field,
            Self::InvalidCatalogNumber => "catalogNumber",
            Self::AgeOutOfRange { .. } => "age",
            Self::GenderTooLong { .. } | Self::UnrecognizedGender => "gender",
        }
    }
}

impl Display for AnimalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { field } => write!(f, "{field} is required"),
            Self::InvalidCatalogNumber => write!(
                f,
                "catalogNumber must be {CATALOG_NUMBER_LEN} uppercase alphanumeric characters"
            ),
            Self::FieldLength {
                field,
                len,
                min,
                max,
            } => write!(f, "{field} length {len} is outside {min}..={max}"),
            Self::AgeOutOfRange { age } => {
                write!(f, "age {age} is outside {AGE_MIN}..={AGE_MAX}")
            }
            Self::GenderTooLong { len } => {
                write!(f, "gender length {len} exceeds {GENDER_MAX_CHARS}")
            }
            Self::UnrecognizedGender => write!(
                f,
                "gender must be one of {}",
                RECOGNIZED_GENDERS.join("|")
            ),
        }
    }
}

impl Error for AnimalValidationError {}

impl AnimalRecord {
    /// Runs the full rule set and returns the first violation.
    ///
    /// Order: catalogNumber, name, breed, type, age, gender. `is_healthy`
    /// is a plain `bool`, so both values pass.
    pub fn validate(&self) -> Result<(), AnimalValidationError> {
        validate_catalog_number(&self.catalog_number)?;
        validate_text("name", &self.name)?;
        validate_text("breed", &self.breed)?;
        validate_text("type", &self.animal_type)?;
        validate_age(self.age)?;
        validate_gender(&self.gender)?;
        Ok(())
    }

    /// Returns whether [`AnimalRecord::validate`] passes.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Returns whether `value` has the shape of a catalog number.
pub fn is_catalog_number(value: &str) -> bool {
    CATALOG_NUMBER_RE.is_match(value)
}

fn validate_catalog_number(value: &str) -> Result<(), AnimalValidationError> {
    require("catalogNumber", value)?;
    if !is_catalog_number(value) {
        return Err(AnimalValidationError::InvalidCatalogNumber);
    }
    Ok(())
}

fn validate_text(field: &'static str, value: &str) -> Result<(), AnimalValidationError> {
    require(field, value)?;
    let len = value.chars().count();
    if !(TEXT_MIN_CHARS..=TEXT_MAX_CHARS).contains(&len) {
        return Err(AnimalValidationError::FieldLength {
            field,
            len,
            min: TEXT_MIN_CHARS,
            max: TEXT_MAX_CHARS,
        });
    }
    Ok(())
}

fn validate_age(age: i32) -> Result<(), AnimalValidationError> {
    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(AnimalValidationError::AgeOutOfRange { age });
    }
    Ok(())
}

fn validate_gender(value: &str) -> Result<(), AnimalValidationError> {
    require("gender", value)?;
    let len = value.chars().count();
    if len > GENDER_MAX_CHARS {
        return Err(AnimalValidationError::GenderTooLong { len });
    }
    if !RECOGNIZED_GENDERS.contains(&value) {
        return Err(AnimalValidationError::UnrecognizedGender);
    }
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), AnimalValidationError> {
    if value.trim().is_empty() {
        return Err(AnimalValidationError::BlankField { field });
    }
    Ok(())
}
