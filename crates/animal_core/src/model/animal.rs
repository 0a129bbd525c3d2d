//! Animal domain model.
//!
//! # Responsibility
//! - Define the single catalog record managed by core.
//! - Provide structural (field-level) validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another animal.
//! - `catalog_number` is the lookup key; it is unique by convention only.
//! - Validation never consults other stored records.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Length of a well-formed catalog number.
pub const CATALOG_NUMBER_LEN: usize = 12;

static CATALOG_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Z]{12}$").expect("valid catalog number regex"));

/// Stable row identity of an animal.
///
/// Decoupled from the catalog number so that updates may re-key a record.
pub type AnimalId = Uuid;

/// Structural validation failure for [`Animal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimalValidationError {
    /// `id` is the nil UUID.
    NilId,
    /// A required string field is empty or whitespace-only.
    BlankField(&'static str),
    /// Catalog number is not 12 upper-case ASCII letters/digits.
    MalformedCatalogNumber(String),
    /// Age is below zero.
    NegativeAge(i32),
}

impl Display for AnimalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "animal id must not be nil"),
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::MalformedCatalogNumber(value) => write!(
                f,
                "catalog number `{value}` must be {CATALOG_NUMBER_LEN} upper-case letters or digits"
            ),
            Self::NegativeAge(age) => write!(f, "age ({age}) must be >= 0"),
        }
    }
}

impl Error for AnimalValidationError {}

/// Catalog record for one animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    /// Stable identity used to match rows on update.
    pub id: AnimalId,
    /// Human-facing lookup key, e.g. `01HNTWXTQSH4`.
    pub catalog_number: String,
    pub name: String,
    pub breed: String,
    /// Serialized as `type`; used as the search key.
    #[serde(rename = "type")]
    pub kind: String,
    pub age: i32,
    pub gender: String,
    pub is_healthy: bool,
}

impl Animal {
    /// Creates an animal with a generated stable ID.
    ///
    /// Does not validate; call [`Animal::validate`] before persisting.
    pub fn new(
        catalog_number: impl Into<String>,
        name: impl Into<String>,
        breed: impl Into<String>,
        kind: impl Into<String>,
        age: i32,
        gender: impl Into<String>,
        is_healthy: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalog_number: catalog_number.into(),
            name: name.into(),
            breed: breed.into(),
            kind: kind.into(),
            age,
            gender: gender.into(),
            is_healthy,
        }
    }

    /// Checks field-level invariants.
    ///
    /// Fields are checked in declaration order; the first failure wins.
    ///
    /// # Errors
    /// - `NilId` when `id` is nil.
    /// - `BlankField` when a required string is empty or whitespace-only.
    /// - `MalformedCatalogNumber` when the catalog number has the wrong shape.
    /// - `NegativeAge` when `age < 0`.
    pub fn validate(&self) -> Result<(), AnimalValidationError> {
        if self.id.is_nil() {
            return Err(AnimalValidationError::NilId);
        }

        let required = [
            ("catalog_number", self.catalog_number.as_str()),
            ("name", self.name.as_str()),
            ("breed", self.breed.as_str()),
            ("type", self.kind.as_str()),
            ("gender", self.gender.as_str()),
        ];
        for (field, value) in required {
            if is_blank(value) {
                return Err(AnimalValidationError::BlankField(field));
            }
        }

        if !is_valid_catalog_number(&self.catalog_number) {
            return Err(AnimalValidationError::MalformedCatalogNumber(
                self.catalog_number.clone(),
            ));
        }

        if self.age < 0 {
            return Err(AnimalValidationError::NegativeAge(self.age));
        }

        Ok(())
    }

    /// Returns whether [`Animal::validate`] passes.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Returns `true` for empty or whitespace-only input.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns whether `value` is a well-formed catalog number.
pub fn is_valid_catalog_number(value: &str) -> bool {
    CATALOG_NUMBER_RE.is_match(value)
}
