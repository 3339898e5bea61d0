//! Strongly-typed value objects used by the category entity.
//!
//! Domain structs carry these wrappers instead of raw primitives so that the
//! identifier format, non-blank text and counter constraints are enforced once,
//! at the boundary where values enter the domain.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A stored identifier could not be parsed as a UUID.
    #[error("{0} is not a valid identifier: {1}")]
    InvalidIdentifier(&'static str, String),
    /// A counter required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
}

/// Server-generated identity of a category.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Allocates a fresh random identifier. Only the store calls this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the textual form persisted by the store.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|e| TypeConstraintError::InvalidIdentifier("category_id", e.to_string()))
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! non_blank_text_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Name of the field reported in constraint errors.
            pub const FIELD: &'static str = $field;

            /// Trims surrounding whitespace and rejects blank input.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString($field));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

non_blank_text_newtype!(
    CategoryName,
    "Unique, case-preserving category name.",
    "name"
);
non_blank_text_newtype!(
    CategoryDescription,
    "Free-form category description.",
    "description"
);

/// Optimistic concurrency counter bumped by the store on every mutation.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EntityVersion(i32);

impl EntityVersion {
    pub const INITIAL: Self = Self(0);

    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("version"))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// The version a successful mutation produces.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Display for EntityVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
