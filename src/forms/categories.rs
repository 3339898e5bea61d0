use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryDescription, CategoryName, TypeConstraintError};
use crate::errors::FieldViolation;
use crate::messages;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE, Pagination};

/// Body of `POST /categories`.
///
/// A missing or null `name` is reported as a field violation rather than a
/// malformed body.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[serde(default)]
    #[validate(length(max = 255, code = "validation.too.long"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, code = "validation.too.long"))]
    pub description: Option<String>,
}

/// Validated input of the create operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryPayload {
    pub name: CategoryName,
    pub description: Option<CategoryDescription>,
}

impl AddCategoryPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name,
            description: self.description,
        }
    }
}

/// Body of `PUT /categories/{name}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[serde(default)]
    #[validate(length(max = 2000, code = "validation.too.long"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryPayload {
    pub description: CategoryDescription,
}

/// Field violations found in a category request body, in field order.
#[derive(Debug, Error, PartialEq)]
#[error("category form has {} invalid field(s)", .0.len())]
pub struct CategoryFormError(pub Vec<FieldViolation>);

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string())
}

impl AddCategoryForm {
    /// Length limits apply to the value that gets stored.
    fn trimmed(self) -> Self {
        Self {
            name: trimmed(self.name),
            description: trimmed(self.description),
        }
    }
}

impl UpdateCategoryForm {
    fn trimmed(self) -> Self {
        Self {
            description: trimmed(self.description),
        }
    }
}

/// Accumulates violations from `validator` rules and value-object constructors.
struct FieldChecks {
    validation: Option<ValidationErrors>,
    violations: Vec<FieldViolation>,
}

impl FieldChecks {
    fn new(validation: Result<(), ValidationErrors>) -> Self {
        Self {
            validation: validation.err(),
            violations: Vec::new(),
        }
    }

    fn check<T>(&mut self, field: &'static str, parsed: Result<T, TypeConstraintError>) -> Option<T> {
        let before = self.violations.len();

        if let Err(TypeConstraintError::EmptyString(_)) = parsed {
            self.violations
                .push(FieldViolation::new(field, messages::VALIDATION_NOT_BLANK));
        }

        if let Some(errors) = self.validation.as_ref().and_then(|e| {
            e.field_errors()
                .get(field)
                .map(|list| list.iter().cloned().collect::<Vec<_>>())
        }) {
            for error in errors {
                let args = error
                    .params
                    .get("max")
                    .map(|max| vec![max.to_string()])
                    .unwrap_or_default();
                self.violations
                    .push(FieldViolation::new(field, error.code.to_string()).with_args(args));
            }
        }

        if self.violations.len() > before {
            None
        } else {
            parsed.ok()
        }
    }

    fn into_error(self) -> CategoryFormError {
        CategoryFormError(self.violations)
    }

    fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryPayload {
    type Error = CategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        let value = value.trimmed();
        let mut checks = FieldChecks::new(value.validate());

        let name = checks.check("name", CategoryName::new(value.name.unwrap_or_default()));
        let description = checks.check(
            "description",
            value.description.map(CategoryDescription::new).transpose(),
        );

        match (name, description) {
            (Some(name), Some(description)) if checks.is_clean() => Ok(Self { name, description }),
            _ => Err(checks.into_error()),
        }
    }
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryPayload {
    type Error = CategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        let value = value.trimmed();
        let mut checks = FieldChecks::new(value.validate());

        match checks.check(
            "description",
            CategoryDescription::new(value.description.unwrap_or_default()),
        ) {
            Some(description) if checks.is_clean() => Ok(Self { description }),
            _ => Err(checks.into_error()),
        }
    }
}

/// Query string of `GET /categories`.
///
/// Signed so that negative values reach validation instead of failing to parse.
#[derive(Debug, Deserialize, Validate)]
pub struct ListCategoriesQuery {
    #[validate(range(min = 0))]
    pub page: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid pagination parameters: {0}")]
pub struct ListCategoriesQueryError(pub String);

impl From<ValidationErrors> for ListCategoriesQueryError {
    fn from(value: ValidationErrors) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<ListCategoriesQuery> for Pagination {
    type Error = ListCategoriesQueryError;

    fn try_from(value: ListCategoriesQuery) -> Result<Self, Self::Error> {
        value.validate()?;

        let page = match value.page {
            Some(page) => usize::try_from(page)
                .map_err(|_| ListCategoriesQueryError(format!("page {page} is out of range")))?,
            None => 0,
        };
        let per_page = match value.size {
            Some(size) => usize::try_from(size)
                .ok()
                .filter(|size| *size <= MAX_ITEMS_PER_PAGE)
                .ok_or_else(|| {
                    ListCategoriesQueryError(format!(
                        "size {size} exceeds the maximum of {MAX_ITEMS_PER_PAGE}"
                    ))
                })?,
            None => DEFAULT_ITEMS_PER_PAGE,
        };

        Ok(Pagination { page, per_page })
    }
}

/// Query string of `DELETE /categories`.
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryQuery {
    pub name: String,
}
