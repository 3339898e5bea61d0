//! Message templates for user-facing text.
//!
//! Components that render text take a [`MessageSource`] instead of reaching for
//! global state, so tests can inject a plain closure.

use std::collections::HashMap;

pub const ERROR_MALFORMED_JSON: &str = "error.malformed.json";
pub const ERROR_INVALID_PARAMETERS: &str = "error.request.parameters";
pub const ERROR_VALIDATION_FAILED: &str = "error.validation.failed";
/// Arguments: entity, field, value.
pub const ERROR_ENTITY_EXISTS: &str = "error.entity.exists";
/// Arguments: entity, field, value.
pub const ERROR_ENTITY_NOT_FOUND: &str = "error.entity.notfound";
/// Arguments: method, path.
pub const ERROR_ROUTE_NOT_FOUND: &str = "error.route.notfound";
pub const ERROR_INTERNAL: &str = "error.internal";
pub const VALIDATION_NOT_BLANK: &str = "validation.not.blank";
/// Arguments: maximum length.
pub const VALIDATION_TOO_LONG: &str = "validation.too.long";

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    (ERROR_MALFORMED_JSON, "Request JSON is malformed or invalid."),
    (
        ERROR_INVALID_PARAMETERS,
        "Request parameters are missing or invalid.",
    ),
    (
        ERROR_VALIDATION_FAILED,
        "Validation failed for one or more fields.",
    ),
    (ERROR_ENTITY_EXISTS, "{0} with {1} {2} already exists."),
    (ERROR_ENTITY_NOT_FOUND, "{0} with {1} {2} does not exist."),
    (ERROR_ROUTE_NOT_FOUND, "No resource handles {0} {1}."),
    (ERROR_INTERNAL, "An unexpected error occurred."),
    (VALIDATION_NOT_BLANK, "must not be blank"),
    (VALIDATION_TOO_LONG, "size must be at most {0}"),
];

/// Resolves a message key and positional arguments into display text.
pub trait MessageSource: Send + Sync {
    fn message(&self, key: &str, args: &[&str]) -> String;
}

impl<F> MessageSource for F
where
    F: Fn(&str, &[&str]) -> String + Send + Sync,
{
    fn message(&self, key: &str, args: &[&str]) -> String {
        self(key, args)
    }
}

/// Template catalog with `{0}`-style positional placeholders.
///
/// Unknown keys resolve to the key itself.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Built-in English templates with `overrides` layered on top.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut catalog = Self::default();
        catalog.templates.extend(overrides);
        catalog
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES
                .iter()
                .map(|(key, template)| (key.to_string(), template.to_string()))
                .collect(),
        }
    }
}

impl MessageSource for MessageCatalog {
    fn message(&self, key: &str, args: &[&str]) -> String {
        let Some(template) = self.templates.get(key) else {
            return key.to_string();
        };
        args.iter()
            .enumerate()
            .fold(template.clone(), |text, (index, arg)| {
                text.replace(&format!("{{{index}}}"), arg)
            })
    }
}
