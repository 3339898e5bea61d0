use serde::{Deserialize, Serialize};

use crate::domain::category::Category;

/// Wire representation of a category: no identity, version or timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryView {
    fn from(value: Category) -> Self {
        Self {
            name: value.name.into_inner(),
            description: value.description.map(String::from),
        }
    }
}
