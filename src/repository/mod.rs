//! Entity store contract and its Diesel/SQLite implementation.

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::pagination::Pagination;

pub mod category;
pub mod errors;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be moved into blocking tasks freely.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Window to load; `None` loads every category.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// Whether a category with exactly this name exists.
    fn category_exists(&self, name: &str) -> RepositoryResult<bool>;
    /// Retrieve a category by exact name.
    fn get_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category whose name matches ignoring ASCII case.
    ///
    /// When several names match, the earliest created category is returned.
    fn get_category_by_name_ci(&self, name: &str) -> RepositoryResult<Option<Category>>;
    /// List categories ordered by name, returning the total count alongside the
    /// requested window.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category, assigning its identity, version and timestamps.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Save the mutable fields of a loaded category.
    ///
    /// Succeeds only if the stored version still equals `category.version`;
    /// bumps the version and `updated_at`.
    fn update_category(&self, category: &Category) -> RepositoryResult<Category>;
    /// Delete the category with exactly this name, returning the affected row count.
    fn delete_category_by_name(&self, name: &str) -> RepositoryResult<usize>;
}
