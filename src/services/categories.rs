use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryView;
use crate::forms::categories::{AddCategoryPayload, UpdateCategoryPayload};
use crate::pagination::{Page, Pagination};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

const ENTITY: &str = "Category";
const NAME_FIELD: &str = "name";

fn already_exists(name: &str) -> ServiceError {
    ServiceError::AlreadyExists {
        entity: ENTITY,
        field: NAME_FIELD,
        value: name.to_string(),
    }
}

fn not_found(name: &str) -> ServiceError {
    ServiceError::NotFound {
        entity: ENTITY,
        field: NAME_FIELD,
        value: name.to_string(),
    }
}

/// Create a category and return the identity the store assigned.
///
/// The existence check is only an early exit: two concurrent creators can both
/// pass it, in which case the store's uniqueness constraint rejects the loser
/// and the conflict is reported the same way.
pub fn create_category<R>(payload: AddCategoryPayload, repo: &R) -> ServiceResult<CategoryId>
where
    R: CategoryReader + CategoryWriter,
{
    let category = payload.into_new_category();

    if repo.category_exists(category.name.as_str())? {
        return Err(already_exists(category.name.as_str()));
    }

    match repo.create_category(&category) {
        Ok(created) => Ok(created.id),
        Err(RepositoryError::Conflict(_)) => Err(already_exists(category.name.as_str())),
        Err(e) => Err(e.into()),
    }
}

/// Fetch a category by exact, case-sensitive name.
pub fn get_category<R>(name: &str, repo: &R) -> ServiceResult<CategoryView>
where
    R: CategoryReader,
{
    repo.get_category_by_name(name)?
        .map(CategoryView::from)
        .ok_or_else(|| not_found(name))
}

/// Replace the description of the category whose name matches ignoring case.
pub fn update_category<R>(name: &str, payload: UpdateCategoryPayload, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    let mut category = repo
        .get_category_by_name_ci(name)?
        .ok_or_else(|| not_found(name))?;

    category.description = Some(payload.description);
    repo.update_category(&category)?;

    Ok(())
}

/// Delete the category with exactly this name.
pub fn delete_category<R>(name: &str, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    if !repo.category_exists(name)? {
        return Err(not_found(name));
    }

    // A concurrent delete may win between the check and this call.
    match repo.delete_category_by_name(name)? {
        0 => Err(not_found(name)),
        _ => Ok(()),
    }
}

/// Load one page of categories ordered by name.
pub fn list_categories<R>(pagination: Pagination, repo: &R) -> ServiceResult<Page<CategoryView>>
where
    R: CategoryReader,
{
    let query = CategoryListQuery::default().paginate(pagination.page, pagination.per_page);
    let (total, categories) = repo.list_categories(query)?;

    Ok(Page::new(categories, pagination, total).map(CategoryView::from))
}
