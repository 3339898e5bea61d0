use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::Text;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, EntityVersion};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository};

diesel::define_sql_function! {
    /// SQLite `lower()`; folds ASCII letters only.
    fn lower(x: Text) -> Text;
}

fn to_domain(category: DbCategory) -> RepositoryResult<Category> {
    Ok(Category::try_from(category)?)
}

impl CategoryReader for DieselRepository {
    fn category_exists(&self, name: &str) -> RepositoryResult<bool> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(
            categories::table.filter(categories::name.eq(name)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }

    fn get_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::name.eq(name))
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        category.map(to_domain).transpose()
    }

    fn get_category_by_name_ci(&self, name: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(lower(categories::name).eq(lower(name)))
            .order((categories::created_at.asc(), categories::id.asc()))
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        category.map(to_domain).transpose()
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let total = categories::table.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = categories::table
            .order((categories::name.asc(), categories::id.asc()))
            .select(DbCategory::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(pagination) = &query.pagination {
            let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(to_domain)
            .collect::<RepositoryResult<Vec<Category>>>()?;

        Ok((total, items))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let row = DbNewCategory {
            id: CategoryId::generate().to_string(),
            name: category.name.as_str().to_string(),
            description: category
                .description
                .as_ref()
                .map(|d| d.as_str().to_string()),
            version: EntityVersion::INITIAL.get(),
            created_at: now,
            updated_at: now,
        };

        let created = diesel::insert_into(categories::table)
            .values(&row)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        to_domain(created)
    }

    fn update_category(&self, category: &Category) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let id = category.id.to_string();

        let updated = diesel::update(
            categories::table
                .filter(categories::id.eq(&id))
                .filter(categories::version.eq(category.version.get())),
        )
        .set((
            categories::description.eq(category.description.as_ref().map(|d| d.as_str())),
            categories::version.eq(category.version.next().get()),
            categories::updated_at.eq(Utc::now().naive_utc()),
        ))
        .returning(DbCategory::as_returning())
        .get_result::<DbCategory>(&mut conn)
        .optional()?;

        match updated {
            Some(row) => to_domain(row),
            None => Err(RepositoryError::StaleVersion(id)),
        }
    }

    fn delete_category_by_name(&self, name: &str) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(categories::table.filter(categories::name.eq(name)))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
