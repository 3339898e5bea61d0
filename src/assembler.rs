//! HAL-style representation of category pages.
//!
//! Link targets are a presentation concern supplied by a [`LinkBuilder`]; the
//! assembler only decides which links a page and each of its items carry.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dto::categories::CategoryView;
use crate::pagination::Page;

/// Produces link targets for categories and category pages.
pub trait LinkBuilder {
    /// Canonical location of a single category.
    fn category(&self, name: &str) -> String;
    /// Target for replacing the category's description.
    fn update_category(&self, name: &str) -> String;
    /// Target for deleting the category.
    fn delete_category(&self, name: &str) -> String;
    /// Location of one page of the category listing.
    fn categories_page(&self, page: usize, size: usize) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    fn new(href: String) -> Self {
        Self { href }
    }
}

pub type Links = BTreeMap<&'static str, Link>;

/// A category decorated with its item links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryModel {
    #[serde(flatten)]
    pub category: CategoryView,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedCategories {
    pub categories: Vec<CategoryModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number: usize,
}

/// One page of categories with navigation links and page metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedCategories {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedCategories,
    #[serde(rename = "_links")]
    pub links: Links,
    pub page: PageMetadata,
}

/// Decorate a single category with `self`, `update` and `delete` links.
pub fn category_model<L>(category: CategoryView, links: &L) -> CategoryModel
where
    L: LinkBuilder + ?Sized,
{
    let item_links = Links::from([
        ("self", Link::new(links.category(&category.name))),
        ("update", Link::new(links.update_category(&category.name))),
        ("delete", Link::new(links.delete_category(&category.name))),
    ]);

    CategoryModel {
        category,
        links: item_links,
    }
}

/// Assemble a page of categories.
///
/// `self`, `first` and `last` are always present; `next` and `prev` only when
/// such a page exists. An empty listing still yields a well-formed page.
pub fn paged_categories<L>(page: Page<CategoryView>, links: &L) -> PagedCategories
where
    L: LinkBuilder + ?Sized,
{
    let total_pages = page.total_pages();
    let metadata = PageMetadata {
        size: page.size,
        total_elements: page.total_elements,
        total_pages,
        number: page.number,
    };

    let mut page_links = Links::from([
        ("self", Link::new(links.categories_page(page.number, page.size))),
        ("first", Link::new(links.categories_page(0, page.size))),
        (
            "last",
            Link::new(links.categories_page(total_pages.saturating_sub(1), page.size)),
        ),
    ]);
    if !page.is_last() {
        page_links.insert(
            "next",
            Link::new(links.categories_page(page.number + 1, page.size)),
        );
    }
    if !page.is_first() {
        // Past-the-end requests point back at the last real page.
        let prev = page.number.min(total_pages).saturating_sub(1);
        page_links.insert("prev", Link::new(links.categories_page(prev, page.size)));
    }

    let categories = page
        .items
        .into_iter()
        .map(|category| category_model(category, links))
        .collect();

    PagedCategories {
        embedded: EmbeddedCategories { categories },
        links: page_links,
        page: metadata,
    }
}
