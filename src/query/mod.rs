//! Catalog browsing: filter, search, paginate, and display helpers.
//!
//! Everything here is a pure function over a slice of records, so it works
//! the same on a live snapshot, the fallback list, or test fixtures.
//!
//! # Example
//!
//! ```
//! use atlas::catalog::{fallback_models, Category, CategoryFilter};
//! use atlas::query::{by_category, paginate, search};
//!
//! let catalog = fallback_models();
//! let media = by_category(&catalog, CategoryFilter::Only(Category::Media));
//! assert_eq!(media.len(), 4);
//!
//! let claude = search(&catalog, "CLAUDE");
//! assert!(claude.iter().all(|m| m.provider_name() == "Anthropic"));
//!
//! let page = paginate(&catalog, 12, 2);
//! assert_eq!(page.total_pages, 2);
//! assert_eq!(page.items.len(), 7);
//! ```

mod format;

pub use format::{format_price, strengths_of};

use serde::Serialize;

use crate::catalog::{Category, CategoryFilter, ModelRecord};

/// Records matching a category filter, in catalog order
pub fn by_category(records: &[ModelRecord], filter: CategoryFilter) -> Vec<&ModelRecord> {
    records.iter().filter(|record| filter.matches(record)).collect()
}

/// Case-insensitive search across a record's descriptive fields.
///
/// A record matches if the query appears in its name, provider,
/// description, any capability tag or display name, or its strengths text.
pub fn search<'a, R>(records: &'a [R], query: &str) -> Vec<&'a ModelRecord>
where
    R: AsRef<ModelRecord>,
{
    let query = query.to_lowercase();
    records
        .iter()
        .map(AsRef::as_ref)
        .filter(|record| matches_query(record, &query))
        .collect()
}

fn matches_query(record: &ModelRecord, query: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(query);

    contains(&record.name)
        || record.provider.as_deref().is_some_and(contains)
        || record.description.as_deref().is_some_and(contains)
        || record
            .capability_list()
            .iter()
            .any(|c: &Category| contains(c.as_str()) || contains(c.display_name()))
        || contains(&strengths_of(record))
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// 1-based page number actually served
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Total number of items across all pages
    pub total: usize,
}

/// Slice `items` into pages of `page_size` and return page `page` (1-based).
///
/// A page outside `1..=total_pages` serves page 1. A page size of zero is
/// treated as one.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);
    let page = if (1..=total_pages).contains(&page) {
        page
    } else {
        1
    };

    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
        total: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback_models;
    use proptest::prelude::*;

    #[test]
    fn test_all_returns_everything_in_order() {
        let catalog = fallback_models();
        let all = by_category(&catalog, CategoryFilter::All);
        let ids: Vec<_> = all.iter().map(|r| &r.id).collect();
        let expected: Vec<_> = catalog.iter().map(|r| &r.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_by_category_is_exact_subset() {
        let catalog = fallback_models();
        for category in Category::ALL {
            let hits = by_category(&catalog, CategoryFilter::Only(category));
            assert!(hits.iter().all(|r| r.has_capability(category)));
            let expected = catalog.iter().filter(|r| r.has_capability(category)).count();
            assert_eq!(hits.len(), expected);
        }
    }

    #[test]
    fn test_search_claude() {
        let catalog = fallback_models();
        let hits = search(&catalog, "claude");
        assert_eq!(hits.len(), 4);
        for record in hits {
            let text = format!(
                "{} {} {}",
                record.name,
                record.provider_name(),
                record.description.as_deref().unwrap_or("")
            )
            .to_lowercase();
            assert!(text.contains("claude"), "{}", record.id);
        }
    }

    #[test]
    fn test_search_matches_capability_names_and_strengths() {
        let catalog = fallback_models();

        // Display name only
        let hits = search(&catalog, "media generation");
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|r| r.has_capability(Category::Media)));

        // Strengths text only
        let hits = search(&catalog, "technical support");
        assert!(hits.iter().all(|r| r.has_capability(Category::ItSupport)));
        assert_eq!(hits.len(), 5);
    }

    #[test]
    fn test_search_works_on_references() {
        let catalog = fallback_models();
        let coding = by_category(&catalog, CategoryFilter::Only(Category::Coding));
        let owned: Vec<ModelRecord> = coding.into_iter().cloned().collect();
        assert_eq!(search(&owned, "mistral").len(), 2);
    }

    #[test]
    fn test_empty_query_matches_all() {
        let catalog = fallback_models();
        assert_eq!(search(&catalog, "").len(), catalog.len());
    }

    #[test]
    fn test_paginate_clamps_out_of_range() {
        let items: Vec<u32> = (1..=25).collect();

        let page = paginate(&items, 10, 3);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);

        let page = paginate(&items, 10, 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 10);

        let page = paginate(&items, 10, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_paginate_empty() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 10, 2);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
    }

    proptest! {
        #[test]
        fn prop_pages_cover_every_item_once(len in 0usize..200, size in 1usize..30) {
            let items: Vec<usize> = (0..len).collect();
            let first = paginate(&items, size, 1);

            let mut seen = Vec::new();
            for n in 1..=first.total_pages {
                let page = paginate(&items, size, n);
                prop_assert_eq!(page.page, n);
                prop_assert!(page.items.len() <= size);
                seen.extend_from_slice(page.items);
            }
            prop_assert_eq!(seen, items);
        }
    }
}
