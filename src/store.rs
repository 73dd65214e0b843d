//! In-memory catalog state and its local-only mutations.
//!
//! `CatalogStore` is the single owner of the product list and everything
//! derived from it. Every mutating operation finishes with an explicit call to
//! `recompute()`, so `filtered_products` never drifts from
//! `compute_visible(products, search_term, category_filter)`.
//!
//! Nothing here talks to the network: updates and deletions only change this
//! process's copy and are lost on reload.

use crate::catalog::{CategorySummary, Product, ProductField, ProductId};
use crate::filter::compute_visible;
use std::collections::HashSet;
use thiserror::Error;

/// Label of the dropdown entry that clears the category filter.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Where the update workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing,
}

/// User-facing warnings raised by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreWarning {
    #[error("Please fill in the update form.")]
    NoDraft,
}

/// Rejected edits to the draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("No product is being edited")]
    NoDraft,
    #[error("Price must be a number, got '{0}'")]
    InvalidPrice(String),
}

/// One entry of the category dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub label: String,
    /// Filter value applied when chosen; empty clears the filter.
    pub value: String,
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    filtered_products: Vec<Product>,
    search_term: String,
    category_filter: String,
    categories: Vec<CategorySummary>,
    selected_product: Option<Product>,
    editing_product: Option<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The visible subset, in catalog order.
    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered_products
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category_filter(&self) -> &str {
        &self.category_filter
    }

    pub fn categories(&self) -> &[CategorySummary] {
        &self.categories
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    /// The draft under edit, if any.
    pub fn editing_product(&self) -> Option<&Product> {
        self.editing_product.as_ref()
    }

    pub fn edit_state(&self) -> EditState {
        if self.editing_product.is_some() {
            EditState::Editing
        } else {
            EditState::Idle
        }
    }

    // ------------------------------------------------------------------
    // Population (fetch results)
    // ------------------------------------------------------------------

    /// Replace the product list with a freshly fetched catalog.
    ///
    /// Ids are expected to be unique; a repeated id is kept (the service is
    /// the source of truth) but logged since update/delete act on every match.
    pub fn set_products(&mut self, products: Vec<Product>) {
        let mut seen = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(p.id) {
                tracing::warn!(id = p.id, "Catalog contains a duplicate product id");
            }
        }
        self.products = products;
        self.recompute();
    }

    pub fn set_categories(&mut self, categories: Vec<CategorySummary>) {
        self.categories = categories;
    }

    /// Drop every piece of state, as on a fresh mount.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ------------------------------------------------------------------
    // Filter inputs
    // ------------------------------------------------------------------

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.recompute();
    }

    /// Set the category selector. An empty string removes the filter.
    pub fn set_category_filter(&mut self, category: impl Into<String>) {
        self.category_filter = category.into();
        self.recompute();
    }

    /// Dropdown entries: "All Categories" first, then one entry per distinct
    /// category among the fetched summaries, in first-seen order.
    ///
    /// The category endpoint returns product records of a single category, so
    /// listing one entry per record would show N labels that all apply the same
    /// filter. Entries are deduplicated by category and labelled with it.
    pub fn category_options(&self) -> Vec<CategoryOption> {
        let mut options = vec![CategoryOption {
            label: ALL_CATEGORIES.to_string(),
            value: String::new(),
        }];
        let mut seen = HashSet::new();
        for summary in &self.categories {
            if summary.category.is_empty() || !seen.insert(summary.category.as_str()) {
                continue;
            }
            options.push(CategoryOption {
                label: summary.category.clone(),
                value: summary.category.clone(),
            });
        }
        options
    }

    // ------------------------------------------------------------------
    // View modal
    // ------------------------------------------------------------------

    pub fn select_for_view(&mut self, product: &Product) {
        self.selected_product = Some(product.clone());
    }

    pub fn close_view(&mut self) {
        self.selected_product = None;
    }

    // ------------------------------------------------------------------
    // Edit workflow: Idle -> Editing -> Idle
    // ------------------------------------------------------------------

    /// Start editing a copy of `product`. Replaces any previous draft.
    pub fn begin_edit(&mut self, product: &Product) {
        self.editing_product = Some(product.clone());
    }

    /// Change one attribute of the draft. `products` is untouched.
    ///
    /// The price is parsed as a finite number (surrounding whitespace ignored);
    /// on failure the draft keeps its previous price.
    pub fn update_draft_field(
        &mut self,
        field: ProductField,
        value: &str,
    ) -> Result<(), DraftError> {
        let draft = self.editing_product.as_mut().ok_or(DraftError::NoDraft)?;
        match field {
            ProductField::Title => draft.title = value.to_string(),
            ProductField::Price => {
                let price = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|p| p.is_finite())
                    .ok_or_else(|| DraftError::InvalidPrice(value.to_string()))?;
                draft.price = price;
            }
            ProductField::Description => draft.description = value.to_string(),
            ProductField::Category => draft.category = value.to_string(),
        }
        Ok(())
    }

    /// Commit the draft over the product with the same id.
    ///
    /// The draft is cleared even when its id has since been deleted; in that
    /// case `products` is left as it was.
    pub fn submit_update(&mut self) -> Result<(), StoreWarning> {
        let draft = self.editing_product.take().ok_or(StoreWarning::NoDraft)?;

        let mut replaced = 0usize;
        for product in self.products.iter_mut().filter(|p| p.id == draft.id) {
            *product = draft.clone();
            replaced += 1;
        }
        tracing::debug!(id = draft.id, replaced, "Applied local product update");

        if self.selected_product.as_ref().is_some_and(|p| p.id == draft.id) && replaced > 0 {
            self.selected_product = Some(draft);
        }
        self.recompute();
        Ok(())
    }

    /// Leave the edit workflow without committing.
    pub fn cancel_edit(&mut self) {
        self.editing_product = None;
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Remove the product with `id`. Returns whether anything was removed;
    /// deleting an absent id is a no-op.
    pub fn delete_product(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        let removed = self.products.len() != before;

        if removed {
            tracing::debug!(id, "Deleted product locally");
            if self.selected_product.as_ref().is_some_and(|p| p.id == id) {
                self.selected_product = None;
            }
            self.recompute();
        }
        removed
    }

    fn recompute(&mut self) {
        self.filtered_products =
            compute_visible(&self.products, &self.search_term, &self.category_filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(id: i64, title: &str, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price: 10.0,
            description: format!("{} description", title),
            category: category.to_string(),
            image: None,
            rating: None,
        }
    }

    fn shirt_and_ring() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.set_products(vec![product(1, "Shirt", "men"), product(2, "Ring", "jewelery")]);
        store
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    fn summary(id: i64, category: &str, title: &str) -> CategorySummary {
        CategorySummary {
            id,
            category: category.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_new_store_is_empty_and_idle() {
        let store = CatalogStore::new();
        assert!(store.products().is_empty());
        assert!(store.filtered_products().is_empty());
        assert_eq!(store.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_set_products_populates_filtered() {
        let store = shirt_and_ring();
        assert_eq!(ids(store.filtered_products()), vec![1, 2]);
    }

    #[test]
    fn test_search_scenario() {
        let mut store = shirt_and_ring();
        store.set_search_term("ring");
        assert_eq!(ids(store.filtered_products()), vec![2]);
        assert_eq!(ids(store.products()), vec![1, 2]);
    }

    #[test]
    fn test_delete_scenario() {
        let mut store = shirt_and_ring();
        assert!(store.delete_product(1));
        assert_eq!(ids(store.products()), vec![2]);
        assert_eq!(ids(store.filtered_products()), vec![2]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut once = shirt_and_ring();
        once.delete_product(1);

        let mut twice = shirt_and_ring();
        assert!(twice.delete_product(1));
        assert!(!twice.delete_product(1));

        assert_eq!(once.products(), twice.products());
        assert_eq!(once.filtered_products(), twice.filtered_products());
    }

    #[test]
    fn test_delete_respects_active_filter() {
        let mut store = shirt_and_ring();
        store.set_category_filter("men");
        assert_eq!(ids(store.filtered_products()), vec![1]);
        store.delete_product(1);
        assert!(store.filtered_products().is_empty());
        assert_eq!(store.category_filter(), "men");
    }

    #[test]
    fn test_delete_clears_matching_selection() {
        let mut store = shirt_and_ring();
        let ring = store.products()[1].clone();
        store.select_for_view(&ring);
        store.delete_product(2);
        assert!(store.selected_product().is_none());
    }

    #[test]
    fn test_category_filter_and_clear() {
        let mut store = shirt_and_ring();
        store.set_category_filter("jewelery");
        assert_eq!(ids(store.filtered_products()), vec![2]);
        store.set_category_filter("");
        assert_eq!(ids(store.filtered_products()), vec![1, 2]);
    }

    #[test]
    fn test_update_replaces_exactly_one() {
        let mut store = CatalogStore::new();
        store.set_products(vec![
            product(1, "Shirt", "men"),
            product(2, "Ring", "jewelery"),
            product(3, "Laptop", "electronics"),
        ]);
        let before = store.products().to_vec();

        store.begin_edit(&before[1]);
        assert_eq!(store.edit_state(), EditState::Editing);
        store.update_draft_field(ProductField::Title, "Gold Ring").unwrap();
        store.update_draft_field(ProductField::Price, "19.5").unwrap();
        store.update_draft_field(ProductField::Description, "Shiny").unwrap();
        store.update_draft_field(ProductField::Category, "jewelry").unwrap();
        store.submit_update().unwrap();

        let after = store.products();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].id, 2);
        assert_eq!(after[1].title, "Gold Ring");
        assert_eq!(after[1].price, 19.5);
        assert_eq!(after[1].description, "Shiny");
        assert_eq!(after[1].category, "jewelry");
        assert_eq!(store.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_draft_edits_do_not_touch_products_until_submit() {
        let mut store = shirt_and_ring();
        let shirt = store.products()[0].clone();
        store.begin_edit(&shirt);
        store.update_draft_field(ProductField::Title, "Tee").unwrap();

        assert_eq!(store.products()[0].title, "Shirt");
        assert_eq!(store.editing_product().map(|p| p.title.as_str()), Some("Tee"));
    }

    #[test]
    fn test_update_recomputes_filtered() {
        let mut store = shirt_and_ring();
        store.set_search_term("ring");
        let shirt = store.products()[0].clone();
        store.begin_edit(&shirt);
        store.update_draft_field(ProductField::Title, "Earring").unwrap();
        store.submit_update().unwrap();
        assert_eq!(ids(store.filtered_products()), vec![1, 2]);
    }

    #[test]
    fn test_submit_without_draft_warns_and_changes_nothing() {
        let mut store = shirt_and_ring();
        let before = store.products().to_vec();
        assert_eq!(store.submit_update(), Err(StoreWarning::NoDraft));
        assert_eq!(store.products(), before.as_slice());
        assert_eq!(
            StoreWarning::NoDraft.to_string(),
            "Please fill in the update form."
        );
    }

    #[test]
    fn test_submit_for_deleted_id_is_silent_noop() {
        let mut store = shirt_and_ring();
        let shirt = store.products()[0].clone();
        store.begin_edit(&shirt);
        store.delete_product(1);
        store.update_draft_field(ProductField::Title, "Ghost").unwrap();

        assert_eq!(store.submit_update(), Ok(()));
        assert_eq!(ids(store.products()), vec![2]);
        assert_eq!(store.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_invalid_price_keeps_previous_value() {
        let mut store = shirt_and_ring();
        let shirt = store.products()[0].clone();
        store.begin_edit(&shirt);

        let err = store.update_draft_field(ProductField::Price, "12abc").unwrap_err();
        assert_eq!(err, DraftError::InvalidPrice("12abc".into()));
        assert!(store.update_draft_field(ProductField::Price, "").is_err());
        assert!(store.update_draft_field(ProductField::Price, "NaN").is_err());
        assert_eq!(store.editing_product().map(|p| p.price), Some(10.0));

        store.update_draft_field(ProductField::Price, " 7.25 ").unwrap();
        assert_eq!(store.editing_product().map(|p| p.price), Some(7.25));
    }

    #[test]
    fn test_update_draft_without_edit_is_error() {
        let mut store = shirt_and_ring();
        assert_eq!(
            store.update_draft_field(ProductField::Title, "x"),
            Err(DraftError::NoDraft)
        );
    }

    #[test]
    fn test_cancel_edit_returns_to_idle() {
        let mut store = shirt_and_ring();
        let ring = store.products()[1].clone();
        store.begin_edit(&ring);
        store.update_draft_field(ProductField::Title, "Changed").unwrap();
        store.cancel_edit();
        assert_eq!(store.edit_state(), EditState::Idle);
        assert_eq!(store.products()[1].title, "Ring");
    }

    #[test]
    fn test_view_select_and_close() {
        let mut store = shirt_and_ring();
        let ring = store.products()[1].clone();
        store.select_for_view(&ring);
        assert_eq!(store.selected_product(), Some(&ring));
        store.close_view();
        assert!(store.selected_product().is_none());
    }

    #[test]
    fn test_submit_refreshes_open_detail() {
        let mut store = shirt_and_ring();
        let ring = store.products()[1].clone();
        store.select_for_view(&ring);
        store.begin_edit(&ring);
        store.update_draft_field(ProductField::Title, "Platinum Ring").unwrap();
        store.submit_update().unwrap();
        assert_eq!(
            store.selected_product().map(|p| p.title.as_str()),
            Some("Platinum Ring")
        );
    }

    #[test]
    fn test_category_options_start_with_all_and_dedupe() {
        let mut store = CatalogStore::new();
        store.set_categories(vec![
            summary(5, "jewelery", "Naga Bracelet"),
            summary(6, "jewelery", "Solid Gold Petite Micropave"),
            summary(9, "electronics", "Portable Drive"),
        ]);

        let options = store.category_options();
        assert_eq!(
            options,
            vec![
                CategoryOption {
                    label: ALL_CATEGORIES.into(),
                    value: String::new(),
                },
                CategoryOption {
                    label: "jewelery".into(),
                    value: "jewelery".into(),
                },
                CategoryOption {
                    label: "electronics".into(),
                    value: "electronics".into(),
                },
            ]
        );
    }

    #[test]
    fn test_category_options_without_categories() {
        let store = CatalogStore::new();
        let options = store.category_options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = shirt_and_ring();
        store.set_search_term("ring");
        store.set_categories(vec![summary(5, "jewelery", "Bracelet")]);
        store.reset();
        assert!(store.products().is_empty());
        assert!(store.filtered_products().is_empty());
        assert_eq!(store.search_term(), "");
        assert!(store.categories().is_empty());
    }
}
