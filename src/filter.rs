//! Client-side product filtering.
//!
//! The visible subset of the catalog is a pure function of the product list,
//! the search text and the category selector. It is recomputed from scratch
//! on every change; the catalog is small enough that a linear scan is cheaper
//! than maintaining an index.

use crate::catalog::Product;

/// Search is a case-insensitive substring match on the title (`needle` is
/// already lowercased); an empty category filter matches every category.
fn matches_lowered(product: &Product, needle: &str, category_filter: &str) -> bool {
    (category_filter.is_empty() || product.category == category_filter)
        && (needle.is_empty() || product.title.to_lowercase().contains(needle))
}

/// Compute the visible subset of `products`.
///
/// Stable: matching products keep their relative order.
pub fn compute_visible(
    products: &[Product],
    search_term: &str,
    category_filter: &str,
) -> Vec<Product> {
    let needle = search_term.to_lowercase();
    products
        .iter()
        .filter(|p| matches_lowered(p, &needle, category_filter))
        .cloned()
        .collect()
}
