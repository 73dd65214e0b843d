//! Application event handling.
//!
//! Applies fetch results from the mount tasks to the store. Results from an
//! older mount generation are dropped without touching state.

use crate::app::{App, AppEvent};
use crate::catalog::{CategorySummary, Product};
use crate::util::strip_control_chars;
use std::borrow::Cow;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ProductsLoaded { generation, result } => {
            if generation != app.mount_generation {
                tracing::debug!(
                    generation,
                    current = app.mount_generation,
                    "Discarding stale products result"
                );
                return;
            }
            app.products_loading = false;
            match result {
                Ok(products) => {
                    tracing::debug!(count = products.len(), "Products loaded");
                    app.store
                        .set_products(products.into_iter().map(sanitize_product).collect());
                    app.clamp_selection();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to fetch products");
                    app.set_status(format!("Could not load products: {}", e));
                }
            }
        }
        AppEvent::CategoriesLoaded { generation, result } => {
            if generation != app.mount_generation {
                tracing::debug!(
                    generation,
                    current = app.mount_generation,
                    "Discarding stale categories result"
                );
                return;
            }
            app.categories_loading = false;
            match result {
                Ok(categories) => {
                    tracing::debug!(count = categories.len(), "Categories loaded");
                    app.store
                        .set_categories(categories.into_iter().map(sanitize_summary).collect());
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        category = %app.category_source,
                        "Failed to fetch categories"
                    );
                    app.set_status(format!("Could not load categories: {}", e));
                }
            }
        }
    }
}

fn clean(s: String) -> String {
    if let Cow::Owned(cleaned) = strip_control_chars(&s) {
        return cleaned;
    }
    s
}

/// Strip terminal escapes from every string the service sent.
fn sanitize_product(product: Product) -> Product {
    Product {
        title: clean(product.title),
        description: clean(product.description),
        category: clean(product.category),
        image: product.image.map(clean),
        ..product
    }
}

fn sanitize_summary(summary: CategorySummary) -> CategorySummary {
    CategorySummary {
        category: clean(summary.category),
        title: clean(summary.title),
        ..summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogClient, FetchError};
    use pretty_assertions::assert_eq;

    fn test_app() -> App {
        let client = CatalogClient::new("http://127.0.0.1:9").unwrap();
        let mut app = App::new(client, "jewelery");
        app.mount_generation = 1;
        app.products_loading = true;
        app.categories_loading = true;
        app
    }

    fn product(id: i64, title: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price: 1.0,
            description: String::new(),
            category: "men".to_string(),
            image: None,
            rating: None,
        }
    }

    #[test]
    fn test_products_loaded_populates_store() {
        let mut app = test_app();
        handle_app_event(
            &mut app,
            AppEvent::ProductsLoaded {
                generation: 1,
                result: Ok(vec![product(1, "Shirt"), product(2, "Ring")]),
            },
        );
        assert_eq!(app.store.filtered_products().len(), 2);
        assert!(!app.products_loading);
        assert!(app.is_loading());
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut app = test_app();
        app.mount_generation = 2;
        handle_app_event(
            &mut app,
            AppEvent::ProductsLoaded {
                generation: 1,
                result: Ok(vec![product(1, "Shirt")]),
            },
        );
        assert!(app.store.products().is_empty());
        assert!(app.products_loading);
    }

    #[test]
    fn test_fetch_failure_leaves_store_empty() {
        let mut app = test_app();
        handle_app_event(
            &mut app,
            AppEvent::ProductsLoaded {
                generation: 1,
                result: Err(FetchError::HttpStatus(500)),
            },
        );
        assert!(app.store.products().is_empty());
        assert!(app.store.filtered_products().is_empty());
        assert!(!app.products_loading);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("Could not load products"));
    }

    #[test]
    fn test_results_apply_in_either_order() {
        let mut app = test_app();
        handle_app_event(
            &mut app,
            AppEvent::CategoriesLoaded {
                generation: 1,
                result: Ok(vec![CategorySummary {
                    id: 5,
                    category: "jewelery".into(),
                    title: "Bracelet".into(),
                }]),
            },
        );
        handle_app_event(
            &mut app,
            AppEvent::ProductsLoaded {
                generation: 1,
                result: Ok(vec![product(1, "Shirt")]),
            },
        );
        assert!(!app.is_loading());
        assert_eq!(app.store.categories().len(), 1);
        assert_eq!(app.store.products().len(), 1);
    }

    #[test]
    fn test_loaded_text_is_sanitized() {
        let mut app = test_app();
        handle_app_event(
            &mut app,
            AppEvent::ProductsLoaded {
                generation: 1,
                result: Ok(vec![product(1, "\x1b[31mRed\x1b[0m Shirt")]),
            },
        );
        assert_eq!(app.store.products()[0].title, "Red Shirt");
    }
}
