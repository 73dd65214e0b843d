//! Integration tests for the catalog flow: fetch from a mock service, load
//! the store, filter and mutate locally.
//!
//! Each test starts its own wiremock server, so no test touches the network.

use catview::app::{App, AppEvent};
use catview::catalog::{CatalogClient, FetchError, ProductField};
use catview::store::{CatalogStore, EditState, StoreWarning};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_json() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 5,
            "title": "John Hardy Women's Legends Naga Gold & Silver Dragon Station Chain Bracelet",
            "price": 695,
            "description": "From our Legends Collection",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        },
        {
            "id": 6,
            "title": "Solid Gold Petite Micropave",
            "price": 168,
            "description": "Satisfaction Guaranteed.",
            "category": "jewelery"
        }
    ])
}

fn jewelery_json() -> serde_json::Value {
    json!([
        { "id": 5, "title": "John Hardy Bracelet", "price": 695, "category": "jewelery" },
        { "id": 6, "title": "Solid Gold Petite Micropave", "price": 168, "category": "jewelery" }
    ])
}

async fn mock_catalog() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/category/jewelery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jewelery_json()))
        .mount(&server)
        .await;
    server
}

async fn loaded_store(server: &MockServer) -> CatalogStore {
    let client = CatalogClient::new(&server.uri()).unwrap();
    let mut store = CatalogStore::new();
    store.set_products(client.fetch_all_products().await.unwrap());
    store.set_categories(client.fetch_category("jewelery").await.unwrap());
    store
}

fn visible_ids(store: &CatalogStore) -> Vec<i64> {
    store.filtered_products().iter().map(|p| p.id).collect()
}

// ============================================================================
// Mount
// ============================================================================

#[tokio::test]
async fn test_mount_populates_products_and_dropdown() {
    let server = mock_catalog().await;
    let store = loaded_store(&server).await;

    assert_eq!(visible_ids(&store), vec![1, 5, 6]);
    let labels: Vec<String> = store
        .category_options()
        .into_iter()
        .map(|o| o.label)
        .collect();
    assert_eq!(labels, vec!["All Categories", "jewelery"]);
}

#[tokio::test]
async fn test_failed_product_fetch_leaves_store_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = CatalogClient::new(&server.uri()).unwrap();
    let mut store = CatalogStore::new();
    match client.fetch_all_products().await {
        Ok(products) => store.set_products(products),
        Err(e) => assert!(matches!(e, FetchError::HttpStatus(503))),
    }
    assert!(store.products().is_empty());
    assert!(store.filtered_products().is_empty());
}

#[tokio::test]
async fn test_app_mount_sends_tagged_results() {
    let server = mock_catalog().await;
    let client = CatalogClient::new(&server.uri()).unwrap();
    let mut app = App::new(client, "jewelery");
    let (tx, mut rx) = mpsc::channel(8);

    app.mount(&tx);
    assert!(app.is_loading());

    let mut saw_products = false;
    let mut saw_categories = false;
    for _ in 0..2 {
        match rx.recv().await.unwrap() {
            AppEvent::ProductsLoaded { generation, result } => {
                assert_eq!(generation, 1);
                assert_eq!(result.unwrap().len(), 3);
                saw_products = true;
            }
            AppEvent::CategoriesLoaded { generation, result } => {
                assert_eq!(generation, 1);
                assert_eq!(result.unwrap().len(), 2);
                saw_categories = true;
            }
        }
    }
    assert!(saw_products && saw_categories);
}

#[tokio::test]
async fn test_reload_tags_results_with_new_generation() {
    let server = mock_catalog().await;
    let client = CatalogClient::new(&server.uri()).unwrap();
    let mut app = App::new(client, "jewelery");
    let (tx, mut rx) = mpsc::channel(8);

    app.mount(&tx);
    app.reload(&tx);
    assert_eq!(app.mount_generation, 2);

    // The first mount's tasks were aborted before they ever ran
    for _ in 0..2 {
        let generation = match rx.recv().await.unwrap() {
            AppEvent::ProductsLoaded { generation, .. } => generation,
            AppEvent::CategoriesLoaded { generation, .. } => generation,
        };
        assert_eq!(generation, 2);
    }
}

// ============================================================================
// Filter + local mutation over fetched data
// ============================================================================

#[tokio::test]
async fn test_search_and_category_filter() {
    let server = mock_catalog().await;
    let mut store = loaded_store(&server).await;

    store.set_search_term("GOLD");
    assert_eq!(visible_ids(&store), vec![5, 6]);

    store.set_category_filter("men's clothing");
    assert!(visible_ids(&store).is_empty());

    store.set_search_term("");
    assert_eq!(visible_ids(&store), vec![1]);
}

#[tokio::test]
async fn test_update_is_local_only() {
    let server = mock_catalog().await;
    let mut store = loaded_store(&server).await;

    let bracelet = store.products()[1].clone();
    store.begin_edit(&bracelet);
    assert_eq!(store.edit_state(), EditState::Editing);
    store
        .update_draft_field(ProductField::Title, "Dragon Bracelet")
        .unwrap();
    store.update_draft_field(ProductField::Price, "700").unwrap();
    store.submit_update().unwrap();

    assert_eq!(store.products()[1].title, "Dragon Bracelet");
    assert_eq!(store.products()[1].price, 700.0);
    assert_eq!(store.products().len(), 3);

    // Only the two GETs per fetch ever reached the service
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.method.as_str() == "GET"));
}

#[tokio::test]
async fn test_submit_without_edit_warns() {
    let server = mock_catalog().await;
    let mut store = loaded_store(&server).await;
    assert_eq!(store.submit_update(), Err(StoreWarning::NoDraft));
    assert_eq!(store.products().len(), 3);
}

#[tokio::test]
async fn test_delete_then_refetch_restores_product() {
    let server = mock_catalog().await;
    let mut store = loaded_store(&server).await;

    assert!(store.delete_product(1));
    assert!(!store.delete_product(1));
    assert_eq!(visible_ids(&store), vec![5, 6]);

    // A new mount reads the untouched service again
    let fresh = loaded_store(&server).await;
    assert_eq!(visible_ids(&fresh), vec![1, 5, 6]);
}
