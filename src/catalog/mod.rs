//! Remote catalog access.
//!
//! - [`client`] - read-only HTTP client for the catalog service
//! - [`types`] - records exchanged with the service
//!
//! # Example
//!
//! ```ignore
//! use catview::catalog::CatalogClient;
//!
//! let client = CatalogClient::new("https://fakestoreapi.com")?;
//! let products = client.fetch_all_products().await?;
//! let jewelery = client.fetch_category("jewelery").await?;
//! ```

mod client;
mod types;

pub use client::{CatalogClient, FetchError, DEFAULT_BASE_URL, MAX_RESPONSE_SIZE};
pub use types::{format_price, CategorySummary, Product, ProductField, ProductId, Rating};
