use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the catalog service. Never generated locally.
pub type ProductId = i64;

/// A catalog item as returned by `GET /products`.
///
/// `image` and `rating` are optional so that sparse fixtures and alternate
/// services still deserialize; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

impl Product {
    /// Current value of an editable attribute, formatted for a text input.
    pub fn field_text(&self, field: ProductField) -> String {
        match field {
            ProductField::Title => self.title.clone(),
            ProductField::Price => format_price(self.price),
            ProductField::Description => self.description.clone(),
            ProductField::Category => self.category.clone(),
        }
    }
}

/// Entry returned by `GET /products/category/{name}`.
///
/// The endpoint actually yields product records of one category; only the
/// fields the dropdown needs are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: ProductId,
    pub category: String,
    pub title: String,
}

/// Attributes exposed by the update form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Title,
    Price,
    Description,
    Category,
}

impl ProductField {
    pub const ALL: [ProductField; 4] = [
        ProductField::Title,
        ProductField::Price,
        ProductField::Description,
        ProductField::Category,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Description => "Description",
            Self::Category => "Category",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Price => 1,
            Self::Description => 2,
            Self::Category => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Render a price the way the service sends it: integers without a
/// fractional part, everything else with the shortest round-trip form.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{}", price as i64)
    } else {
        format!("{}", price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_service_product() {
        let json = r#"{
            "id": 5,
            "title": "John Hardy Women's Legends Naga Gold & Silver Dragon Station Chain Bracelet",
            "price": 695,
            "description": "From our Legends Collection",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 5);
        assert_eq!(product.price, 695.0);
        assert_eq!(product.category, "jewelery");
        assert_eq!(
            product.rating,
            Some(Rating {
                rate: 4.6,
                count: 400
            })
        );
    }

    #[test]
    fn test_deserialize_sparse_product() {
        let json = r#"{"id": 1, "title": "Shirt", "price": 9.5, "category": "men"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.description, "");
        assert!(product.image.is_none());
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_category_summary_ignores_extra_fields() {
        let json = r#"{"id": 7, "title": "White Gold Plated Princess", "price": 9.99,
                       "category": "jewelery", "image": "x"}"#;
        let summary: CategorySummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, 7);
        assert_eq!(summary.category, "jewelery");
    }

    #[test]
    fn test_field_cycle_wraps() {
        assert_eq!(ProductField::Title.next(), ProductField::Price);
        assert_eq!(ProductField::Category.next(), ProductField::Title);
        assert_eq!(ProductField::Title.prev(), ProductField::Category);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(695.0), "695");
        assert_eq!(format_price(9.99), "9.99");
        assert_eq!(format_price(0.5), "0.5");
    }

    #[test]
    fn test_field_text_reads_each_attribute() {
        let product = Product {
            id: 1,
            title: "Shirt".into(),
            price: 12.5,
            description: "Cotton".into(),
            category: "men".into(),
            image: None,
            rating: None,
        };
        assert_eq!(product.field_text(ProductField::Title), "Shirt");
        assert_eq!(product.field_text(ProductField::Price), "12.5");
        assert_eq!(product.field_text(ProductField::Description), "Cotton");
        assert_eq!(product.field_text(ProductField::Category), "men");
    }
}
