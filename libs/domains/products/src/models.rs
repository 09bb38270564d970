use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub product_name: String,
    /// Price in minor currency units
    pub price: i64,
    /// 0 to 5
    pub rating: u8,
    pub image_url: String,
}

impl Product {
    pub fn new(input: NewProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_name: input.product_name,
            price: input.price,
            rating: input.rating,
            image_url: input.image_url,
        }
    }
}

/// Fields for seeding a product; not exposed over HTTP
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 200))]
    pub product_name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(max = 5))]
    pub rating: u8,
    #[serde(default)]
    pub image_url: String,
}

/// Query parameters for catalog search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name
    pub q: Option<String>,
}

/// Response body for product listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductList {
    pub products: Vec<Product>,
}

impl From<Vec<Product>> for ProductList {
    fn from(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rating: u8) -> NewProduct {
        NewProduct {
            product_name: "Alienware x15".to_string(),
            price: 250_000,
            rating,
            image_url: "https://img.example/x15.png".to_string(),
        }
    }

    #[test]
    fn test_new_product_rating_bounds() {
        assert!(input(5).validate().is_ok());
        assert!(input(6).validate().is_err());
    }

    #[test]
    fn test_product_serializes_id_as_underscore_id() {
        let product = Product::new(input(4));
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["_id"], product.id.to_string());
        assert_eq!(value["product_name"], "Alienware x15");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_product_accepts_id_alias() {
        let id = Uuid::now_v7();
        let json = serde_json::json!({
            "id": id,
            "product_name": "Mouse",
            "price": 999,
            "rating": 3,
            "image_url": ""
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.id, id);
    }
}
