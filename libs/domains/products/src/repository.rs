use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
///
/// The catalog is read-only over HTTP; `insert` exists for seeding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Check whether a product with this id exists
    async fn exists(&self, id: Uuid) -> ProductResult<bool>;

    /// List every product
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Case-insensitive substring match on `product_name`
    async fn search(&self, query: &str) -> ProductResult<Vec<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `products`, in order
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.retain(|p| p.id != product.id);
        products.push(product.clone());

        tracing::info!(product_id = %product.id, "Inserted product");
        Ok(product)
    }

    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        let products = self.products.read().await;
        Ok(products.iter().any(|p| p.id == id))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn search(&self, query: &str) -> ProductResult<Vec<Product>> {
        let needle = query.to_lowercase();
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.product_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
