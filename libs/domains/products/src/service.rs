//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};
use crate::repository::ProductRepository;

/// Product service providing catalog read operations
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Share an existing repository handle, e.g. with the cart service
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List the whole catalog
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Search products by name; an empty query is rejected
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: Option<&str>) -> ProductResult<Vec<Product>> {
        let query = query.map(str::trim).unwrap_or_default();
        if query.is_empty() {
            return Err(ProductError::Validation(
                "search query is required".to_string(),
            ));
        }

        self.repository.search(query).await
    }

    #[instrument(skip(self))]
    pub async fn product_exists(&self, id: Uuid) -> ProductResult<bool> {
        self.repository.exists(id).await
    }

    /// Validate and insert a product (seeding only)
    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    pub async fn create_product(&self, input: NewProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.insert(Product::new(input)).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
