//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use database::{mongodb::uuid_bson, with_timeout};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
    op_timeout: Duration,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository on the `products` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "products")
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
            op_timeout: database::common::DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Deadline applied to every repository call
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    /// Initialize indexes for optimal query performance
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "product_name": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_product_name".to_string())
                    .build(),
            )
            .build();

        with_timeout(self.op_timeout, self.collection.create_index(index)).await??;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": uuid_bson(id) }
    }

    /// Regex filter on `product_name`; the query is matched literally
    fn search_filter(query: &str) -> Document {
        doc! {
            "product_name": { "$regex": regex::escape(query), "$options": "i" }
        }
    }

    async fn find_all(&self, filter: Document) -> ProductResult<Vec<Product>> {
        let products = with_timeout(self.op_timeout, async {
            let cursor = self.collection.find(filter).await?;
            cursor.try_collect::<Vec<Product>>().await
        })
        .await??;
        Ok(products)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        with_timeout(self.op_timeout, self.collection.insert_one(&product)).await??;

        tracing::info!(product_id = %product.id, "Product inserted");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        let count = with_timeout(
            self.op_timeout,
            self.collection
                .count_documents(Self::id_filter(id))
                .limit(1),
        )
        .await??;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        self.find_all(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> ProductResult<Vec<Product>> {
        self.find_all(Self::search_filter(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_escapes_regex_metacharacters() {
        let filter = MongoProductRepository::search_filter("x15 (2023)+");
        let inner = filter.get_document("product_name").unwrap();

        assert_eq!(inner.get_str("$regex").unwrap(), r"x15 \(2023\)\+");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }

    use crate::models::NewProduct;

    #[test]
    fn test_id_filter_matches_inserted_id() {
        let product = Product::new(NewProduct {
            product_name: "Alienware x15".to_string(),
            price: 250_000,
            rating: 5,
            image_url: String::new(),
        });
        let stored = ::mongodb::bson::to_raw_document_buf(&product)
            .unwrap()
            .to_document()
            .unwrap();

        let filter = MongoProductRepository::id_filter(product.id);

        assert_eq!(filter.get("_id"), stored.get("_id"));
        assert!(matches!(filter.get("_id"), Some(::mongodb::bson::Bson::Binary(_))));
    }
}
