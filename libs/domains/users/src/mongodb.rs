//! MongoDB implementation of UserRepository
//!
//! Addresses and cart entries live inside the user document, so every
//! mutation is a single-document update (`$push`, positional `$set`,
//! `$pull`, `$addToSet`) filtered by the user id and, for addresses, the
//! address id.

use async_trait::async_trait;
use chrono::Utc;
use database::{
    mongodb::{is_duplicate_key, stored_bson, uuid_bson},
    with_timeout,
};
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_document},
    options::IndexOptions,
};
use serde::Serialize;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Address, AddressInput, User};
use crate::repository::UserRepository;

const ADDRESSES: &str = "addresses";
const ADDRESS_ID: &str = "address_id";
const CART: &str = "cart";

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
    op_timeout: Duration,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository on the `users` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "users")
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
            op_timeout: database::common::DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Deadline applied to every repository call
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    /// Create the unique email index. Signup relies on it to reject duplicates.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_email_unique".to_string())
                    .build(),
            )
            .build();

        with_timeout(self.op_timeout, self.collection.create_index(index)).await??;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    fn bson_id(id: Uuid) -> Bson {
        uuid_bson(id)
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": Self::bson_id(id) }
    }

    /// `{_id: parent, "<field>.<child_key>": child}`
    fn child_filter(field: &str, parent_id: Uuid, child_key: &str, child_id: Uuid) -> Document {
        let mut filter = Self::id_filter(parent_id);
        filter.insert(format!("{}.{}", field, child_key), Self::bson_id(child_id));
        filter
    }

    /// `{$set: {"<field>.$.<key>": value, ...}}` for the element matched by the filter
    fn positional_set(field: &str, set: Document) -> Document {
        let mut fields = Document::new();
        for (key, value) in set {
            fields.insert(format!("{}.$.{}", field, key), value);
        }
        doc! { "$set": fields }
    }

    fn single_field(operator: &str, field: &str, value: impl Into<Bson>) -> Document {
        let mut inner = Document::new();
        inner.insert(field, value);
        let mut update = Document::new();
        update.insert(operator, inner);
        update
    }

    /// Run an update on one document and report whether the filter matched
    async fn update_matched(&self, filter: Document, update: Document) -> UserResult<bool> {
        let result =
            with_timeout(self.op_timeout, self.collection.update_one(filter, update)).await??;
        Ok(result.matched_count > 0)
    }

    async fn append_child<C>(&self, field: &str, parent_id: Uuid, child: &C) -> UserResult<bool>
    where
        C: Serialize + Sync,
    {
        let update = Self::single_field("$push", field, stored_bson(child)?);
        self.update_matched(Self::id_filter(parent_id), update).await
    }

    async fn update_child_by_id(
        &self,
        field: &str,
        parent_id: Uuid,
        child_key: &str,
        child_id: Uuid,
        set: Document,
    ) -> UserResult<bool> {
        let filter = Self::child_filter(field, parent_id, child_key, child_id);
        self.update_matched(filter, Self::positional_set(field, set))
            .await
    }

    async fn remove_child_by_id(
        &self,
        field: &str,
        parent_id: Uuid,
        child_key: &str,
        child_id: Uuid,
    ) -> UserResult<bool> {
        let filter = Self::child_filter(field, parent_id, child_key, child_id);
        let mut selector = Document::new();
        selector.insert(child_key, Self::bson_id(child_id));
        let update = Self::single_field("$pull", field, selector);
        self.update_matched(filter, update).await
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        match with_timeout(self.op_timeout, self.collection.insert_one(&user)).await? {
            Ok(_) => {
                tracing::info!(user_id = %user.id, "User created successfully");
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(UserError::DuplicateEmail(user.email)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user =
            with_timeout(self.op_timeout, self.collection.find_one(Self::id_filter(id))).await??;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = with_timeout(self.op_timeout, self.collection.find_one(filter)).await??;
        Ok(user)
    }

    #[instrument(skip(self, access_token, refresh_token))]
    async fn update_tokens(
        &self,
        id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> UserResult<bool> {
        let update = doc! {
            "$set": {
                "tokens": [access_token],
                "refresh_tokens": [refresh_token],
                "updated_at": stored_bson(&Utc::now())?,
            }
        };
        self.update_matched(Self::id_filter(id), update).await
    }

    #[instrument(skip(self, address), fields(address_id = %address.address_id))]
    async fn append_address(&self, user_id: Uuid, address: Address) -> UserResult<bool> {
        self.append_child(ADDRESSES, user_id, &address).await
    }

    #[instrument(skip(self, input))]
    async fn update_address(
        &self,
        user_id: Uuid,
        address_id: Uuid,
        input: AddressInput,
    ) -> UserResult<bool> {
        let set = to_document(&input)?;
        self.update_child_by_id(ADDRESSES, user_id, ADDRESS_ID, address_id, set)
            .await
    }

    #[instrument(skip(self))]
    async fn remove_address(&self, user_id: Uuid, address_id: Uuid) -> UserResult<bool> {
        self.remove_child_by_id(ADDRESSES, user_id, ADDRESS_ID, address_id)
            .await
    }

    #[instrument(skip(self))]
    async fn add_cart_item(&self, user_id: Uuid, product_id: Uuid) -> UserResult<bool> {
        let update = Self::single_field("$addToSet", CART, Self::bson_id(product_id));
        self.update_matched(Self::id_filter(user_id), update).await
    }

    #[instrument(skip(self))]
    async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> UserResult<bool> {
        let update = Self::single_field("$pull", CART, Self::bson_id(product_id));
        self.update_matched(Self::id_filter(user_id), update).await
    }

    #[instrument(skip(self))]
    async fn get_cart(&self, user_id: Uuid) -> UserResult<Option<Vec<Uuid>>> {
        Ok(self.get_by_id(user_id).await?.map(|user| user.cart))
    }
}
