use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Address, AddressInput, User};

/// Repository trait for User persistence
///
/// Mutations of the embedded arrays return whether a user (or user/address
/// pair) matched, so callers decide which not-found error to report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; fails with `DuplicateEmail` on an email collision
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Replace the stored access and refresh tokens
    async fn update_tokens(
        &self,
        id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> UserResult<bool>;

    /// Push an address onto the user's `addresses`
    async fn append_address(&self, user_id: Uuid, address: Address) -> UserResult<bool>;

    /// Overwrite the fields of one of the user's addresses in place
    async fn update_address(
        &self,
        user_id: Uuid,
        address_id: Uuid,
        input: AddressInput,
    ) -> UserResult<bool>;

    /// Remove one of the user's addresses
    async fn remove_address(&self, user_id: Uuid, address_id: Uuid) -> UserResult<bool>;

    /// Add a product id to the cart unless already present
    async fn add_cart_item(&self, user_id: Uuid, product_id: Uuid) -> UserResult<bool>;

    /// Remove every occurrence of a product id from the cart
    async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> UserResult<bool>;

    /// The user's cart, or `None` if the user does not exist
    async fn get_cart(&self, user_id: Uuid) -> UserResult<Option<Vec<Uuid>>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `f` to the user, reporting whether the user exists
    async fn modify<F>(&self, id: Uuid, f: F) -> bool
    where
        F: FnOnce(&mut User) -> bool,
    {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => f(user),
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        let email_exists = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));

        if email_exists {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned();
        Ok(user)
    }

    async fn update_tokens(
        &self,
        id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> UserResult<bool> {
        Ok(self
            .modify(id, |user| {
                user.tokens = vec![access_token.to_string()];
                user.refresh_tokens = vec![refresh_token.to_string()];
                user.updated_at = Utc::now();
                true
            })
            .await)
    }

    async fn append_address(&self, user_id: Uuid, address: Address) -> UserResult<bool> {
        Ok(self
            .modify(user_id, |user| {
                user.addresses.push(address);
                true
            })
            .await)
    }

    async fn update_address(
        &self,
        user_id: Uuid,
        address_id: Uuid,
        input: AddressInput,
    ) -> UserResult<bool> {
        Ok(self
            .modify(user_id, |user| {
                match user
                    .addresses
                    .iter_mut()
                    .find(|a| a.address_id == address_id)
                {
                    Some(address) => {
                        address.apply(input);
                        true
                    }
                    None => false,
                }
            })
            .await)
    }

    async fn remove_address(&self, user_id: Uuid, address_id: Uuid) -> UserResult<bool> {
        Ok(self
            .modify(user_id, |user| {
                let before = user.addresses.len();
                user.addresses.retain(|a| a.address_id != address_id);
                user.addresses.len() != before
            })
            .await)
    }

    async fn add_cart_item(&self, user_id: Uuid, product_id: Uuid) -> UserResult<bool> {
        Ok(self
            .modify(user_id, |user| {
                if !user.cart.contains(&product_id) {
                    user.cart.push(product_id);
                }
                true
            })
            .await)
    }

    async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> UserResult<bool> {
        Ok(self
            .modify(user_id, |user| {
                user.cart.retain(|id| *id != product_id);
                true
            })
            .await)
    }

    async fn get_cart(&self, user_id: Uuid) -> UserResult<Option<Vec<Uuid>>> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).map(|u| u.cart.clone()))
    }
}
