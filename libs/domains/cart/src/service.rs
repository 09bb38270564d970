//! Cart Service - composes the user and product repositories

use domain_products::ProductRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CartError, CartResult};

pub struct CartService<U: UserRepository, P: ProductRepository> {
    users: Arc<U>,
    products: Arc<P>,
}

impl<U: UserRepository, P: ProductRepository> CartService<U, P> {
    pub fn new(users: Arc<U>, products: Arc<P>) -> Self {
        Self { users, products }
    }

    /// Add a product to the user's cart. Adding a product already in the
    /// cart succeeds without creating a second entry.
    ///
    /// A failed update and an update that matched no user both surface as
    /// `UpdateFailed`.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, user_id: Uuid, product_id: Uuid) -> CartResult<()> {
        if !self.products.exists(product_id).await? {
            return Err(CartError::ProductNotFound(product_id));
        }

        match self.users.add_cart_item(user_id, product_id).await {
            Ok(true) => {
                tracing::info!("Product added to cart");
                Ok(())
            }
            Ok(false) => {
                tracing::warn!("Cart add matched no user");
                Err(CartError::UpdateFailed("could not add product to cart".to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, "Cart add failed");
                Err(CartError::UpdateFailed("could not add product to cart".to_string()))
            }
        }
    }

    /// Remove every entry of a product. Removing an absent product succeeds.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, user_id: Uuid, product_id: Uuid) -> CartResult<()> {
        match self.users.remove_cart_item(user_id, product_id).await {
            Ok(true) => {
                tracing::info!("Product removed from cart");
                Ok(())
            }
            Ok(false) => {
                tracing::warn!("Cart remove matched no user");
                Err(CartError::UpdateFailed(
                    "could not remove product from cart".to_string(),
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, "Cart remove failed");
                Err(CartError::UpdateFailed(
                    "could not remove product from cart".to_string(),
                ))
            }
        }
    }

    /// Product ids in the cart, in insertion order
    #[instrument(skip(self))]
    pub async fn get_cart(&self, user_id: Uuid) -> CartResult<Vec<Uuid>> {
        let cart = self
            .users
            .get_cart(user_id)
            .await?
            .ok_or(CartError::UserNotFound(user_id))?;

        if cart.is_empty() {
            return Err(CartError::CartEmpty);
        }

        Ok(cart)
    }

    /// Checkout of the whole cart. Not implemented; writes nothing.
    #[instrument(skip(self))]
    pub async fn buy_from_cart(&self, user_id: Uuid) -> CartResult<()> {
        Err(CartError::NotImplemented("checkout"))
    }

    /// Checkout of a single product. Not implemented; writes nothing.
    #[instrument(skip(self))]
    pub async fn instant_buy(&self, user_id: Uuid, product_id: Uuid) -> CartResult<()> {
        Err(CartError::NotImplemented("instant buy"))
    }
}

impl<U: UserRepository, P: ProductRepository> Clone for CartService<U, P> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            products: Arc::clone(&self.products),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_products::{InMemoryProductRepository, NewProduct, Product};
    use domain_users::{InMemoryUserRepository, User};

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        service: CartService<InMemoryUserRepository, InMemoryProductRepository>,
        user_id: Uuid,
        product_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let product = Product::new(NewProduct {
            product_name: "Alienware x15".to_string(),
            price: 250_000,
            rating: 5,
            image_url: String::new(),
        });
        let product_id = product.id;
        let products = Arc::new(InMemoryProductRepository::with_products(vec![product]));

        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::new("cart@shop.io".to_string(), "hash".to_string(), None, None);
        let user_id = users.create(user).await.unwrap().id;

        Fixture {
            service: CartService::new(users.clone(), products),
            users,
            user_id,
            product_id,
        }
    }

    async fn cart(f: &Fixture) -> Vec<Uuid> {
        f.users.get_cart(f.user_id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found_and_cart_unchanged() {
        let f = fixture().await;
        let unknown = Uuid::now_v7();

        let err = f.service.add_to_cart(f.user_id, unknown).await.unwrap_err();

        assert!(matches!(err, CartError::ProductNotFound(id) if id == unknown));
        assert!(cart(&f).await.is_empty());
    }

    #[tokio::test]
    async fn test_add_same_product_twice_keeps_one_entry() {
        let f = fixture().await;

        f.service.add_to_cart(f.user_id, f.product_id).await.unwrap();
        f.service.add_to_cart(f.user_id, f.product_id).await.unwrap();

        assert_eq!(cart(&f).await, vec![f.product_id]);
    }

    #[tokio::test]
    async fn test_remove_absent_product_succeeds_and_cart_unchanged() {
        let f = fixture().await;
        f.service.add_to_cart(f.user_id, f.product_id).await.unwrap();

        f.service
            .remove_from_cart(f.user_id, Uuid::now_v7())
            .await
            .unwrap();

        assert_eq!(cart(&f).await, vec![f.product_id]);
    }

    #[tokio::test]
    async fn test_add_for_missing_user_is_update_failed() {
        let f = fixture().await;

        let err = f
            .service
            .add_to_cart(Uuid::now_v7(), f.product_id)
            .await
            .unwrap_err();

        assert!(matches!(err, CartError::UpdateFailed(_)));
    }

    #[tokio::test]
    async fn test_get_cart_distinguishes_missing_user_and_empty_cart() {
        let f = fixture().await;

        let err = f.service.get_cart(f.user_id).await.unwrap_err();
        assert!(matches!(err, CartError::CartEmpty));

        let err = f.service.get_cart(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, CartError::UserNotFound(_)));

        f.service.add_to_cart(f.user_id, f.product_id).await.unwrap();
        assert_eq!(f.service.get_cart(f.user_id).await.unwrap(), vec![f.product_id]);
    }

    #[tokio::test]
    async fn test_checkout_is_not_implemented_and_writes_nothing() {
        let f = fixture().await;
        f.service.add_to_cart(f.user_id, f.product_id).await.unwrap();

        let err = f.service.buy_from_cart(f.user_id).await.unwrap_err();
        assert!(matches!(err, CartError::NotImplemented(_)));

        let err = f
            .service
            .instant_buy(f.user_id, f.product_id)
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::NotImplemented(_)));

        let user = f.users.get_by_id(f.user_id).await.unwrap().unwrap();
        assert!(user.orders.is_empty());
        assert_eq!(user.cart, vec![f.product_id]);
    }
}
