//! MongoUserRepository against a real MongoDB (testcontainers).
//!
//! Run with `cargo test -p domain_users -- --ignored` (requires Docker).

use domain_users::*;
use test_utils::{TestDataBuilder, TestMongo};
use uuid::Uuid;

fn user(builder: &TestDataBuilder, local: &str) -> User {
    User::new(builder.email(local), "hash".to_string(), None, None)
}

fn input(street: &str) -> AddressInput {
    AddressInput {
        street: street.to_string(),
        city: "Pune".to_string(),
        pincode: "411001".to_string(),
        house: "3".to_string(),
    }
}

async fn repository(mongo: &TestMongo) -> MongoUserRepository {
    let repo = MongoUserRepository::new(&mongo.database("users_repo"));
    repo.init_indexes().await.unwrap();
    repo
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_rejects_duplicate_email() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_duplicate_email");

    repo.create(user(&builder, "dup")).await.unwrap();

    let mut again = user(&builder, "dup");
    again.first_name = Some("Different".to_string());
    let err = repo.create(again).await.unwrap_err();

    assert!(matches!(err, UserError::DuplicateEmail(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_embedded_address_operations() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_addresses");

    let owner = repo.create(user(&builder, "owner")).await.unwrap();
    let other = repo.create(user(&builder, "other")).await.unwrap();

    let first = Address::new(input("First"));
    let second = Address::new(input("Second"));
    assert!(repo.append_address(owner.id, first.clone()).await.unwrap());
    assert!(repo.append_address(owner.id, second.clone()).await.unwrap());

    // Positional update keeps order and id
    assert!(repo
        .update_address(owner.id, first.address_id, input("Edited"))
        .await
        .unwrap());

    // Another user's id does not match the pair
    assert!(!repo
        .update_address(other.id, second.address_id, input("Hijacked"))
        .await
        .unwrap());

    let stored = repo.get_by_id(owner.id).await.unwrap().unwrap();
    assert_eq!(stored.addresses.len(), 2);
    assert_eq!(stored.addresses[0].address_id, first.address_id);
    assert_eq!(stored.addresses[0].street, "Edited");
    assert_eq!(stored.addresses[1], second);

    assert!(repo.remove_address(owner.id, first.address_id).await.unwrap());
    assert!(repo.remove_address(owner.id, second.address_id).await.unwrap());
    assert!(!repo.remove_address(owner.id, second.address_id).await.unwrap());

    let stored = repo.get_by_id(owner.id).await.unwrap().unwrap();
    assert!(stored.addresses.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_cart_set_semantics() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let builder = TestDataBuilder::from_test_name("mongo_cart");

    let u = repo.create(user(&builder, "cart")).await.unwrap();
    let product = Uuid::now_v7();

    assert!(repo.add_cart_item(u.id, product).await.unwrap());
    assert!(repo.add_cart_item(u.id, product).await.unwrap());
    assert_eq!(repo.get_cart(u.id).await.unwrap(), Some(vec![product]));

    assert!(repo.remove_cart_item(u.id, Uuid::now_v7()).await.unwrap());
    assert!(repo.remove_cart_item(u.id, product).await.unwrap());
    assert_eq!(repo.get_cart(u.id).await.unwrap(), Some(vec![]));

    assert!(!repo.add_cart_item(Uuid::now_v7(), product).await.unwrap());
    assert_eq!(repo.get_cart(Uuid::now_v7()).await.unwrap(), None);
}
