use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User document as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Unique, lowercase
    pub email: String,
    /// Argon2 PHC string. Only [`UserResponse`] is ever sent to clients.
    pub password: String,
    /// Latest issued access token
    #[serde(default)]
    pub tokens: Vec<String>,
    /// Latest issued refresh token; a refresh must present one of these
    #[serde(default)]
    pub refresh_tokens: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    /// Product ids, no duplicates
    #[serde(default)]
    pub cart: Vec<Uuid>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl User {
    /// Create a new user (password must already be hashed)
    pub fn new(
        email: String,
        password_hash: String,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            first_name,
            last_name,
            email,
            password: password_hash,
            tokens: Vec::new(),
            refresh_tokens: Vec::new(),
            created_at: now,
            updated_at: now,
            addresses: Vec::new(),
            cart: Vec::new(),
            orders: Vec::new(),
        }
    }
}

/// Address embedded in a user's `addresses` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub address_id: Uuid,
    pub street: String,
    pub city: String,
    pub pincode: String,
    pub house: String,
}

impl Address {
    /// New address with a fresh id
    pub fn new(input: AddressInput) -> Self {
        Self {
            address_id: Uuid::now_v7(),
            street: input.street,
            city: input.city,
            pincode: input.pincode,
            house: input.house,
        }
    }

    /// Replace every field except the id
    pub fn apply(&mut self, input: AddressInput) {
        self.street = input.street;
        self.city = input.city;
        self.pincode = input.pincode;
        self.house = input.house;
    }
}

/// Address fields sent by clients on add and edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub pincode: String,
    pub house: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Digital,
    Cod,
}

/// Placed order. Checkout is not implemented, so none are written yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub order_id: Uuid,
    pub order_cart: Vec<Uuid>,
    pub ordered_at: DateTime<Utc>,
    /// Minor currency units
    pub price: i64,
    pub discount: i64,
    pub payment_mode: PaymentMode,
}

/// User response DTO (without password and tokens)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub addresses: Vec<Address>,
    pub cart: Vec<Uuid>,
    pub orders: Vec<Order>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
            addresses: user.addresses,
            cart: user.cart,
            orders: user.orders,
        }
    }
}

/// DTO for user signup
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignUpResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub message: String,
    pub address: Address,
}

/// Plain `{"message": ...}` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(street: &str) -> AddressInput {
        AddressInput {
            street: street.to_string(),
            city: "Pune".to_string(),
            pincode: "411001".to_string(),
            house: "12B".to_string(),
        }
    }

    #[test]
    fn test_new_user_starts_with_empty_arrays() {
        let user = User::new("a@b.io".into(), "hash".into(), None, None);
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["addresses"], serde_json::json!([]));
        assert_eq!(value["cart"], serde_json::json!([]));
        assert_eq!(value["orders"], serde_json::json!([]));
    }

    #[test]
    fn test_user_response_has_no_password_or_tokens() {
        let mut user = User::new("a@b.io".into(), "$argon2id$hash".into(), None, None);
        user.tokens.push("access".into());
        let value = serde_json::to_value(UserResponse::from(user.clone())).unwrap();

        assert!(value.get("password").is_none());
        assert!(value.get("tokens").is_none());
        assert!(value.get("refresh_tokens").is_none());
        assert_eq!(value["user_id"], user.id.to_string());
    }

    #[test]
    fn test_user_document_missing_arrays_deserialize_empty() {
        let json = serde_json::json!({
            "_id": Uuid::now_v7(),
            "email": "a@b.io",
            "password": "hash",
            "created_at": Utc::now(),
            "updated_at": Utc::now()
        });

        let user: User = serde_json::from_value(json).unwrap();
        assert!(user.addresses.is_empty());
        assert!(user.cart.is_empty());
        assert!(user.orders.is_empty());
    }

    #[test]
    fn test_address_apply_keeps_id() {
        let mut address = Address::new(input("MG Road"));
        let id = address.address_id;

        address.apply(input("FC Road"));
        assert_eq!(address.address_id, id);
        assert_eq!(address.street, "FC Road");
    }

    #[test]
    fn test_signup_request_validation() {
        let ok = SignUpRequest {
            email: "new@shop.io".into(),
            password: "secret".into(),
            first_name: Some("Ada".into()),
            last_name: None,
        };
        assert!(ok.validate().is_ok());

        let bad_email = SignUpRequest {
            email: "not-an-email".into(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_password = SignUpRequest {
            password: String::new(),
            ..ok
        };
        assert!(empty_password.validate().is_err());
    }
}
