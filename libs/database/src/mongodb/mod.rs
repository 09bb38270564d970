//! MongoDB connection management and helpers

mod config;
mod connector;
mod errors;
mod health;
mod values;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use errors::{DUPLICATE_KEY_CODE, is_duplicate_key};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use values::{stored_bson, uuid_bson};

pub use mongodb::{Client, Collection, Database};
