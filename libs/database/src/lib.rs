//! Document store plumbing shared by the domain crates.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client configuration, connection with retry,
//!   health checks and error classification
//! - `config` - `core_config::FromEnv` for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(&config.database);
//! ```
//!
//! Every repository call should be bounded with [`with_timeout`]:
//!
//! ```ignore
//! let user = with_timeout(self.op_timeout, self.collection.find_one(filter)).await??;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, with_timeout};
