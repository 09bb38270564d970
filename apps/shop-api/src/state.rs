//! Application state management

use axum_helpers::JwtAuth;
use domain_products::MongoProductRepository;
use domain_users::MongoUserRepository;
use mongodb::{Client, Database};
use std::sync::Arc;

use crate::config::Config;

/// Shared application state
///
/// Repositories are built once here and shared by every router, so all
/// collection handles come from the same client.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub db: Database,
    pub jwt: JwtAuth,
    pub users: Arc<MongoUserRepository>,
    pub products: Arc<MongoProductRepository>,
}

impl AppState {
    pub fn new(config: Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(&config.mongodb.database);
        let timeout = config.mongodb.operation_timeout();

        Self {
            jwt: JwtAuth::new(&config.jwt),
            users: Arc::new(MongoUserRepository::new(&db).with_operation_timeout(timeout)),
            products: Arc::new(MongoProductRepository::new(&db).with_operation_timeout(timeout)),
            config,
            mongo_client,
            db,
        }
    }
}
