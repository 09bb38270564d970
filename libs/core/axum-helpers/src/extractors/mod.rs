//! Extractors that report rejections as [`AppError`](crate::errors::AppError) bodies.

pub mod current_user;
pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use current_user::CurrentUser;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
