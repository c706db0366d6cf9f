pub mod create;
pub mod delete;
pub mod get;
pub mod health;
pub mod list;
pub mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use get::get_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use update::update_handler;

use crate::error::ApiError;
use uuid::Uuid;

fn parse_id(id_str: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id_str).map_err(|_| ApiError::InvalidUuid(id_str.to_string()))
}
