use crate::error::{ApiError, ErrorResponse};
use crate::models::Todo;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

use super::parse_id;

/// GET /todos/:id handler - Fetch a single todo
#[utoipa::path(
    get,
    path = routes::TODO_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the todo")
    ),
    responses(
        (status = 200, description = "Todo found", body = Todo),
        (status = 400, description = "Invalid UUID format", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let id = parse_id(&id_str)?;

    match state
        .todos
        .get(id)
        .await
        .map_err(ApiError::store("Error getting todo"))?
    {
        Some(todo) => {
            tracing::info!("Retrieved todo with id: {}", id);
            Ok((StatusCode::OK, Json(todo)))
        }
        None => {
            tracing::info!("Todo not found with id: {}", id);
            Err(ApiError::TodoNotFound(id))
        }
    }
}
