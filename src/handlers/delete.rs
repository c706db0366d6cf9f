use crate::error::{ApiError, ErrorResponse};
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

use super::parse_id;

/// DELETE /todos/:id handler - Remove a todo
///
/// Deleting an id that is not stored still succeeds.
#[utoipa::path(
    delete,
    path = routes::TODO_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the todo")
    ),
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 400, description = "Invalid UUID format", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_id(&id_str)?;

    state
        .todos
        .delete(id)
        .await
        .map_err(ApiError::store("Error deleting todo"))?;

    tracing::info!("Deleted todo with id: {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Todo deleted".to_string(),
        }),
    ))
}
