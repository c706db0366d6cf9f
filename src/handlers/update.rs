use crate::error::{ApiError, ErrorResponse};
use crate::extract::JsonBody;
use crate::models::{Todo, TodoInput};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

use super::parse_id;

/// PUT /todos/:id handler - Replace an existing todo
///
/// The stored id always comes from the path.
#[utoipa::path(
    put,
    path = routes::TODO_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the todo")
    ),
    request_body = TodoInput,
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 400, description = "Invalid UUID format or invalid JSON", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(input): JsonBody<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let id = parse_id(&id_str)?;

    let todo = state
        .todos
        .update(id, input)
        .await
        .map_err(ApiError::store("Error updating todo"))?
        .ok_or(ApiError::TodoNotFound(id))?;

    tracing::info!("Updated todo with id: {}", id);
    Ok((StatusCode::OK, Json(todo)))
}
