use crate::error::{ApiError, ErrorResponse};
use crate::extract::JsonBody;
use crate::models::{Todo, TodoInput};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /todos handler - Create a todo with a freshly generated id
#[utoipa::path(
    post,
    path = routes::TODOS,
    request_body = TodoInput,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state
        .todos
        .create(input)
        .await
        .map_err(ApiError::store("Error creating todo"))?;

    tracing::info!("Created todo with id: {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}
