use crate::error::{ApiError, ErrorResponse};
use crate::models::Todo;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /todos handler - List every stored todo, ordered by id
#[utoipa::path(
    get,
    path = routes::TODOS,
    responses(
        (status = 200, description = "All todos", body = Vec<Todo>),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "todos"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Todo>>), ApiError> {
    let todos = state
        .todos
        .list()
        .await
        .map_err(ApiError::store("Error getting todos"))?;

    tracing::info!("Listed {} todos", todos.len());
    Ok((StatusCode::OK, Json(todos)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{failing_app, memory_app, parse, send};

    #[tokio::test]
    async fn test_list_endpoint_empty() {
        let app = memory_app();

        let (status, body) = send(&app, "GET", "/todos", None).await;

        assert_eq!(status, StatusCode::OK);
        let todos: Vec<Todo> = parse(&body);
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_list_includes_created_todos() {
        let app = memory_app();

        let (_, body) = send(&app, "POST", "/todos", Some(r#"{"title":"first"}"#)).await;
        let first: Todo = parse(&body);
        let (_, body) = send(&app, "POST", "/todos", Some(r#"{"title":"second","completed":true}"#)).await;
        let second: Todo = parse(&body);

        let (status, body) = send(&app, "GET", "/todos", None).await;

        assert_eq!(status, StatusCode::OK);
        let todos: Vec<Todo> = parse(&body);
        assert_eq!(todos.len(), 2);
        assert!(todos.contains(&first));
        assert!(todos.contains(&second));
    }

    #[tokio::test]
    async fn test_list_endpoint_store_failure() {
        let app = failing_app();

        let (status, body) = send(&app, "GET", "/todos", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorResponse = parse(&body);
        assert_eq!(error.error, "Error getting todos");
    }
}
