use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{MessageResponse, Todo, TodoInput};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "todo-kv API",
        version = "1.0.0",
        description = "A todo list service backed by a key-value store"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::create::create_handler,
        handlers::get::get_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            Todo,
            TodoInput,
            MessageResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "todos", description = "Todo operations")
    )
)]
pub struct ApiDoc;
