use crate::repository::TodoRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoRepository,
}
