use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: Uuid, input: TodoInput) -> Self {
        Self {
            id,
            title: input.title,
            completed: input.completed,
        }
    }
}

/// Request body for create and update
///
/// Any `id` sent by the client is ignored; ids are assigned on creation and
/// taken from the path on update.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Response type for successful DELETE operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_ignores_id_and_defaults_completed() {
        let input: TodoInput =
            serde_json::from_value(json!({"id": "client-chosen", "title": "buy milk"})).unwrap();
        assert_eq!(input.title, "buy milk");
        assert!(!input.completed);
    }

    #[test]
    fn test_input_requires_title() {
        assert!(serde_json::from_value::<TodoInput>(json!({"completed": true})).is_err());
    }

    #[test]
    fn test_todo_wire_format() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let todo = Todo::new(
            id,
            TodoInput {
                title: "buy milk".to_string(),
                completed: false,
            },
        );
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            json!({
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "title": "buy milk",
                "completed": false
            })
        );
    }
}
