use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Form payload for creating a task.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    /// Must be between 1 and 200 characters once trimmed.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Optional in the form; an absent field becomes the empty string.
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

impl TaskInput {
    /// Trims surrounding whitespace so a blank title fails validation.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// A to-do item as stored in the `tasks` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// The user who created the task; the only user who can see or change it.
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_input_validation() {
        let valid = TaskInput {
            title: "Buy milk".to_string(),
            description: String::new(),
        };
        assert!(valid.validate().is_ok());

        let blank = TaskInput {
            title: "   ".to_string(),
            description: String::new(),
        }
        .normalized();
        assert!(blank.validate().is_err(), "blank title should be rejected");

        let long_title = TaskInput {
            title: "a".repeat(201),
            description: String::new(),
        };
        assert!(long_title.validate().is_err());

        let long_description = TaskInput {
            title: "Valid".to_string(),
            description: "b".repeat(1001),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let input: TaskInput = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert_eq!(input.description, "");
    }
}
