use serde::{Deserialize, Serialize};

use crate::board::batch::Cardinality;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Insert,
    Update,
    Cancel,
}

/// Descriptor returned by every successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub action_type: String,
    pub message: String,
    pub description: String,
}

impl ActionResponse {
    pub fn new(action: BoardAction, cardinality: Cardinality) -> Self {
        let (action_type, message, description) = match (action, cardinality) {
            (BoardAction::Insert, Cardinality::Single) => (
                "TaskInsert",
                "The task was inserted in your board successfully",
                "Insertion of task in user board",
            ),
            (BoardAction::Insert, Cardinality::Bulk) => (
                "BulkTaskInsert",
                "The tasks was inserted in your board successfully",
                "Insertion of multiples tasks in user board",
            ),
            (BoardAction::Update, Cardinality::Single) => (
                "TaskUpdate",
                "The task was updated successfully",
                "Updating of a task in user board",
            ),
            (BoardAction::Update, Cardinality::Bulk) => (
                "BulkTaskUpdate",
                "The tasks was updated successfully",
                "Multiple tasks update in user board",
            ),
            (BoardAction::Cancel, Cardinality::Single) => (
                "TaskCancel",
                "The task was canceled successfully",
                "Task cancelation in user board",
            ),
            (BoardAction::Cancel, Cardinality::Bulk) => (
                "BulkTaskCancel",
                "The tasks was canceled successfully",
                "Multiple tasks cancelation in user board",
            ),
        };
        Self {
            action_type: action_type.to_string(),
            message: message.to_string(),
            description: description.to_string(),
        }
    }
}
