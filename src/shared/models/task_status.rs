use serde::{Deserialize, Serialize};

use crate::board_error::BoardError;

/// Task lifecycle: Pending → Concluded | Cancelled.
///
/// Transitions are unconditional; any status may move to any other.
/// The discriminants are the stable numeric codes clients of the old
/// board API already know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TaskStatus {
    Pending = 1,
    Concluded = 2,
    Cancelled = 3,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::Concluded, TaskStatus::Cancelled];

    /// Stable programmatic name, as serialized.
    pub fn name(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Concluded => "CONCLUDED",
            TaskStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "The task is pending",
            TaskStatus::Concluded => "The task is concluded",
            TaskStatus::Cancelled => "The task was cancelled",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look a status up by name or label, ignoring case.
    pub fn resolve(input: &str) -> Result<TaskStatus, BoardError> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| {
                status.name().eq_ignore_ascii_case(input) || status.label().eq_ignore_ascii_case(input)
            })
            .ok_or_else(|| BoardError::InvalidStatus(input.to_string()))
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
