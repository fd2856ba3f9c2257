use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{board_error::BoardError, task_get_response::TaskGetResponse, task_status::TaskStatus};

pub const TITLE_MAX_LENGTH: usize = 50;

/// A task on an owner's board.
///
/// `updated_at` stays `None` until the first real status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(owner: Uuid, new_task: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new_task.title,
            description: new_task.description,
            status: new_task.status,
            owner,
            created_at: now,
            updated_at: None,
        }
    }

    /// Move the task to `status`. Returns whether anything changed;
    /// `updated_at` is only touched on an actual transition.
    pub fn update_status(&mut self, status: TaskStatus, now: DateTime<Utc>) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.updated_at = Some(now);
        true
    }

    pub fn to_get_dto(&self) -> TaskGetResponse {
        TaskGetResponse {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            status_label: self.status.label().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A validated insert, not yet owned or stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(title: &str, description: Option<String>, status: TaskStatus) -> Result<Self, BoardError> {
        if title.trim().is_empty() {
            return Err(BoardError::MissingValue("title".to_string()));
        }
        if title.chars().count() > TITLE_MAX_LENGTH {
            return Err(BoardError::Validation(format!(
                "The title must have at most {TITLE_MAX_LENGTH} characters"
            )));
        }
        Ok(Self {
            title: title.to_string(),
            description,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pending_task() -> Task {
        let new_task = NewTask::new("Wash the car", None, TaskStatus::Pending).unwrap();
        Task::new(Uuid::new_v4(), new_task, Utc::now())
    }

    #[test]
    fn new_task_starts_without_updated_at() {
        let task = pending_task();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.updated_at, None);
    }

    #[test]
    fn empty_title_is_missing() {
        assert_eq!(
            NewTask::new("", None, TaskStatus::Pending).unwrap_err(),
            BoardError::MissingValue("title".into())
        );
        assert_eq!(
            NewTask::new("   ", None, TaskStatus::Pending).unwrap_err(),
            BoardError::MissingValue("title".into())
        );
    }

    #[test]
    fn title_length_is_bounded() {
        let at_limit = "a".repeat(TITLE_MAX_LENGTH);
        assert!(NewTask::new(&at_limit, None, TaskStatus::Pending).is_ok());

        let too_long = "a".repeat(TITLE_MAX_LENGTH + 1);
        assert!(matches!(
            NewTask::new(&too_long, None, TaskStatus::Pending),
            Err(BoardError::Validation(_))
        ));
    }

    #[test]
    fn same_status_leaves_updated_at_alone() {
        let mut task = pending_task();
        assert!(!task.update_status(TaskStatus::Pending, Utc::now()));
        assert_eq!(task.updated_at, None);
    }

    #[test]
    fn transition_bumps_updated_at() {
        let mut task = pending_task();
        let first = Utc::now();
        assert!(task.update_status(TaskStatus::Concluded, first));
        assert_eq!(task.status, TaskStatus::Concluded);
        assert_eq!(task.updated_at, Some(first));

        let second = first + Duration::seconds(5);
        assert!(!task.update_status(TaskStatus::Concluded, second));
        assert_eq!(task.updated_at, Some(first));

        assert!(task.update_status(TaskStatus::Cancelled, second));
        assert!(task.updated_at.unwrap() >= first);
    }

    #[test]
    fn get_dto_carries_label() {
        let dto = pending_task().to_get_dto();
        assert_eq!(dto.status_label, "The task is pending");
        assert_eq!(dto.updated_at, None);
    }
}
