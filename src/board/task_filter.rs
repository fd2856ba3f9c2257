//! Turns the sparse list query into a predicate over one owner's board.

use uuid::Uuid;

use crate::{board_error::BoardError, task::Task, task_filter_params::TaskFilterParams, task_status::TaskStatus};

/// What an unfiltered listing shows.
pub const LIST_DEFAULT_STATUS: TaskStatus = TaskStatus::Pending;

/// Conjunction of the conditions that survived composition.
/// `None` means "no condition", never "match empty".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub owner: Uuid,
    pub title: Option<String>,
    pub title_contains: Option<String>,
    pub description: Option<String>,
    pub description_contains: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Empty strings count as not provided.
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl TaskFilter {
    /// Build the filter for `owner`.
    ///
    /// An absent `status` defaults to pending; an empty `status=` drops the
    /// status condition altogether.
    pub fn compose(owner: Uuid, params: TaskFilterParams) -> Result<TaskFilter, BoardError> {
        let status = match params.status {
            None => Some(LIST_DEFAULT_STATUS),
            Some(raw) if raw.is_empty() => None,
            Some(raw) => Some(TaskStatus::resolve(&raw)?),
        };

        Ok(TaskFilter {
            owner,
            title: provided(params.title),
            title_contains: provided(params.title_contains),
            description: provided(params.description),
            description_contains: provided(params.description_contains),
            status,
        })
    }

    pub fn matches(&self, task: &Task) -> bool {
        if task.owner != self.owner {
            return false;
        }
        if self.status.is_some_and(|status| task.status != status) {
            return false;
        }
        if self.title.as_ref().is_some_and(|title| &task.title != title) {
            return false;
        }
        if self
            .title_contains
            .as_ref()
            .is_some_and(|needle| !contains_ignore_case(&task.title, needle))
        {
            return false;
        }
        if self
            .description
            .as_ref()
            .is_some_and(|description| task.description.as_ref() != Some(description))
        {
            return false;
        }
        if let Some(needle) = &self.description_contains {
            return task
                .description
                .as_deref()
                .is_some_and(|description| contains_ignore_case(description, needle));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;
    use chrono::Utc;

    fn task(owner: Uuid, title: &str, description: Option<&str>, status: TaskStatus) -> Task {
        let new_task = NewTask::new(title, description.map(String::from), status).unwrap();
        Task::new(owner, new_task, Utc::now())
    }

    fn params() -> TaskFilterParams {
        TaskFilterParams::default()
    }

    #[test]
    fn no_parameters_means_pending_only() {
        let owner = Uuid::new_v4();
        let filter = TaskFilter::compose(owner, params()).unwrap();
        assert_eq!(filter.status, Some(TaskStatus::Pending));

        assert!(filter.matches(&task(owner, "a", None, TaskStatus::Pending)));
        assert!(!filter.matches(&task(owner, "b", None, TaskStatus::Concluded)));
        assert!(!filter.matches(&task(owner, "c", None, TaskStatus::Cancelled)));
    }

    #[test]
    fn never_matches_another_owner() {
        let filter = TaskFilter::compose(Uuid::new_v4(), params()).unwrap();
        assert!(!filter.matches(&task(Uuid::new_v4(), "a", None, TaskStatus::Pending)));
    }

    #[test]
    fn empty_values_are_dropped() {
        let filter = TaskFilter::compose(
            Uuid::new_v4(),
            TaskFilterParams {
                title: Some(String::new()),
                title_contains: Some(String::new()),
                description: Some(String::new()),
                description_contains: None,
                status: None,
            },
        )
        .unwrap();
        assert_eq!(filter.title, None);
        assert_eq!(filter.title_contains, None);
        assert_eq!(filter.description, None);
    }

    #[test]
    fn empty_status_lists_every_status() {
        let owner = Uuid::new_v4();
        let filter = TaskFilter::compose(owner, TaskFilterParams { status: Some(String::new()), ..params() }).unwrap();
        assert_eq!(filter.status, None);
        assert!(filter.matches(&task(owner, "done", None, TaskStatus::Concluded)));
    }

    #[test]
    fn bad_status_is_rejected() {
        let err = TaskFilter::compose(Uuid::new_v4(), TaskFilterParams { status: Some("someday".into()), ..params() })
            .unwrap_err();
        assert_eq!(err, BoardError::InvalidStatus("someday".into()));
    }

    #[test]
    fn exact_title_is_case_sensitive() {
        let owner = Uuid::new_v4();
        let filter = TaskFilter::compose(owner, TaskFilterParams { title: Some("Wash the car".into()), ..params() }).unwrap();
        assert!(filter.matches(&task(owner, "Wash the car", None, TaskStatus::Pending)));
        assert!(!filter.matches(&task(owner, "wash the car", None, TaskStatus::Pending)));
    }

    #[test]
    fn contains_variants_ignore_case_and_combine() {
        let owner = Uuid::new_v4();
        let filter = TaskFilter::compose(
            owner,
            TaskFilterParams {
                title_contains: Some("criar".into()),
                description_contains: Some("TOKEN".into()),
                status: Some("pending".into()),
                ..params()
            },
        )
        .unwrap();

        assert!(filter.matches(&task(owner, "Criar a rota", Some("Usar token!"), TaskStatus::Pending)));
        assert!(!filter.matches(&task(owner, "Criar .env", None, TaskStatus::Pending)));
        assert!(!filter.matches(&task(owner, "Instalar", Some("token"), TaskStatus::Pending)));
    }

    #[test]
    fn exact_description_requires_a_description() {
        let owner = Uuid::new_v4();
        let filter =
            TaskFilter::compose(owner, TaskFilterParams { description: Some("polish".into()), ..params() }).unwrap();
        assert!(filter.matches(&task(owner, "a", Some("polish"), TaskStatus::Pending)));
        assert!(!filter.matches(&task(owner, "b", None, TaskStatus::Pending)));
    }
}
