use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::{
    board::task_filter::TaskFilter,
    board_error::BoardError,
    data_access::task_store::{StoreError, TaskStore},
    task::{NewTask, Task},
    task_status::TaskStatus,
};

/// Owner-scoped access to the board.
///
/// Writes go through [`DataContext::atomically`]: resolutions and mutations
/// are staged in a [`UnitOfWork`] and committed with a single `put_all`, so
/// a failed batch leaves the store untouched. Batches are serialized by
/// `write_lock`; reads never take it.
pub struct DataContext {
    store: Arc<dyn TaskStore>,
    write_lock: Mutex<()>,
}

impl DataContext {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Run `work` as one all-or-nothing unit.
    pub fn atomically<T, F>(&self, work: F) -> Result<T, BoardError>
    where
        F: FnOnce(&mut UnitOfWork<'_>) -> Result<T, BoardError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Poisoned("board write lock".to_string()))?;

        let mut unit = UnitOfWork {
            store: self.store.as_ref(),
            staged: Vec::new(),
        };
        let value = work(&mut unit)?;
        if !unit.staged.is_empty() {
            self.store.put_all(&unit.staged)?;
        }
        Ok(value)
    }

    pub fn create(&self, owner: Uuid, new_task: NewTask) -> Result<Task, BoardError> {
        self.atomically(|unit| Ok(unit.create(owner, new_task)))
    }

    /// Every element is already validated; either all are stored or none.
    pub fn bulk_create(&self, owner: Uuid, new_tasks: Vec<NewTask>) -> Result<Vec<Task>, BoardError> {
        self.atomically(|unit| {
            Ok(new_tasks
                .into_iter()
                .map(|new_task| unit.create(owner, new_task))
                .collect())
        })
    }

    pub fn get(&self, owner: Uuid, id: Uuid) -> Result<Task, BoardError> {
        self.store
            .get(owner, id)?
            .ok_or_else(|| BoardError::NotFound(id.to_string()))
    }

    /// Tasks of `filter.owner` matching the filter, oldest first.
    pub fn list_by_owner(&self, filter: &TaskFilter) -> Result<Vec<Task>, BoardError> {
        let mut tasks: Vec<Task> = self
            .store
            .list(filter.owner)?
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tasks)
    }

    pub fn update_status(&self, task: Task, status: TaskStatus) -> Result<Task, BoardError> {
        self.atomically(|unit| Ok(unit.transition(task, status)))
    }
}

/// Pending writes of one [`DataContext::atomically`] call.
pub struct UnitOfWork<'a> {
    store: &'a dyn TaskStore,
    staged: Vec<Task>,
}

impl UnitOfWork<'_> {
    /// Owner-scoped lookup that sees this unit's own staged writes.
    pub fn get(&self, owner: Uuid, id: Uuid) -> Result<Task, BoardError> {
        if let Some(task) = self.staged.iter().find(|t| t.owner == owner && t.id == id) {
            return Ok(task.clone());
        }
        self.store
            .get(owner, id)?
            .ok_or_else(|| BoardError::NotFound(id.to_string()))
    }

    pub fn create(&mut self, owner: Uuid, new_task: NewTask) -> Task {
        let task = Task::new(owner, new_task, Utc::now());
        self.staged.push(task.clone());
        task
    }

    /// Apply `status` to the latest version of `task` and stage the result.
    pub fn transition(&mut self, task: Task, status: TaskStatus) -> Task {
        let mut current = match self.staged.iter().position(|t| t.id == task.id) {
            Some(index) => self.staged.remove(index),
            None => task,
        };
        if current.update_status(status, Utc::now()) {
            tracing::debug!(task = %current.id, status = current.status.code(), "status transition staged");
        }
        self.staged.push(current.clone());
        current
    }

    #[cfg(test)]
    pub fn staged(&self) -> &[Task] {
        &self.staged
    }
}
