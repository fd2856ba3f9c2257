//! In-memory task store for tests and throwaway boards.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

use crate::{
    data_access::task_store::{StoreError, TaskStore},
    task::Task,
};

/// Same `(owner, id)` ordering as the redb table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<BTreeMap<(Uuid, Uuid), Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Poisoned("in-memory task map".to_string())
}

impl TaskStore for InMemoryTaskStore {
    fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks.get(&(owner, id)).cloned())
    }

    fn list(&self, owner: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks
            .range((owner, Uuid::nil())..=(owner, Uuid::from_u128(u128::MAX)))
            .map(|(_, task)| task.clone())
            .collect())
    }

    fn put_all(&self, batch: &[Task]) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        for task in batch {
            tasks.insert((task.owner, task.id), task.clone());
        }
        Ok(())
    }
}
