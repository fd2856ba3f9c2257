//! Storage seam for tasks.
//!
//! Every lookup is keyed by `(owner, id)`, so a task owned by someone else
//! is simply absent. Backends only move whole records; lifecycle rules live
//! above this layer.

use thiserror::Error;
use uuid::Uuid;

use crate::task::Task;

pub trait TaskStore: Send + Sync {
    /// Fetch one task of `owner`. `None` if absent or owned by someone else.
    fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// All tasks of `owner`, in no particular order.
    fn list(&self, owner: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Insert or replace every task in one atomic commit.
    /// Either all of them become visible or none do.
    fn put_all(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("redb: {0}")]
    Redb(String),

    #[error("decode: {0}")]
    Decode(String),

    #[error("encode: {0}")]
    Encode(String),

    #[error("lock poisoned: {0}")]
    Poisoned(String),
}
