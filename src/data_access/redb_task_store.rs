//! Task persistence on a redb file.
//!
//! Rows are keyed by `(owner, id)` as two u128s so an owner's board is one
//! contiguous key range. Values are postcard-encoded `Task`s.

use redb::{Database, TableDefinition};
use std::{path::Path, sync::Arc};
use uuid::Uuid;

use crate::{
    data_access::task_store::{StoreError, TaskStore},
    task::Task,
};

const TASKS_TABLE: TableDefinition<(u128, u128), &[u8]> = TableDefinition::new("board_tasks");

/// Thin handle to the redb file. Cloneable (Arc inside).
#[derive(Clone)]
pub struct RedbTaskStore {
    db: Arc<Database>,
}

impl RedbTaskStore {
    /// Open (or create) the database at `path`, creating the table if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path)?;

        let txn = db.begin_write()?;
        {
            let _ = txn.open_table(TASKS_TABLE)?;
        }
        txn.commit()?;

        Ok(RedbTaskStore { db: Arc::new(db) })
    }
}

fn row_key(owner: Uuid, id: Uuid) -> (u128, u128) {
    (owner.as_u128(), id.as_u128())
}

fn decode(bytes: &[u8]) -> Result<Task, StoreError> {
    postcard::from_bytes(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

impl TaskStore for RedbTaskStore {
    fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, StoreError> {
        let txn = self.db.begin_read()?;
        let tasks = txn.open_table(TASKS_TABLE)?;

        match tasks.get(row_key(owner, id))? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    fn list(&self, owner: Uuid) -> Result<Vec<Task>, StoreError> {
        let txn = self.db.begin_read()?;
        let tasks = txn.open_table(TASKS_TABLE)?;

        let owner = owner.as_u128();
        let mut board = Vec::new();
        for entry in tasks.range((owner, u128::MIN)..=(owner, u128::MAX))? {
            let (_, value) = entry?;
            board.push(decode(value.value())?);
        }
        Ok(board)
    }

    fn put_all(&self, batch: &[Task]) -> Result<(), StoreError> {
        let txn = self.db.begin_write()?;
        {
            let mut tasks = txn.open_table(TASKS_TABLE)?;
            for task in batch {
                let bytes = postcard::to_allocvec(task)
                    .map_err(|e| StoreError::Encode(e.to_string()))?;
                tasks.insert(row_key(task.owner, task.id), bytes.as_slice())?;
            }
        }
        // An early return above drops `txn` uncommitted, which aborts it.
        txn.commit()?;
        tracing::debug!(count = batch.len(), "committed task batch");
        Ok(())
    }
}

// redb 2.x has many error types. Blanket them all into StoreError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);
