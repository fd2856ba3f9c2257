//! Applies normalized board requests as single atomic units.

use serde_json::Value;
use uuid::Uuid;

use crate::{
    action_response::{ActionResponse, BoardAction},
    board::{
        batch::{Batch, Cardinality},
        request_normalizer::{self, StatusChange},
    },
    board_error::BoardError,
    data_access::data_context::{DataContext, UnitOfWork},
};

pub struct BoardExecutor<'a> {
    context: &'a DataContext,
}

impl<'a> BoardExecutor<'a> {
    pub fn new(context: &'a DataContext) -> Self {
        Self { context }
    }

    pub fn insert(&self, owner: Uuid, body: Option<Value>) -> Result<ActionResponse, BoardError> {
        let batch = request_normalizer::normalize_insert(body)?;
        if batch.is_empty() {
            tracing::debug!(%owner, "empty bulk insert");
        }
        let cardinality = batch.cardinality();
        let count = match batch {
            Batch::Single(new_task) => self.context.create(owner, new_task).map(|_| 1)?,
            Batch::Bulk(new_tasks) => self.context.bulk_create(owner, new_tasks)?.len(),
        };

        tracing::info!(%owner, count, "tasks inserted");
        Ok(ActionResponse::new(BoardAction::Insert, cardinality))
    }

    pub fn update(&self, owner: Uuid, path_task: Option<&str>, body: Option<Value>) -> Result<ActionResponse, BoardError> {
        self.transition(BoardAction::Update, owner, |unit| {
            request_normalizer::normalize_update(unit, owner, path_task, body)
        })
    }

    pub fn cancel(&self, owner: Uuid, path_task: Option<&str>, body: Option<Value>) -> Result<ActionResponse, BoardError> {
        self.transition(BoardAction::Cancel, owner, |unit| {
            request_normalizer::normalize_cancel(unit, owner, path_task, body)
        })
    }

    /// Resolve and apply inside one unit so no other batch can interleave.
    /// Repeated references apply in order, each on top of the previous result.
    fn transition<F>(&self, action: BoardAction, owner: Uuid, normalize: F) -> Result<ActionResponse, BoardError>
    where
        F: FnOnce(&UnitOfWork<'_>) -> Result<Batch<StatusChange>, BoardError>,
    {
        let (cardinality, count) = self.context.atomically(|unit| {
            let batch = normalize(unit)?;
            if batch.is_empty() {
                tracing::debug!(%owner, ?action, "empty bulk request");
            }
            let cardinality: Cardinality = batch.cardinality();
            let count = batch.len();
            for change in batch.into_vec() {
                unit.transition(change.task, change.status);
            }
            Ok((cardinality, count))
        })?;

        tracing::info!(%owner, ?action, count, "task statuses changed");
        Ok(ActionResponse::new(action, cardinality))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::task_filter::TaskFilter,
        data_access::{
            memory_task_store::InMemoryTaskStore,
            task_store::{StoreError, TaskStore},
        },
        task::{NewTask, Task},
        task_filter_params::TaskFilterParams,
        task_status::TaskStatus,
    };
    use serde_json::json;
    use std::sync::Arc;

    /// Reads fine, refuses every write.
    struct ReadOnlyStore(InMemoryTaskStore);

    impl TaskStore for ReadOnlyStore {
        fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, StoreError> {
            self.0.get(owner, id)
        }
        fn list(&self, owner: Uuid) -> Result<Vec<Task>, StoreError> {
            self.0.list(owner)
        }
        fn put_all(&self, _: &[Task]) -> Result<(), StoreError> {
            Err(StoreError::Redb("read-only".into()))
        }
    }

    fn context() -> DataContext {
        DataContext::new(Arc::new(InMemoryTaskStore::new()))
    }

    fn board(ctx: &DataContext, owner: Uuid) -> Vec<Task> {
        let every = TaskFilterParams { status: Some(String::new()), ..Default::default() };
        ctx.list_by_owner(&TaskFilter::compose(owner, every).unwrap()).unwrap()
    }

    #[test]
    fn single_insert_reports_single_type() {
        let ctx = context();
        let owner = Uuid::new_v4();
        let response = BoardExecutor::new(&ctx)
            .insert(owner, Some(json!({"title": "Wash the car"})))
            .unwrap();

        assert_eq!(response.action_type, "TaskInsert");
        let tasks = board(&ctx, owner);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn bulk_insert_of_one_is_still_bulk() {
        let ctx = context();
        let response = BoardExecutor::new(&ctx)
            .insert(Uuid::new_v4(), Some(json!([{"title": "only one"}])))
            .unwrap();
        assert_eq!(response.action_type, "BulkTaskInsert");
    }

    #[test]
    fn bulk_insert_is_all_or_nothing() {
        let ctx = context();
        let owner = Uuid::new_v4();
        let err = BoardExecutor::new(&ctx)
            .insert(owner, Some(json!([{"title": "a"}, {"title": "b"}, {"description": "no title"}])))
            .unwrap_err();

        assert_eq!(err, BoardError::MissingValue("title".into()));
        assert!(board(&ctx, owner).is_empty());
    }

    #[test]
    fn bulk_insert_creates_every_valid_item() {
        let ctx = context();
        let owner = Uuid::new_v4();
        BoardExecutor::new(&ctx)
            .insert(
                owner,
                Some(json!([
                    {"title": "a"},
                    {"title": "b", "status": "CONCLUDED"},
                    {"title": "c", "status": "CANCELLED"},
                ])),
            )
            .unwrap();
        assert_eq!(board(&ctx, owner).len(), 3);
    }

    #[test]
    fn update_then_cancel() {
        let ctx = context();
        let owner = Uuid::new_v4();
        let task = ctx.create(owner, NewTask::new("todo", None, TaskStatus::Pending).unwrap()).unwrap();
        let id = task.id.to_string();
        let executor = BoardExecutor::new(&ctx);

        let response = executor.update(owner, Some(&id), None).unwrap();
        assert_eq!(response.action_type, "TaskUpdate");
        let concluded = ctx.get(owner, task.id).unwrap();
        assert_eq!(concluded.status, TaskStatus::Concluded);
        assert!(concluded.updated_at.is_some());

        let response = executor.cancel(owner, Some(&id), None).unwrap();
        assert_eq!(response.action_type, "TaskCancel");
        assert_eq!(ctx.get(owner, task.id).unwrap().status, TaskStatus::Cancelled);
    }

    #[test]
    fn bulk_update_with_unknown_id_changes_nothing() {
        let ctx = context();
        let owner = Uuid::new_v4();
        let task = ctx.create(owner, NewTask::new("todo", None, TaskStatus::Pending).unwrap()).unwrap();

        let err = BoardExecutor::new(&ctx)
            .update(
                owner,
                None,
                Some(json!([{"task": task.id.to_string()}, {"task": Uuid::new_v4().to_string()}])),
            )
            .unwrap_err();

        assert!(matches!(err, BoardError::NotFound(_)));
        assert_eq!(ctx.get(owner, task.id).unwrap(), task);
    }

    #[test]
    fn cancel_of_foreign_task_is_not_found() {
        let ctx = context();
        let owner = Uuid::new_v4();
        let task = ctx.create(owner, NewTask::new("mine", None, TaskStatus::Pending).unwrap()).unwrap();

        let err = BoardExecutor::new(&ctx)
            .cancel(Uuid::new_v4(), Some(&task.id.to_string()), None)
            .unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
        assert_eq!(ctx.get(owner, task.id).unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn repeated_reference_applies_in_order() {
        let ctx = context();
        let owner = Uuid::new_v4();
        let task = ctx.create(owner, NewTask::new("twice", None, TaskStatus::Pending).unwrap()).unwrap();
        let id = task.id.to_string();

        let response = BoardExecutor::new(&ctx)
            .update(owner, None, Some(json!([{"task": id}, {"task": id, "status": "cancelled"}])))
            .unwrap();

        assert_eq!(response.action_type, "BulkTaskUpdate");
        assert_eq!(board(&ctx, owner).len(), 1);
        assert_eq!(ctx.get(owner, task.id).unwrap().status, TaskStatus::Cancelled);
    }

    #[test]
    fn bulk_cancel_reports_bulk_type() {
        let ctx = context();
        let owner = Uuid::new_v4();
        let tasks = ctx
            .bulk_create(
                owner,
                vec![
                    NewTask::new("a", None, TaskStatus::Pending).unwrap(),
                    NewTask::new("b", None, TaskStatus::Concluded).unwrap(),
                ],
            )
            .unwrap();
        let ids: Vec<String> = tasks.iter().map(|t| t.id.to_string()).collect();

        let response = BoardExecutor::new(&ctx).cancel(owner, None, Some(json!(ids))).unwrap();
        assert_eq!(response.action_type, "BulkTaskCancel");
        assert!(board(&ctx, owner).iter().all(|t| t.status == TaskStatus::Cancelled));
    }

    #[test]
    fn concurrent_batches_are_never_seen_half_applied() {
        let ctx = context();
        let owner = Uuid::new_v4();
        let tasks = ctx
            .bulk_create(
                owner,
                (0..8)
                    .map(|n| NewTask::new(&format!("task {n}"), None, TaskStatus::Pending).unwrap())
                    .collect(),
            )
            .unwrap();
        let ids: Vec<String> = tasks.iter().map(|t| t.id.to_string()).collect();
        let statuses = ["CONCLUDED", "PENDING", "CANCELLED"];

        std::thread::scope(|scope| {
            for writer in 0..3 {
                let (ctx, ids) = (&ctx, &ids);
                scope.spawn(move || {
                    for round in 0..50 {
                        let status = statuses[(writer + round) % statuses.len()];
                        let body: Vec<Value> = ids.iter().map(|id| json!({"task": id, "status": status})).collect();
                        BoardExecutor::new(ctx).update(owner, None, Some(Value::Array(body))).unwrap();
                    }
                });
            }

            let (ctx, ids) = (&ctx, &ids);
            scope.spawn(move || {
                for _ in 0..50 {
                    BoardExecutor::new(ctx).cancel(owner, None, Some(json!(ids))).unwrap();
                }
            });

            for _ in 0..2 {
                scope.spawn(move || {
                    for _ in 0..200 {
                        let seen = board(ctx, owner);
                        assert_eq!(seen.len(), 8);
                        assert!(
                            seen.iter().all(|t| t.status == seen[0].status),
                            "mixed statuses in one snapshot: {:?}",
                            seen.iter().map(|t| t.status).collect::<Vec<_>>()
                        );
                    }
                });
            }
        });

        let end = board(&ctx, owner);
        assert_eq!(end.len(), 8);
        assert!(end.iter().all(|t| t.status == end[0].status));
        assert!(end.iter().all(|t| ids.contains(&t.id.to_string())));
    }

    #[test]
    fn store_failure_surfaces_as_generic_error() {
        let ctx = DataContext::new(Arc::new(ReadOnlyStore(InMemoryTaskStore::new())));
        let err = BoardExecutor::new(&ctx)
            .insert(Uuid::new_v4(), Some(json!({"title": "nope"})))
            .unwrap_err();
        assert_eq!(err.error_type(), "GenericError");
    }
}
