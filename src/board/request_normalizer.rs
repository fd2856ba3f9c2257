//! Raw insert/update/cancel bodies → validated operations.
//!
//! The body is classified once into [`Batch::Single`] or [`Batch::Bulk`] and
//! every element is checked in input order; the first bad element aborts the
//! whole request. Update and cancel references are resolved through the
//! caller's [`UnitOfWork`], so they are owner-scoped and see the same
//! snapshot the executor will write against.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    board::batch::Batch,
    board_error::BoardError,
    data_access::data_context::UnitOfWork,
    task::{NewTask, Task},
    task_status::TaskStatus,
};

pub const INSERT_DEFAULT_STATUS: TaskStatus = TaskStatus::Pending;
/// "Update with no status" means "mark done".
pub const UPDATE_DEFAULT_STATUS: TaskStatus = TaskStatus::Concluded;
pub const CANCEL_STATUS: TaskStatus = TaskStatus::Cancelled;

/// A resolved task and the status it should end up in.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub task: Task,
    pub status: TaskStatus,
}

/// Parse a raw body. Blank bodies are `None`.
pub fn parse_body(body: &[u8]) -> Result<Option<Value>, BoardError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| BoardError::Validation(format!("The request body is not valid JSON: {e}")))
}

/// Classify the body. A missing body is an empty single object.
pub fn shape(body: Option<Value>) -> Result<Batch<Value>, BoardError> {
    match body {
        None => Ok(Batch::Single(Value::Object(Map::new()))),
        Some(value @ Value::Object(_)) => Ok(Batch::Single(value)),
        Some(Value::Array(items)) => Ok(Batch::Bulk(items)),
        Some(_) => Err(BoardError::Validation(
            "The request body must be a task object or an array of tasks".to_string(),
        )),
    }
}

pub fn normalize_insert(body: Option<Value>) -> Result<Batch<NewTask>, BoardError> {
    shape(body)?.try_map(|element| {
        let fields = into_object(element)?;
        let title = optional_string(&fields, "title")?
            .ok_or_else(|| BoardError::MissingValue("title".to_string()))?;
        let description = optional_string(&fields, "description")?;
        let status = optional_status(&fields)?.unwrap_or(INSERT_DEFAULT_STATUS);
        NewTask::new(&title, description, status)
    })
}

/// `path_task` is the id from the URL; it wins over a `task` field in a single body.
pub fn normalize_update(
    unit: &UnitOfWork<'_>,
    owner: Uuid,
    path_task: Option<&str>,
    body: Option<Value>,
) -> Result<Batch<StatusChange>, BoardError> {
    match shape(body)? {
        Batch::Single(element) => {
            let fields = into_object(element)?;
            let reference = match path_task {
                Some(id) => id.to_string(),
                None => required_reference(&fields)?,
            };
            let status = optional_status(&fields)?.unwrap_or(UPDATE_DEFAULT_STATUS);
            let task = resolve(unit, owner, &reference)?;
            Ok(Batch::Single(StatusChange { task, status }))
        }
        bulk => bulk.try_map(|element| {
            let (reference, status) = match element {
                Value::String(id) => (id, None),
                other => {
                    let fields = into_object(other)?;
                    (required_reference(&fields)?, optional_status(&fields)?)
                }
            };
            let task = resolve(unit, owner, &reference)?;
            Ok(StatusChange {
                task,
                status: status.unwrap_or(UPDATE_DEFAULT_STATUS),
            })
        }),
    }
}

/// Cancel elements carry only a reference: a bare id or `{"task": id}`.
pub fn normalize_cancel(
    unit: &UnitOfWork<'_>,
    owner: Uuid,
    path_task: Option<&str>,
    body: Option<Value>,
) -> Result<Batch<StatusChange>, BoardError> {
    let references = match (shape(body)?, path_task) {
        (Batch::Single(_), Some(id)) => Batch::Single(id.to_string()),
        (batch, _) => batch.try_map(reference_of)?,
    };
    references.try_map(|reference| {
        let task = resolve(unit, owner, &reference)?;
        Ok(StatusChange {
            task,
            status: CANCEL_STATUS,
        })
    })
}

fn into_object(value: Value) -> Result<Map<String, Value>, BoardError> {
    match value {
        Value::Object(fields) => Ok(fields),
        _ => Err(BoardError::Validation("Each task must be a JSON object".to_string())),
    }
}

/// Absent and `null` are both `None`.
fn optional_string(fields: &Map<String, Value>, field: &str) -> Result<Option<String>, BoardError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(BoardError::Validation(format!("The field '{field}' must be a string"))),
    }
}

fn optional_status(fields: &Map<String, Value>) -> Result<Option<TaskStatus>, BoardError> {
    optional_string(fields, "status")?
        .map(|raw| TaskStatus::resolve(&raw))
        .transpose()
}

fn required_reference(fields: &Map<String, Value>) -> Result<String, BoardError> {
    optional_string(fields, "task")?.ok_or_else(|| BoardError::MissingValue("task".to_string()))
}

fn reference_of(element: Value) -> Result<String, BoardError> {
    match element {
        Value::String(id) => Ok(id),
        Value::Object(fields) => required_reference(&fields),
        _ => Err(BoardError::Validation("Each task reference must be a task id".to_string())),
    }
}

/// Unparseable ids are reported exactly like unknown ones.
fn resolve(unit: &UnitOfWork<'_>, owner: Uuid, reference: &str) -> Result<Task, BoardError> {
    let id = Uuid::parse_str(reference).map_err(|_| BoardError::NotFound(reference.to_string()))?;
    unit.get(owner, id)
}
