use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    action_response::ActionResponse,
    app_state::SharedState,
    board::{executor::BoardExecutor, request_normalizer::parse_body, task_filter::TaskFilter},
    board_error::BoardError,
    owner::Owner,
    task_filter_params::TaskFilterParams,
    task_get_response::TaskGetResponse,
};

pub struct BoardController {}

impl BoardController {
    pub async fn get_all(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        params: Result<Query<TaskFilterParams>, QueryRejection>) -> Result<Json<Vec<TaskGetResponse>>, BoardError> {
        let Query(params) = params?;
        let filter = TaskFilter::compose(owner.id, params)?;
        let tasks = state.data_context.list_by_owner(&filter)?;
        Ok(Json(tasks.iter().map(|t| t.to_get_dto()).collect()))
    }

    pub async fn get(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        task_id: Result<Path<String>, PathRejection>) -> Result<Json<TaskGetResponse>, BoardError> {
        let Path(task_id) = task_id?;
        let id = Uuid::parse_str(&task_id).map_err(|_| BoardError::NotFound(task_id.clone()))?;
        let task = state.data_context.get(owner.id, id)?;
        Ok(Json(task.to_get_dto()))
    }

    pub async fn insert(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        body: Bytes) -> Result<Json<ActionResponse>, BoardError> {
        let body = parse_body(&body)?;
        BoardExecutor::new(&state.data_context).insert(owner.id, body).map(Json)
    }

    pub async fn update(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        task_id: Option<Path<String>>,
        body: Bytes) -> Result<Json<ActionResponse>, BoardError> {
        let body = parse_body(&body)?;
        let task_id = task_id.map(|Path(id)| id);
        BoardExecutor::new(&state.data_context)
            .update(owner.id, task_id.as_deref(), body)
            .map(Json)
    }

    pub async fn cancel(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        task_id: Option<Path<String>>,
        body: Bytes) -> Result<Json<ActionResponse>, BoardError> {
        let body = parse_body(&body)?;
        let task_id = task_id.map(|Path(id)| id);
        BoardExecutor::new(&state.data_context)
            .cancel(owner.id, task_id.as_deref(), body)
            .map(Json)
    }
}
