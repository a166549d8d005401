use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::employee::{
    BatchRequest, BatchResult, Employee, EmployeeInput, EmployeeListing, FilterParam, ListRequest,
};
use tracing::info;

use crate::{errors::JsonApiError, state::AppState};

/// Listing query string.
///
/// Filters come either as `filter`, a JSON array of `{field, value}`, or as the discrete
/// `id` / `name` / `age` / `position` parameters. `filter` wins when both are sent.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub filter: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
    pub position: Option<String>,
}

impl ListQuery {
    pub fn into_request(self) -> Result<ListRequest, JsonApiError> {
        let filters = match self.filter.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            Some(raw) => serde_json::from_str::<Vec<FilterParam>>(raw)
                .map_err(|e| JsonApiError::bad_request(format!("invalid filter: {e}")))?,
            None => [("id", self.id), ("name", self.name), ("age", self.age), ("position", self.position)]
                .into_iter()
                .filter_map(|(field, value)| value.filter(|v| !v.trim().is_empty()).map(|v| FilterParam::new(field, v)))
                .collect(),
        };
        Ok(ListRequest { page: self.page, size: self.size, sort: self.sort, dir: self.dir, filters })
    }
}

pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<EmployeeListing>, JsonApiError> {
    let request = q.into_request()?;
    Ok(Json(state.employees.list(request).await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Employee>, JsonApiError> {
    state.employees.get(id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("employee"))
}

pub async fn create(State(state): State<AppState>, Json(input): Json<EmployeeInput>) -> Result<Json<Employee>, JsonApiError> {
    let created = state.employees.create(input).await?;
    info!(id = created.id, "employee_create_request");
    Ok(Json(created))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<EmployeeInput>,
) -> Result<Json<Employee>, JsonApiError> {
    state.employees.update(id, input).await?.map(Json).ok_or_else(|| JsonApiError::not_found("employee"))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn batch(State(state): State<AppState>, Json(request): Json<BatchRequest>) -> Result<Json<BatchResult>, JsonApiError> {
    Ok(Json(state.employees.batch(request).await?))
}
