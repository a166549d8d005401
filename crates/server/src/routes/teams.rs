use axum::{extract::{Path, State}, Json};
use service::employee::Employee;
use service::team::Team;

use crate::{errors::JsonApiError, state::AppState};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Team>>, JsonApiError> {
    Ok(Json(state.teams.list_teams().await?))
}

pub async fn members(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<Employee>>, JsonApiError> {
    Ok(Json(state.teams.list_members(id).await?))
}
