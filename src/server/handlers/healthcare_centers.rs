//! Healthcare center HTTP handlers

use super::DeleteParams;
use crate::core::entity::Record;
use crate::core::error::{EntityError, HemoResult};
use crate::entities::{HealthcareCenter, HealthcareCenterPatch, NewHealthcareCenter};
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;
use validator::Validate;

pub async fn list(State(state): State<AppState>) -> HemoResult<Json<Value>> {
    let centers = state.store.read(|t| t.centers.list())?;
    Ok(Json(json!({
        "healthcare_centers": centers,
        "count": centers.len(),
    })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewHealthcareCenter>,
) -> HemoResult<(StatusCode, Json<HealthcareCenter>)> {
    payload.validate()?;
    let center = state
        .store
        .write(|t| t.centers.insert(HealthcareCenter::new(payload)))?;
    Ok((StatusCode::CREATED, Json(center)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<Json<HealthcareCenter>> {
    let center = state.store.read(|t| t.centers.require(&id).cloned())??;
    Ok(Json(center))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<HealthcareCenterPatch>,
) -> HemoResult<Json<HealthcareCenter>> {
    patch.validate()?;
    let center = state
        .store
        .write(|t| -> Result<HealthcareCenter, EntityError> {
            let mut center = t.centers.require(&id)?.clone();
            center.apply(patch);
            center.touch();
            t.centers.update(center)
        })??;
    Ok(Json(center))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> HemoResult<StatusCode> {
    state.ledger.delete_center(id, params.cascade)?;
    Ok(StatusCode::NO_CONTENT)
}
