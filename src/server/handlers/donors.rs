//! Donor HTTP handlers

use super::DeleteParams;
use crate::core::entity::Record;
use crate::core::error::{EntityError, HemoResult};
use crate::entities::{Donor, DonorPatch, NewDonor};
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;
use validator::Validate;

pub async fn list(State(state): State<AppState>) -> HemoResult<Json<Value>> {
    let donors = state.store.read(|t| t.donors.list())?;
    Ok(Json(json!({
        "donors": donors,
        "count": donors.len(),
    })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewDonor>,
) -> HemoResult<(StatusCode, Json<Donor>)> {
    payload.validate()?;
    let donor = state.store.write(|t| t.donors.insert(Donor::new(payload)))?;
    Ok((StatusCode::CREATED, Json(donor)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<Json<Donor>> {
    let donor = state.store.read(|t| t.donors.require(&id).cloned())??;
    Ok(Json(donor))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DonorPatch>,
) -> HemoResult<Json<Donor>> {
    patch.validate()?;
    let donor = state.store.write(|t| -> Result<Donor, EntityError> {
        let mut donor = t.donors.require(&id)?.clone();
        donor.apply(patch);
        donor.touch();
        t.donors.update(donor)
    })??;
    Ok(Json(donor))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> HemoResult<StatusCode> {
    state.ledger.delete_donor(id, params.cascade)?;
    Ok(StatusCode::NO_CONTENT)
}
