//! Blood bank HTTP handlers

use super::DeleteParams;
use crate::core::entity::Record;
use crate::core::error::{EntityError, HemoResult};
use crate::entities::{BloodBank, BloodBankPatch, NewBloodBank};
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;
use validator::Validate;

pub async fn list(State(state): State<AppState>) -> HemoResult<Json<Value>> {
    let blood_banks = state.store.read(|t| t.blood_banks.list())?;
    Ok(Json(json!({
        "blood_banks": blood_banks,
        "count": blood_banks.len(),
    })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewBloodBank>,
) -> HemoResult<(StatusCode, Json<BloodBank>)> {
    payload.validate()?;
    let blood_bank = state
        .store
        .write(|t| t.blood_banks.insert(BloodBank::new(payload)))?;
    Ok((StatusCode::CREATED, Json(blood_bank)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<Json<BloodBank>> {
    let blood_bank = state.store.read(|t| t.blood_banks.require(&id).cloned())??;
    Ok(Json(blood_bank))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<BloodBankPatch>,
) -> HemoResult<Json<BloodBank>> {
    patch.validate()?;
    let blood_bank = state.store.write(|t| -> Result<BloodBank, EntityError> {
        let mut blood_bank = t.blood_banks.require(&id)?.clone();
        blood_bank.apply(patch);
        blood_bank.touch();
        t.blood_banks.update(blood_bank)
    })??;
    Ok(Json(blood_bank))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> HemoResult<StatusCode> {
    state.ledger.delete_blood_bank(id, params.cascade)?;
    Ok(StatusCode::NO_CONTENT)
}
