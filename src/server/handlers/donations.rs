//! Donation HTTP handlers: create/update/delete route through the ledger

use super::DeleteParams;
use crate::core::error::HemoResult;
use crate::entities::{Donation, DonationPatch, NewDonation};
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;

pub async fn list(State(state): State<AppState>) -> HemoResult<Json<Value>> {
    let donations = state.store.read(|t| t.donations.list())?;
    Ok(Json(json!({
        "donations": donations,
        "count": donations.len(),
    })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewDonation>,
) -> HemoResult<(StatusCode, Json<Donation>)> {
    let donation = state.ledger.record_donation(payload)?;
    Ok((StatusCode::CREATED, Json(donation)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<Json<Donation>> {
    let donation = state.store.read(|t| t.donations.require(&id).cloned())??;
    Ok(Json(donation))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DonationPatch>,
) -> HemoResult<Json<Donation>> {
    let donation = state.ledger.update_donation(id, patch)?;
    Ok(Json(donation))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> HemoResult<StatusCode> {
    state.ledger.delete_donation(id, params.cascade)?;
    Ok(StatusCode::NO_CONTENT)
}
