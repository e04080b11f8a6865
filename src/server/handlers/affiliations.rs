//! Center affiliation HTTP handlers

use crate::core::entity::Record;
use crate::core::error::{EntityError, HemoResult};
use crate::core::validation::{not_in_future, today};
use crate::entities::{CenterAffiliation, CenterAffiliationPatch, NewCenterAffiliation};
use crate::server::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;

pub async fn list(State(state): State<AppState>) -> HemoResult<Json<Value>> {
    let affiliations = state.store.read(|t| t.affiliations.list())?;
    Ok(Json(json!({
        "center_affiliations": affiliations,
        "count": affiliations.len(),
    })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewCenterAffiliation>,
) -> HemoResult<(StatusCode, Json<CenterAffiliation>)> {
    if let Some(date) = payload.affiliation_date {
        not_in_future("affiliation_date", date)?;
    }
    let affiliation = state.store.write(|t| -> HemoResult<CenterAffiliation> {
        t.blood_banks.require(&payload.blood_bank_id)?;
        t.centers.require(&payload.center_id)?;
        Ok(t.affiliations
            .insert(CenterAffiliation::new(payload, today())))
    })??;
    Ok((StatusCode::CREATED, Json(affiliation)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<Json<CenterAffiliation>> {
    let affiliation = state.store.read(|t| t.affiliations.require(&id).cloned())??;
    Ok(Json(affiliation))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CenterAffiliationPatch>,
) -> HemoResult<Json<CenterAffiliation>> {
    if let Some(date) = patch.affiliation_date {
        not_in_future("affiliation_date", date)?;
    }
    let affiliation = state
        .store
        .write(|t| -> Result<CenterAffiliation, EntityError> {
            let mut affiliation = t.affiliations.require(&id)?.clone();
            affiliation.apply(patch);
            affiliation.touch();
            t.affiliations.update(affiliation)
        })??;
    Ok(Json(affiliation))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<StatusCode> {
    state.store.write(|t| -> Result<(), EntityError> {
        t.affiliations.require(&id)?;
        t.affiliations.remove(&id);
        Ok(())
    })??;
    Ok(StatusCode::NO_CONTENT)
}
