//! Acceptor HTTP handlers

use super::DeleteParams;
use crate::core::entity::Record;
use crate::core::error::{EntityError, HemoResult};
use crate::entities::{Acceptor, AcceptorPatch, NewAcceptor};
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;
use validator::Validate;

pub async fn list(State(state): State<AppState>) -> HemoResult<Json<Value>> {
    let acceptors = state.store.read(|t| t.acceptors.list())?;
    Ok(Json(json!({
        "acceptors": acceptors,
        "count": acceptors.len(),
    })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewAcceptor>,
) -> HemoResult<(StatusCode, Json<Acceptor>)> {
    payload.validate()?;
    let acceptor = state
        .store
        .write(|t| t.acceptors.insert(Acceptor::new(payload)))?;
    Ok((StatusCode::CREATED, Json(acceptor)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<Json<Acceptor>> {
    let acceptor = state.store.read(|t| t.acceptors.require(&id).cloned())??;
    Ok(Json(acceptor))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<AcceptorPatch>,
) -> HemoResult<Json<Acceptor>> {
    patch.validate()?;
    let acceptor = state.store.write(|t| -> Result<Acceptor, EntityError> {
        let mut acceptor = t.acceptors.require(&id)?.clone();
        acceptor.apply(patch);
        acceptor.touch();
        t.acceptors.update(acceptor)
    })??;
    Ok(Json(acceptor))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> HemoResult<StatusCode> {
    state.ledger.delete_acceptor(id, params.cascade)?;
    Ok(StatusCode::NO_CONTENT)
}
