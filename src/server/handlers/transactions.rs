//! Transaction HTTP handlers: create/update/delete route through the ledger

use crate::core::error::HemoResult;
use crate::entities::{NewTransaction, Transaction, TransactionPatch};
use crate::server::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use uuid::Uuid;

pub async fn list(State(state): State<AppState>) -> HemoResult<Json<Value>> {
    let transactions = state.store.read(|t| t.transactions.list())?;
    Ok(Json(json!({
        "transactions": transactions,
        "count": transactions.len(),
    })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewTransaction>,
) -> HemoResult<(StatusCode, Json<Transaction>)> {
    let transaction = state.ledger.process_transaction(payload)?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<Json<Transaction>> {
    let transaction = state.store.read(|t| t.transactions.require(&id).cloned())??;
    Ok(Json(transaction))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<TransactionPatch>,
) -> HemoResult<Json<Transaction>> {
    let transaction = state.ledger.update_transaction(id, patch)?;
    Ok(Json(transaction))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HemoResult<StatusCode> {
    state.ledger.delete_transaction(id)?;
    Ok(StatusCode::NO_CONTENT)
}
