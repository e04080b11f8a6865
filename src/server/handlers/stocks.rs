//! Stock level HTTP handlers (read-only: stock is a derived aggregate)

use crate::core::error::HemoResult;
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    pub blood_bank_id: Option<Uuid>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> HemoResult<Json<Value>> {
    let stocks = state.ledger.stock_levels(query.blood_bank_id)?;
    Ok(Json(json!({
        "stocks": stocks,
        "count": stocks.len(),
    })))
}
