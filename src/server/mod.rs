//! HTTP server: shared state, route table and the serve loop
//!
//! Routes follow a uniform CRUD layout per resource:
//! - GET    /{resource}        - list all
//! - POST   /{resource}        - create
//! - GET    /{resource}/{id}   - fetch one
//! - PUT    /{resource}/{id}   - partial update
//! - DELETE /{resource}/{id}   - delete (add `?cascade=true` to remove dependents)
//!
//! Stock is derived from donations and transactions, so it only has a
//! read endpoint: GET /stocks?blood_bank_id={id}.

pub mod handlers;

use crate::config::AppConfig;
use crate::ledger::InventoryLedger;
use crate::storage::InMemoryStore;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state handed to every handler.
///
/// Both fields are cheap clones over the same underlying tables, so a
/// handler can read through `store` and mutate through `ledger` without
/// ever seeing two different views.
#[derive(Clone)]
pub struct AppState {
    pub store: InMemoryStore,
    pub ledger: InventoryLedger,
}

impl AppState {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let ledger = InventoryLedger::new(store.clone());
        Self { store, ledger }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the full application router with tracing and CORS layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/donors", get(handlers::donors::list).post(handlers::donors::create))
        .route(
            "/donors/{id}",
            get(handlers::donors::get)
                .put(handlers::donors::update)
                .delete(handlers::donors::remove),
        )
        .route(
            "/acceptors",
            get(handlers::acceptors::list).post(handlers::acceptors::create),
        )
        .route(
            "/acceptors/{id}",
            get(handlers::acceptors::get)
                .put(handlers::acceptors::update)
                .delete(handlers::acceptors::remove),
        )
        .route(
            "/blood-banks",
            get(handlers::blood_banks::list).post(handlers::blood_banks::create),
        )
        .route(
            "/blood-banks/{id}",
            get(handlers::blood_banks::get)
                .put(handlers::blood_banks::update)
                .delete(handlers::blood_banks::remove),
        )
        .route(
            "/healthcare-centers",
            get(handlers::healthcare_centers::list).post(handlers::healthcare_centers::create),
        )
        .route(
            "/healthcare-centers/{id}",
            get(handlers::healthcare_centers::get)
                .put(handlers::healthcare_centers::update)
                .delete(handlers::healthcare_centers::remove),
        )
        .route(
            "/affiliations",
            get(handlers::affiliations::list).post(handlers::affiliations::create),
        )
        .route(
            "/affiliations/{id}",
            get(handlers::affiliations::get)
                .put(handlers::affiliations::update)
                .delete(handlers::affiliations::remove),
        )
        .route(
            "/donations",
            get(handlers::donations::list).post(handlers::donations::create),
        )
        .route(
            "/donations/{id}",
            get(handlers::donations::get)
                .put(handlers::donations::update)
                .delete(handlers::donations::remove),
        )
        .route(
            "/transactions",
            get(handlers::transactions::list).post(handlers::transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(handlers::transactions::get)
                .put(handlers::transactions::update)
                .delete(handlers::transactions::remove),
        )
        .route("/stocks", get(handlers::stocks::list))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the configured address and serve until shutdown.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = AppState::new();
    let app = router(state);
    let listener = TcpListener::bind(config.server.addr()).await?;
    info!(addr = %config.server.addr(), "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_views_share_tables() {
        let state = AppState::new();
        assert!(state.store.read(|t| t.donors.is_empty()).unwrap());
        // The ledger holds a clone of the same store handle.
        assert!(state.ledger.store().read(|t| t.donors.is_empty()).unwrap());
    }
}
