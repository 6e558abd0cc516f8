pub mod adapters;
pub mod domain;
pub mod infra;
pub mod services;

use {
    crate::domain::import::ImportLimits,
    crate::domain::platform::{ActionRuntime, ConnectionDirectory},
    crate::domain::store::RecordStore,
    crate::domain::webhook::WebhookForwarder,
    axum::{
        Router,
        routing::{get, post},
    },
    std::sync::Arc,
    tokio::sync::watch,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub directory: Arc<dyn ConnectionDirectory>,
    pub runtime: Arc<dyn ActionRuntime>,
    pub forwarder: Arc<dyn WebhookForwarder>,
    pub limits: ImportLimits,
    pub shutdown: watch::Receiver<bool>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/api/import", post(adapters::import::import_records))
        .route(
            "/api/records/{record_type}/{external_id}",
            get(adapters::records::get_record)
                .patch(adapters::records::update_record)
                .delete(adapters::records::delete_record),
        )
        .with_state(state)
}
