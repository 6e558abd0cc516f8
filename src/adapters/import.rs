use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        adapters::auth::AuthedCustomer,
        domain::import::{ActionRequest, ImportOutcome},
        services,
    },
    axum::{Json, extract::State},
    serde::Deserialize,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBody {
    pub action_key: Option<String>,
    pub instance_key: Option<String>,
}

/// `POST /api/import`: run the action named in the body against the
/// customer's first connection and report the dedup counters.
#[tracing::instrument(name = "import", skip_all, fields(customer_id = %auth.0))]
pub async fn import_records(
    State(state): State<AppState>,
    auth: AuthedCustomer,
    Json(body): Json<ImportBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request = ActionRequest {
        action_key: body.action_key,
        instance_key: body.instance_key,
        customer_id: Some(auth.0),
    };

    let outcome = services::import::import_records(
        state.directory.as_ref(),
        state.runtime.as_ref(),
        state.store.as_ref(),
        &request,
        state.limits,
        &state.shutdown,
    )
    .await?;

    match outcome {
        ImportOutcome::Completed(summary) => Ok(Json(serde_json::to_value(summary)?)),
        ImportOutcome::NoConnection => Ok(Json(serde_json::json!({
            "success": false,
            "error": "No connection found",
        }))),
    }
}
