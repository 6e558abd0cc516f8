use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        adapters::auth::AuthedCustomer,
        domain::{
            error::SyncError,
            id::CustomerId,
            record::{RecordKey, RecordPatch, RecordType, StoredRecord},
        },
        services,
    },
    axum::{
        Json,
        extract::{Path, State},
    },
};

fn record_key(
    customer_id: CustomerId,
    record_type: &str,
    external_id: String,
) -> Result<RecordKey, ApiError> {
    Ok(RecordKey {
        external_id,
        customer_id,
        record_type: RecordType::from_name(record_type)?,
    })
}

fn not_found(key: &RecordKey) -> ApiError {
    ApiError(SyncError::NotFound(format!(
        "{}/{}",
        key.record_type, key.external_id
    )))
}

/// `GET /api/records/{record_type}/{external_id}`
#[tracing::instrument(name = "get_record", skip_all, fields(customer_id = %auth.0))]
pub async fn get_record(
    State(state): State<AppState>,
    auth: AuthedCustomer,
    Path((record_type, external_id)): Path<(String, String)>,
) -> Result<Json<StoredRecord>, ApiError> {
    let key = record_key(auth.0, &record_type, external_id)?;
    let record = services::records::get_record(state.store.as_ref(), &key)
        .await?
        .ok_or_else(|| not_found(&key))?;
    Ok(Json(record))
}

/// `PATCH /api/records/{record_type}/{external_id}`: partial update, then
/// notify the webhook receiver.
#[tracing::instrument(name = "update_record", skip_all, fields(customer_id = %auth.0))]
pub async fn update_record(
    State(state): State<AppState>,
    auth: AuthedCustomer,
    Path((record_type, external_id)): Path<(String, String)>,
    Json(patch): Json<RecordPatch>,
) -> Result<Json<StoredRecord>, ApiError> {
    let key = record_key(auth.0, &record_type, external_id)?;
    let record = services::records::update_record(
        state.store.as_ref(),
        state.forwarder.as_ref(),
        &key,
        &patch,
    )
    .await?
    .ok_or_else(|| not_found(&key))?;
    Ok(Json(record))
}

/// `DELETE /api/records/{record_type}/{external_id}`: remove the record,
/// then notify the webhook receiver with its last state.
#[tracing::instrument(name = "delete_record", skip_all, fields(customer_id = %auth.0))]
pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthedCustomer,
    Path((record_type, external_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let key = record_key(auth.0, &record_type, external_id)?;
    services::records::delete_record(state.store.as_ref(), state.forwarder.as_ref(), &key)
        .await?
        .ok_or_else(|| not_found(&key))?;
    Ok(Json(serde_json::json!({ "success": true })))
}
