use {
    crate::domain::error::SyncError,
    crate::domain::record::{RecordKey, RecordPatch, StoredRecord},
    crate::domain::store::RecordStore,
    crate::domain::webhook::WebhookForwarder,
};

/// Look up one stored record.
pub async fn get_record(
    store: &dyn RecordStore,
    key: &RecordKey,
) -> Result<Option<StoredRecord>, SyncError> {
    store.find(key).await
}

/// Apply a partial update and notify the webhook receiver. Delivery failures
/// are logged, not returned: the stored state already changed.
pub async fn update_record(
    store: &dyn RecordStore,
    forwarder: &dyn WebhookForwarder,
    key: &RecordKey,
    patch: &RecordPatch,
) -> Result<Option<StoredRecord>, SyncError> {
    // A patch with nothing in it changes nothing: answer with the current
    // row, skip the write and the webhook.
    if patch.is_empty() {
        return store.find(key).await;
    }

    let Some(updated) = store.update(key, patch).await? else {
        return Ok(None);
    };

    if let Err(error) = forwarder.forward_record(&updated).await {
        tracing::warn!(
            external_id = %updated.external_id,
            record_type = %updated.record_type,
            %error,
            "webhook delivery failed after update"
        );
    }

    Ok(Some(updated))
}

/// Delete the record and notify the webhook receiver with its last state.
pub async fn delete_record(
    store: &dyn RecordStore,
    forwarder: &dyn WebhookForwarder,
    key: &RecordKey,
) -> Result<Option<StoredRecord>, SyncError> {
    let Some(deleted) = store.delete(key).await? else {
        return Ok(None);
    };

    if let Err(error) = forwarder.forward_record(&deleted).await {
        tracing::warn!(
            external_id = %deleted.external_id,
            record_type = %deleted.record_type,
            %error,
            "webhook delivery failed after delete"
        );
    }

    Ok(Some(deleted))
}
