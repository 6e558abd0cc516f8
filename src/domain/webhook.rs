use {
    super::error::SyncError,
    super::id::{CustomerId, InstanceKey},
    super::record::{RecordType, StoredRecord},
    serde::Serialize,
    std::{future::Future, pin::Pin},
};

/// Path segment custom-object events are delivered under. Default types get
/// their own segment per type name.
pub const CUSTOM_OBJECT_SEGMENT: &str = "custom-object";

/// Event body forwarded to the configured webhook receiver when a record
/// changes outside of an import run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: serde_json::Value,
    pub customer_id: CustomerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_key: Option<InstanceKey>,
}

impl WebhookPayload {
    pub fn for_record(record: &StoredRecord) -> Result<Self, serde_json::Error> {
        Ok(Self {
            record_type: record.record_type.name().to_string(),
            data: serde_json::to_value(record)?,
            customer_id: record.customer_id.clone(),
            instance_key: record.record_type.instance_key().cloned(),
        })
    }
}

/// Receiver path segment for a record type: default types deliver to their
/// own endpoint, custom objects share one.
pub fn endpoint_segment(record_type: &RecordType) -> &str {
    match record_type {
        RecordType::Default(kind) => kind.type_name(),
        RecordType::Custom(_) => CUSTOM_OBJECT_SEGMENT,
    }
}

/// Delivers record change events to the configured receiver. Delivery is
/// best-effort from the caller's perspective; implementations report failures
/// so the caller can log them without failing the mutation.
pub trait WebhookForwarder: Send + Sync {
    fn forward_record<'a>(
        &'a self,
        record: &'a StoredRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), SyncError>> + Send + 'a>>;
}
