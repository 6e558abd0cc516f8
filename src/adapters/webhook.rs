use {
    crate::domain::{
        error::SyncError,
        record::StoredRecord,
        webhook::{WebhookForwarder, WebhookPayload, endpoint_segment},
    },
    std::{future::Future, pin::Pin, time::Duration},
};

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts record change events to the configured receiver. Without a base URL
/// the forwarder is disabled and every delivery is a logged no-op.
pub struct HttpForwarder {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl HttpForwarder {
    pub fn new(base_url: Option<String>) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|error| SyncError::Webhook(format!("building http client: {error}")))?;
        Ok(Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        })
    }

    async fn forward_inner(&self, record: &StoredRecord) -> Result<(), SyncError> {
        let Some(base_url) = &self.base_url else {
            tracing::debug!(
                record_type = %record.record_type,
                "webhook forwarding disabled, skipping"
            );
            return Ok(());
        };

        let payload = WebhookPayload::for_record(record)?;
        let url = format!("{base_url}/{}", endpoint_segment(&record.record_type));

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|error| SyncError::Webhook(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Webhook(format!("receiver returned {status}")));
        }

        tracing::debug!(
            record_type = %record.record_type,
            external_id = %record.external_id,
            "webhook delivered"
        );
        Ok(())
    }
}

impl WebhookForwarder for HttpForwarder {
    fn forward_record<'a>(
        &'a self,
        record: &'a StoredRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), SyncError>> + Send + 'a>> {
        Box::pin(self.forward_inner(record))
    }
}
