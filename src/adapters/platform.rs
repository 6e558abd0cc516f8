use {
    crate::domain::{
        error::SyncError,
        id::{ConnectionId, CustomerId},
        platform::{ActionPage, ActionRuntime, Connection, ConnectionDirectory},
    },
    serde::Serialize,
    std::{future::Future, pin::Pin, time::Duration},
};

const PLATFORM_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the integration platform. Serves both collaborator roles:
/// the connection directory and the action runtime.
pub struct HttpPlatform {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunActionBody<'a> {
    connection_id: &'a ConnectionId,
    action_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<ActionParameters<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionParameters<'a> {
    instance_key: &'a str,
}

impl HttpPlatform {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(PLATFORM_TIMEOUT)
            .build()
            .map_err(|error| SyncError::Platform(format!("building http client: {error}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn list_connections_inner(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Connection>, SyncError> {
        let url = format!("{}/api/customers/{customer_id}/connections", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|error| SyncError::Platform(format!("listing connections: {error}")))?;
        let response = check_status(response).await?;
        response
            .json::<Vec<Connection>>()
            .await
            .map_err(|error| SyncError::Platform(format!("decoding connections: {error}")))
    }

    async fn run_action_inner(
        &self,
        connection_id: &ConnectionId,
        action_key: &str,
        instance_key: Option<&str>,
        cursor: Option<&str>,
    ) -> Result<ActionPage, SyncError> {
        let url = format!("{}/api/actions/run", self.base_url);
        let body = RunActionBody {
            connection_id,
            action_key,
            parameters: instance_key.map(|instance_key| ActionParameters { instance_key }),
            cursor,
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|error| SyncError::Platform(format!("running action {action_key}: {error}")))?;
        let response = check_status(response).await?;
        response
            .json::<ActionPage>()
            .await
            .map_err(|error| SyncError::Platform(format!("decoding action page: {error}")))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SyncError::Platform(format!(
        "platform returned {status}: {body}"
    )))
}

impl ConnectionDirectory for HttpPlatform {
    fn list_connections<'a>(
        &'a self,
        customer_id: &'a CustomerId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Connection>, SyncError>> + Send + 'a>> {
        Box::pin(self.list_connections_inner(customer_id))
    }
}

impl ActionRuntime for HttpPlatform {
    fn run_action<'a>(
        &'a self,
        connection_id: &'a ConnectionId,
        action_key: &'a str,
        instance_key: Option<&'a str>,
        cursor: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<ActionPage, SyncError>> + Send + 'a>> {
        Box::pin(self.run_action_inner(connection_id, action_key, instance_key, cursor))
    }
}
