use {
    super::error::SyncError,
    super::id::{ConnectionId, CustomerId},
    serde::Deserialize,
    std::{future::Future, pin::Pin},
};

/// One tenant connection on the integration platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub integration: String,
}

/// One page returned by a platform action run. An absent or empty cursor
/// means the action has no further pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPage {
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Looks up the connections a customer has established on the platform.
///
/// Dyn-compatible by hand: implementors wrap an inner async fn in a boxed
/// future so the trait object can live behind `Arc<dyn ConnectionDirectory>`.
pub trait ConnectionDirectory: Send + Sync {
    fn list_connections<'a>(
        &'a self,
        customer_id: &'a CustomerId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Connection>, SyncError>> + Send + 'a>>;
}

/// Executes a platform action against one connection and returns a page of
/// raw records plus the cursor for the next call.
pub trait ActionRuntime: Send + Sync {
    fn run_action<'a>(
        &'a self,
        connection_id: &'a ConnectionId,
        action_key: &'a str,
        instance_key: Option<&'a str>,
        cursor: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<ActionPage, SyncError>> + Send + 'a>>;
}
