#![allow(dead_code)]

use chrono::Utc;
use crm_sync::domain::error::SyncError;
use crm_sync::domain::id::{ConnectionId, CustomerId};
use crm_sync::domain::import::{ActionRequest, ImportLimits};
use crm_sync::domain::platform::{ActionPage, ActionRuntime, Connection, ConnectionDirectory};
use crm_sync::domain::record::{NewRecord, RecordKey, RecordPatch, StoredRecord};
use crm_sync::domain::store::RecordStore;
use crm_sync::domain::webhook::WebhookForwarder;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

// ── Builders ───────────────────────────────────────────────────────────────

pub fn customer(id: &str) -> CustomerId {
    CustomerId::new(id).unwrap()
}

pub fn connection(id: &str) -> Connection {
    Connection {
        id: ConnectionId::new(id).unwrap(),
        integration: "hubspot".to_string(),
    }
}

pub fn raw_record(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({ "id": id, "name": name })
}

pub fn page(records: Vec<serde_json::Value>, next_cursor: Option<&str>) -> ActionPage {
    ActionPage {
        records,
        next_cursor: next_cursor.map(str::to_string),
    }
}

pub fn import_request(action_key: &str, customer_id: &str) -> ActionRequest {
    ActionRequest {
        action_key: Some(action_key.to_string()),
        instance_key: None,
        customer_id: Some(customer(customer_id)),
    }
}

pub fn custom_import_request(
    action_key: &str,
    instance_key: &str,
    customer_id: &str,
) -> ActionRequest {
    ActionRequest {
        action_key: Some(action_key.to_string()),
        instance_key: Some(instance_key.to_string()),
        customer_id: Some(customer(customer_id)),
    }
}

pub fn limits(max_pages: u32) -> ImportLimits {
    ImportLimits { max_pages }
}

/// A shutdown receiver that never fires.
pub fn no_shutdown() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    std::mem::forget(tx);
    rx
}

// ── Connection directory fake ──────────────────────────────────────────────

/// Serves a fixed connection list and counts lookups.
pub struct StaticDirectory {
    connections: Vec<Connection>,
    calls: AtomicUsize,
}

impl StaticDirectory {
    pub fn new(connections: Vec<Connection>) -> Self {
        Self {
            connections,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConnectionDirectory for StaticDirectory {
    fn list_connections<'a>(
        &'a self,
        _customer_id: &'a CustomerId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Connection>, SyncError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.connections.clone())
        })
    }
}

// ── Action runtime fakes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub connection_id: String,
    pub action_key: String,
    pub instance_key: Option<String>,
    pub cursor: Option<String>,
}

/// Replays a fixed script of pages (or errors) and records every call it
/// receives. Calling past the end of the script fails the test.
pub struct ScriptedRuntime {
    script: Mutex<VecDeque<Result<ActionPage, SyncError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRuntime {
    pub fn new(script: Vec<Result<ActionPage, SyncError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn pages(pages: Vec<ActionPage>) -> Self {
        Self::new(pages.into_iter().map(Ok).collect())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ActionRuntime for ScriptedRuntime {
    fn run_action<'a>(
        &'a self,
        connection_id: &'a ConnectionId,
        action_key: &'a str,
        instance_key: Option<&'a str>,
        cursor: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<ActionPage, SyncError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(RecordedCall {
                connection_id: connection_id.to_string(),
                action_key: action_key.to_string(),
                instance_key: instance_key.map(str::to_string),
                cursor: cursor.map(str::to_string),
            });
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("runtime called more times than scripted")
        })
    }
}

/// Always returns another page with a cursor, so the run never terminates on
/// its own.
pub struct LoopingRuntime {
    calls: AtomicUsize,
}

impl LoopingRuntime {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ActionRuntime for LoopingRuntime {
    fn run_action<'a>(
        &'a self,
        _connection_id: &'a ConnectionId,
        _action_key: &'a str,
        _instance_key: Option<&'a str>,
        _cursor: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<ActionPage, SyncError>> + Send + 'a>> {
        Box::pin(async move {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(page(
                vec![raw_record(&format!("loop-{call}"), "looped")],
                Some("keep-going"),
            ))
        })
    }
}

// ── Record store fake ──────────────────────────────────────────────────────

/// In-memory store keyed by the identity triple. The map lock makes
/// `insert_if_absent` atomic, matching the database constraint.
pub struct InMemoryStore {
    records: Mutex<HashMap<RecordKey, StoredRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get(&self, key: &RecordKey) -> Option<StoredRecord> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn all(&self) -> Vec<StoredRecord> {
        self.records.lock().unwrap().values().cloned().collect()
    }

    pub fn seed(&self, record: StoredRecord) {
        self.records.lock().unwrap().insert(record.key(), record);
    }
}

fn stored_from_new(record: &NewRecord) -> StoredRecord {
    let now = Utc::now();
    StoredRecord {
        id: record.id(),
        external_id: record.external_id().to_string(),
        name: record.name().to_string(),
        fields: record.fields().clone(),
        record_type: record.record_type().clone(),
        customer_id: record.customer_id().clone(),
        created_at: now,
        updated_at: now,
    }
}

impl RecordStore for InMemoryStore {
    fn find<'a>(
        &'a self,
        key: &'a RecordKey,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.records.lock().unwrap().get(key).cloned()) })
    }

    fn insert_if_absent<'a>(
        &'a self,
        record: &'a NewRecord,
    ) -> Pin<Box<dyn Future<Output = Result<bool, SyncError>> + Send + 'a>> {
        Box::pin(async move {
            let mut records = self.records.lock().unwrap();
            let key = record.key();
            if records.contains_key(&key) {
                return Ok(false);
            }
            records.insert(key, stored_from_new(record));
            Ok(true)
        })
    }

    fn update<'a>(
        &'a self,
        key: &'a RecordKey,
        patch: &'a RecordPatch,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>> {
        Box::pin(async move {
            let mut records = self.records.lock().unwrap();
            let Some(record) = records.get_mut(key) else {
                return Ok(None);
            };
            if let Some(name) = &patch.name {
                record.name = name.clone();
            }
            if let Some(fields) = &patch.fields {
                record.fields = fields.clone();
            }
            record.updated_at = Utc::now();
            Ok(Some(record.clone()))
        })
    }

    fn delete<'a>(
        &'a self,
        key: &'a RecordKey,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.records.lock().unwrap().remove(key)) })
    }
}

// ── Webhook forwarder fakes ────────────────────────────────────────────────

/// Captures every forwarded record instead of delivering it.
pub struct RecordingForwarder {
    forwarded: Mutex<Vec<StoredRecord>>,
}

impl RecordingForwarder {
    pub fn new() -> Self {
        Self {
            forwarded: Mutex::new(Vec::new()),
        }
    }

    pub fn forwarded(&self) -> Vec<StoredRecord> {
        self.forwarded.lock().unwrap().clone()
    }
}

impl WebhookForwarder for RecordingForwarder {
    fn forward_record<'a>(
        &'a self,
        record: &'a StoredRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), SyncError>> + Send + 'a>> {
        Box::pin(async move {
            self.forwarded.lock().unwrap().push(record.clone());
            Ok(())
        })
    }
}

/// Fails every delivery.
pub struct FailingForwarder;

impl WebhookForwarder for FailingForwarder {
    fn forward_record<'a>(
        &'a self,
        _record: &'a StoredRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), SyncError>> + Send + 'a>> {
        Box::pin(async move { Err(SyncError::Webhook("receiver is down".to_string())) })
    }
}
