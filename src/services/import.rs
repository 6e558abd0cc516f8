use {
    crate::domain::action::{ActionKind, classify_action},
    crate::domain::error::SyncError,
    crate::domain::id::{CustomerId, InstanceKey},
    crate::domain::import::{ActionRequest, ImportLimits, ImportOutcome, ImportSummary},
    crate::domain::platform::{ActionRuntime, Connection, ConnectionDirectory},
    crate::domain::record::{NewRecord, RecordType},
    crate::domain::store::RecordStore,
    tokio::sync::watch,
};

/// Validated form of an [`ActionRequest`], produced before any collaborator
/// is contacted.
struct ImportPlan {
    customer_id: CustomerId,
    action_key: String,
    record_type: RecordType,
}

/// Run one import: resolve the customer's connection, page through the
/// platform action, and insert every record that is not already stored.
///
/// Validation happens up front and in a fixed order, so a bad request never
/// reaches the platform or the store. A customer without connections is a
/// soft [`ImportOutcome::NoConnection`], not an error. Records inserted
/// before a mid-run failure stay inserted; the rerun picks them up as
/// existing.
pub async fn import_records(
    directory: &dyn ConnectionDirectory,
    runtime: &dyn ActionRuntime,
    store: &dyn RecordStore,
    request: &ActionRequest,
    limits: ImportLimits,
    shutdown: &watch::Receiver<bool>,
) -> Result<ImportOutcome, SyncError> {
    let plan = validate(request)?;

    let connection = match first_connection(directory, &plan.customer_id).await? {
        Some(connection) => connection,
        None => {
            tracing::info!(
                customer_id = %plan.customer_id,
                action_key = %plan.action_key,
                "no connection found, skipping import"
            );
            return Ok(ImportOutcome::NoConnection);
        }
    };

    let instance_key = plan.record_type.instance_key().map(InstanceKey::as_str);

    let mut summary = ImportSummary::default();
    let mut cursor: Option<String> = None;
    let mut pages: u32 = 0;

    loop {
        if *shutdown.borrow() {
            tracing::warn!(
                customer_id = %plan.customer_id,
                pages,
                "import cancelled by shutdown"
            );
            return Err(SyncError::Cancelled);
        }
        if pages >= limits.max_pages {
            return Err(SyncError::PageLimit(limits.max_pages));
        }

        let page = runtime
            .run_action(
                &connection.id,
                &plan.action_key,
                instance_key,
                cursor.as_deref(),
            )
            .await?;
        pages += 1;

        for raw in &page.records {
            let record = NewRecord::from_raw(raw, &plan.record_type, &plan.customer_id)?;
            if store.insert_if_absent(&record).await? {
                summary.record_new();
            } else {
                summary.record_existing();
            }
        }

        tracing::debug!(
            page = pages,
            records = page.records.len(),
            has_cursor = page.next_cursor.is_some(),
            "imported page"
        );

        match page.next_cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    tracing::info!(
        customer_id = %plan.customer_id,
        record_type = %plan.record_type,
        records = summary.records_count,
        new = summary.new_records_count,
        existing = summary.existing_records_count,
        pages,
        "import finished"
    );

    Ok(ImportOutcome::Completed(summary))
}

/// Check the request in a fixed order: customer, action key, action shape,
/// instance key. Blank strings count as missing.
fn validate(request: &ActionRequest) -> Result<ImportPlan, SyncError> {
    let customer_id = request
        .customer_id
        .clone()
        .ok_or(SyncError::Unauthorized)?;

    let action_key = request
        .action_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| SyncError::InvalidRequest("actionKey is required".into()))?;

    let record_type = match classify_action(action_key)? {
        ActionKind::Default(kind) => RecordType::Default(kind),
        ActionKind::Custom => {
            let instance_key = request
                .instance_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    SyncError::InvalidRequest(
                        "instanceKey is required for custom object imports".into(),
                    )
                })?;
            RecordType::Custom(InstanceKey::new(instance_key)?)
        }
    };

    Ok(ImportPlan {
        customer_id,
        action_key: action_key.to_string(),
        record_type,
    })
}

/// The pipeline always imports through the customer's first connection;
/// extra connections are ignored.
async fn first_connection(
    directory: &dyn ConnectionDirectory,
    customer_id: &CustomerId,
) -> Result<Option<Connection>, SyncError> {
    let mut connections = directory.list_connections(customer_id).await?;
    if connections.len() > 1 {
        tracing::debug!(
            customer_id = %customer_id,
            count = connections.len(),
            "customer has multiple connections, using the first"
        );
    }
    Ok(if connections.is_empty() {
        None
    } else {
        Some(connections.remove(0))
    })
}
