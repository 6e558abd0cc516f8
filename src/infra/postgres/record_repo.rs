use {
    crate::domain::error::SyncError,
    crate::domain::id::CustomerId,
    crate::domain::record::{NewRecord, RecordKey, RecordPatch, RecordType, StoredRecord},
    crate::domain::store::RecordStore,
    chrono::{DateTime, Utc},
    sqlx::{FromRow, PgPool},
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

const RECORD_COLUMNS: &str =
    "id, external_id, customer_id, record_type, name, fields, created_at, updated_at";

#[derive(Debug, FromRow)]
struct RecordRow {
    id: Uuid,
    external_id: String,
    customer_id: String,
    record_type: String,
    name: String,
    fields: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for StoredRecord {
    type Error = SyncError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            external_id: row.external_id,
            name: row.name,
            fields: row.fields,
            record_type: RecordType::from_name(&row.record_type)?,
            customer_id: CustomerId::new(row.customer_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed record store. Dedup leans on the unique constraint over
/// the identity triple, so concurrent imports of the same record race at the
/// database and exactly one insert wins.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_inner(&self, key: &RecordKey) -> Result<Option<StoredRecord>, SyncError> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM external_records \
             WHERE external_id = $1 AND customer_id = $2 AND record_type = $3"
        );
        let row = sqlx::query_as::<_, RecordRow>(&query)
            .bind(&key.external_id)
            .bind(key.customer_id.as_str())
            .bind(key.record_type.name())
            .fetch_optional(&self.pool)
            .await?;
        row.map(StoredRecord::try_from).transpose()
    }

    async fn insert_if_absent_inner(&self, record: &NewRecord) -> Result<bool, SyncError> {
        let result = sqlx::query(
            "INSERT INTO external_records \
             (id, external_id, customer_id, record_type, name, fields) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (external_id, customer_id, record_type) DO NOTHING",
        )
        .bind(record.id())
        .bind(record.external_id())
        .bind(record.customer_id().as_str())
        .bind(record.record_type().name())
        .bind(record.name())
        .bind(record.fields())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_inner(
        &self,
        key: &RecordKey,
        patch: &RecordPatch,
    ) -> Result<Option<StoredRecord>, SyncError> {
        let query = format!(
            "UPDATE external_records \
             SET name = COALESCE($4, name), \
                 fields = COALESCE($5, fields), \
                 updated_at = now() \
             WHERE external_id = $1 AND customer_id = $2 AND record_type = $3 \
             RETURNING {RECORD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RecordRow>(&query)
            .bind(&key.external_id)
            .bind(key.customer_id.as_str())
            .bind(key.record_type.name())
            .bind(patch.name.as_deref())
            .bind(patch.fields.as_ref())
            .fetch_optional(&self.pool)
            .await?;
        row.map(StoredRecord::try_from).transpose()
    }

    async fn delete_inner(&self, key: &RecordKey) -> Result<Option<StoredRecord>, SyncError> {
        let query = format!(
            "DELETE FROM external_records \
             WHERE external_id = $1 AND customer_id = $2 AND record_type = $3 \
             RETURNING {RECORD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RecordRow>(&query)
            .bind(&key.external_id)
            .bind(key.customer_id.as_str())
            .bind(key.record_type.name())
            .fetch_optional(&self.pool)
            .await?;
        row.map(StoredRecord::try_from).transpose()
    }
}

impl RecordStore for PgRecordStore {
    fn find<'a>(
        &'a self,
        key: &'a RecordKey,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>> {
        Box::pin(self.find_inner(key))
    }

    fn insert_if_absent<'a>(
        &'a self,
        record: &'a NewRecord,
    ) -> Pin<Box<dyn Future<Output = Result<bool, SyncError>> + Send + 'a>> {
        Box::pin(self.insert_if_absent_inner(record))
    }

    fn update<'a>(
        &'a self,
        key: &'a RecordKey,
        patch: &'a RecordPatch,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>> {
        Box::pin(self.update_inner(key, patch))
    }

    fn delete<'a>(
        &'a self,
        key: &'a RecordKey,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>> {
        Box::pin(self.delete_inner(key))
    }
}
