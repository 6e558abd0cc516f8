use {
    super::error::SyncError,
    super::record::{NewRecord, RecordKey, RecordPatch, StoredRecord},
    std::{future::Future, pin::Pin},
};

/// Persistence seam for imported records.
///
/// `insert_if_absent` is the dedup primitive: it must be atomic against
/// concurrent inserts of the same identity triple, so exactly one of two
/// racing calls reports `true`.
pub trait RecordStore: Send + Sync {
    fn find<'a>(
        &'a self,
        key: &'a RecordKey,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>>;

    /// Insert the record unless its identity triple already exists.
    /// Returns `true` when a row was written, `false` when one was already
    /// there.
    fn insert_if_absent<'a>(
        &'a self,
        record: &'a NewRecord,
    ) -> Pin<Box<dyn Future<Output = Result<bool, SyncError>> + Send + 'a>>;

    /// Apply a partial update, returning the updated row or `None` when the
    /// key does not exist.
    fn update<'a>(
        &'a self,
        key: &'a RecordKey,
        patch: &'a RecordPatch,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>>;

    /// Remove the row, returning it when it existed.
    fn delete<'a>(
        &'a self,
        key: &'a RecordKey,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoredRecord>, SyncError>> + Send + 'a>>;
}
