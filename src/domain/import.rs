use {super::id::CustomerId, serde::Serialize};

/// Pages fetched per import run before the pipeline refuses to continue.
pub const DEFAULT_MAX_PAGES: u32 = 1_000;

/// Validated-on-entry import request. All fields arrive optional and the
/// pipeline rejects what is missing, so the order of failures stays fixed
/// regardless of transport.
#[derive(Debug, Clone, Default)]
pub struct ActionRequest {
    pub action_key: Option<String>,
    pub instance_key: Option<String>,
    pub customer_id: Option<CustomerId>,
}

/// Counters reported after a completed import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub records_count: u64,
    pub new_records_count: u64,
    pub existing_records_count: u64,
}

impl ImportSummary {
    pub fn record_new(&mut self) {
        self.records_count += 1;
        self.new_records_count += 1;
    }

    pub fn record_existing(&mut self) {
        self.records_count += 1;
        self.existing_records_count += 1;
    }
}

/// What an import run produced. A tenant without any platform connection is
/// a soft outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Completed(ImportSummary),
    NoConnection,
}

/// Pagination bounds for a single run.
#[derive(Debug, Clone, Copy)]
pub struct ImportLimits {
    pub max_pages: u32,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}
