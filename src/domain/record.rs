use {
    super::action::DefaultKind,
    super::error::SyncError,
    super::id::{CustomerId, InstanceKey},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize, Serializer},
    std::fmt,
    uuid::Uuid,
};

/// Label stored when a record carries neither a usable name nor id text.
pub const FALLBACK_RECORD_NAME: &str = "Unnamed record";

/// Logical bucket a stored record belongs to: one of the fixed default
/// categories, or a customer-defined custom object named by its instance key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    Default(DefaultKind),
    Custom(InstanceKey),
}

impl RecordType {
    /// The name persisted in the `record_type` column and sent on the wire.
    pub fn name(&self) -> &str {
        match self {
            Self::Default(kind) => kind.type_name(),
            Self::Custom(key) => key.as_str(),
        }
    }

    /// Inverse of [`RecordType::name`]: membership in the default set decides
    /// the bucket, anything else is a custom instance key.
    pub fn from_name(name: &str) -> Result<Self, SyncError> {
        match DefaultKind::from_type_name(name) {
            Some(kind) => Ok(Self::Default(kind)),
            None => Ok(Self::Custom(InstanceKey::new(name)?)),
        }
    }

    pub fn instance_key(&self) -> Option<&InstanceKey> {
        match self {
            Self::Default(_) => None,
            Self::Custom(key) => Some(key),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Identity triple of a stored record. Uniqueness of this triple is the
/// storage invariant: re-importing the same external id for the same tenant
/// and type must never create a second row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub external_id: String,
    pub customer_id: CustomerId,
    pub record_type: RecordType,
}

/// Normalized record ready for insertion. Built only via [`NewRecord::from_raw`]
/// so the name fallback and field stripping cannot be skipped.
#[derive(Debug, Clone)]
pub struct NewRecord {
    id: Uuid,
    external_id: String,
    name: String,
    fields: serde_json::Value,
    record_type: RecordType,
    customer_id: CustomerId,
}

impl NewRecord {
    /// Normalize one raw platform record: require a usable external id,
    /// resolve the display name (`name`, then the id, then a fixed label),
    /// and keep everything else as the open attribute map.
    pub fn from_raw(
        raw: &serde_json::Value,
        record_type: &RecordType,
        customer_id: &CustomerId,
    ) -> Result<Self, SyncError> {
        let object = raw
            .as_object()
            .ok_or_else(|| SyncError::Platform(format!("record is not an object: {raw}")))?;

        let external_id = object
            .get("id")
            .and_then(id_text)
            .ok_or_else(|| SyncError::Platform(format!("record has no usable id: {raw}")))?;

        let name = object
            .get("name")
            .and_then(name_text)
            .or_else(|| object.get("id").and_then(name_text))
            .unwrap_or_else(|| FALLBACK_RECORD_NAME.to_string());

        let mut fields = object.clone();
        fields.remove("id");
        fields.remove("name");

        Ok(Self {
            id: Uuid::now_v7(),
            external_id,
            name,
            fields: serde_json::Value::Object(fields),
            record_type: record_type.clone(),
            customer_id: customer_id.clone(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &serde_json::Value {
        &self.fields
    }

    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            external_id: self.external_id.clone(),
            customer_id: self.customer_id.clone(),
            record_type: self.record_type.clone(),
        }
    }
}

/// Render a raw `id` value to key text. The platform sends strings, some
/// integrations send bare numbers; anything else is unusable.
fn id_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Render a raw value as a display name. Stricter than [`id_text`]: zero is
/// a valid key but not a name, so `{"id": 0}` falls through to the fixed
/// label.
fn name_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Full record row as read back from storage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub id: Uuid,
    pub external_id: String,
    pub name: String,
    pub fields: serde_json::Value,
    pub record_type: RecordType,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            external_id: self.external_id.clone(),
            customer_id: self.customer_id.clone(),
            record_type: self.record_type.clone(),
        }
    }
}

/// Partial update applied by the edit operation. Absent fields keep their
/// stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    pub name: Option<String>,
    pub fields: Option<serde_json::Value>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.fields.is_none()
    }
}
