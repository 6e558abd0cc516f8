use {super::error::SyncError, std::fmt};

/// Prefix shared by every fetch action configured on the platform
/// (`get-equipment`, `get-contacts`, ...). Keys without it name no action
/// we can run.
pub const FETCH_ACTION_PREFIX: &str = "get-";

/// The fixed record categories the platform serves without an instance key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultKind {
    Equipment,
    Contacts,
    Companies,
}

impl DefaultKind {
    pub const ALL: [DefaultKind; 3] = [Self::Equipment, Self::Contacts, Self::Companies];

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Contacts => "contacts",
            Self::Companies => "companies",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }

    /// The fetch action that pulls this category, e.g. `get-equipment`.
    pub fn action_key(&self) -> String {
        format!("{FETCH_ACTION_PREFIX}{}", self.type_name())
    }
}

impl fmt::Display for DefaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// What a fetch action key resolves to. `Custom` actions require the caller
/// to name the instance; default ones carry their own category.
///
/// The webhook forwarder selects endpoints off the same classification, so
/// this enum is the single place the `get-` convention is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Default(DefaultKind),
    Custom,
}

/// Classify an action key per the platform naming convention: the `get-`
/// prefix marks a fetch action, and the remainder either names one of the
/// default categories or designates a custom object fetch.
pub fn classify_action(action_key: &str) -> Result<ActionKind, SyncError> {
    let remainder = action_key
        .strip_prefix(FETCH_ACTION_PREFIX)
        .ok_or_else(|| SyncError::InvalidRequest(format!("unknown action: {action_key}")))?;

    Ok(match DefaultKind::from_type_name(remainder) {
        Some(kind) => ActionKind::Default(kind),
        None => ActionKind::Custom,
    })
}
