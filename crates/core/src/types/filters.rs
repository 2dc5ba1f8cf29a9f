use serde::{Deserialize, Serialize};

// =============================================================================
// Connection Configuration Types
// =============================================================================

/// Object type selecting source physical files.
pub const SOURCE_FILE_TYPE: &str = "*SRCPF";

/// Object type selecting every object.
pub const ALL_OBJECTS_TYPE: &str = "*ALL";

/// Filter controlling which remote objects are shown for a connection.
///
/// Filters are stored alongside ones the user created, so missing fields
/// default to empty and unknown fields are carried through `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFilter {
    /// Display name of the filter.
    #[serde(default)]
    pub name: String,

    /// Library the filter is scoped to.
    #[serde(default)]
    pub library: String,

    /// Object name pattern.
    #[serde(default)]
    pub object: String,

    /// Object types matched by the filter, in stored order.
    #[serde(default)]
    pub types: Vec<String>,

    /// Member name pattern.
    #[serde(default)]
    pub member: String,

    /// Member type pattern; empty matches any.
    #[serde(default)]
    pub member_type: String,

    /// Remaining filter settings, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ObjectFilter {
    fn all_in(name: &str, library: &str, object_type: &str) -> Self {
        Self {
            name: name.to_string(),
            library: library.to_string(),
            object: "*".to_string(),
            types: vec![object_type.to_string()],
            member: "*".to_string(),
            member_type: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Filter listing every source file in `library`.
    pub fn sandbox_sources(library: &str) -> Self {
        Self::all_in("Sandbox Sources", library, SOURCE_FILE_TYPE)
    }

    /// Filter listing every object in `library`.
    pub fn sandbox_objects(library: &str) -> Self {
        Self::all_in("Sandbox Object Filters", library, ALL_OBJECTS_TYPE)
    }
}

/// Settings stored for one connection.
///
/// Owned by the configuration store. Only the library list and object
/// filters are interpreted here; every other setting is carried through
/// `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// Connection name these settings belong to.
    #[serde(default)]
    pub name: String,

    /// Ordered library list.
    #[serde(default)]
    pub library_list: Vec<String>,

    /// Ordered object filters.
    #[serde(default)]
    pub object_filters: Vec<ObjectFilter>,

    /// Remaining settings, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConnectionConfig {
    /// Empty settings for the named connection.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether `library` is on the library list.
    pub fn has_library(&self, library: &str) -> bool {
        self.library_list.iter().any(|entry| entry == library)
    }
}
