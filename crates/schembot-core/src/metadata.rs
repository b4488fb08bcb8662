//! Metadata extraction from a parsed schematic.

use schembot_nbt::Tag;
use thiserror::Error;

/// Name of the schema revision field.
pub const VERSION_FIELD: &str = "Version";
/// Name of the data version field.
pub const DATA_VERSION_FIELD: &str = "DataVersion";
/// Name of the nested container compound used by the v3 envelope layout.
pub const CONTAINER_FIELD: &str = "Schematic";

/// Extraction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// One or both required fields are absent (or not integers).
    #[error("missing required tags: {}", .0.join("/"))]
    MissingFields(Vec<&'static str>),
}

/// The two integers the command reports on.
///
/// Transient, request-scoped. `schema_version` selects the format,
/// `data_version` identifies the originating release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchematicMetadata {
    pub schema_version: i32,
    pub data_version: i32,
}

impl SchematicMetadata {
    /// Extract metadata from a parsed root tag.
    ///
    /// Two layouts exist in the wild: the v3 envelope, where the fields live
    /// under a nested `Schematic` compound, and the flat v2 layout where
    /// they sit on the root. A field that exists but is not an integer tag
    /// counts as absent.
    pub fn from_tag(root: &Tag) -> Result<Self, MetadataError> {
        let container = root.get(CONTAINER_FIELD).unwrap_or(root);

        let schema_version = container.get(VERSION_FIELD).and_then(Tag::as_int);
        let data_version = container.get(DATA_VERSION_FIELD).and_then(Tag::as_int);

        match (schema_version, data_version) {
            (Some(schema_version), Some(data_version)) => Ok(Self {
                schema_version,
                data_version,
            }),
            (schema_version, data_version) => {
                let mut missing = Vec::new();
                if schema_version.is_none() {
                    missing.push(VERSION_FIELD);
                }
                if data_version.is_none() {
                    missing.push(DATA_VERSION_FIELD);
                }
                Err(MetadataError::MissingFields(missing))
            }
        }
    }
}
