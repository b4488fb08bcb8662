//! Core logic for the schematic-inspection command.
//!
//! Everything here is a stateless pure function: the data-version table and
//! its resolver, the schema-revision format selector, metadata extraction
//! from a parsed tag tree, and the response templates. I/O and the command
//! surface live in `schembot-gateway`.

pub mod embed;
pub mod format;
pub mod metadata;
pub mod version;

pub use embed::{render_embed, Embed, RenderContext};
pub use format::SchematicFormat;
pub use metadata::{MetadataError, SchematicMetadata};
pub use version::{resolve_data_version, VersionResolution};
