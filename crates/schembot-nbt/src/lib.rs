//! Read-only parser for the NBT container used by schematic files.
//!
//! Schematics are stored as a gzip-compressed named binary tag stream: a
//! single named root compound whose children are length-prefixed, big-endian
//! tags. This crate inflates the stream and walks it into a [`Tag`] tree; it
//! knows nothing about schematic semantics.

pub mod error;
pub mod reader;
pub mod tag;

pub use error::NbtError;
pub use reader::{parse, parse_gzipped};
pub use tag::Tag;
