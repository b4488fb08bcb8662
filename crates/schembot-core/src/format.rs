//! Schematic format selection.

use std::fmt;

/// The two known schema revisions of the Sponge schematic container.
///
/// Other schema versions have no defined format. Callers render the
/// `unknown` placeholder and the bare load command in that case rather than
/// interpolating an undefined value into user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchematicFormat {
    /// Sponge schematic, schema revision 2.
    Sponge2,
    /// Sponge schematic, schema revision 3.
    Sponge3,
}

impl SchematicFormat {
    /// Map a `Version` field to a format. Only 2 and 3 are defined.
    pub fn from_schema_version(schema_version: i32) -> Option<Self> {
        match schema_version {
            2 => Some(SchematicFormat::Sponge2),
            3 => Some(SchematicFormat::Sponge3),
            _ => None,
        }
    }

    /// Format identifier shown to the user.
    pub fn id(self) -> &'static str {
        match self {
            SchematicFormat::Sponge2 => "schem.2",
            SchematicFormat::Sponge3 => "schem.3",
        }
    }

    /// The format argument WorldEdit's `//schem load` takes.
    pub fn worldedit_load_arg(self) -> &'static str {
        match self {
            SchematicFormat::Sponge2 => "sponge.2",
            SchematicFormat::Sponge3 => "sponge.3",
        }
    }
}

impl fmt::Display for SchematicFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
