//! Response templates.
//!
//! The command replies with a single embed: title, accent colour, and a
//! description listing three ways to load the schematic (Axiom import,
//! WorldEdit's schematics folder, FAWE URL upload). One reserved venue gets
//! the extended template, which adds an alternate upload destination and a
//! distinct accent colour; every other venue gets the default template.

use serde::Serialize;

use crate::format::SchematicFormat;
use crate::version::VersionResolution;

/// Venue that receives the extended template.
pub const EXTENDED_VENUE_ID: u64 = 256198526248157186;

/// Accent colour of the extended template.
pub const EXTENDED_ACCENT: u32 = 0xFF5733;
/// Accent colour of the default template.
pub const DEFAULT_ACCENT: u32 = 0x1A6B52;

const FAWE_UPLOAD_URL: &str = "https://schem.intellectualsites.com/fawe/index.php";
const ALTERNATE_UPLOAD_URL: &str = "https://www.buildersrefuge.com/schematics/";

/// Placeholder shown when the schema version maps to no known format.
const UNKNOWN_FORMAT: &str = "unknown";

/// Which of the two templates to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    Default,
    Extended,
}

impl RenderContext {
    /// Pick the template for an opaque venue identifier. Only the reserved
    /// constant selects the extended template; an absent venue is default.
    pub fn from_venue_id(venue_id: Option<u64>) -> Self {
        match venue_id {
            Some(EXTENDED_VENUE_ID) => RenderContext::Extended,
            _ => RenderContext::Default,
        }
    }
}

/// The rendered response embed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub colour: u32,
}

/// Render the response for an accepted schematic.
pub fn render_embed(
    filename: &str,
    format: Option<SchematicFormat>,
    resolution: VersionResolution,
    context: RenderContext,
) -> Embed {
    let format_label = format.map(SchematicFormat::id).unwrap_or(UNKNOWN_FORMAT);
    let load_command = match format {
        Some(format) => format!("//schem load {filename} {}", format.worldedit_load_arg()),
        None => format!("//schem load {filename}"),
    };
    let url_command = match format {
        Some(format) => format!("//schematic load {} url:URLHERE", format.id()),
        None => "//schematic load url:URLHERE".to_string(),
    };

    let mut description = format!(
        "**__Format:__**\
         \n> {format_label}\
         \n**__MC version:__**\
         \n> {resolution}\
         \n\n# loading with Axiom\
         \n- `file > import schematic`\
         \n - choose `{filename}`\
         \n\n# loading with WorldEdit\
         \n- Put `{filename}` into your `.minecraft\\config\\worldedit\\schematics` folder\
         \n - ```{load_command}```\
         \n\n# loading with FAWE\
         \n- Upload {filename} to [**FAWE schematic center**](<{FAWE_UPLOAD_URL}>)"
    );
    if context == RenderContext::Extended {
        description.push_str(&format!(
            " (or [**BR schematic center**](<{ALTERNATE_UPLOAD_URL}>))\
             \n-# Use the BR schematic center if uploading to BR"
        ));
    }
    description.push_str(&format!(
        "\n - Change the outputted command to `{url_command}`\
         \n - Paste the command in game"
    ));

    let title = match context {
        RenderContext::Extended => format!("Schematic: {filename}"),
        RenderContext::Default => filename.to_string(),
    };
    let colour = match context {
        RenderContext::Extended => EXTENDED_ACCENT,
        RenderContext::Default => DEFAULT_ACCENT,
    };

    Embed {
        title,
        description,
        colour,
    }
}
