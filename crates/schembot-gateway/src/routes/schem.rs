//! The schematic-inspection command endpoint.
//!
//! Mirrors the chat command's flow: extension check before anything is
//! parsed, gzip/NBT parse, metadata extraction, then version and format
//! mapping into the rendered embed. Every file-level failure becomes an
//! ephemeral notice; nothing is retried.

use axum::extract::{Multipart, State};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::routing::post;
use axum::{Json, Router};
use schembot_core::{
    render_embed, resolve_data_version, RenderContext, SchematicFormat, SchematicMetadata,
};
use tracing::info;

use crate::error::AppError;
use crate::response::CommandResponse;
use crate::AppState;

/// Command routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/commands/schem", post(handle_schem))
}

/// Required filename suffix; anything else is rejected before parsing.
const SCHEM_EXTENSION: &str = ".schem";

/// Notice for uploads with the wrong extension.
const WRONG_EXTENSION_NOTICE: &str = "Upload a .schem";

/// Notice for uploads missing the required tags.
const MISSING_TAGS_NOTICE: &str = "missing nbt tags (Version/DataVersion)";

/// The uploaded attachment.
struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

/// Handle the schem command.
async fn handle_schem(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<CommandResponse>, AppError> {
    authorize(&state, &headers)?;

    let (upload, venue_id) = read_form(multipart, state.config.max_upload_bytes).await?;
    info!(filename = %upload.filename, venue = ?venue_id, "running schem command");

    if !upload.filename.ends_with(SCHEM_EXTENSION) {
        return Ok(Json(CommandResponse::message(WRONG_EXTENSION_NOTICE)));
    }

    Ok(Json(inspect(&upload, venue_id)))
}

/// Check the bearer token when one is configured.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = state.config.token.as_deref() else {
        return Ok(());
    };
    let supplied = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if supplied == Some(expected) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Collect the `file` part (with its filename) and the optional `venue_id`
/// part from the form.
async fn read_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<(Upload, Option<u64>), AppError> {
    let mut upload = None;
    let mut venue_id = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::BadRequest("file part has no filename".into()))?;
                let bytes = field.bytes().await?;
                if bytes.len() > max_upload_bytes {
                    return Err(AppError::BadRequest(format!(
                        "upload exceeds {max_upload_bytes} bytes"
                    )));
                }
                upload = Some(Upload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some("venue_id") => {
                let text = field.text().await?;
                let parsed = text
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| AppError::BadRequest(format!("invalid venue_id: {text}")))?;
                venue_id = Some(parsed);
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("missing file part".into()))?;
    Ok((upload, venue_id))
}

/// Parse the upload and render the reply. Infallible: every failure from
/// here on is a user-visible notice.
fn inspect(upload: &Upload, venue_id: Option<u64>) -> CommandResponse {
    info!(bytes = upload.bytes.len(), "read upload");

    let root = match schembot_nbt::parse_gzipped(&upload.bytes) {
        Ok(root) => root,
        Err(err) => return CommandResponse::message(format!("error in file: {err}")),
    };

    let metadata = match SchematicMetadata::from_tag(&root) {
        Ok(metadata) => metadata,
        Err(err) => {
            // Dump the parsed structure so the missing tags can be diagnosed.
            info!(error = %err, structure = ?root, "upload missing required tags");
            return CommandResponse::message(MISSING_TAGS_NOTICE);
        }
    };

    let format = SchematicFormat::from_schema_version(metadata.schema_version);
    let resolution = resolve_data_version(metadata.data_version);
    let context = RenderContext::from_venue_id(venue_id);

    CommandResponse::embed(render_embed(
        &upload.filename,
        format,
        resolution,
        context,
    ))
}
