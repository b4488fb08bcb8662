//! End-to-end tests for the schem command endpoint.

use std::io::Write;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use flate2::write::GzEncoder;
use flate2::Compression;
use schembot_gateway::{create_router, AppState, GatewayConfig};
use tower::ServiceExt;

const BOUNDARY: &str = "schembot-test-boundary";

/// Venue that receives the extended template.
const EXTENDED_VENUE: u64 = 256198526248157186;

fn router(token: Option<&str>) -> Router {
    let config = GatewayConfig {
        token: token.map(str::to_string),
        ..GatewayConfig::default()
    };
    create_router(AppState::new(config))
}

/// Append a named tag header: id byte, u16 name length, name bytes.
fn push_header(out: &mut Vec<u8>, id: u8, name: &str) {
    out.push(id);
    out.extend_from_slice(&(name.len() as u16).to_be_bytes());
    out.extend_from_slice(name.as_bytes());
}

fn push_int(out: &mut Vec<u8>, name: &str, value: i32) {
    push_header(out, 3, name);
    out.extend_from_slice(&value.to_be_bytes());
}

/// A gzipped schematic with the v3 envelope layout:
/// `{ Schematic: { Version, DataVersion } }`.
fn nested_schematic(version: Option<i32>, data_version: Option<i32>) -> Vec<u8> {
    let mut out = Vec::new();
    push_header(&mut out, 10, "");
    push_header(&mut out, 10, "Schematic");
    if let Some(version) = version {
        push_int(&mut out, "Version", version);
    }
    if let Some(data_version) = data_version {
        push_int(&mut out, "DataVersion", data_version);
    }
    out.push(0);
    out.push(0);

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&out).unwrap();
    encoder.finish().unwrap()
}

fn multipart_body(file: Option<(&str, &[u8])>, venue_id: Option<u64>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(venue_id) = venue_id {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"venue_id\"\r\n\r\n\
                 {venue_id}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn schem_request(body: Vec<u8>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/commands/schem")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

async fn response_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_well_formed_schematic_renders_embed() {
    let file = nested_schematic(Some(2), Some(3465));
    let body = multipart_body(Some(("build.schem", &file)), None);
    let response = router(None)
        .oneshot(schem_request(body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["ephemeral"], true);
    assert!(json.get("message").is_none());

    let embed = &json["embed"];
    assert_eq!(embed["title"], "build.schem");
    assert_eq!(embed["colour"], 0x1A6B52);

    let description = embed["description"].as_str().unwrap();
    assert!(description.contains("> schem.2"));
    assert!(description.contains("> 1.20.1"));
    // The filename is interpolated into all three load-method sections.
    assert_eq!(description.matches("build.schem").count(), 4);
    assert!(description.contains("//schem load build.schem sponge.2"));
}

#[tokio::test]
async fn test_extended_venue_gets_extended_template() {
    let file = nested_schematic(Some(3), Some(3953));
    let body = multipart_body(Some(("castle.schem", &file)), Some(EXTENDED_VENUE));
    let response = router(None)
        .oneshot(schem_request(body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let embed = &json["embed"];
    assert_eq!(embed["title"], "Schematic: castle.schem");
    assert_eq!(embed["colour"], 0xFF5733);
    let description = embed["description"].as_str().unwrap();
    assert!(description.contains("BR schematic center"));
    assert!(description.contains("> schem.3"));
    assert!(description.contains("> 1.21"));
}

#[tokio::test]
async fn test_other_venue_gets_default_template() {
    let file = nested_schematic(Some(2), Some(3465));
    let body = multipart_body(Some(("build.schem", &file)), Some(42));
    let response = router(None)
        .oneshot(schem_request(body, None))
        .await
        .unwrap();

    let json = response_json(response).await;
    assert_eq!(json["embed"]["colour"], 0x1A6B52);
}

#[tokio::test]
async fn test_wrong_extension_rejected_without_parsing() {
    // The payload is not valid NBT; the notice proves no parse was attempted.
    let body = multipart_body(Some(("build.txt", b"not a schematic")), None);
    let response = router(None)
        .oneshot(schem_request(body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["ephemeral"], true);
    assert_eq!(json["message"], "Upload a .schem");
    assert!(json.get("embed").is_none());
}

#[tokio::test]
async fn test_missing_data_version_notice() {
    let file = nested_schematic(Some(2), None);
    let body = multipart_body(Some(("build.schem", &file)), None);
    let response = router(None)
        .oneshot(schem_request(body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["message"], "missing nbt tags (Version/DataVersion)");
}

#[tokio::test]
async fn test_corrupt_file_notice() {
    let body = multipart_body(Some(("build.schem", b"definitely not gzip")), None);
    let response = router(None)
        .oneshot(schem_request(body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("error in file: "));
}

#[tokio::test]
async fn test_unmapped_data_version_keeps_raw_value() {
    let file = nested_schematic(Some(2), Some(4000));
    let body = multipart_body(Some(("build.schem", &file)), None);
    let response = router(None)
        .oneshot(schem_request(body, None))
        .await
        .unwrap();

    let json = response_json(response).await;
    let description = json["embed"]["description"].as_str().unwrap();
    assert!(description.contains("data version: 4000"));
}

#[tokio::test]
async fn test_missing_file_part_is_bad_request() {
    let body = multipart_body(None, Some(42));
    let response = router(None)
        .oneshot(schem_request(body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_token_required_when_configured() {
    let file = nested_schematic(Some(2), Some(3465));

    let body = multipart_body(Some(("build.schem", &file)), None);
    let response = router(Some("sekrit"))
        .oneshot(schem_request(body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = multipart_body(Some(("build.schem", &file)), None);
    let response = router(Some("sekrit"))
        .oneshot(schem_request(body, Some("wrong")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = multipart_body(Some(("build.schem", &file)), None);
    let response = router(Some("sekrit"))
        .oneshot(schem_request(body, Some("sekrit")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let response = router(None)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}
