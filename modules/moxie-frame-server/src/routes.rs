use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header, HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use moxie_frame::{CarriedState, FrameHandler, RequestContext};

// --- App State ---

pub struct AppState {
    pub handler: FrameHandler,
    /// Public origin the frame is served from; request URLs are rebuilt on it.
    pub public_url: String,
}

impl AppState {
    fn request_url(&self, uri: &Uri) -> String {
        let path = uri.path_and_query().map_or("/", |pq| pq.as_str());
        format!("{}{}", self.public_url.trim_end_matches('/'), path)
    }
}

// --- Frame action packet ---

/// Body of a frame button POST. Only the untrusted half is read; the signed
/// message is not verified.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePacket {
    #[serde(default)]
    pub untrusted_data: UntrustedData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    #[serde(default, deserialize_with = "lenient_fid")]
    pub fid: Option<u64>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub button_index: Option<u8>,
}

// Some clients send the fid as a string. Anything unreadable is no fid.
fn lenient_fid<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn parse_packet(body: &[u8]) -> FramePacket {
    if body.iter().all(u8::is_ascii_whitespace) {
        return FramePacket::default();
    }
    match serde_json::from_slice(body) {
        Ok(packet) => packet,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable frame packet");
            FramePacket::default()
        }
    }
}

// --- Router ---

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(frame_get).post(frame_post))
        .route("/frames", get(frame_get).post(frame_post))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Method + path only; the query carries fids
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

// --- Handlers ---

async fn frame_get(State(state): State<Arc<AppState>>, OriginalUri(uri): OriginalUri) -> Response {
    let ctx = RequestContext {
        message_fid: None,
        url: Some(state.request_url(&uri)),
        prior: None,
    };
    render(&state, &ctx).await
}

async fn frame_post(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Response {
    let packet = parse_packet(&body).untrusted_data;
    tracing::debug!(fid = ?packet.fid, button = ?packet.button_index, "Frame action");

    let ctx = RequestContext {
        message_fid: packet.fid,
        url: Some(state.request_url(&uri)),
        prior: CarriedState::decode_lenient(packet.state.as_deref()),
    };
    render(&state, &ctx).await
}

async fn render(state: &AppState, ctx: &RequestContext) -> Response {
    let frame = state.handler.handle(ctx).await;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        frame.to_html(),
    )
        .into_response()
}
