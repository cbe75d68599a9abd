//! Local stand-in for the chart-rendering service.
//!
//! Serves `GET /chart` the way the real service does for QR charts: a PNG body
//! for well-formed requests, a plain-text 400 otherwise. A router can also be
//! built with a canned reply that is returned for every request, which is how
//! tests exercise error pages. Every raw query string is recorded.

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// PNG signature plus four zero bytes. Enough for clients that only check
/// the magic bytes.
pub const PNG_BODY: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x00];

/// Fixed response returned by `app_with` for every `/chart` request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockReply {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Raw query strings seen by `/chart`, oldest first.
pub type Recorder = Arc<RwLock<Vec<String>>>;

#[derive(Clone)]
struct AppState {
    recorder: Recorder,
    reply: Option<MockReply>,
}

pub fn app() -> Router {
    app_recording().0
}

pub fn app_recording() -> (Router, Recorder) {
    let recorder = Recorder::default();
    (router(recorder.clone(), None), recorder)
}

pub fn app_with(reply: MockReply) -> (Router, Recorder) {
    let recorder = Recorder::default();
    (router(recorder.clone(), Some(reply)), recorder)
}

fn router(recorder: Recorder, reply: Option<MockReply>) -> Router {
    Router::new()
        .route("/chart", get(chart))
        .with_state(AppState { recorder, reply })
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_router(listener, app()).await
}

pub async fn run_router(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn chart(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let query = query.unwrap_or_default();
    tracing::info!(query = %query, "chart request");
    state.recorder.write().await.push(query.clone());

    if let Some(reply) = &state.reply {
        let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, [(header::CONTENT_TYPE, reply.content_type.clone())], reply.body.clone()).into_response();
    }

    if !is_valid_qr_query(&query) {
        return (StatusCode::BAD_REQUEST, "invalid chart parameters").into_response();
    }
    ([(header::CONTENT_TYPE, "image/png")], PNG_BODY).into_response()
}

/// First value for `key` in a raw query string, undecoded.
pub fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

fn is_valid_qr_query(query: &str) -> bool {
    let size_ok = query_param(query, "chs")
        .and_then(|chs| chs.split_once('x'))
        .is_some_and(|(w, h)| is_number(w) && is_number(h));
    size_ok && query_param(query, "cht") == Some("qr") && query_param(query, "chl").is_some_and(|d| !d.is_empty())
}

fn is_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_finds_first_value() {
        let q = "chs=150x150&cht=qr&chl=hello&choe=&chld=";
        assert_eq!(query_param(q, "chs"), Some("150x150"));
        assert_eq!(query_param(q, "choe"), Some(""));
        assert_eq!(query_param(q, "missing"), None);
    }

    #[test]
    fn valid_query_is_accepted() {
        assert!(is_valid_qr_query("chs=150x150&cht=qr&chl=hello&choe=&chld="));
        assert!(is_valid_qr_query("chs=0x0&cht=qr&chl=x"));
    }

    #[test]
    fn wrong_chart_type_is_rejected() {
        assert!(!is_valid_qr_query("chs=150x150&cht=bar&chl=hello"));
    }

    #[test]
    fn malformed_size_is_rejected() {
        assert!(!is_valid_qr_query("chs=150&cht=qr&chl=hello"));
        assert!(!is_valid_qr_query("chs=axb&cht=qr&chl=hello"));
        assert!(!is_valid_qr_query("cht=qr&chl=hello"));
    }

    #[test]
    fn empty_data_is_rejected() {
        assert!(!is_valid_qr_query("chs=1x1&cht=qr&chl="));
    }

    #[test]
    fn mock_reply_roundtrips_through_json() {
        let reply = MockReply {
            status: 404,
            content_type: "text/html".to_string(),
            body: b"gone".to_vec(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        let back: MockReply = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reply);
    }
}
