//! Request builder for a chart-rendering service's QR-code endpoint.
//!
//! # Overview
//! `QrRequestBuilder` collects the chart parameters (size, payload, output
//! encoding, error-correction level) and turns them into a request URL. The
//! URL can be handed to the caller as-is (`view`) or fetched over HTTP to get
//! the rendered image bytes back (`create`). The QR encoding itself happens on
//! the remote service.
//!
//! # Design
//! - URL assembly is the pure function `build_url` over `QrRequestConfig`.
//! - Network access goes through the `Transport` trait; `UreqTransport` is the
//!   default and tests plug in their own.
//! - The force-encode heuristic sits behind the `Transcoder` trait.
//! - Missing data or size is an error; an unknown error-correction level is
//!   silently ignored; a non-2xx reply is returned as a normal body.

pub mod builder;
pub mod error;
pub mod http;
pub mod transcode;
pub mod types;

pub use builder::{build_url, Dimension, QrRequestBuilder};
pub use error::{ConfigurationError, QrError, TransportError};
pub use http::{HttpResponse, Transport, UreqTransport};
pub use transcode::{detect_and_transcode, ShiftJisTranscoder, Transcoder};
pub use types::{
    ErrorCorrectionLevel, OutputEncoding, QrRequestConfig, API_URL, CHART_TYPE, CHLD_H, CHLD_L, CHLD_M, CHLD_Q,
    CHOE_ISO_8859_1, CHOE_SHIFT_JIS, CHOE_UTF8,
};
