//! HTTP transport seam for fetching rendered charts.
//!
//! # Design
//! The builder never talks to the network directly. It hands a fully built
//! URL to a `Transport`, which returns the reply as plain data. `UreqTransport`
//! is the production implementation; tests substitute their own.
//!
//! Status codes are data, not errors: the agent is configured with
//! `http_status_as_error(false)` so a 404 page comes back as an
//! `HttpResponse` like any other. Only failures below HTTP (resolve, connect,
//! timeout, I/O) become a `TransportError`.

use std::io;
use std::time::Duration;

use crate::error::TransportError;

/// Numeric codes carried by `TransportError`. The values follow the libcurl
/// error numbering so they stay familiar in logs.
pub mod codes {
    pub const URL_MALFORMAT: i32 = 3;
    pub const COULDNT_RESOLVE_HOST: i32 = 6;
    pub const COULDNT_CONNECT: i32 = 7;
    pub const OPERATION_TIMEDOUT: i32 = 28;
    pub const TOO_MANY_REDIRECTS: i32 = 47;
    pub const RECV_ERROR: i32 = 56;
    pub const OTHER: i32 = -1;
}

/// An HTTP response described as plain data.
///
/// Headers are kept apart from `body`, which only ever holds the payload.
/// They are exposed for custom `Transport` implementations and for logging
/// the content type of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Value of the first `content-type` header, matched case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }
}

/// Executes a single GET. Implementations must not retry.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Agent with ureq's default timeouts.
    pub fn new() -> Self {
        Self::from_config(None)
    }

    /// Agent whose whole request (connect, send, receive) is bounded by `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_config(Some(timeout))
    }

    fn from_config(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut response = self.agent.get(url).call().map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_vec().map_err(map_ureq_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Translate a ureq failure into a `TransportError` with a stable code.
pub fn map_ureq_error(err: ureq::Error) -> TransportError {
    let code = match &err {
        ureq::Error::BadUri(_) | ureq::Error::Http(_) => codes::URL_MALFORMAT,
        ureq::Error::HostNotFound => codes::COULDNT_RESOLVE_HOST,
        ureq::Error::ConnectionFailed => codes::COULDNT_CONNECT,
        ureq::Error::Timeout(_) => codes::OPERATION_TIMEDOUT,
        ureq::Error::TooManyRedirects => codes::TOO_MANY_REDIRECTS,
        ureq::Error::Io(io_err) => io_error_code(io_err),
        _ => codes::OTHER,
    };
    TransportError::new(code, err.to_string())
}

fn io_error_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::AddrNotAvailable => codes::COULDNT_CONNECT,
        io::ErrorKind::TimedOut => codes::OPERATION_TIMEDOUT,
        _ => codes::RECV_ERROR,
    }
}
