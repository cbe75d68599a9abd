//! Configure-then-act builder for chart-service QR requests.
//!
//! # Design
//! `QrRequestBuilder` owns a `QrRequestConfig` and exposes setters that can be
//! called in any order, any number of times. URL assembly lives in the pure
//! function `build_url`; the builder only adds the force-encode step in front
//! of it, which is the one place a build may rewrite stored state.
//!
//! Setters are deliberately loose. Sizes are coerced through `Dimension`, the
//! output encoding is stored verbatim, and an unknown error-correction level is
//! dropped without complaint. Missing data or size is the only thing that
//! fails a build.

use std::fmt;

use crate::error::{ConfigurationError, QrError};
use crate::http::{Transport, UreqTransport};
use crate::transcode::{ShiftJisTranscoder, Transcoder};
use crate::types::{ErrorCorrectionLevel, QrRequestConfig, API_URL, CHART_TYPE, CHOE_SHIFT_JIS, CHOE_UTF8};

/// Loose numeric coercion for image dimensions.
///
/// Integers convert directly, floats truncate toward zero, and strings use
/// their leading integer (`"300px"` is 300, `"abc"` is 0).
pub trait Dimension {
    fn to_dimension(self) -> i64;
}

macro_rules! impl_dimension_int {
    ($($t:ty),*) => {
        $(impl Dimension for $t {
            fn to_dimension(self) -> i64 {
                self as i64
            }
        })*
    };
}

impl_dimension_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Dimension for f32 {
    fn to_dimension(self) -> i64 {
        (self as f64).to_dimension()
    }
}

impl Dimension for f64 {
    fn to_dimension(self) -> i64 {
        // `as` saturates and maps NaN to 0.
        self.trunc() as i64
    }
}

impl Dimension for &str {
    fn to_dimension(self) -> i64 {
        let s = self.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit);
        let magnitude = digits.fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
        if negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Dimension for String {
    fn to_dimension(self) -> i64 {
        self.as_str().to_dimension()
    }
}

impl Dimension for &String {
    fn to_dimension(self) -> i64 {
        self.as_str().to_dimension()
    }
}

/// Validate `config` and format the request URL against `base_url`.
///
/// Data is checked before size. `chl` is emitted as-is; an unset height,
/// `choe` or `chld` appears as an empty value.
pub fn build_url(base_url: &str, config: &QrRequestConfig) -> Result<String, ConfigurationError> {
    if config.data.is_empty() {
        return Err(ConfigurationError::DataRequired);
    }
    let width = config.width.ok_or(ConfigurationError::SizeRequired)?;
    let height = config.height.map(|h| h.to_string()).unwrap_or_default();

    let encoding = config.output_encoding.as_deref().unwrap_or("");
    let level = config.error_correction_level.map(|l| l.as_str()).unwrap_or("");

    Ok(format!(
        "{base_url}/chart?chs={width}x{height}&cht={CHART_TYPE}&chl={data}&choe={encoding}&chld={level}",
        data = config.data,
    ))
}

/// Builds chart-service URLs for QR codes and optionally fetches the image.
pub struct QrRequestBuilder {
    base_url: String,
    config: QrRequestConfig,
    transport: Box<dyn Transport>,
    transcoder: Box<dyn Transcoder>,
}

impl QrRequestBuilder {
    pub fn new() -> Self {
        Self {
            base_url: API_URL.to_string(),
            config: QrRequestConfig::default(),
            transport: Box::new(UreqTransport::new()),
            transcoder: Box::new(ShiftJisTranscoder),
        }
    }

    /// Builder pre-seeded with a size. A zero dimension counts as "not
    /// provided" and leaves the size unset.
    pub fn with_size(width: impl Dimension, height: impl Dimension) -> Self {
        let mut builder = Self::new();
        let (width, height) = (width.to_dimension(), height.to_dimension());
        if width != 0 && height != 0 {
            builder.set_size(width, height);
        }
        builder
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    pub fn with_transcoder(mut self, transcoder: impl Transcoder + 'static) -> Self {
        self.transcoder = Box::new(transcoder);
        self
    }

    pub fn config(&self) -> &QrRequestConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_size(&mut self, width: impl Dimension, height: impl Dimension) {
        self.set_width(width);
        self.set_height(height);
    }

    pub fn set_width(&mut self, width: impl Dimension) {
        self.config.width = Some(width.to_dimension());
    }

    pub fn set_height(&mut self, height: impl Dimension) {
        self.config.height = Some(height.to_dimension());
    }

    pub fn set_data(&mut self, data: impl ToString) {
        self.config.data = data.to_string();
    }

    /// Stored verbatim; values outside the known encodings are passed through.
    pub fn set_output_encoding(&mut self, encoding: impl Into<String>) {
        self.config.output_encoding = Some(encoding.into());
    }

    pub fn set_default_output_encoding(&mut self) {
        self.set_output_encoding(CHOE_UTF8);
    }

    /// Accepts `L`, `M`, `Q` or `H`. Any other input, `None` included, keeps
    /// the current level.
    pub fn set_error_correction_level<'a>(&mut self, level: impl Into<Option<&'a str>>) {
        match level.into().and_then(ErrorCorrectionLevel::from_code) {
            Some(level) => self.config.error_correction_level = Some(level),
            None => tracing::trace!("ignoring unrecognized error correction level"),
        }
    }

    pub fn set_error_correction(&mut self, level: ErrorCorrectionLevel) {
        self.config.error_correction_level = Some(level);
    }

    pub fn set_force_encode(&mut self, force: bool) {
        self.config.force_encode = force;
    }

    /// Build the request URL from the current configuration.
    pub fn view(&mut self) -> Result<String, QrError> {
        Ok(self.build()?)
    }

    /// Set `data` (when non-empty) and build the request URL.
    pub fn view_with(&mut self, data: impl ToString) -> Result<String, QrError> {
        self.set_data_if_present(data);
        self.view()
    }

    /// Build the URL and GET it, returning the raw response body.
    ///
    /// The status code and content type are not checked; whatever body the
    /// service sends back is returned.
    pub fn create(&mut self) -> Result<Vec<u8>, QrError> {
        let url = self.build()?;

        tracing::info!(url = %url, "requesting chart");
        let response = self.transport.get(&url).map_err(|err| {
            tracing::warn!(code = err.code, error = %err.message, "chart request failed");
            err
        })?;
        tracing::info!(
            status = response.status,
            content_type = response.content_type().unwrap_or(""),
            bytes = response.body.len(),
            "chart response received"
        );

        Ok(response.body)
    }

    /// Set `data` (when non-empty), then behave like `create`.
    pub fn create_with(&mut self, data: impl ToString) -> Result<Vec<u8>, QrError> {
        self.set_data_if_present(data);
        self.create()
    }

    fn set_data_if_present(&mut self, data: impl ToString) {
        let data = data.to_string();
        if !data.is_empty() {
            self.config.data = data;
        }
    }

    fn build(&mut self) -> Result<String, ConfigurationError> {
        if self.config.data.is_empty() {
            return Err(ConfigurationError::DataRequired);
        }
        if self.config.force_encode {
            self.apply_force_encode();
        }
        let url = build_url(&self.base_url, &self.config)?;
        tracing::debug!(url = %url, "built chart url");
        Ok(url)
    }

    fn apply_force_encode(&mut self) {
        if let Some(bytes) = self.transcoder.detect_and_transcode(&self.config.data) {
            self.config.data = String::from_utf8_lossy(&bytes).into_owned();
            self.config.output_encoding = Some(CHOE_SHIFT_JIS.to_string());
        }
    }
}

impl Default for QrRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QrRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QrRequestBuilder")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
