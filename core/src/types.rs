//! Constants, enumerations, and the configuration struct for chart requests.
//!
//! # Design
//! The chart service takes its parameters as short query keys (`chs`, `cht`,
//! `chl`, `choe`, `chld`). The string constants mirror the values the service
//! understands; the enums give callers a typed way to pick one. The config
//! keeps output encoding as a free-form `String` because the service accepts
//! values outside the known set and the builder passes them through verbatim.

use std::fmt;

/// Base URL of the chart-rendering service.
pub const API_URL: &str = "http://chart.apis.google.com";

/// Chart type literal for QR codes (`cht`).
pub const CHART_TYPE: &str = "qr";

pub const CHOE_UTF8: &str = "UTF-8";
pub const CHOE_SHIFT_JIS: &str = "Shift-JIS";
pub const CHOE_ISO_8859_1: &str = "ISO-8859-1";

pub const CHLD_L: &str = "L";
pub const CHLD_M: &str = "M";
pub const CHLD_Q: &str = "Q";
pub const CHLD_H: &str = "H";

/// Output encodings the service documents for the `choe` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputEncoding {
    #[default]
    Utf8,
    ShiftJis,
    Iso8859_1,
}

impl OutputEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputEncoding::Utf8 => CHOE_UTF8,
            OutputEncoding::ShiftJis => CHOE_SHIFT_JIS,
            OutputEncoding::Iso8859_1 => CHOE_ISO_8859_1,
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OutputEncoding> for String {
    fn from(encoding: OutputEncoding) -> Self {
        encoding.as_str().to_string()
    }
}

/// QR error-correction level (`chld`), lowest to highest redundancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCorrectionLevel {
    L,
    M,
    Q,
    H,
}

impl ErrorCorrectionLevel {
    pub const ALL: [ErrorCorrectionLevel; 4] = [
        ErrorCorrectionLevel::L,
        ErrorCorrectionLevel::M,
        ErrorCorrectionLevel::Q,
        ErrorCorrectionLevel::H,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCorrectionLevel::L => CHLD_L,
            ErrorCorrectionLevel::M => CHLD_M,
            ErrorCorrectionLevel::Q => CHLD_Q,
            ErrorCorrectionLevel::H => CHLD_H,
        }
    }

    /// Look up a level by its exact single-letter code. Matching is
    /// case-sensitive; anything else yields `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            CHLD_L => Some(ErrorCorrectionLevel::L),
            CHLD_M => Some(ErrorCorrectionLevel::M),
            CHLD_Q => Some(ErrorCorrectionLevel::Q),
            CHLD_H => Some(ErrorCorrectionLevel::H),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to build one chart request URL.
///
/// `width` and `height` are `None` until a size is set. Only
/// `QrRequestBuilder::with_size` treats a zero dimension as unset; a zero
/// stored through a setter is emitted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrRequestConfig {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub data: String,
    pub output_encoding: Option<String>,
    pub error_correction_level: Option<ErrorCorrectionLevel>,
    pub force_encode: bool,
}

impl QrRequestConfig {
    /// Chart type is fixed; exposed for symmetry with the other fields.
    pub fn chart(&self) -> &'static str {
        CHART_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_correction_codes_roundtrip() {
        for level in ErrorCorrectionLevel::ALL {
            assert_eq!(ErrorCorrectionLevel::from_code(level.as_str()), Some(level));
        }
    }

    #[test]
    fn error_correction_rejects_unknown_codes() {
        assert_eq!(ErrorCorrectionLevel::from_code("X"), None);
        assert_eq!(ErrorCorrectionLevel::from_code("l"), None);
        assert_eq!(ErrorCorrectionLevel::from_code(""), None);
        assert_eq!(ErrorCorrectionLevel::from_code("LM"), None);
    }

    #[test]
    fn output_encoding_strings() {
        assert_eq!(OutputEncoding::Utf8.as_str(), "UTF-8");
        assert_eq!(OutputEncoding::ShiftJis.to_string(), "Shift-JIS");
        assert_eq!(String::from(OutputEncoding::Iso8859_1), "ISO-8859-1");
        assert_eq!(OutputEncoding::default(), OutputEncoding::Utf8);
    }

    #[test]
    fn default_config_is_empty() {
        let config = QrRequestConfig::default();
        assert_eq!(config.chart(), "qr");
        assert!(config.width.is_none());
        assert!(config.data.is_empty());
        assert!(config.output_encoding.is_none());
        assert!(config.error_correction_level.is_none());
        assert!(!config.force_encode);
    }
}
