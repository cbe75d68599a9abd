//! Force-encode heuristic: detect UTF-8 payloads and re-encode them.
//!
//! Encoding detection is guesswork. Only text that is not plain ASCII counts
//! as UTF-8 here; pure ASCII is left alone. The transform URL-encodes first and
//! then transcodes to Shift-JIS, so the output is always ASCII bytes.

use url::form_urlencoded;

/// Narrow seam for the force-encode step so it can be swapped in tests.
pub trait Transcoder: Send + Sync {
    /// Returns `None` when `text` is not detected as UTF-8 and should be kept.
    fn detect_and_transcode(&self, text: &str) -> Option<Vec<u8>>;
}

/// URL-encode, then transcode to Shift-JIS.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftJisTranscoder;

impl Transcoder for ShiftJisTranscoder {
    fn detect_and_transcode(&self, text: &str) -> Option<Vec<u8>> {
        if !is_detected_utf8(text) {
            return None;
        }
        let escaped = url_encode(text);
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(&escaped);
        Some(bytes.into_owned())
    }
}

/// Apply the default `ShiftJisTranscoder`.
pub fn detect_and_transcode(text: &str) -> Option<Vec<u8>> {
    ShiftJisTranscoder.detect_and_transcode(text)
}

/// Form-style escaping that keeps only alphanumerics and `-_.`, with `+` for
/// space. `byte_serialize` also keeps `*`, so that one is escaped afterwards.
fn url_encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

fn is_detected_utf8(text: &str) -> bool {
    !text.is_ascii()
}
