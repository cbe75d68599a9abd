//! Verify URL building against JSON test vectors stored in `test-vectors/`.
//!
//! Each case lists the setter inputs and either the exact URL or the error
//! message the build must produce.

use qr_chart_core::QrRequestBuilder;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Vectors {
    base_url: String,
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    size: Option<(i64, i64)>,
    data: Option<String>,
    encoding: Option<String>,
    level: Option<String>,
    #[serde(default)]
    force_encode: bool,
    expected_url: Option<String>,
    expected_error: Option<String>,
}

impl Case {
    fn builder(&self, base_url: &str) -> QrRequestBuilder {
        let mut b = QrRequestBuilder::new().with_base_url(base_url);
        if let Some((w, h)) = self.size {
            b.set_size(w, h);
        }
        if let Some(data) = &self.data {
            b.set_data(data);
        }
        if let Some(encoding) = &self.encoding {
            b.set_output_encoding(encoding.as_str());
        }
        b.set_error_correction_level(self.level.as_deref());
        b.set_force_encode(self.force_encode);
        b
    }
}

fn load() -> Vectors {
    let raw = include_str!("../../test-vectors/urls.json");
    serde_json::from_str(raw).unwrap()
}

#[test]
fn url_test_vectors() {
    let vectors = load();
    assert!(!vectors.cases.is_empty());

    for case in &vectors.cases {
        let name = &case.name;
        let result = case.builder(&vectors.base_url).view();

        match (&case.expected_url, &case.expected_error) {
            (Some(url), None) => assert_eq!(result.as_ref().unwrap(), url, "{name}: url"),
            (None, Some(message)) => {
                assert_eq!(result.unwrap_err().to_string(), *message, "{name}: error")
            }
            _ => panic!("{name}: vector needs exactly one of expected_url / expected_error"),
        }
    }
}

#[test]
fn url_test_vectors_are_stable_across_builds() {
    let vectors = load();
    for case in vectors.cases.iter().filter(|c| c.expected_url.is_some()) {
        let mut b = case.builder(&vectors.base_url);
        let first = b.view().unwrap();
        let second = b.view().unwrap();
        assert_eq!(first, second, "{}: second build differs", case.name);
    }
}
