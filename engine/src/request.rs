use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter};

use crate::error::GenerationError;

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    #[strum(to_string = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    #[strum(to_string = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    #[strum(to_string = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    #[strum(to_string = "3:4")]
    Portrait,
    #[serde(rename = "9:16")]
    #[strum(to_string = "9:16")]
    Tall,
}

/// Body of a `POST /generate-image` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestSpec {
    pub prompt: String,
    pub count: u32,
    /// Photorealistic mode, the service skips its stylization pass
    pub raw: bool,
    pub size: AspectRatio,
}

impl RequestSpec {
    pub fn photoreal(prompt: impl Into<String>, size: AspectRatio) -> Self {
        Self {
            prompt: prompt.into(),
            count: 1,
            raw: true,
            size,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    /// `Some` whenever the key is present, `null` included
    #[serde(default, deserialize_with = "present")]
    pub error: Option<Value>,
    /// Only the first entry is ever looked at, the rest stay untyped
    #[serde(default)]
    pub images: Vec<Value>,
}

fn present<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(de).map(Some)
}

impl GenerateResponse {
    /// Picks the base64 payload to decode. An error field wins over any images.
    pub fn interpret(self) -> Result<String, GenerationError> {
        if let Some(error) = self.error {
            let text = match error {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return Err(GenerationError::Service(text));
        }
        let first = self
            .images
            .into_iter()
            .next()
            .ok_or(GenerationError::NoImages)?;
        match first.get("b64_json") {
            Some(Value::String(b64)) => Ok(b64.clone()),
            _ => Err(GenerationError::MissingPayload),
        }
    }
}

#[cfg(test)]
mod test {
    use expect_test::expect;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn request_serialization() {
        let body = RequestSpec::photoreal("A studio at dusk", AspectRatio::Standard);
        let expect = expect![[r#"{"prompt":"A studio at dusk","count":1,"raw":true,"size":"4:3"}"#]];
        expect.assert_eq(&serde_json::to_string(&body).unwrap());
    }

    #[test]
    fn display_matches_wire_format() {
        for aspect in AspectRatio::iter() {
            let wire = serde_json::to_value(aspect).unwrap();
            assert_eq!(wire.as_str().unwrap(), aspect.to_string());
        }
    }

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn error_takes_priority_over_images() {
        let resp = parse(r#"{"error":"quota exceeded","images":[{"b64_json":"AAAA"}]}"#);
        let err = resp.interpret().unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: quota exceeded");
    }

    #[test]
    fn non_string_error_is_rendered_as_json() {
        let resp = parse(r#"{"error":{"code":503}}"#);
        let err = resp.interpret().unwrap_err();
        assert_eq!(err.to_string(), r#"Generation failed: {"code":503}"#);
    }

    #[test]
    fn first_image_is_used() {
        let resp = parse(r#"{"images":[{"b64_json":"Zmlyc3Q="},{"b64_json":"c2Vjb25k"}]}"#);
        assert_eq!(resp.interpret().unwrap(), "Zmlyc3Q=");
    }

    #[test]
    fn entries_after_the_first_are_not_checked() {
        let resp = parse(r#"{"images":[{"b64_json":"AAAA"},{"url":"http://x"}]}"#);
        assert_eq!(resp.interpret().unwrap(), "AAAA");
    }

    #[test]
    fn first_entry_without_payload_is_a_fault() {
        for json in [r#"{"images":[{"url":"http://x"}]}"#, r#"{"images":[{"b64_json":7}]}"#] {
            let err = parse(json).interpret().unwrap_err();
            assert!(matches!(err, GenerationError::MissingPayload), "{json}");
            assert_eq!(err.kind(), FailureKind::Fault);
        }
    }

    #[test]
    fn null_error_still_counts_as_an_error() {
        let resp = parse(r#"{"error":null,"images":[{"b64_json":"AAAA"}]}"#);
        let err = resp.interpret().unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: null");
    }

    #[test]
    fn empty_envelope_has_no_images() {
        for json in ["{}", r#"{"images":[]}"#] {
            let err = parse(json).interpret().unwrap_err();
            assert!(matches!(err, GenerationError::NoImages), "{json}");
            assert_eq!(err.to_string(), "No images in response");
        }
    }
}
