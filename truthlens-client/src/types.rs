//! Wire types for analysis requests and backend responses.
//!
//! The backend is loosely typed, so every optional field decodes leniently:
//! a value of the wrong JSON type is treated as absent instead of failing the
//! whole response. Only a body that is not a JSON object is rejected, see
//! [`decode_object`].

use crate::error::TransportError;
use crate::upload::VideoUpload;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which kind of content is being analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Free text: articles, posts, transcripts.
    #[default]
    Text,
    /// An uploaded video file.
    Video,
}

impl AnalysisKind {
    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Video => "video",
        }
    }

    /// Parse a user-supplied kind name. Accepts a few common aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "news" => Some(Self::Text),
            "video" | "deepfake" => Some(Self::Video),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single analysis request. Exactly one variant is active.
#[derive(Debug, Clone)]
pub enum AnalysisRequest {
    /// Text to fact-check and score for AI authorship.
    Text {
        /// The submitted text, as typed.
        content: String,
    },
    /// Video to score for deepfake manipulation.
    Video {
        /// The file being uploaded.
        upload: VideoUpload,
    },
}

impl AnalysisRequest {
    /// Returns which kind of analysis this request asks for.
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::Text { .. } => AnalysisKind::Text,
            Self::Video { .. } => AnalysisKind::Video,
        }
    }
}

/// Backend classification of a single claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimVerdict {
    /// Evidence supports the claim.
    Supported,
    /// Evidence contradicts the claim.
    Refuted,
    /// Not enough evidence either way. Also used for unrecognised labels.
    #[default]
    Insufficient,
}

impl ClaimVerdict {
    /// Map a backend label onto a verdict, case-insensitively.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("SUPPORTED") {
            Self::Supported
        } else if label.eq_ignore_ascii_case("REFUTED") {
            Self::Refuted
        } else {
            Self::Insufficient
        }
    }
}

/// A source cited for a claim's verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    /// Link to the source.
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// One verifiable statement extracted from the submitted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// The statement itself.
    #[serde(default, deserialize_with = "lenient::string")]
    pub claim: String,
    #[serde(default, deserialize_with = "lenient::verdict")]
    pub verdict: ClaimVerdict,
    /// Backend confidence in the verdict, 0–100.
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient::objects", skip_serializing_if = "Vec::is_empty")]
    pub top_evidence: Vec<Evidence>,
}

/// Result of a text analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    /// Likelihood the text was machine-generated, 0–100.
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub ai_confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub ai_explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Vec::is_empty")]
    pub key_indicators: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub overall_assessment: Option<String>,
    #[serde(default, deserialize_with = "lenient::objects")]
    pub claims: Vec<Claim>,
    /// Free-form extra findings keyed by camelCase name, in backend order.
    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

/// Result of a video analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalysis {
    #[serde(default, deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub is_deepfake: Option<bool>,
    /// Model confidence, 0–100.
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

/// A backend response of either kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalysisResult {
    Text(TextAnalysis),
    Video(VideoAnalysis),
}

impl AnalysisResult {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::Text(_) => AnalysisKind::Text,
            Self::Video(_) => AnalysisKind::Video,
        }
    }

    pub fn as_text(&self) -> Option<&TextAnalysis> {
        match self {
            Self::Text(t) => Some(t),
            Self::Video(_) => None,
        }
    }

    pub fn as_video(&self) -> Option<&VideoAnalysis> {
        match self {
            Self::Video(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    /// Extra findings attached to either result kind.
    pub fn details(&self) -> &Map<String, Value> {
        match self {
            Self::Text(t) => &t.details,
            Self::Video(v) => &v.details,
        }
    }
}

impl From<TextAnalysis> for AnalysisResult {
    fn from(value: TextAnalysis) -> Self {
        Self::Text(value)
    }
}

impl From<VideoAnalysis> for AnalysisResult {
    fn from(value: VideoAnalysis) -> Self {
        Self::Video(value)
    }
}

/// Decode a response body that must be a JSON object.
///
/// # Errors
///
/// Returns [`TransportError::Decode`] if the body is not valid JSON or its
/// top level is not an object.
pub fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, TransportError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| TransportError::Decode(format!("invalid JSON: {e}")))?;
    if !value.is_object() {
        return Err(TransportError::Decode(
            "expected a JSON object at the top level".into(),
        ));
    }
    serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Field decoders that never fail on a wrong JSON type.
mod lenient {
    use super::{ClaimVerdict, Value};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Map;

    fn raw<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
        Option::<Value>::deserialize(d)
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(opt_string(d)?.unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match raw(d)? {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }

    pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(raw(d)?.and_then(|v| v.as_f64()).filter(|n| n.is_finite()))
    }

    pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(raw(d)?.and_then(|v| v.as_bool()))
    }

    pub fn verdict<'de, D: Deserializer<'de>>(d: D) -> Result<ClaimVerdict, D::Error> {
        Ok(opt_string(d)?
            .map(|s| ClaimVerdict::from_label(&s))
            .unwrap_or_default())
    }

    pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match raw(d)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Keep array elements that are objects and decode; skip the rest.
    pub fn objects<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match raw(d)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn map<'de, D: Deserializer<'de>>(d: D) -> Result<Map<String, Value>, D::Error> {
        Ok(match raw(d)? {
            Some(Value::Object(fields)) => fields,
            _ => Map::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_text_analysis() {
        let body = json!({
            "aiConfidence": 72.5,
            "aiExplanation": "Repetitive phrasing",
            "keyIndicators": ["uniform sentence length", "generic hedging"],
            "overallAssessment": "Mostly false",
            "claims": [{
                "claim": "The moon is made of cheese",
                "verdict": "REFUTED",
                "confidence": 97,
                "explanation": "Lunar samples are basalt",
                "topEvidence": [{"url": "https://nasa.gov/moon", "title": "Moon rocks", "snippet": "basaltic"}]
            }]
        });
        let parsed: TextAnalysis = decode_object(body.to_string().as_bytes()).expect("decode");
        assert_eq!(parsed.ai_confidence, Some(72.5));
        assert_eq!(parsed.key_indicators.len(), 2);
        assert_eq!(parsed.claims.len(), 1);
        let claim = &parsed.claims[0];
        assert_eq!(claim.verdict, ClaimVerdict::Refuted);
        assert_eq!(claim.confidence, Some(97.0));
        assert_eq!(claim.top_evidence[0].url, "https://nasa.gov/moon");
        assert_eq!(claim.top_evidence[0].title.as_deref(), Some("Moon rocks"));
    }

    #[test]
    fn wrong_types_become_absent() {
        let body = json!({
            "aiConfidence": "very high",
            "aiExplanation": 12,
            "keyIndicators": "not a list",
            "claims": {"oops": true},
            "details": ["x"]
        });
        let parsed: TextAnalysis = decode_object(body.to_string().as_bytes()).expect("decode");
        assert_eq!(parsed, TextAnalysis::default());
    }

    #[test]
    fn non_object_claims_are_skipped() {
        let body = json!({
            "claims": ["bare string", 3, {"claim": "kept", "verdict": "supported"}, null]
        });
        let parsed: TextAnalysis = decode_object(body.to_string().as_bytes()).expect("decode");
        assert_eq!(parsed.claims.len(), 1);
        assert_eq!(parsed.claims[0].claim, "kept");
        assert_eq!(parsed.claims[0].verdict, ClaimVerdict::Supported);
    }

    #[test]
    fn unknown_or_missing_verdict_is_insufficient() {
        assert_eq!(ClaimVerdict::from_label("NOT ENOUGH INFO"), ClaimVerdict::Insufficient);
        assert_eq!(ClaimVerdict::from_label(" refuted "), ClaimVerdict::Refuted);
        let body = json!({"claims": [{"claim": "a"}, {"claim": "b", "verdict": 7}]});
        let parsed: TextAnalysis = decode_object(body.to_string().as_bytes()).expect("decode");
        assert!(parsed
            .claims
            .iter()
            .all(|c| c.verdict == ClaimVerdict::Insufficient));
    }

    #[test]
    fn video_analysis_with_details() {
        let body = json!({
            "isDeepfake": true,
            "confidence": 88,
            "details": {"facialConsistency": "Inconsistent", "framesAnalyzed": 120}
        });
        let parsed: VideoAnalysis = decode_object(body.to_string().as_bytes()).expect("decode");
        assert_eq!(parsed.is_deepfake, Some(true));
        assert_eq!(parsed.confidence, Some(88.0));
        assert_eq!(parsed.details.len(), 2);
    }

    #[test]
    fn details_keep_backend_order() {
        let body = r#"{"details": {"facialConsistency": "Consistent", "audioSync": "Matched", "lighting": "Natural"}}"#;
        let parsed: VideoAnalysis = decode_object(body.as_bytes()).expect("decode");
        let keys: Vec<&str> = parsed.details.keys().map(String::as_str).collect();
        assert_eq!(keys, ["facialConsistency", "audioSync", "lighting"]);

        let reencoded = serde_json::to_string(&parsed).expect("serialize");
        let facial = reencoded.find("facialConsistency").expect("facial key");
        let audio = reencoded.find("audioSync").expect("audio key");
        assert!(facial < audio);
    }

    #[test]
    fn non_object_body_is_decode_error() {
        let err = decode_object::<TextAnalysis>(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
        let err = decode_object::<TextAnalysis>(b"<html>").unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn result_serializes_with_kind_tag() {
        let result = AnalysisResult::Video(VideoAnalysis {
            is_deepfake: Some(false),
            ..Default::default()
        });
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(value["kind"], "video");
        assert_eq!(value["isDeepfake"], false);
        assert!(value.get("confidence").is_none());
    }

    #[test]
    fn kind_parse_accepts_aliases() {
        assert_eq!(AnalysisKind::parse("News"), Some(AnalysisKind::Text));
        assert_eq!(AnalysisKind::parse("deepfake"), Some(AnalysisKind::Video));
        assert_eq!(AnalysisKind::parse("audio"), None);
        assert_eq!(AnalysisKind::default(), AnalysisKind::Text);
    }
}
