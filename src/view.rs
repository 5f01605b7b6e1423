//! Display-ready summary of an analysis result.

use crate::details::{detail_entries, DetailEntry};
use crate::verdict::{
    ai_verdict_from_text, credibility_from_claims, deepfake_verdict_from_video, ClaimTally,
    Verdict,
};
use serde::Serialize;
use truthlens_client::{AnalysisKind, AnalysisResult};

/// Verdicts derived from one result, ready for a renderer.
///
/// Text results fill `credibility`, `ai_authorship` and `claims`; video
/// results fill `deepfake`. Detail entries come from either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub kind: AnalysisKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_authorship: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deepfake: Option<Verdict>,
    pub claims: ClaimTally,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<DetailEntry>,
}

impl ResultView {
    pub fn derive(result: &AnalysisResult) -> Self {
        let details = detail_entries(result.details());
        match result {
            AnalysisResult::Text(text) => Self {
                kind: AnalysisKind::Text,
                credibility: Some(credibility_from_claims(&text.claims)),
                ai_authorship: Some(ai_verdict_from_text(text)),
                deepfake: None,
                claims: ClaimTally::from_claims(&text.claims),
                details,
            },
            AnalysisResult::Video(video) => Self {
                kind: AnalysisKind::Video,
                credibility: None,
                ai_authorship: None,
                deepfake: Some(deepfake_verdict_from_video(video)),
                claims: ClaimTally::default(),
                details,
            },
        }
    }
}
