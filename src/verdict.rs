//! Verdict derivation: raw backend output to display labels.
//!
//! Every function here is pure and total. Missing or malformed input falls
//! through to a neutral "none/unknown" verdict instead of failing.

use serde::Serialize;
use std::fmt;
use truthlens_client::{AnalysisResult, Claim, ClaimVerdict, TextAnalysis, VideoAnalysis};

/// Display severity of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Danger,
    Warn,
    Good,
    Neutral,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warn => "warn",
            Self::Good => "good",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A human-facing verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub label: &'static str,
    pub tone: Tone,
    /// Supporting line such as `"2/3 claims refuted"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Verdict {
    fn new(label: &'static str, tone: Tone) -> Self {
        Self {
            label,
            tone,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

pub const NO_CLAIMS: &str = "No Claims Analyzed";
pub const LIKELY_MISINFORMATION: &str = "Likely Contains Misinformation";
pub const MIXED_CREDIBILITY: &str = "Mixed Credibility - Verify Claims";
pub const APPEARS_CREDIBLE: &str = "Content Appears Credible";
pub const INSUFFICIENT_EVIDENCE: &str = "Insufficient Evidence";

pub const UNKNOWN: &str = "Unknown";
pub const LIKELY_AI: &str = "Likely AI-Generated";
pub const POSSIBLY_AI: &str = "Possibly AI-Assisted";
pub const LIKELY_HUMAN: &str = "Likely Human-Written";

pub const DEEPFAKE_DETECTED: &str = "Deepfake Detected";
pub const VIDEO_AUTHENTIC: &str = "Video Appears Authentic";

/// AI confidence at or above this is "likely AI".
const AI_LIKELY_THRESHOLD: f64 = 70.0;
/// AI confidence at or above this (and below the upper threshold) is "possibly AI".
const AI_POSSIBLE_THRESHOLD: f64 = 40.0;

/// Per-verdict claim counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClaimTally {
    pub supported: usize,
    pub refuted: usize,
    pub insufficient: usize,
}

impl ClaimTally {
    pub fn from_claims(claims: &[Claim]) -> Self {
        claims.iter().fold(Self::default(), |mut tally, claim| {
            match claim.verdict {
                ClaimVerdict::Supported => tally.supported += 1,
                ClaimVerdict::Refuted => tally.refuted += 1,
                ClaimVerdict::Insufficient => tally.insufficient += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.supported + self.refuted + self.insufficient
    }

    /// `refuted / total >= 0.5`, computed without floating point.
    fn refuted_at_least_half(&self) -> bool {
        self.refuted * 2 >= self.total()
    }

    /// `supported / total >= 0.8`, computed without floating point.
    fn supported_at_least_four_fifths(&self) -> bool {
        self.supported * 5 >= self.total() * 4
    }
}

/// Credibility verdict for a result. Video results have no claims.
pub fn credibility_verdict(result: &AnalysisResult) -> Verdict {
    match result {
        AnalysisResult::Text(text) => credibility_from_claims(&text.claims),
        AnalysisResult::Video(_) => Verdict::new(NO_CLAIMS, Tone::Neutral),
    }
}

/// Credibility verdict from a claims list.
///
/// Refuted share is checked before supported share, so any refuted claim
/// keeps the content out of the "credible" bucket.
pub fn credibility_from_claims(claims: &[Claim]) -> Verdict {
    let tally = ClaimTally::from_claims(claims);
    let total = tally.total();
    if total == 0 {
        return Verdict::new(NO_CLAIMS, Tone::Neutral);
    }

    if tally.refuted_at_least_half() {
        Verdict::new(LIKELY_MISINFORMATION, Tone::Danger)
            .with_detail(format!("{}/{total} claims refuted", tally.refuted))
    } else if tally.refuted > 0 {
        Verdict::new(MIXED_CREDIBILITY, Tone::Warn).with_detail(format!(
            "{} refuted, {} supported, {} insufficient",
            tally.refuted, tally.supported, tally.insufficient
        ))
    } else if tally.supported_at_least_four_fifths() {
        Verdict::new(APPEARS_CREDIBLE, Tone::Good)
            .with_detail(format!("{}/{total} claims supported", tally.supported))
    } else {
        Verdict::new(INSUFFICIENT_EVIDENCE, Tone::Warn)
            .with_detail("Unable to verify most claims".to_owned())
    }
}

/// AI-authorship verdict for a result. Video results are "Unknown".
pub fn ai_verdict(result: &AnalysisResult) -> Verdict {
    match result {
        AnalysisResult::Text(text) => ai_verdict_from_text(text),
        AnalysisResult::Video(_) => Verdict::new(UNKNOWN, Tone::Neutral),
    }
}

pub fn ai_verdict_from_text(text: &TextAnalysis) -> Verdict {
    ai_verdict_from_confidence(text.ai_confidence)
}

/// Brackets are inclusive at their lower bound: 70 is "likely", 40 is "possibly".
pub fn ai_verdict_from_confidence(confidence: Option<f64>) -> Verdict {
    match confidence.filter(|c| c.is_finite()) {
        None => Verdict::new(UNKNOWN, Tone::Neutral),
        Some(c) if c >= AI_LIKELY_THRESHOLD => Verdict::new(LIKELY_AI, Tone::Warn),
        Some(c) if c >= AI_POSSIBLE_THRESHOLD => Verdict::new(POSSIBLY_AI, Tone::Neutral),
        Some(_) => Verdict::new(LIKELY_HUMAN, Tone::Good),
    }
}

/// Deepfake verdict for a result. Text results are "Unknown".
pub fn deepfake_verdict(result: &AnalysisResult) -> Verdict {
    match result {
        AnalysisResult::Video(video) => deepfake_verdict_from_video(video),
        AnalysisResult::Text(_) => Verdict::new(UNKNOWN, Tone::Neutral),
    }
}

pub fn deepfake_verdict_from_video(video: &VideoAnalysis) -> Verdict {
    let verdict = match video.is_deepfake {
        Some(true) => Verdict::new(DEEPFAKE_DETECTED, Tone::Danger),
        Some(false) => Verdict::new(VIDEO_AUTHENTIC, Tone::Good),
        None => return Verdict::new(UNKNOWN, Tone::Neutral),
    };
    match video.confidence.filter(|c| c.is_finite()) {
        Some(c) => verdict.with_detail(format!("Confidence: {}%", format_percent(c))),
        None => verdict,
    }
}

/// Format a 0–100 score without a trailing `.0` for whole numbers.
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
