//! Plain-text rendering of a [`UiSnapshot`] for terminals.

use crate::controller::{Mode, Phase, UiSnapshot};
use crate::verdict::{format_percent, Tone, Verdict};
use crate::view::ResultView;
use std::fmt::Write as _;
use truthlens_client::{AnalysisResult, ClaimVerdict, TextAnalysis, VideoAnalysis};

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Danger => "[!!]",
        Tone::Warn => "[! ]",
        Tone::Good => "[ok]",
        Tone::Neutral => "[--]",
    }
}

fn claim_marker(verdict: ClaimVerdict) -> &'static str {
    match verdict {
        ClaimVerdict::Supported => "SUPPORTED",
        ClaimVerdict::Refuted => "REFUTED",
        ClaimVerdict::Insufficient => "INSUFFICIENT",
    }
}

fn push_verdict(out: &mut String, heading: &str, verdict: &Verdict) {
    let _ = write!(out, "{} {heading}: {}", tone_marker(verdict.tone), verdict.label);
    if let Some(ref detail) = verdict.detail {
        let _ = write!(out, " ({detail})");
    }
    out.push('\n');
}

/// Render the whole snapshot: status line plus result or error panel.
pub fn render_snapshot(snapshot: &UiSnapshot) -> String {
    let mut out = String::new();
    match snapshot.phase {
        Phase::Idle => {
            out.push_str("Awaiting Analysis\n");
            out.push_str(match snapshot.mode {
                Mode::Text => "Provide text content and submit to verify authenticity\n",
                Mode::Video => "Select a video file to detect potential deepfake manipulation\n",
            });
        }
        Phase::Busy => {
            out.push_str("Analyzing Content\n");
            out.push_str(match snapshot.mode {
                Mode::Text => "Scanning for misinformation patterns...\n",
                Mode::Video => "Processing video frames for deepfake indicators...\n",
            });
        }
        Phase::Failed => {
            out.push_str("Analysis Error\n");
            if let Some(ref error) = snapshot.error {
                let _ = writeln!(out, "  {error}");
            }
        }
        Phase::Success => {
            if let (Some(result), Some(view)) = (&snapshot.result, &snapshot.view) {
                out.push_str(&render_result(result, view));
            }
        }
    }
    out
}

/// Machine-readable report: `{ "result", "verdicts", "error" }`.
///
/// `result` is the decoded backend result tagged with its `kind`,
/// `verdicts` the derived [`ResultView`]. Absent parts are `null`.
pub fn json_report(snapshot: &UiSnapshot) -> serde_json::Value {
    serde_json::json!({
        "result": snapshot.result,
        "verdicts": snapshot.view,
        "error": snapshot.error,
    })
}

/// Render a successful result with its derived verdicts.
pub fn render_result(result: &AnalysisResult, view: &ResultView) -> String {
    let mut out = String::new();
    if let Some(ref verdict) = view.credibility {
        push_verdict(&mut out, "Credibility", verdict);
    }
    if let Some(ref verdict) = view.ai_authorship {
        push_verdict(&mut out, "Authorship", verdict);
    }
    if let Some(ref verdict) = view.deepfake {
        push_verdict(&mut out, "Deepfake", verdict);
    }

    match result {
        AnalysisResult::Text(text) => render_text_body(&mut out, text),
        AnalysisResult::Video(video) => render_video_body(&mut out, video),
    }

    if !view.details.is_empty() {
        out.push_str("\nDetailed Analysis\n");
        for entry in &view.details {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                tone_marker(entry.tone),
                entry.label,
                entry.value
            );
        }
    }
    out
}

fn render_text_body(out: &mut String, text: &TextAnalysis) {
    if let Some(confidence) = text.ai_confidence.filter(|c| c.is_finite()) {
        let _ = writeln!(out, "  AI confidence: {}%", format_percent(confidence));
    }
    if let Some(ref explanation) = text.ai_explanation {
        let _ = writeln!(out, "  {explanation}");
    }
    if !text.key_indicators.is_empty() {
        out.push_str("\nKey Indicators\n");
        for indicator in &text.key_indicators {
            let _ = writeln!(out, "  - {indicator}");
        }
    }
    if let Some(ref assessment) = text.overall_assessment {
        let _ = writeln!(out, "\nOverall Assessment\n  {assessment}");
    }
    if !text.claims.is_empty() {
        out.push_str("\nClaims\n");
        for (i, claim) in text.claims.iter().enumerate() {
            let _ = write!(out, "  {}. [{}] {}", i + 1, claim_marker(claim.verdict), claim.claim);
            if let Some(confidence) = claim.confidence.filter(|c| c.is_finite()) {
                let _ = write!(out, " ({}%)", format_percent(confidence));
            }
            out.push('\n');
            if let Some(ref explanation) = claim.explanation {
                let _ = writeln!(out, "     {explanation}");
            }
            for evidence in &claim.top_evidence {
                let url = evidence.url.trim();
                match (evidence.title.as_deref(), url.is_empty()) {
                    (None, true) => continue,
                    (Some(title), true) => {
                        let _ = writeln!(out, "     -> {title}");
                    }
                    (title, false) => {
                        let _ = writeln!(out, "     -> {}: {url}", title.unwrap_or("source"));
                    }
                }
                if let Some(ref snippet) = evidence.snippet {
                    let _ = writeln!(out, "        \"{snippet}\"");
                }
            }
        }
    }
}

fn render_video_body(out: &mut String, video: &VideoAnalysis) {
    if let Some(ref explanation) = video.explanation {
        let _ = writeln!(out, "  {explanation}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::FileSummary;
    use truthlens_client::{Claim, Evidence};

    fn snapshot(phase: Phase, result: Option<AnalysisResult>, error: Option<&str>) -> UiSnapshot {
        UiSnapshot {
            mode: Mode::Text,
            input_text: String::new(),
            input_chars: 0,
            input_file: None,
            phase,
            busy: phase == Phase::Busy,
            view: result.as_ref().map(ResultView::derive),
            result,
            error: error.map(str::to_owned),
        }
    }

    #[test]
    fn idle_and_busy_status_lines() {
        let idle = render_snapshot(&snapshot(Phase::Idle, None, None));
        assert!(idle.starts_with("Awaiting Analysis"));

        let mut busy = snapshot(Phase::Busy, None, None);
        busy.mode = Mode::Video;
        busy.input_file = Some(FileSummary {
            name: "a.mp4".into(),
            media_type: "video/mp4".into(),
            size_bytes: 1,
        });
        let rendered = render_snapshot(&busy);
        assert!(rendered.contains("Processing video frames"));
    }

    #[test]
    fn failed_shows_error_panel() {
        let rendered = render_snapshot(&snapshot(
            Phase::Failed,
            None,
            Some("backend returned HTTP 500: request failed"),
        ));
        assert!(rendered.starts_with("Analysis Error"));
        assert!(rendered.contains("HTTP 500"));
    }

    #[test]
    fn text_result_lists_verdicts_claims_and_evidence() {
        let result = AnalysisResult::Text(TextAnalysis {
            ai_confidence: Some(72.0),
            key_indicators: vec!["uniform sentence length".into()],
            claims: vec![Claim {
                claim: "The moon is made of cheese".into(),
                verdict: ClaimVerdict::Refuted,
                confidence: Some(97.0),
                top_evidence: vec![Evidence {
                    url: "https://nasa.gov/moon".into(),
                    title: Some("Moon rocks".into()),
                    snippet: None,
                }],
                ..Default::default()
            }],
            ..Default::default()
        });
        let rendered = render_snapshot(&snapshot(Phase::Success, Some(result), None));
        assert!(rendered.contains("[!!] Credibility: Likely Contains Misinformation (1/1 claims refuted)"));
        assert!(rendered.contains("[! ] Authorship: Likely AI-Generated"));
        assert!(rendered.contains("AI confidence: 72%"));
        assert!(rendered.contains("1. [REFUTED] The moon is made of cheese (97%)"));
        assert!(rendered.contains("-> Moon rocks: https://nasa.gov/moon"));
        assert!(rendered.contains("- uniform sentence length"));
    }

    #[test]
    fn evidence_without_url_has_no_dangling_link() {
        let result = AnalysisResult::Text(TextAnalysis {
            claims: vec![Claim {
                claim: "Water boils at 100C at sea level".into(),
                verdict: ClaimVerdict::Supported,
                top_evidence: vec![
                    Evidence {
                        url: String::new(),
                        title: Some("Physics handbook".into()),
                        snippet: None,
                    },
                    Evidence {
                        url: "  ".into(),
                        title: None,
                        snippet: Some("orphan snippet".into()),
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        });
        let rendered = render_snapshot(&snapshot(Phase::Success, Some(result), None));
        assert!(rendered.contains("-> Physics handbook\n"));
        assert!(!rendered.contains("-> source"));
        assert!(!rendered.contains("orphan snippet"));
        assert!(!rendered.contains(": \n"));
    }

    #[test]
    fn json_report_carries_result_verdicts_and_error() {
        let result = AnalysisResult::Video(VideoAnalysis {
            is_deepfake: Some(true),
            confidence: Some(64.0),
            ..Default::default()
        });
        let report = json_report(&snapshot(Phase::Success, Some(result), None));
        assert_eq!(report["result"]["kind"], "video");
        assert_eq!(report["result"]["isDeepfake"], true);
        assert_eq!(report["verdicts"]["deepfake"]["label"], "Deepfake Detected");
        assert!(report["error"].is_null());

        let failed = json_report(&snapshot(
            Phase::Failed,
            None,
            Some("backend returned HTTP 502: request failed"),
        ));
        assert!(failed["result"].is_null());
        assert!(failed["verdicts"].is_null());
        assert_eq!(failed["error"], "backend returned HTTP 502: request failed");
    }

    #[test]
    fn video_result_lists_details() {
        let mut details = serde_json::Map::new();
        details.insert("facialConsistency".to_owned(), serde_json::json!("Inconsistent"));
        let result = AnalysisResult::Video(VideoAnalysis {
            is_deepfake: Some(true),
            confidence: Some(88.0),
            details,
            ..Default::default()
        });
        let rendered = render_snapshot(&snapshot(Phase::Success, Some(result), None));
        assert!(rendered.contains("[!!] Deepfake: Deepfake Detected (Confidence: 88%)"));
        assert!(rendered.contains("Detailed Analysis"));
        assert!(rendered.contains("[!!] Facial Consistency: Inconsistent"));
    }
}
