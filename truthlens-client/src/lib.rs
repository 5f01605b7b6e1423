//! # truthlens-client
//!
//! Transport client for the TruthLens analysis backend.
//!
//! The backend does all of the detection work (claim extraction, evidence
//! retrieval, AI-text classification, deepfake inference). This crate only
//! moves requests and responses:
//!
//! - `POST {base}/api/analyze-news` with a JSON body `{ "text": .. }`
//! - `POST {base}/api/analyze-video` with a multipart `video` file part
//!
//! Each call is a single request. Nothing is retried, cached or buffered, and
//! no timeout is enforced unless [`ClientConfig::timeout_seconds`] asks for one.
//!
//! Submitted text is never logged; request logs carry only the endpoint and
//! payload size.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod upload;

pub use backend::{AnalysisBackend, HttpBackend};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{Result, TransportError};
pub use types::{
    AnalysisKind, AnalysisRequest, AnalysisResult, Claim, ClaimVerdict, Evidence, TextAnalysis,
    VideoAnalysis,
};
pub use upload::VideoUpload;

/// Analyse text against the backend named by `config`.
///
/// Builds a fresh [`HttpBackend`]; hold one yourself when making several calls.
///
/// # Errors
///
/// Returns [`TransportError::Config`] for an invalid config, otherwise the
/// failure contract of [`AnalysisBackend::analyze_text`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> truthlens_client::Result<()> {
/// let config = truthlens_client::ClientConfig::from_env();
/// let analysis = truthlens_client::submit_text_analysis("The moon is cheese.", &config).await?;
/// println!("{} claims", analysis.claims.len());
/// # Ok(())
/// # }
/// ```
pub async fn submit_text_analysis(content: &str, config: &ClientConfig) -> Result<TextAnalysis> {
    HttpBackend::new(config.clone())?.analyze_text(content).await
}

/// Upload a video to the backend named by `config`.
///
/// # Errors
///
/// Same as [`submit_text_analysis`].
pub async fn submit_video_analysis(
    upload: &VideoUpload,
    config: &ClientConfig,
) -> Result<VideoAnalysis> {
    HttpBackend::new(config.clone())?.analyze_video(upload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_text_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("::::");
        let err = submit_text_analysis("text", &config).await.unwrap_err();
        assert!(matches!(err, TransportError::Config(_)));
    }

    #[tokio::test]
    async fn submit_video_rejects_invalid_config() {
        let config = ClientConfig {
            timeout_seconds: Some(0),
            ..Default::default()
        };
        let upload = VideoUpload::new("a.mp4", "video/mp4", vec![0u8; 4]);
        let err = submit_video_analysis(&upload, &config).await.unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }
}
