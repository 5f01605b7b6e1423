//! The analysis backend seam and its HTTP implementation.
//!
//! [`AnalysisBackend`] is what the front end talks to. [`HttpBackend`] is the
//! real thing: one POST per call, no retries, no caching.

use crate::config::{ClientConfig, TEXT_ENDPOINT, VIDEO_ENDPOINT};
use crate::error::{Result, TransportError};
use crate::http::build_client;
use crate::types::{
    decode_object, AnalysisKind, AnalysisRequest, AnalysisResult, TextAnalysis, VideoAnalysis,
};
use crate::upload::VideoUpload;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Multipart field name carrying the uploaded video.
pub const VIDEO_FIELD: &str = "video";

/// A backend that can analyse text and video.
///
/// All implementations must be `Send + Sync` so a controller can hold one
/// across await points.
pub trait AnalysisBackend: Send + Sync {
    /// Fact-check `content` and score it for AI authorship.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request cannot complete, the backend
    /// answers with a failure status, or the body cannot be decoded.
    fn analyze_text(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<TextAnalysis>> + Send;

    /// Score an uploaded video for deepfake manipulation.
    ///
    /// # Errors
    ///
    /// Same failure contract as [`AnalysisBackend::analyze_text`].
    fn analyze_video(
        &self,
        upload: &VideoUpload,
    ) -> impl Future<Output = Result<VideoAnalysis>> + Send;

    /// Dispatch a request to the matching endpoint.
    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResult>> + Send {
        async move {
            match request {
                AnalysisRequest::Text { content } => {
                    self.analyze_text(content).await.map(AnalysisResult::Text)
                }
                AnalysisRequest::Video { upload } => {
                    self.analyze_video(upload).await.map(AnalysisResult::Video)
                }
            }
        }
    }
}

impl<B: AnalysisBackend> AnalysisBackend for Arc<B> {
    fn analyze_text(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<TextAnalysis>> + Send {
        (**self).analyze_text(content)
    }

    fn analyze_video(
        &self,
        upload: &VideoUpload,
    ) -> impl Future<Output = Result<VideoAnalysis>> + Send {
        (**self).analyze_video(upload)
    }
}

/// [`AnalysisBackend`] over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    config: ClientConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.config.base_url)
            .field("timeout_seconds", &self.config.timeout_seconds)
            .finish()
    }
}

impl HttpBackend {
    /// Create a backend client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Config`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a prepared request and decode a successful JSON object body.
    async fn execute<T: DeserializeOwned>(
        &self,
        kind: AnalysisKind,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            warn!(%kind, error = %e, "analysis request did not complete");
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = TransportError::from_status(status.as_u16(), &body);
            warn!(%kind, status = status.as_u16(), "analysis request rejected by backend");
            return Err(err);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(format!("failed to read response body: {e}")))?;
        decode_object(&body).inspect_err(|e| {
            warn!(%kind, error = %e, "analysis response could not be decoded");
        })
    }
}

impl AnalysisBackend for HttpBackend {
    async fn analyze_text(&self, content: &str) -> Result<TextAnalysis> {
        let url = self.config.endpoint(TEXT_ENDPOINT);
        debug!(endpoint = %url, chars = content.chars().count(), "submitting text analysis");
        let request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "text": content }));
        self.execute(AnalysisKind::Text, request).await
    }

    async fn analyze_video(&self, upload: &VideoUpload) -> Result<VideoAnalysis> {
        let url = self.config.endpoint(VIDEO_ENDPOINT);
        debug!(
            endpoint = %url,
            file = %upload.file_name,
            bytes = upload.len(),
            "submitting video analysis"
        );
        let part = reqwest::multipart::Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.media_type)
            .map_err(|e| {
                TransportError::Upload(format!("invalid media type {:?}: {e}", upload.media_type))
            })?;
        let form = reqwest::multipart::Form::new().part(VIDEO_FIELD, part);
        let request = self.client.post(&url).multipart(form);
        self.execute(AnalysisKind::Video, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records which endpoint was hit and answers with canned results.
    #[derive(Default)]
    struct RecordingBackend {
        text_calls: AtomicUsize,
        video_calls: AtomicUsize,
    }

    impl AnalysisBackend for RecordingBackend {
        async fn analyze_text(&self, _content: &str) -> Result<TextAnalysis> {
            self.text_calls.fetch_add(1, Ordering::SeqCst);
            Ok(TextAnalysis {
                ai_confidence: Some(12.0),
                ..Default::default()
            })
        }

        async fn analyze_video(&self, _upload: &VideoUpload) -> Result<VideoAnalysis> {
            self.video_calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::from_status(500, ""))
        }
    }

    #[test]
    fn http_backend_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpBackend>();
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("localhost:5000/api");
        assert!(HttpBackend::new(config).is_err());
    }

    #[test]
    fn debug_shows_base_url() {
        let backend = HttpBackend::new(ClientConfig::default()).expect("valid config");
        let rendered = format!("{backend:?}");
        assert!(rendered.contains("http://localhost:5000"));
    }

    #[tokio::test]
    async fn analyze_dispatches_by_request_kind() {
        let backend = Arc::new(RecordingBackend::default());

        let text = AnalysisRequest::Text {
            content: "hello".into(),
        };
        let result = backend.analyze(&text).await.expect("text ok");
        assert_eq!(result.kind(), AnalysisKind::Text);

        let video = AnalysisRequest::Video {
            upload: VideoUpload::new("a.mp4", "video/mp4", b"data".to_vec()),
        };
        let err = backend.analyze(&video).await.unwrap_err();
        assert_eq!(err.status(), Some(500));

        assert_eq!(backend.text_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.video_calls.load(Ordering::SeqCst), 1);
    }
}
