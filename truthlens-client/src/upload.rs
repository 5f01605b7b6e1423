//! Video files prepared for multipart upload.

use crate::error::TransportError;
use bytes::Bytes;
use std::path::Path;

/// Media type used when the file extension is not recognised.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Extension to media type table for common video containers.
const VIDEO_EXTENSIONS: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("3gp", "video/3gpp"),
    ("ogv", "video/ogg"),
];

/// A file held in memory, ready to be sent to the video endpoint.
///
/// The payload is a [`Bytes`] so snapshots and retries clone cheaply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUpload {
    /// File name sent in the multipart part.
    pub file_name: String,
    /// MIME type, e.g. `video/mp4`.
    pub media_type: String,
    /// Raw file contents.
    pub bytes: Bytes,
}

impl VideoUpload {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, inferring its media type from the extension.
    ///
    /// The file is not checked for being a video here; callers decide what
    /// to do with non-video uploads via [`VideoUpload::is_video`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());
        Ok(Self::new(file_name, media_type_for_path(path), bytes))
    }

    /// Returns `true` when the media type names a video.
    pub fn is_video(&self) -> bool {
        is_video_media_type(&self.media_type)
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Returns `true` for `video/*` media types, case-insensitively.
pub fn is_video_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("video/"))
}

/// Guess a media type from a path's extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return UNKNOWN_MEDIA_TYPE;
    };
    VIDEO_EXTENSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map_or(UNKNOWN_MEDIA_TYPE, |(_, media_type)| *media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn known_extensions_map_to_video_types() {
        assert_eq!(media_type_for_path(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(media_type_for_path(Path::new("CLIP.MOV")), "video/quicktime");
        assert_eq!(media_type_for_path(Path::new("a/b/c.webm")), "video/webm");
    }

    #[test]
    fn unknown_extensions_are_octet_stream() {
        assert_eq!(media_type_for_path(Path::new("notes.txt")), UNKNOWN_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("no_extension")), UNKNOWN_MEDIA_TYPE);
    }

    #[test]
    fn video_media_type_check() {
        assert!(is_video_media_type("video/mp4"));
        assert!(is_video_media_type("Video/WebM"));
        assert!(!is_video_media_type("image/png"));
        assert!(!is_video_media_type("vid"));
        assert!(!is_video_media_type(""));
    }

    #[tokio::test]
    async fn from_path_reads_file_and_infers_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sample.mkv");
        std::fs::write(&path, b"\x1a\x45\xdf\xa3fake").expect("write");

        let upload = VideoUpload::from_path(&path).await.expect("read");
        assert_eq!(upload.file_name, "sample.mkv");
        assert_eq!(upload.media_type, "video/x-matroska");
        assert_eq!(upload.len(), 8);
        assert!(upload.is_video());
    }

    #[tokio::test]
    async fn from_path_missing_file_is_io_error() {
        let path = PathBuf::from("/nonexistent/truthlens/clip.mp4");
        let err = VideoUpload::from_path(&path).await.unwrap_err();
        assert!(matches!(err, TransportError::Io(_)));
    }
}
