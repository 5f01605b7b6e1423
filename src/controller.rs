//! Interaction/state controller.
//!
//! [`AnalysisController`] owns the session's UI state and is the only thing
//! that mutates it. Renderers read it through [`UiSnapshot`]s, either on
//! demand via [`AnalysisController::snapshot`] or pushed through a
//! [`tokio::sync::watch`] channel after every transition.
//!
//! Lifecycle: `Idle → Busy → {Success, Failed}`. A new submission from
//! `Success`/`Failed` goes straight back to `Busy`; new input, a mode change
//! or dismissing an error returns to `Idle`.
//!
//! At most one analysis is in flight. The `Busy` phase is the guard: a second
//! submission and mode changes are ignored until the outstanding call
//! resolves. Input edits made while busy are kept for the next submission.
//! Nothing is cancelled and nothing is retried.

use crate::view::ResultView;
use serde::Serialize;
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, warn};
use truthlens_client::upload::is_video_media_type;
use truthlens_client::{AnalysisBackend, AnalysisKind, AnalysisRequest, AnalysisResult, VideoUpload};

/// The active input mode.
pub type Mode = AnalysisKind;

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Busy,
    Success,
    Failed,
}

/// Why a requested transition did not happen. State is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// An analysis is already in flight.
    Busy,
    /// No text (after trimming) or no file for the active mode.
    EmptyInput,
    /// The offered file is not a video.
    NotVideo { media_type: String },
    /// The offered file exceeds the upload cap.
    TooLarge { size: u64, limit: u64 },
    /// There is no error to dismiss.
    NothingToDismiss,
    /// A completion arrived for a submission that is no longer in flight.
    Stale { ticket: u64 },
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("an analysis is already in progress"),
            Self::EmptyInput => f.write_str("nothing to analyze"),
            Self::NotVideo { media_type } => write!(f, "not a video file ({media_type})"),
            Self::TooLarge { size, limit } => {
                write!(f, "file is {size} bytes, the limit is {limit} bytes")
            }
            Self::NothingToDismiss => f.write_str("no error to dismiss"),
            Self::Stale { ticket } => write!(f, "submission #{ticket} is no longer in flight"),
        }
    }
}

/// Outcome of a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Transition {
    Applied,
    Ignored(IgnoreReason),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A submission that has passed the guards and is waiting on the backend.
///
/// Hand it back to [`AnalysisController::complete`] with the backend's answer.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    ticket: u64,
    request: AnalysisRequest,
}

impl PendingAnalysis {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    pub fn kind(&self) -> Mode {
        self.request.kind()
    }
}

/// Metadata about the selected video, without its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

impl From<&VideoUpload> for FileSummary {
    fn from(upload: &VideoUpload) -> Self {
        Self {
            name: upload.file_name.clone(),
            media_type: upload.media_type.clone(),
            size_bytes: upload.len() as u64,
        }
    }
}

/// Read-only view of the UI state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiSnapshot {
    pub mode: Mode,
    pub input_text: String,
    /// Character count of `input_text`.
    pub input_chars: usize,
    pub input_file: Option<FileSummary>,
    pub phase: Phase,
    pub busy: bool,
    pub result: Option<AnalysisResult>,
    /// Verdicts derived from `result`.
    pub view: Option<ResultView>,
    pub error: Option<String>,
}

impl UiSnapshot {
    /// Whether the active mode has something to submit.
    pub fn can_submit(&self) -> bool {
        !self.busy
            && match self.mode {
                Mode::Text => !self.input_text.trim().is_empty(),
                Mode::Video => self.input_file.is_some(),
            }
    }
}

#[derive(Debug, Default)]
struct UiState {
    mode: Mode,
    input_text: String,
    input_file: Option<VideoUpload>,
    phase: Phase,
    result: Option<AnalysisResult>,
    error: Option<String>,
}

impl UiState {
    fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            mode: self.mode,
            input_text: self.input_text.clone(),
            input_chars: self.input_text.chars().count(),
            input_file: self.input_file.as_ref().map(FileSummary::from),
            phase: self.phase,
            busy: self.phase == Phase::Busy,
            result: self.result.clone(),
            view: self.result.as_ref().map(ResultView::derive),
            error: self.error.clone(),
        }
    }
}

/// Owns UI state and sequences calls to an [`AnalysisBackend`].
pub struct AnalysisController<B> {
    backend: B,
    upload_limit: Option<u64>,
    state: UiState,
    next_ticket: u64,
    in_flight: Option<u64>,
    snapshot_tx: watch::Sender<UiSnapshot>,
}

impl<B> fmt::Debug for AnalysisController<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisController")
            .field("mode", &self.state.mode)
            .field("phase", &self.state.phase)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl<B: AnalysisBackend> AnalysisController<B> {
    /// Start a session with default state: text mode, no input, idle.
    pub fn new(backend: B) -> Self {
        let state = UiState::default();
        let (snapshot_tx, _rx) = watch::channel(state.snapshot());
        Self {
            backend,
            upload_limit: None,
            state,
            next_ticket: 1,
            in_flight: None,
            snapshot_tx,
        }
    }

    /// Reject video files larger than `limit` bytes. `None` removes the cap.
    #[must_use]
    pub fn with_upload_limit(mut self, limit: Option<u64>) -> Self {
        self.upload_limit = limit;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_busy(&self) -> bool {
        self.state.phase == Phase::Busy
    }

    pub fn snapshot(&self) -> UiSnapshot {
        self.state.snapshot()
    }

    /// Receive a fresh snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Switch input mode. Ignored while busy; clears result and error.
    pub fn change_mode(&mut self, mode: Mode) -> Transition {
        if self.is_busy() {
            return Transition::Ignored(IgnoreReason::Busy);
        }
        debug!(from = %self.state.mode, to = %mode, "mode changed");
        self.state.mode = mode;
        self.clear_outcome();
        self.publish();
        Transition::Applied
    }

    /// Replace the text input.
    pub fn set_text(&mut self, text: impl Into<String>) -> Transition {
        self.state.input_text = text.into();
        self.clear_outcome();
        self.publish();
        Transition::Applied
    }

    /// Select a video file. Non-video, empty or oversized files are ignored.
    pub fn set_file(&mut self, upload: VideoUpload) -> Transition {
        if !is_video_media_type(&upload.media_type) {
            debug!(media_type = %upload.media_type, "rejected non-video file");
            return Transition::Ignored(IgnoreReason::NotVideo {
                media_type: upload.media_type,
            });
        }
        if upload.is_empty() {
            return Transition::Ignored(IgnoreReason::EmptyInput);
        }
        let size = upload.len() as u64;
        if let Some(limit) = self.upload_limit.filter(|limit| size > *limit) {
            debug!(size, limit, "rejected oversized file");
            return Transition::Ignored(IgnoreReason::TooLarge { size, limit });
        }
        self.state.input_file = Some(upload);
        self.clear_outcome();
        self.publish();
        Transition::Applied
    }

    /// Drop the selected video file.
    pub fn clear_file(&mut self) -> Transition {
        if self.state.input_file.take().is_none() {
            return Transition::Ignored(IgnoreReason::EmptyInput);
        }
        self.clear_outcome();
        self.publish();
        Transition::Applied
    }

    /// Clear a surfaced error and return to idle.
    pub fn dismiss_error(&mut self) -> Transition {
        if self.state.phase != Phase::Failed {
            return Transition::Ignored(IgnoreReason::NothingToDismiss);
        }
        self.state.error = None;
        self.state.phase = Phase::Idle;
        self.publish();
        Transition::Applied
    }

    /// Check the guards and move to `Busy`, returning the request to send.
    ///
    /// # Errors
    ///
    /// Returns the [`IgnoreReason`] when already busy or the active mode has
    /// no input; state is left untouched.
    pub fn begin_submit(&mut self) -> Result<PendingAnalysis, IgnoreReason> {
        if self.is_busy() {
            return Err(IgnoreReason::Busy);
        }
        let request = match self.state.mode {
            Mode::Text if self.state.input_text.trim().is_empty() => {
                return Err(IgnoreReason::EmptyInput);
            }
            Mode::Text => AnalysisRequest::Text {
                content: self.state.input_text.clone(),
            },
            Mode::Video => match self.state.input_file {
                Some(ref upload) => AnalysisRequest::Video {
                    upload: upload.clone(),
                },
                None => return Err(IgnoreReason::EmptyInput),
            },
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.state.phase = Phase::Busy;
        self.state.result = None;
        self.state.error = None;
        debug!(ticket, kind = %request.kind(), "analysis submitted");
        self.publish();
        Ok(PendingAnalysis { ticket, request })
    }

    /// Apply the backend's answer for `ticket`.
    ///
    /// Completions for anything but the submission in flight are discarded.
    pub fn complete(
        &mut self,
        ticket: u64,
        outcome: truthlens_client::Result<AnalysisResult>,
    ) -> Transition {
        if self.in_flight != Some(ticket) {
            warn!(ticket, "discarding completion for a submission no longer in flight");
            return Transition::Ignored(IgnoreReason::Stale { ticket });
        }
        self.in_flight = None;
        match outcome {
            Ok(result) => {
                debug!(ticket, kind = %result.kind(), "analysis succeeded");
                self.state.result = Some(result);
                self.state.phase = Phase::Success;
            }
            Err(e) => {
                warn!(ticket, error = %e, "analysis failed");
                self.state.error = Some(e.to_string());
                self.state.phase = Phase::Failed;
            }
        }
        self.publish();
        Transition::Applied
    }

    /// Submit the active mode's input and wait for the backend.
    ///
    /// Ignored when busy or when there is no input. On return the controller
    /// is in `Success` or `Failed`.
    pub async fn submit(&mut self) -> Transition {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(reason) => return Transition::Ignored(reason),
        };
        let outcome = self.backend.analyze(pending.request()).await;
        self.complete(pending.ticket(), outcome)
    }

    /// Input or mode changed: stale outcomes go, unless a call is in flight.
    fn clear_outcome(&mut self) {
        if self.is_busy() {
            return;
        }
        self.state.result = None;
        self.state.error = None;
        self.state.phase = Phase::Idle;
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.snapshot());
    }
}
