//! TruthLens: misinformation and deepfake analysis front end.
//!
//! All detection runs in a remote backend reached through
//! [`truthlens_client`]. This crate holds what sits in front of it:
//!
//! - **Controller**: owns the session's UI state and sequences backend calls
//! - **Verdicts**: turn raw backend output into labelled, toned verdicts
//! - **Report**: plain-text rendering of a state snapshot
//! - **Config**: TOML file plus environment overrides for the backend address
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> truthlens::Result<()> {
//! use truthlens::{AnalysisController, TruthLensConfig};
//! use truthlens_client::HttpBackend;
//!
//! let config = TruthLensConfig::load(None)?.with_env_overrides();
//! let backend = HttpBackend::new(config.client_config())?;
//! let mut controller = AnalysisController::new(backend);
//!
//! let _ = controller.set_text("Drinking bleach cures the flu.");
//! let _ = controller.submit().await;
//! print!("{}", truthlens::report::render_snapshot(&controller.snapshot()));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod details;
pub mod error;
pub mod report;
pub mod verdict;
pub mod view;

pub use config::TruthLensConfig;
pub use controller::{AnalysisController, IgnoreReason, Mode, Phase, Transition, UiSnapshot};
pub use error::{Result, TruthLensError};
pub use verdict::{Tone, Verdict};
pub use view::ResultView;
