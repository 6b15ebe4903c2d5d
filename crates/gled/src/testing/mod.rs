//! Test doubles for running the pipeline without a GPU or a display
//!
//! [`RecordingGl`] implements [`crate::render::GlApi`] by recording every
//! state-changing call and simulating compile and link outcomes.
//! [`HeadlessWindow`] implements [`crate::render::window::WindowBackend`]
//! and asks to close after a fixed number of frames.

mod headless;
mod recording_gl;

pub use headless::HeadlessWindow;
pub use recording_gl::{GlCall, RecordingGl};
