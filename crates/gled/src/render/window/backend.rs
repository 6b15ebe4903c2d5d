//! Window backend trait
//!
//! The render loop only needs the close flag, event polling and
//! presentation. Keeping those behind a trait lets the loop run against a
//! headless window in tests.

use super::glfw_window::WindowResult;

/// Operations the render loop performs on a window
///
/// Implementations are driven from the thread that owns the GL context.
pub trait WindowBackend {
    /// Check if the window should close
    ///
    /// Returns true once the user has asked the window to close, or the
    /// application has set the flag itself.
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Process pending window system events
    ///
    /// This is where the close flag gets updated; call it once per frame.
    fn poll_events(&mut self);

    /// Swap front and back buffers
    ///
    /// May block until the next vertical blank, at the windowing library's
    /// discretion.
    fn present(&mut self) -> WindowResult<()>;

    /// Client area size in pixels
    fn get_size(&self) -> (u32, u32);

    /// Window title
    fn get_title(&self) -> String;
}
