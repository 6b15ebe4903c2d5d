//! Window backend with no window behind it

use crate::core::config::DEFAULT_SIZE;
use crate::render::window::{WindowBackend, WindowResult};

/// Window that requests close once a set number of frames have polled events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessWindow {
    title: String,
    size: (u32, u32),
    close_after: u64,
    polls: u64,
    presented: u64,
    should_close: bool,
}

impl HeadlessWindow {
    /// Close after `frames` event polls; zero starts out closed
    pub fn closing_after(frames: u64) -> Self {
        Self {
            title: "headless".to_string(),
            size: (DEFAULT_SIZE, DEFAULT_SIZE),
            close_after: frames,
            polls: 0,
            presented: 0,
            should_close: frames == 0,
        }
    }

    /// Number of `poll_events` calls so far
    pub const fn polls(&self) -> u64 {
        self.polls
    }

    /// Number of presented frames so far
    pub const fn presented(&self) -> u64 {
        self.presented
    }
}

impl WindowBackend for HeadlessWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn poll_events(&mut self) {
        self.polls += 1;
        if self.polls >= self.close_after {
            self.should_close = true;
        }
    }

    fn present(&mut self) -> WindowResult<()> {
        self.presented += 1;
        Ok(())
    }

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn get_title(&self) -> String {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_frames_starts_closed() {
        assert!(HeadlessWindow::closing_after(0).should_close());
    }

    #[test]
    fn test_closes_on_last_poll() {
        let mut window = HeadlessWindow::closing_after(2);
        window.poll_events();
        assert!(!window.should_close());
        window.poll_events();
        assert!(window.should_close());
    }
}
