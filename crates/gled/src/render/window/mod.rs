//! Window management subsystem
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Render loop                 │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!      ┌────────▼────────┐
//!      │ WindowBackend   │ ← Trait (backend.rs)
//!      └────────┬────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ Window (GLFW + GL)    │ ← glfw_window.rs
//!   │ HeadlessWindow        │ ← crate::testing
//!   └───────────────────────┘
//! ```
//!
//! - **`backend`**: the trait the render loop drives
//! - **`glfw_window`**: the GLFW window owning the GL context

pub mod backend;
pub mod glfw_window;

pub use backend::WindowBackend;
pub use glfw_window::{Window, WindowError, WindowResult, CONTEXT_VERSION};
