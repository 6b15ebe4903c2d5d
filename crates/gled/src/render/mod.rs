//! # Render Module
//!
//! Everything that touches the GL context.
//!
//! ## Organization
//!
//! - **`opengl`**: raw entry points behind the [`GlApi`] trait
//! - **`context`**: [`GlContext`], the API plus its current bindings
//! - **`diagnostics`**: compile/link status and info logs
//! - **`shader`** / **`program`**: compilation and linking
//! - **`buffer`** / **`geometry`**: buffer objects, vertex arrays, shapes
//! - **`render_loop`**: the per-frame clear/bind/draw/present cycle
//! - **`window`**: the GLFW window that owns the context
//!
//! ## Call order
//!
//! ```text
//! Window::initialize ─► load_gl ─► compile ─► link ─► upload_shape ─► run
//! ```

pub mod opengl;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod handles;
pub mod shader;
pub mod program;
pub mod buffer;
pub mod geometry;
pub mod render_loop;
pub mod window;

pub use context::{BindingState, GlContext, ThreadAffinity};
pub use error::{GledError, GledResult};
pub use opengl::{BufferTarget, BufferUsage, ClearMask, GlApi, NativeGl, ShaderStage};
pub use handles::{BufferHandle, ProgramHandle, ShaderHandle, VertexArrayHandle};
pub use render_loop::FrameStats;
