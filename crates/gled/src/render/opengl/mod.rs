//! OpenGL entry points
//!
//! - **`api`**: the [`GlApi`] trait and the GL enums it speaks
//! - **`native`**: the driver-backed implementation

pub mod api;
pub mod native;

pub use api::{BufferTarget, BufferUsage, ClearMask, GlApi, ProgramParameter, ShaderParameter, ShaderStage};
pub use native::NativeGl;
