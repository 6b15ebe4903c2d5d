//! Render error taxonomy

use std::fmt;

use thiserror::Error;

use crate::assets::AssetError;
use crate::render::diagnostics::InfoLog;
use crate::render::opengl::BufferTarget;
use crate::render::window::WindowError;

/// Errors raised by shader, program, buffer and draw operations
#[derive(Error, Debug)]
pub enum GledError {
    /// The GLSL compiler rejected a shader
    #[error("Failed to compile shader {stage}:\n{log}")]
    Compile {
        /// Stage kind as reported by the shader object
        stage: &'static str,
        /// Full compiler log
        log: InfoLog,
    },

    /// The program failed to link
    #[error("Failed to link program:\n{log}")]
    Link {
        /// Full linker log
        log: InfoLog,
    },

    /// Shader source contained an interior NUL byte
    #[error("Shader source contains a NUL byte: {0}")]
    InvalidSource(#[from] std::ffi::NulError),

    /// A shader asset could not be read
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Attribute layout issued with no vertex array bound
    #[error("No vertex array is bound; bind one before configuring attributes")]
    NoVertexArrayBound,

    /// Operation needs a buffer bound to a target that has none
    #[error("No buffer is bound to the {0} target")]
    NothingBound(BufferTarget),

    /// Float attributes take between one and four components
    #[error("Attribute slot {slot} declares {components} components; expected 1 to 4")]
    InvalidAttribute {
        /// Attribute slot
        slot: u32,
        /// Requested component count
        components: i32,
    },

    /// Indexed draw on a vertex array without an element buffer
    #[error("The bound vertex array has no element buffer for an indexed draw")]
    NoElementBuffer,

    /// Draw issued with no program in use
    #[error("No program is in use")]
    NoProgramInUse,

    /// Draw count does not fit the GL count type
    #[error("Draw count {0} exceeds the GL limit")]
    DrawTooLarge(usize),

    /// Window or thread-affinity failure
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Result type for render operations
pub type GledResult<T> = Result<T, GledError>;

/// Log and abort for failures the pipeline cannot run without
pub(crate) fn fatal(context: &str, err: &dyn fmt::Display) -> ! {
    log::error!("{context}: {err}");
    panic!("{context}: {err}");
}
