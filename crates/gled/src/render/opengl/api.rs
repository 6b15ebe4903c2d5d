//! The raw OpenGL surface used by the rest of the crate
//!
//! [`GlApi`] is a one-to-one wrapper over the handful of GL entry points this
//! crate needs. Object ids are plain `u32` names at this level; the typed
//! handles live one layer up in [`crate::render::handles`].

use std::ffi::CStr;
use std::fmt;

use bitflags::bitflags;

/// Programmable pipeline stage of a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// GL enum passed to `glCreateShader`
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// Map a `GL_SHADER_TYPE` query result back to a stage
    pub const fn from_gl_enum(value: u32) -> Option<Self> {
        match value {
            gl::VERTEX_SHADER => Some(Self::Vertex),
            gl::FRAGMENT_SHADER => Some(Self::Fragment),
            _ => None,
        }
    }

    /// Name used in logs and diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "VERTEX_SHADER",
            Self::Fragment => "FRAGMENT_SHADER",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binding point of a buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data (`GL_ARRAY_BUFFER`)
    VertexData,
    /// Element indices (`GL_ELEMENT_ARRAY_BUFFER`)
    IndexData,
}

impl BufferTarget {
    /// GL enum for `glBindBuffer` / `glBufferData`
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::VertexData => gl::ARRAY_BUFFER,
            Self::IndexData => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl fmt::Display for BufferTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexData => f.write_str("vertex data"),
            Self::IndexData => f.write_str("index data"),
        }
    }
}

/// Expected update frequency of buffer contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times
    #[default]
    Static,
    /// Re-uploaded frequently
    Dynamic,
}

impl BufferUsage {
    /// GL usage hint
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Static => gl::STATIC_DRAW,
            Self::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}

bitflags! {
    /// Framebuffer planes cleared by `glClear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearMask: u32 {
        /// Colour buffer
        const COLOR = gl::COLOR_BUFFER_BIT;
        /// Depth buffer
        const DEPTH = gl::DEPTH_BUFFER_BIT;
    }
}

/// Integer parameters queried from a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderParameter {
    /// `GL_COMPILE_STATUS`
    CompileStatus,
    /// `GL_SHADER_TYPE`
    ShaderType,
    /// `GL_INFO_LOG_LENGTH`, including the NUL terminator
    InfoLogLength,
}

impl ShaderParameter {
    /// GL enum for `glGetShaderiv`
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::CompileStatus => gl::COMPILE_STATUS,
            Self::ShaderType => gl::SHADER_TYPE,
            Self::InfoLogLength => gl::INFO_LOG_LENGTH,
        }
    }
}

/// Integer parameters queried from a program object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramParameter {
    /// `GL_LINK_STATUS`
    LinkStatus,
    /// `GL_INFO_LOG_LENGTH`, including the NUL terminator
    InfoLogLength,
}

impl ProgramParameter {
    /// GL enum for `glGetProgramiv`
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::LinkStatus => gl::LINK_STATUS,
            Self::InfoLogLength => gl::INFO_LOG_LENGTH,
        }
    }
}

/// Raw OpenGL entry points
///
/// Implementations must only be driven from the thread that owns the
/// context. [`crate::render::GlContext`] enforces that and keeps track of
/// which objects are currently bound; nothing else should call these
/// methods directly.
pub trait GlApi {
    /// `GL_VERSION` string of the current context
    fn version(&self) -> String;

    /// Set the colour used by colour clears
    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32);
    /// Clear the given framebuffer planes
    fn clear(&mut self, mask: ClearMask);

    /// Create an empty shader object
    fn create_shader(&mut self, stage: ShaderStage) -> u32;
    /// Replace the source of a shader object; `source` is NUL-terminated
    fn shader_source(&mut self, shader: u32, source: &CStr);
    /// Compile the current source of a shader object
    fn compile_shader(&mut self, shader: u32);
    /// Query an integer shader parameter
    fn shader_parameter(&self, shader: u32, parameter: ShaderParameter) -> i32;
    /// Copy the info log into `buffer`, returning the bytes written excluding the NUL
    fn shader_info_log(&self, shader: u32, buffer: &mut [u8]) -> usize;
    /// Flag a shader object for deletion
    fn delete_shader(&mut self, shader: u32);

    /// Create an empty program object
    fn create_program(&mut self) -> u32;
    /// Attach a shader to a program
    fn attach_shader(&mut self, program: u32, shader: u32);
    /// Detach a shader from a program
    fn detach_shader(&mut self, program: u32, shader: u32);
    /// Link all attached shaders
    fn link_program(&mut self, program: u32);
    /// Query an integer program parameter
    fn program_parameter(&self, program: u32, parameter: ProgramParameter) -> i32;
    /// Copy the info log into `buffer`, returning the bytes written excluding the NUL
    fn program_info_log(&self, program: u32, buffer: &mut [u8]) -> usize;
    /// Install a program as part of the current rendering state; 0 uninstalls
    fn use_program(&mut self, program: u32);
    /// Delete a program object
    fn delete_program(&mut self, program: u32);

    /// Generate one buffer name
    fn gen_buffer(&mut self) -> u32;
    /// Bind a buffer to a target; 0 unbinds
    fn bind_buffer(&mut self, target: BufferTarget, buffer: u32);
    /// (Re)allocate the storage of the buffer bound to `target` and fill it
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    /// Delete a buffer object
    fn delete_buffer(&mut self, buffer: u32);

    /// Generate one vertex array name
    fn gen_vertex_array(&mut self) -> u32;
    /// Bind a vertex array; 0 unbinds
    fn bind_vertex_array(&mut self, vertex_array: u32);
    /// Delete a vertex array object
    fn delete_vertex_array(&mut self, vertex_array: u32);
    /// Describe a float attribute sourced from the bound vertex buffer
    fn vertex_attrib_pointer(&mut self, slot: u32, components: i32, stride: i32, offset: usize);
    /// Enable a vertex attribute slot on the bound vertex array
    fn enable_vertex_attrib_array(&mut self, slot: u32);

    /// Draw triangles from the bound element buffer using `u32` indices
    fn draw_elements(&mut self, count: i32, offset: usize);
    /// Draw triangles from consecutive vertices
    fn draw_arrays(&mut self, first: i32, count: i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_enum_round_trip() {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            assert_eq!(ShaderStage::from_gl_enum(stage.gl_enum()), Some(stage));
        }
        assert_eq!(ShaderStage::from_gl_enum(gl::GEOMETRY_SHADER), None);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(ShaderStage::Fragment.to_string(), "FRAGMENT_SHADER");
        assert_eq!(ShaderStage::Vertex.name(), "VERTEX_SHADER");
    }

    #[test]
    fn test_clear_mask_bits() {
        let mask = ClearMask::COLOR | ClearMask::DEPTH;
        assert_eq!(mask.bits(), gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }
}
