//! Strongly typed GL object handles
//!
//! The driver names every object with a bare `u32`. Wrapping each kind in its
//! own type keeps a buffer name from being passed where a program is
//! expected. Shader handles are deliberately neither `Clone` nor `Copy`:
//! linking consumes them, so a freed shader cannot be named again.

use crate::render::opengl::{BufferTarget, ShaderStage};

/// Compiled shader object
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderHandle {
    id: u32,
    stage: ShaderStage,
}

impl ShaderHandle {
    pub(crate) const fn new(id: u32, stage: ShaderStage) -> Self {
        Self { id, stage }
    }

    /// Driver name of the shader
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Stage the shader was compiled for
    pub const fn stage(&self) -> ShaderStage {
        self.stage
    }
}

/// Linked program object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(u32);

impl ProgramHandle {
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Driver name of the program
    pub const fn id(&self) -> u32 {
        self.0
    }
}

/// Buffer object tagged with the target it was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle {
    id: u32,
    target: BufferTarget,
}

impl BufferHandle {
    pub(crate) const fn new(id: u32, target: BufferTarget) -> Self {
        Self { id, target }
    }

    /// Driver name of the buffer
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Target the buffer binds to
    pub const fn target(&self) -> BufferTarget {
        self.target
    }
}

/// Vertex array object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(u32);

impl VertexArrayHandle {
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Driver name of the vertex array
    pub const fn id(&self) -> u32 {
        self.0
    }
}
