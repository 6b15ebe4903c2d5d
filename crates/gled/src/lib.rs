//! # gled
//!
//! A thin resource layer over a native OpenGL context and a GLFW window.
//!
//! ## Features
//!
//! - **Window + Context**: GLFW window with a 3.3 core, forward-compatible context
//! - **Shaders**: GLSL compilation and program linking with exact-length diagnostics
//! - **Buffers**: vertex/index buffer upload and vertex-array attribute layout
//! - **Render Loop**: clear, poll, bind, draw, present until the window closes
//!
//! Every GPU call goes through a [`render::GlContext`], which tracks what is
//! currently bound so that ordering mistakes are reported instead of reaching
//! the driver.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gled::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     gled::foundation::logging::init();
//!
//!     let mut window = Window::initialize("Square", 800, 800);
//!     let mut ctx = window.load_gl()?;
//!
//!     let vertex = shader::compile_from_file(&mut ctx, "resources/shaders/basic.vert", ShaderStage::Vertex);
//!     let fragment = shader::compile_from_file(&mut ctx, "resources/shaders/basic_orange.frag", ShaderStage::Fragment);
//!     let program = program::link(&mut ctx, [vertex, fragment]);
//!
//!     let shape = Shape::new(
//!         &[0.5, 0.5, 0.0, 0.5, -0.5, 0.0, -0.5, -0.5, 0.0, -0.5, 0.5, 0.0],
//!         &[0, 1, 3, 1, 2, 3],
//!     );
//!     let geometry = geometry::upload_shape(&mut ctx, &shape, BufferUsage::Static)?;
//!
//!     render_loop::run(&mut window, &mut ctx, &program, &geometry.vertex_array, &geometry.draw)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod testing;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{load_shader_source, AssetError},
        core::config::{AppConfig, ShaderConfig, WindowConfig},
        config::{Config, ConfigError},
        render::{
            buffer, geometry, program, render_loop, shader,
            geometry::{DrawSpec, GeometryBuffers, Shape},
            window::{Window, WindowBackend, WindowError},
            BufferHandle, BufferTarget, BufferUsage, GlApi, GlContext, GledError, GledResult,
            ProgramHandle, ShaderHandle, ShaderStage, VertexArrayHandle,
        },
    };
}
