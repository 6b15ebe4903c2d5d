//! Window management using GLFW
//!
//! Creates a non-resizable window with an OpenGL 3.3 core, forward-compatible
//! context and makes that context current on the calling thread. From then on
//! the calling thread is the only one allowed to touch the context: the
//! window is `!Send`, and presentation and GL loading check the thread.

use glfw::Context;
use thiserror::Error;

use crate::core::config::WindowConfig;
use crate::render::context::{GlContext, ThreadAffinity};
use crate::render::error::fatal;
use crate::render::opengl::{GlApi, NativeGl};
use crate::render::handles::ProgramHandle;

use super::backend::WindowBackend;

/// Requested OpenGL context version (major, minor)
pub const CONTEXT_VERSION: (u32, u32) = (3, 3);

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW itself could not start
    #[error("Failed to initialise GLFW: {0}")]
    InitializationFailed(String),

    /// GLFW refused to create the window or its context
    #[error("Failed to create window")]
    CreationFailed,

    /// The context could not be made current on this thread
    #[error("Failed to make the GL context current")]
    ContextNotCurrent,

    /// Width or height was zero
    #[error("Invalid window dimensions: {0}")]
    InvalidDimensions(String),

    /// The window already has a program
    #[error("A program is already associated with this window")]
    ProgramAlreadySet,

    /// A context-bound call came from a thread that does not own the context
    #[error("GL context used from a thread other than the one that created it")]
    WrongThread,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window owning a current OpenGL context
pub struct Window {
    title: String,
    width: u32,
    height: u32,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
    program: Option<ProgramHandle>,
    affinity: ThreadAffinity,
}

impl Window {
    /// Create the window and make its context current
    ///
    /// # Panics
    /// Panics if GLFW cannot start, the window cannot be created, the
    /// context cannot be made current, or a dimension is zero.
    pub fn initialize(title: &str, width: u32, height: u32) -> Self {
        Self::try_initialize(&WindowConfig::new(title, width, height))
            .unwrap_or_else(|err| fatal("Failed to initialise window", &err))
    }

    /// Create the window and make its context current, reporting failures
    pub fn try_initialize(config: &WindowConfig) -> WindowResult<Self> {
        config.validate().map_err(WindowError::InvalidDimensions)?;

        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;
        log::info!("Initialised GLFW successfully");

        let (major, minor) = CONTEXT_VERSION;
        glfw.window_hint(glfw::WindowHint::Resizable(false));
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;
        log::info!("Initialised window successfully");

        window.set_close_polling(true);
        window.make_current();
        if !window.is_current() {
            return Err(WindowError::ContextNotCurrent);
        }

        Ok(Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            window,
            events,
            glfw,
            program: None,
            affinity: ThreadAffinity::current(),
        })
    }

    /// Load GL entry points for this window's context
    pub fn load_gl(&mut self) -> WindowResult<GlContext<NativeGl>> {
        self.affinity.check()?;
        let window = &mut self.window;
        let api = NativeGl::load(|symbol| window.get_proc_address(symbol) as *const _);
        log::info!("Initialised OpenGL version {}", api.version());
        Ok(GlContext::new(api))
    }

    /// Associate the window's program; allowed once
    pub fn set_program(&mut self, program: ProgramHandle) -> WindowResult<()> {
        if self.program.is_some() {
            return Err(WindowError::ProgramAlreadySet);
        }
        self.program = Some(program);
        Ok(())
    }

    /// Program associated with the window, if any
    pub const fn program(&self) -> Option<ProgramHandle> {
        self.program
    }

    /// Thread that owns the context
    pub const fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }
}

impl WindowBackend for Window {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            if let glfw::WindowEvent::Close = event {
                log::debug!("Close requested for window {:?}", self.title);
            }
        }
    }

    fn present(&mut self) -> WindowResult<()> {
        self.affinity.check()?;
        self.window.swap_buffers();
        Ok(())
    }

    fn get_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn get_title(&self) -> String {
        self.title.clone()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        log::debug!("Destroying window {:?}", self.title);
    }
}
