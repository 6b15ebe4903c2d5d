//! Binding context
//!
//! OpenGL keeps "what is currently bound" as hidden per-context state: which
//! buffer sits on each target, which vertex array and which program are
//! current. [`GlContext`] owns the [`GlApi`] together with a mirror of that
//! state, so every operation that depends on a binding is handed the context
//! explicitly and can check the binding before the call reaches the driver.
//!
//! The context also remembers the thread it was created on. GL contexts are
//! thread-affine; a call from any other thread is reported as
//! [`WindowError::WrongThread`].

use std::collections::HashMap;
use std::thread::{self, ThreadId};

use crate::render::error::GledResult;
use crate::render::opengl::{BufferTarget, GlApi};
use crate::render::window::WindowError;

/// Records the thread that owns a GL context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl ThreadAffinity {
    /// Pin to the calling thread
    pub fn current() -> Self {
        Self { owner: thread::current().id() }
    }

    /// Owning thread
    pub const fn owner(&self) -> ThreadId {
        self.owner
    }

    /// Fail unless called from the owning thread
    pub fn check(&self) -> Result<(), WindowError> {
        if thread::current().id() == self.owner {
            Ok(())
        } else {
            Err(WindowError::WrongThread)
        }
    }
}

/// Mirror of the context's current bindings
///
/// The element buffer binding belongs to the vertex array that was bound
/// when it was set, exactly as in GL, so it is kept per vertex array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingState {
    vertex_buffer: Option<u32>,
    vertex_array: Option<u32>,
    program: Option<u32>,
    element_buffers: HashMap<Option<u32>, u32>,
    enabled_attributes: HashMap<u32, Vec<u32>>,
}

impl BindingState {
    /// Buffer bound to `GL_ARRAY_BUFFER`
    pub const fn vertex_buffer(&self) -> Option<u32> {
        self.vertex_buffer
    }

    /// Element buffer recorded on the current vertex array
    pub fn element_buffer(&self) -> Option<u32> {
        self.element_buffers.get(&self.vertex_array).copied()
    }

    /// Buffer bound to `target`
    pub fn buffer(&self, target: BufferTarget) -> Option<u32> {
        match target {
            BufferTarget::VertexData => self.vertex_buffer(),
            BufferTarget::IndexData => self.element_buffer(),
        }
    }

    /// Current vertex array
    pub const fn vertex_array(&self) -> Option<u32> {
        self.vertex_array
    }

    /// Program in use
    pub const fn program(&self) -> Option<u32> {
        self.program
    }

    /// Attribute slots enabled on the current vertex array
    pub fn enabled_attributes(&self) -> &[u32] {
        self.vertex_array
            .and_then(|vao| self.enabled_attributes.get(&vao))
            .map_or(&[][..], Vec::as_slice)
    }

    pub(crate) fn set_buffer(&mut self, target: BufferTarget, buffer: Option<u32>) {
        match target {
            BufferTarget::VertexData => self.vertex_buffer = buffer,
            BufferTarget::IndexData => match buffer {
                Some(id) => {
                    self.element_buffers.insert(self.vertex_array, id);
                }
                None => {
                    self.element_buffers.remove(&self.vertex_array);
                }
            },
        }
    }

    pub(crate) fn set_vertex_array(&mut self, vertex_array: Option<u32>) {
        self.vertex_array = vertex_array;
    }

    pub(crate) fn set_program(&mut self, program: Option<u32>) {
        self.program = program;
    }

    pub(crate) fn enable_attribute(&mut self, slot: u32) {
        if let Some(vao) = self.vertex_array {
            let slots = self.enabled_attributes.entry(vao).or_default();
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
    }

    pub(crate) fn forget_buffer(&mut self, buffer: u32) {
        if self.vertex_buffer == Some(buffer) {
            self.vertex_buffer = None;
        }
        self.element_buffers.retain(|_, id| *id != buffer);
    }

    pub(crate) fn forget_vertex_array(&mut self, vertex_array: u32) {
        if self.vertex_array == Some(vertex_array) {
            self.vertex_array = None;
        }
        self.element_buffers.remove(&Some(vertex_array));
        self.enabled_attributes.remove(&vertex_array);
    }

    pub(crate) fn forget_program(&mut self, program: u32) {
        if self.program == Some(program) {
            self.program = None;
        }
    }
}

/// A GL API plus the binding state it is in
pub struct GlContext<A: GlApi> {
    api: A,
    bindings: BindingState,
    affinity: ThreadAffinity,
}

impl<A: GlApi> GlContext<A> {
    /// Wrap an API whose context is current on the calling thread
    pub fn new(api: A) -> Self {
        Self {
            api,
            bindings: BindingState::default(),
            affinity: ThreadAffinity::current(),
        }
    }

    /// The wrapped API, read-only
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Current bindings
    pub const fn bindings(&self) -> &BindingState {
        &self.bindings
    }

    /// Thread the context belongs to
    pub const fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }

    /// `GL_VERSION` of the underlying context
    pub fn version(&self) -> String {
        self.api.version()
    }

    /// Unwrap the API
    pub fn into_api(self) -> A {
        self.api
    }

    /// Mutable access to the API and bindings, after the thread check
    pub(crate) fn parts(&mut self) -> GledResult<(&mut A, &mut BindingState)> {
        self.affinity.check()?;
        Ok((&mut self.api, &mut self.bindings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_buffer_follows_vertex_array() {
        let mut state = BindingState::default();
        state.set_vertex_array(Some(1));
        state.set_buffer(BufferTarget::IndexData, Some(7));
        assert_eq!(state.element_buffer(), Some(7));

        state.set_vertex_array(Some(2));
        assert_eq!(state.element_buffer(), None);

        state.set_vertex_array(Some(1));
        assert_eq!(state.buffer(BufferTarget::IndexData), Some(7));
    }

    #[test]
    fn test_vertex_buffer_is_global() {
        let mut state = BindingState::default();
        state.set_buffer(BufferTarget::VertexData, Some(3));
        state.set_vertex_array(Some(9));
        assert_eq!(state.vertex_buffer(), Some(3));
    }

    #[test]
    fn test_forget_clears_bindings() {
        let mut state = BindingState::default();
        state.set_vertex_array(Some(1));
        state.set_buffer(BufferTarget::VertexData, Some(4));
        state.set_buffer(BufferTarget::IndexData, Some(5));
        state.enable_attribute(0);

        state.forget_buffer(4);
        state.forget_buffer(5);
        assert_eq!(state.vertex_buffer(), None);
        assert_eq!(state.element_buffer(), None);

        state.forget_vertex_array(1);
        assert_eq!(state.vertex_array(), None);
        assert!(state.enabled_attributes().is_empty());
    }

    #[test]
    fn test_affinity_rejects_other_threads() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.check().is_ok());

        let result = thread::spawn(move || affinity.check()).join().unwrap();
        assert!(matches!(result, Err(WindowError::WrongThread)));
    }
}
