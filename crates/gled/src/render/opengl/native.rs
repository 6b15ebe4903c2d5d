//! [`GlApi`] backed by the driver's function pointers
//!
//! All calls go straight to the `gl` crate's loaded entry points. The type is
//! `!Send`, so it cannot leave the thread whose context it was loaded on.

use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::ptr;

use gl::types::{GLchar, GLint, GLsizei, GLsizeiptr, GLuint};

use super::api::{BufferTarget, BufferUsage, ClearMask, GlApi, ProgramParameter, ShaderParameter, ShaderStage};

/// Function-pointer backed GL implementation
pub struct NativeGl {
    _not_send: PhantomData<*const ()>,
}

impl NativeGl {
    /// Load GL entry points through `loader`
    ///
    /// The context the pointers belong to must be current on the calling
    /// thread for as long as the returned value is used.
    pub fn load<F>(mut loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(|symbol| loader(symbol));
        Self { _not_send: PhantomData }
    }
}

fn log_capacity(buffer: &[u8]) -> GLsizei {
    GLsizei::try_from(buffer.len()).unwrap_or(GLsizei::MAX)
}

impl GlApi for NativeGl {
    fn version(&self) -> String {
        unsafe {
            let raw = gl::GetString(gl::VERSION);
            if raw.is_null() {
                return "unknown".to_string();
            }
            CStr::from_ptr(raw.cast()).to_string_lossy().into_owned()
        }
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { gl::ClearColor(red, green, blue, alpha) }
    }

    fn clear(&mut self, mask: ClearMask) {
        unsafe { gl::Clear(mask.bits()) }
    }

    fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn shader_source(&mut self, shader: u32, source: &CStr) {
        let sources = [source.as_ptr()];
        // A null length array means every string is NUL-terminated.
        unsafe { gl::ShaderSource(shader, 1, sources.as_ptr(), ptr::null()) }
    }

    fn compile_shader(&mut self, shader: u32) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_parameter(&self, shader: u32, parameter: ShaderParameter) -> i32 {
        let mut value: GLint = 0;
        unsafe { gl::GetShaderiv(shader, parameter.gl_enum(), &mut value) };
        value
    }

    fn shader_info_log(&self, shader: u32, buffer: &mut [u8]) -> usize {
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                log_capacity(buffer),
                &mut written,
                buffer.as_mut_ptr().cast::<GLchar>(),
            );
        }
        usize::try_from(written).unwrap_or(0)
    }

    fn delete_shader(&mut self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&mut self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&mut self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&mut self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_parameter(&self, program: u32, parameter: ProgramParameter) -> i32 {
        let mut value: GLint = 0;
        unsafe { gl::GetProgramiv(program, parameter.gl_enum(), &mut value) };
        value
    }

    fn program_info_log(&self, program: u32, buffer: &mut [u8]) -> usize {
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                log_capacity(buffer),
                &mut written,
                buffer.as_mut_ptr().cast::<GLchar>(),
            );
        }
        usize::try_from(written).unwrap_or(0)
    }

    fn use_program(&mut self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn delete_program(&mut self, program: u32) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn gen_buffer(&mut self) -> u32 {
        let mut buffer: GLuint = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: u32) {
        unsafe { gl::BindBuffer(target.gl_enum(), buffer) }
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        // Slice lengths never exceed isize::MAX.
        let size = data.len() as GLsizeiptr;
        unsafe {
            gl::BufferData(
                target.gl_enum(),
                size,
                data.as_ptr().cast::<c_void>(),
                usage.gl_enum(),
            );
        }
    }

    fn delete_buffer(&mut self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) }
    }

    fn gen_vertex_array(&mut self) -> u32 {
        let mut vertex_array: GLuint = 0;
        unsafe { gl::GenVertexArrays(1, &mut vertex_array) };
        vertex_array
    }

    fn bind_vertex_array(&mut self, vertex_array: u32) {
        unsafe { gl::BindVertexArray(vertex_array) }
    }

    fn delete_vertex_array(&mut self, vertex_array: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vertex_array) }
    }

    fn vertex_attrib_pointer(&mut self, slot: u32, components: i32, stride: i32, offset: usize) {
        // With a buffer bound the pointer argument is a byte offset into it.
        unsafe {
            gl::VertexAttribPointer(
                slot,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
        }
    }

    fn enable_vertex_attrib_array(&mut self, slot: u32) {
        unsafe { gl::EnableVertexAttribArray(slot) }
    }

    fn draw_elements(&mut self, count: i32, offset: usize) {
        unsafe { gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, offset as *const c_void) }
    }

    fn draw_arrays(&mut self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) }
    }
}
