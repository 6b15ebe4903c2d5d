//! In-memory GL implementation that records what it is asked to do

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::CStr;

use crate::render::opengl::{
    BufferTarget, BufferUsage, ClearMask, GlApi, ProgramParameter, ShaderParameter, ShaderStage,
};

/// One recorded state-changing call
///
/// Parameter and info-log queries are not recorded here; see
/// [`RecordingGl::info_log_reads`].
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    /// `glClear`
    Clear(ClearMask),
    /// `glClearColor`
    ClearColor([f32; 4]),
    /// `glCreateShader`
    CreateShader {
        /// Returned name
        id: u32,
        /// Requested stage
        stage: ShaderStage,
    },
    /// `glShaderSource`
    ShaderSource {
        /// Shader name
        id: u32,
        /// Source text without the terminator
        source: String,
    },
    /// `glCompileShader`
    CompileShader(u32),
    /// `glDeleteShader`
    DeleteShader(u32),
    /// `glCreateProgram`
    CreateProgram(u32),
    /// `glAttachShader`
    AttachShader {
        /// Program name
        program: u32,
        /// Shader name
        shader: u32,
    },
    /// `glDetachShader`
    DetachShader {
        /// Program name
        program: u32,
        /// Shader name
        shader: u32,
    },
    /// `glLinkProgram`
    LinkProgram(u32),
    /// `glUseProgram`
    UseProgram(u32),
    /// `glDeleteProgram`
    DeleteProgram(u32),
    /// `glGenBuffers`
    GenBuffer(u32),
    /// `glBindBuffer`
    BindBuffer {
        /// Binding point
        target: BufferTarget,
        /// Buffer name, 0 to unbind
        id: u32,
    },
    /// `glBufferData`
    BufferData {
        /// Binding point
        target: BufferTarget,
        /// Uploaded size in bytes
        bytes: usize,
        /// Usage hint
        usage: BufferUsage,
    },
    /// `glDeleteBuffers`
    DeleteBuffer(u32),
    /// `glGenVertexArrays`
    GenVertexArray(u32),
    /// `glBindVertexArray`
    BindVertexArray(u32),
    /// `glDeleteVertexArrays`
    DeleteVertexArray(u32),
    /// `glVertexAttribPointer`
    VertexAttribPointer {
        /// Attribute slot
        slot: u32,
        /// Components per vertex
        components: i32,
        /// Byte stride
        stride: i32,
        /// Byte offset
        offset: usize,
    },
    /// `glEnableVertexAttribArray`
    EnableVertexAttribArray(u32),
    /// `glDrawElements`
    DrawElements {
        /// Index count
        count: i32,
        /// Byte offset into the element buffer
        offset: usize,
    },
    /// `glDrawArrays`
    DrawArrays {
        /// First vertex
        first: i32,
        /// Vertex count
        count: i32,
    },
}

#[derive(Debug, Default)]
struct FakeShader {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct FakeProgram {
    attached: Vec<u32>,
    attach_history: Vec<u32>,
    linked: bool,
    log: String,
}

/// [`GlApi`] that keeps every call in memory
///
/// Shaders compile unless a compile error was configured for their stage.
/// Programs link unless a link error was configured, nothing is attached,
/// or an attached shader did not compile.
#[derive(Debug)]
pub struct RecordingGl {
    next_id: u32,
    calls: Vec<GlCall>,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    compile_errors: HashMap<ShaderStage, String>,
    link_error: Option<String>,
    log_reads: RefCell<Vec<(u32, usize)>>,
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingGl {
    /// A fresh recorder; object names start at 1
    pub fn new() -> Self {
        Self {
            next_id: 1,
            calls: Vec::new(),
            shaders: HashMap::new(),
            programs: HashMap::new(),
            compile_errors: HashMap::new(),
            link_error: None,
            log_reads: RefCell::new(Vec::new()),
        }
    }

    /// Make every shader of `stage` fail to compile with `log`
    #[must_use]
    pub fn with_compile_error(mut self, stage: ShaderStage, log: &str) -> Self {
        self.compile_errors.insert(stage, log.to_string());
        self
    }

    /// Make every link fail with `log`
    #[must_use]
    pub fn with_link_error(mut self, log: &str) -> Self {
        self.link_error = Some(log.to_string());
        self
    }

    /// Every recorded call, oldest first
    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    /// Number of recorded calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Last source given to shader `id`
    pub fn source_of(&self, id: u32) -> Option<&str> {
        self.shaders.get(&id).map(|shader| shader.source.as_str())
    }

    /// `(object, buffer length)` for every info log read
    pub fn info_log_reads(&self) -> Vec<(u32, usize)> {
        self.log_reads.borrow().clone()
    }

    /// Names returned by `create_shader`, in order
    pub fn created_shaders(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GlCall::CreateShader { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// How many times shader `id` was deleted
    pub fn deletions_of_shader(&self, id: u32) -> usize {
        self.count(|call| *call == GlCall::DeleteShader(id))
    }

    /// Shaders attached to `program`, in attach order, including detached ones
    pub fn attached_order(&self, program: u32) -> Vec<u32> {
        self.programs
            .get(&program)
            .map(|program| program.attach_history.clone())
            .unwrap_or_default()
    }

    /// Size of the most recent upload to `target`
    pub fn uploaded_bytes(&self, target: BufferTarget) -> Option<usize> {
        self.calls.iter().rev().find_map(|call| match call {
            GlCall::BufferData { target: t, bytes, .. } if *t == target => Some(*bytes),
            _ => None,
        })
    }

    /// Every draw call, oldest first
    pub fn draw_calls(&self) -> Vec<GlCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, GlCall::DrawElements { .. } | GlCall::DrawArrays { .. }))
            .cloned()
            .collect()
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn read_log(&self, id: u32, log: &str, buffer: &mut [u8]) -> usize {
        self.log_reads.borrow_mut().push((id, buffer.len()));
        let Some(room) = buffer.len().checked_sub(1) else {
            return 0;
        };
        let written = log.len().min(room);
        buffer[..written].copy_from_slice(&log.as_bytes()[..written]);
        buffer[written] = 0;
        written
    }

    fn reported_len(log: &str) -> i32 {
        if log.is_empty() {
            0
        } else {
            i32::try_from(log.len() + 1).unwrap_or(i32::MAX)
        }
    }
}

impl GlApi for RecordingGl {
    fn version(&self) -> String {
        "3.3.0 (recording)".to_string()
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.calls.push(GlCall::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&mut self, mask: ClearMask) {
        self.calls.push(GlCall::Clear(mask));
    }

    fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        let id = self.allocate();
        self.shaders.insert(
            id,
            FakeShader {
                stage: Some(stage),
                ..FakeShader::default()
            },
        );
        self.calls.push(GlCall::CreateShader { id, stage });
        id
    }

    fn shader_source(&mut self, shader: u32, source: &CStr) {
        let source = source.to_string_lossy().into_owned();
        self.shaders.entry(shader).or_default().source.clone_from(&source);
        self.calls.push(GlCall::ShaderSource { id: shader, source });
    }

    fn compile_shader(&mut self, shader: u32) {
        let entry = self.shaders.entry(shader).or_default();
        match entry.stage.and_then(|stage| self.compile_errors.get(&stage)) {
            Some(log) => {
                entry.compiled = false;
                entry.log.clone_from(log);
            }
            None => {
                entry.compiled = true;
                entry.log.clear();
            }
        }
        self.calls.push(GlCall::CompileShader(shader));
    }

    fn shader_parameter(&self, shader: u32, parameter: ShaderParameter) -> i32 {
        let Some(entry) = self.shaders.get(&shader) else {
            return 0;
        };
        match parameter {
            ShaderParameter::CompileStatus => i32::from(entry.compiled),
            ShaderParameter::ShaderType => entry
                .stage
                .and_then(|stage| i32::try_from(stage.gl_enum()).ok())
                .unwrap_or(0),
            ShaderParameter::InfoLogLength => Self::reported_len(&entry.log),
        }
    }

    fn shader_info_log(&self, shader: u32, buffer: &mut [u8]) -> usize {
        let log = self.shaders.get(&shader).map_or("", |entry| entry.log.as_str());
        self.read_log(shader, log, buffer)
    }

    fn delete_shader(&mut self, shader: u32) {
        self.calls.push(GlCall::DeleteShader(shader));
    }

    fn create_program(&mut self) -> u32 {
        let id = self.allocate();
        self.programs.insert(id, FakeProgram::default());
        self.calls.push(GlCall::CreateProgram(id));
        id
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        let entry = self.programs.entry(program).or_default();
        entry.attached.push(shader);
        entry.attach_history.push(shader);
        self.calls.push(GlCall::AttachShader { program, shader });
    }

    fn detach_shader(&mut self, program: u32, shader: u32) {
        if let Some(entry) = self.programs.get_mut(&program) {
            entry.attached.retain(|id| *id != shader);
        }
        self.calls.push(GlCall::DetachShader { program, shader });
    }

    fn link_program(&mut self, program: u32) {
        let entry = self.programs.entry(program).or_default();
        let uncompiled = entry
            .attached
            .iter()
            .find(|id| !self.shaders.get(*id).is_some_and(|shader| shader.compiled));

        let failure = if let Some(log) = &self.link_error {
            Some(log.clone())
        } else if entry.attached.is_empty() {
            Some("error: no shaders attached".to_string())
        } else {
            uncompiled.map(|id| format!("error: shader {id} is not compiled"))
        };

        entry.linked = failure.is_none();
        entry.log = failure.unwrap_or_default();
        self.calls.push(GlCall::LinkProgram(program));
    }

    fn program_parameter(&self, program: u32, parameter: ProgramParameter) -> i32 {
        let Some(entry) = self.programs.get(&program) else {
            return 0;
        };
        match parameter {
            ProgramParameter::LinkStatus => i32::from(entry.linked),
            ProgramParameter::InfoLogLength => Self::reported_len(&entry.log),
        }
    }

    fn program_info_log(&self, program: u32, buffer: &mut [u8]) -> usize {
        let log = self.programs.get(&program).map_or("", |entry| entry.log.as_str());
        self.read_log(program, log, buffer)
    }

    fn use_program(&mut self, program: u32) {
        self.calls.push(GlCall::UseProgram(program));
    }

    fn delete_program(&mut self, program: u32) {
        self.calls.push(GlCall::DeleteProgram(program));
    }

    fn gen_buffer(&mut self) -> u32 {
        let id = self.allocate();
        self.calls.push(GlCall::GenBuffer(id));
        id
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: u32) {
        self.calls.push(GlCall::BindBuffer { target, id: buffer });
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.calls.push(GlCall::BufferData {
            target,
            bytes: data.len(),
            usage,
        });
    }

    fn delete_buffer(&mut self, buffer: u32) {
        self.calls.push(GlCall::DeleteBuffer(buffer));
    }

    fn gen_vertex_array(&mut self) -> u32 {
        let id = self.allocate();
        self.calls.push(GlCall::GenVertexArray(id));
        id
    }

    fn bind_vertex_array(&mut self, vertex_array: u32) {
        self.calls.push(GlCall::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&mut self, vertex_array: u32) {
        self.calls.push(GlCall::DeleteVertexArray(vertex_array));
    }

    fn vertex_attrib_pointer(&mut self, slot: u32, components: i32, stride: i32, offset: usize) {
        self.calls.push(GlCall::VertexAttribPointer {
            slot,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&mut self, slot: u32) {
        self.calls.push(GlCall::EnableVertexAttribArray(slot));
    }

    fn draw_elements(&mut self, count: i32, offset: usize) {
        self.calls.push(GlCall::DrawElements { count, offset });
    }

    fn draw_arrays(&mut self, first: i32, count: i32) {
        self.calls.push(GlCall::DrawArrays { first, count });
    }
}
