//! Compile and link diagnostics
//!
//! Status flags and info logs are read back from the driver. The log buffer
//! is always sized to exactly the length the driver reports for the object,
//! never to a guessed fixed size.

use std::fmt;

use crate::render::opengl::{GlApi, ProgramParameter, ShaderParameter, ShaderStage};

/// Compile status of a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderStatus {
    /// Whether the last compile succeeded
    pub compiled: bool,
    /// Stage reported by `GL_SHADER_TYPE`, if recognised
    pub stage: Option<ShaderStage>,
}

impl ShaderStatus {
    /// Stage name for logs, `"UNKNOWN"` for unrecognised types
    pub fn stage_kind(&self) -> &'static str {
        self.stage.map_or("UNKNOWN", ShaderStage::name)
    }
}

/// Info log text read back from the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoLog {
    reported_len: usize,
    text: String,
}

impl InfoLog {
    /// Build a log from a reported length and a filler that writes into a
    /// buffer of exactly that length
    fn read(reported_len: i32, fill: impl FnOnce(&mut [u8]) -> usize) -> Self {
        let reported_len = usize::try_from(reported_len).unwrap_or(0);
        let mut buffer = vec![0u8; reported_len];
        let written = if reported_len == 0 { 0 } else { fill(&mut buffer) };

        buffer.truncate(written.min(reported_len));
        while buffer.last() == Some(&0) {
            buffer.pop();
        }

        Self {
            reported_len,
            text: String::from_utf8_lossy(&buffer).into_owned(),
        }
    }

    /// Length the driver reported, NUL terminator included
    pub const fn reported_len(&self) -> usize {
        self.reported_len
    }

    /// Log text without the terminator
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the driver had nothing to say
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for InfoLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Query compile status and stage of a shader
pub fn shader_status<A: GlApi>(api: &A, shader: u32) -> ShaderStatus {
    let compiled = api.shader_parameter(shader, ShaderParameter::CompileStatus) != 0;
    let stage = u32::try_from(api.shader_parameter(shader, ShaderParameter::ShaderType))
        .ok()
        .and_then(ShaderStage::from_gl_enum);
    ShaderStatus { compiled, stage }
}

/// Read the full info log of a shader
pub fn shader_log<A: GlApi>(api: &A, shader: u32) -> InfoLog {
    let length = api.shader_parameter(shader, ShaderParameter::InfoLogLength);
    InfoLog::read(length, |buffer| api.shader_info_log(shader, buffer))
}

/// Query link status of a program
pub fn program_linked<A: GlApi>(api: &A, program: u32) -> bool {
    api.program_parameter(program, ProgramParameter::LinkStatus) != 0
}

/// Read the full info log of a program
pub fn program_log<A: GlApi>(api: &A, program: u32) -> InfoLog {
    let length = api.program_parameter(program, ProgramParameter::InfoLogLength);
    InfoLog::read(length, |buffer| api.program_info_log(program, buffer))
}
