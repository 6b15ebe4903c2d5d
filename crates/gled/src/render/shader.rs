//! GLSL shader compilation
//!
//! [`compile_from_source`] and [`compile_from_file`] abort the process with
//! the stage and the full compiler log when a shader does not compile: a
//! pipeline with a broken shader has nothing it can fall back to. The
//! `try_` variants return the same failures as [`GledError`] values.

use std::ffi::CString;
use std::path::Path;

use crate::assets::load_shader_source;
use crate::render::context::GlContext;
use crate::render::diagnostics;
use crate::render::error::{fatal, GledError, GledResult};
use crate::render::opengl::{GlApi, ShaderStage};
use crate::render::handles::ShaderHandle;

/// Compile GLSL source for `stage`, or return the compiler's complaint
///
/// A shader that fails to compile is deleted before the error is returned.
pub fn try_compile_from_source<A: GlApi>(
    ctx: &mut GlContext<A>,
    source: &str,
    stage: ShaderStage,
) -> GledResult<ShaderHandle> {
    let c_source = CString::new(source)?;
    let (api, _) = ctx.parts()?;

    let shader = api.create_shader(stage);
    api.shader_source(shader, &c_source);
    api.compile_shader(shader);

    let status = diagnostics::shader_status(api, shader);
    if !status.compiled {
        let log = diagnostics::shader_log(api, shader);
        api.delete_shader(shader);
        return Err(GledError::Compile {
            stage: status.stage_kind(),
            log,
        });
    }

    log::info!("Compiled shader {} successfully", status.stage_kind());
    Ok(ShaderHandle::new(shader, stage))
}

/// Read a GLSL file and compile it for `stage`
pub fn try_compile_from_file<A: GlApi, P: AsRef<Path>>(
    ctx: &mut GlContext<A>,
    path: P,
    stage: ShaderStage,
) -> GledResult<ShaderHandle> {
    let source = load_shader_source(path)?;
    try_compile_from_source(ctx, &source, stage)
}

/// Compile GLSL source for `stage`
///
/// # Panics
/// Panics with the stage and compiler log if compilation fails.
pub fn compile_from_source<A: GlApi>(ctx: &mut GlContext<A>, source: &str, stage: ShaderStage) -> ShaderHandle {
    try_compile_from_source(ctx, source, stage)
        .unwrap_or_else(|err| fatal("Shader compilation failed", &err))
}

/// Read a GLSL file and compile it for `stage`
///
/// # Panics
/// Panics if the file cannot be read or the shader does not compile.
pub fn compile_from_file<A: GlApi, P: AsRef<Path>>(
    ctx: &mut GlContext<A>,
    path: P,
    stage: ShaderStage,
) -> ShaderHandle {
    try_compile_from_file(ctx, path, stage)
        .unwrap_or_else(|err| fatal("Shader compilation failed", &err))
}
