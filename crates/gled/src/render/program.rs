//! Program linking and activation
//!
//! Linking consumes the compiled [`ShaderHandle`]s. Once the link call has
//! returned, whether it succeeded or not, every attached shader is detached
//! and deleted exactly once; the shader objects have no further use.

use crate::render::context::GlContext;
use crate::render::diagnostics;
use crate::render::error::{fatal, GledError, GledResult};
use crate::render::opengl::GlApi;
use crate::render::handles::{ProgramHandle, ShaderHandle};

/// Link `shaders` into a new program, or return the linker's complaint
pub fn try_link<A, I>(ctx: &mut GlContext<A>, shaders: I) -> GledResult<ProgramHandle>
where
    A: GlApi,
    I: IntoIterator<Item = ShaderHandle>,
{
    let shaders: Vec<ShaderHandle> = shaders.into_iter().collect();
    let (api, _) = ctx.parts()?;

    let program = api.create_program();
    for shader in &shaders {
        api.attach_shader(program, shader.id());
    }
    api.link_program(program);

    let failure = (!diagnostics::program_linked(api, program))
        .then(|| diagnostics::program_log(api, program));

    for shader in shaders {
        api.detach_shader(program, shader.id());
        api.delete_shader(shader.id());
    }

    if let Some(log) = failure {
        api.delete_program(program);
        return Err(GledError::Link { log });
    }

    log::info!("Linked program {program} successfully");
    Ok(ProgramHandle::new(program))
}

/// Link `shaders` into a new program
///
/// # Panics
/// Panics with the linker log if linking fails.
pub fn link<A, I>(ctx: &mut GlContext<A>, shaders: I) -> ProgramHandle
where
    A: GlApi,
    I: IntoIterator<Item = ShaderHandle>,
{
    try_link(ctx, shaders).unwrap_or_else(|err| fatal("Program linking failed", &err))
}

/// Select `program` as the active program
pub fn use_program<A: GlApi>(ctx: &mut GlContext<A>, program: &ProgramHandle) -> GledResult<()> {
    let (api, bindings) = ctx.parts()?;
    api.use_program(program.id());
    bindings.set_program(Some(program.id()));
    Ok(())
}

/// Delete a program, uninstalling it first if it is active
pub fn delete_program<A: GlApi>(ctx: &mut GlContext<A>, program: ProgramHandle) -> GledResult<()> {
    let (api, bindings) = ctx.parts()?;
    if bindings.program() == Some(program.id()) {
        api.use_program(0);
    }
    api.delete_program(program.id());
    bindings.forget_program(program.id());
    log::debug!("Deleted program {}", program.id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::opengl::ShaderStage;
    use crate::render::shader::compile_from_source;
    use crate::testing::{GlCall, RecordingGl};

    fn compiled_pair(ctx: &mut GlContext<RecordingGl>) -> [ShaderHandle; 2] {
        [
            compile_from_source(ctx, "void main() {}", ShaderStage::Vertex),
            compile_from_source(ctx, "void main() {}", ShaderStage::Fragment),
        ]
    }

    #[test]
    fn test_link_frees_each_shader_once() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let shaders = compiled_pair(&mut ctx);
        let ids: Vec<u32> = shaders.iter().map(ShaderHandle::id).collect();

        let program = link(&mut ctx, shaders);

        for id in ids {
            assert_eq!(ctx.api().deletions_of_shader(id), 1);
        }
        assert!(ctx.api().calls().contains(&GlCall::LinkProgram(program.id())));
    }

    #[test]
    fn test_shaders_freed_after_link_call() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let shaders = compiled_pair(&mut ctx);
        let program = link(&mut ctx, shaders);

        let calls = ctx.api().calls();
        let link_at = calls
            .iter()
            .position(|call| *call == GlCall::LinkProgram(program.id()))
            .unwrap();
        let first_delete = calls
            .iter()
            .position(|call| matches!(call, GlCall::DeleteShader(_)))
            .unwrap();
        assert!(first_delete > link_at);
    }

    #[test]
    fn test_attach_order_follows_input() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let shaders = compiled_pair(&mut ctx);
        let expected: Vec<u32> = shaders.iter().map(ShaderHandle::id).collect();
        let program = link(&mut ctx, shaders);

        assert_eq!(ctx.api().attached_order(program.id()), expected);
    }

    #[test]
    fn test_link_failure_reports_log_and_frees() {
        let mut ctx = GlContext::new(RecordingGl::new().with_link_error("error: vertex output not consumed"));
        let shaders = compiled_pair(&mut ctx);
        let ids: Vec<u32> = shaders.iter().map(ShaderHandle::id).collect();

        let err = try_link(&mut ctx, shaders).unwrap_err();
        let GledError::Link { log } = err else {
            panic!("expected a link error");
        };
        assert_eq!(log.text(), "error: vertex output not consumed");
        for id in ids {
            assert_eq!(ctx.api().deletions_of_shader(id), 1);
        }
        assert_eq!(ctx.api().count(|call| matches!(call, GlCall::DeleteProgram(_))), 1);
    }

    #[test]
    #[should_panic(expected = "Program linking failed")]
    fn test_fatal_on_link_error() {
        let mut ctx = GlContext::new(RecordingGl::new().with_link_error("bad"));
        let shaders = compiled_pair(&mut ctx);
        link(&mut ctx, shaders);
    }

    #[test]
    fn test_use_program_tracks_binding() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let shaders = compiled_pair(&mut ctx);
        let program = link(&mut ctx, shaders);

        use_program(&mut ctx, &program).unwrap();
        use_program(&mut ctx, &program).unwrap();
        assert_eq!(ctx.bindings().program(), Some(program.id()));
        assert_eq!(ctx.api().count(|call| *call == GlCall::UseProgram(program.id())), 2);

        delete_program(&mut ctx, program).unwrap();
        assert_eq!(ctx.bindings().program(), None);
    }
}
