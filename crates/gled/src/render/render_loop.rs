//! The per-frame render loop
//!
//! One iteration per displayed frame, strictly in this order:
//!
//! 1. clear colour and depth
//! 2. poll window events (the close flag is updated here)
//! 3. activate the program
//! 4. bind the vertex array
//! 5. issue one draw call
//! 6. present
//!
//! The loop ends only when the window reports its close flag. There is no
//! frame pacing here; `present` may block on vsync inside the windowing
//! library.

use crate::render::buffer;
use crate::render::context::GlContext;
use crate::render::error::{GledError, GledResult};
use crate::render::geometry::DrawSpec;
use crate::render::opengl::{ClearMask, GlApi};
use crate::render::handles::{ProgramHandle, VertexArrayHandle};
use crate::render::program;
use crate::render::window::WindowBackend;

/// Background colour written by every clear
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Planes cleared at the start of every frame
pub const CLEAR_MASK: ClearMask = ClearMask::COLOR.union(ClearMask::DEPTH);

/// Counters reported when the loop exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames presented
    pub frames: u64,
    /// Draw calls issued
    pub draw_calls: u64,
}

/// Draw `vertex_array` with `program` every frame until the window closes
pub fn run<W, A>(
    window: &mut W,
    ctx: &mut GlContext<A>,
    program: &ProgramHandle,
    vertex_array: &VertexArrayHandle,
    draw: &DrawSpec,
) -> GledResult<FrameStats>
where
    W: WindowBackend + ?Sized,
    A: GlApi,
{
    log::info!("Entering render loop: {draw:?}");
    let [red, green, blue, alpha] = CLEAR_COLOR;
    ctx.parts()?.0.clear_color(red, green, blue, alpha);

    let mut stats = FrameStats::default();
    while !window.should_close() {
        clear(ctx)?;
        window.poll_events();
        render_frame(ctx, program, vertex_array, draw)?;
        stats.draw_calls += 1;
        window.present()?;
        stats.frames += 1;
    }

    log::info!("Render loop finished after {} frames", stats.frames);
    Ok(stats)
}

/// Clear the colour and depth buffers
pub fn clear<A: GlApi>(ctx: &mut GlContext<A>) -> GledResult<()> {
    ctx.parts()?.0.clear(CLEAR_MASK);
    Ok(())
}

/// Activate `program`, bind `vertex_array` and issue one draw call
pub fn render_frame<A: GlApi>(
    ctx: &mut GlContext<A>,
    program: &ProgramHandle,
    vertex_array: &VertexArrayHandle,
    draw: &DrawSpec,
) -> GledResult<()> {
    program::use_program(ctx, program)?;
    buffer::bind_vertex_array(ctx, vertex_array)?;
    issue_draw(ctx, draw)
}

/// Issue one draw call against the current bindings
pub fn issue_draw<A: GlApi>(ctx: &mut GlContext<A>, draw: &DrawSpec) -> GledResult<()> {
    let count = draw.gl_count()?;
    let (api, bindings) = ctx.parts()?;

    if bindings.program().is_none() {
        return Err(GledError::NoProgramInUse);
    }
    if bindings.vertex_array().is_none() {
        return Err(GledError::NoVertexArrayBound);
    }

    match draw {
        DrawSpec::Indexed { .. } => {
            if bindings.element_buffer().is_none() {
                return Err(GledError::NoElementBuffer);
            }
            api.draw_elements(count, 0);
        }
        DrawSpec::Ordered { .. } => api.draw_arrays(0, count),
    }
    log::trace!("Draw call: {count} vertices");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::geometry::{upload_shape, Shape};
    use crate::render::opengl::{BufferUsage, ShaderStage};
    use crate::render::shader::compile_from_source;
    use crate::testing::{GlCall, HeadlessWindow, RecordingGl};

    const TRIANGLE: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];

    fn linked_program(ctx: &mut GlContext<RecordingGl>) -> ProgramHandle {
        let vertex = compile_from_source(ctx, "void main() {}", ShaderStage::Vertex);
        let fragment = compile_from_source(ctx, "void main() {}", ShaderStage::Fragment);
        program::link(ctx, [vertex, fragment])
    }

    #[test]
    fn test_frame_order() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let program = linked_program(&mut ctx);
        let geometry = upload_shape(&mut ctx, &Shape::new(&TRIANGLE, &[]), BufferUsage::Static).unwrap();
        let mut window = HeadlessWindow::closing_after(1);

        let setup_calls = ctx.api().calls().len();
        run(&mut window, &mut ctx, &program, &geometry.vertex_array, &geometry.draw).unwrap();

        let frame = &ctx.api().calls()[setup_calls..];
        assert_eq!(
            frame,
            &[
                GlCall::ClearColor(CLEAR_COLOR),
                GlCall::Clear(CLEAR_MASK),
                GlCall::UseProgram(program.id()),
                GlCall::BindVertexArray(geometry.vertex_array.id()),
                GlCall::DrawArrays { first: 0, count: 3 },
            ]
        );
        assert_eq!(window.polls(), 1);
        assert_eq!(window.presented(), 1);
    }

    #[test]
    fn test_closed_window_draws_nothing() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let program = linked_program(&mut ctx);
        let geometry = upload_shape(&mut ctx, &Shape::new(&TRIANGLE, &[]), BufferUsage::Static).unwrap();
        let mut window = HeadlessWindow::closing_after(0);

        let stats = run(&mut window, &mut ctx, &program, &geometry.vertex_array, &geometry.draw).unwrap();
        assert_eq!(stats, FrameStats::default());
        assert!(ctx.api().draw_calls().is_empty());
    }

    #[test]
    fn test_indexed_draw_needs_element_buffer() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let program = linked_program(&mut ctx);
        let geometry = upload_shape(&mut ctx, &Shape::new(&TRIANGLE, &[]), BufferUsage::Static).unwrap();

        let err = render_frame(&mut ctx, &program, &geometry.vertex_array, &DrawSpec::Indexed { index_count: 3 })
            .unwrap_err();
        assert!(matches!(err, GledError::NoElementBuffer));
        assert!(ctx.api().draw_calls().is_empty());
    }

    #[test]
    fn test_draw_without_bindings_rejected() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let draw = DrawSpec::ordered(&TRIANGLE, 3);
        assert!(matches!(issue_draw(&mut ctx, &draw), Err(GledError::NoProgramInUse)));

        let program = linked_program(&mut ctx);
        program::use_program(&mut ctx, &program).unwrap();
        assert!(matches!(issue_draw(&mut ctx, &draw), Err(GledError::NoVertexArrayBound)));
    }
}
