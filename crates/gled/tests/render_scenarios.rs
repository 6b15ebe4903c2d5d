//! End-to-end pipeline runs against the recording GL and a headless window

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use gled::prelude::*;
use gled::render::render_loop::{CLEAR_COLOR, CLEAR_MASK};
use gled::testing::{GlCall, HeadlessWindow, RecordingGl};

const SQUARE_VERTICES: [f32; 12] = [
    0.5, 0.5, 0.0, //
    0.5, -0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    -0.5, 0.5, 0.0,
];
const SQUARE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

fn shader_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../resources/shaders")
        .join(name)
}

fn pass_through_program(ctx: &mut GlContext<RecordingGl>) -> ProgramHandle {
    let vertex = shader::compile_from_file(ctx, shader_path("basic.vert"), ShaderStage::Vertex);
    let fragment = shader::compile_from_file(ctx, shader_path("basic_orange.frag"), ShaderStage::Fragment);
    program::link(ctx, [vertex, fragment])
}

#[test]
fn test_indexed_square_for_sixty_frames() {
    let mut ctx = GlContext::new(RecordingGl::new());
    let program = pass_through_program(&mut ctx);
    let geometry = geometry::upload_shape(
        &mut ctx,
        &Shape::new(&SQUARE_VERTICES, &SQUARE_INDICES),
        BufferUsage::Static,
    )
    .unwrap();
    let mut window = HeadlessWindow::closing_after(60);

    let stats = render_loop::run(&mut window, &mut ctx, &program, &geometry.vertex_array, &geometry.draw).unwrap();

    assert_eq!(stats.frames, 60);
    assert_eq!(stats.draw_calls, 60);
    assert_eq!(window.presented(), 60);

    let draws = ctx.api().draw_calls();
    assert_eq!(draws.len(), 60);
    assert!(draws.iter().all(|draw| *draw == GlCall::DrawElements { count: 6, offset: 0 }));
    assert_eq!(ctx.api().count(|call| *call == GlCall::Clear(CLEAR_MASK)), 60);
    assert_eq!(ctx.api().count(|call| *call == GlCall::ClearColor(CLEAR_COLOR)), 1);
}

#[test]
fn test_malformed_fragment_shader_aborts_before_drawing() {
    let compiler_log = "0:4(1): error: syntax error, unexpected end of file";
    let mut ctx = GlContext::new(RecordingGl::new().with_compile_error(ShaderStage::Fragment, compiler_log));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let program = pass_through_program(&mut ctx);
        let geometry = geometry::upload_shape(
            &mut ctx,
            &Shape::new(&SQUARE_VERTICES, &SQUARE_INDICES),
            BufferUsage::Static,
        )
        .unwrap();
        let mut window = HeadlessWindow::closing_after(1);
        render_loop::run(&mut window, &mut ctx, &program, &geometry.vertex_array, &geometry.draw).unwrap();
    }));

    let payload = outcome.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(message.contains("FRAGMENT_SHADER"), "panic message: {message}");
    assert!(message.contains(compiler_log), "panic message: {message}");
    assert!(ctx.api().draw_calls().is_empty());
}

#[test]
fn test_unindexed_vertices_draw_in_order() {
    let mut ctx = GlContext::new(RecordingGl::new());
    let program = pass_through_program(&mut ctx);
    let geometry = geometry::upload_shape(&mut ctx, &Shape::new(&SQUARE_VERTICES, &[]), BufferUsage::Static).unwrap();
    let mut window = HeadlessWindow::closing_after(3);

    render_loop::run(&mut window, &mut ctx, &program, &geometry.vertex_array, &geometry.draw).unwrap();

    assert_eq!(geometry.draw, DrawSpec::Ordered { float_count: 12, components_per_vertex: 3 });
    let draws = ctx.api().draw_calls();
    assert_eq!(draws.len(), 3);
    assert!(draws.iter().all(|draw| *draw == GlCall::DrawArrays { first: 0, count: 4 }));
}

#[test]
fn test_shader_files_reach_the_compiler() {
    let mut ctx = GlContext::new(RecordingGl::new());
    let vertex = shader::compile_from_file(&mut ctx, shader_path("basic.vert"), ShaderStage::Vertex);

    let source = ctx.api().source_of(vertex.id()).unwrap();
    assert!(source.starts_with("#version 330 core"));
    assert!(source.contains("layout (location = 0)"));
}

#[test]
fn test_teardown_releases_everything() {
    let mut ctx = GlContext::new(RecordingGl::new());
    let program = pass_through_program(&mut ctx);
    let geometry = geometry::upload_shape(
        &mut ctx,
        &Shape::new(&SQUARE_VERTICES, &SQUARE_INDICES),
        BufferUsage::Static,
    )
    .unwrap();

    geometry.release(&mut ctx).unwrap();
    program::delete_program(&mut ctx, program).unwrap();

    assert_eq!(ctx.api().count(|call| matches!(call, GlCall::DeleteBuffer(_))), 2);
    assert_eq!(ctx.api().count(|call| matches!(call, GlCall::DeleteProgram(_))), 1);
    assert_eq!(ctx.bindings().vertex_array(), None);
}
