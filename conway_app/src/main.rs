//! Conway's Game of Life window
//!
//! Opens an 800x800 window, compiles the pass-through shaders and draws an
//! orange square every frame until the window is closed.

mod shapes;

use gled::foundation::logging;
use gled::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting Conway's Game of Life");

    let config = AppConfig::load()?;
    if let Err(message) = config.shaders.validate() {
        log::warn!("{message}");
    }

    let mut window = Window::initialize(&config.window.title, config.window.width, config.window.height);
    let mut ctx = window.load_gl()?;

    let vertex = shader::compile_from_file(&mut ctx, &config.shaders.vertex_shader_path, ShaderStage::Vertex);
    let fragment = shader::compile_from_file(&mut ctx, &config.shaders.fragment_shader_path, ShaderStage::Fragment);
    let program = program::link(&mut ctx, [vertex, fragment]);
    window.set_program(program)?;

    let geometry = geometry::upload_shape(&mut ctx, &shapes::SQUARE, BufferUsage::Static)?;

    let stats = render_loop::run(&mut window, &mut ctx, &program, &geometry.vertex_array, &geometry.draw)?;
    log::info!("Closed after {} frames", stats.frames);

    geometry.release(&mut ctx)?;
    program::delete_program(&mut ctx, program)?;
    Ok(())
}
