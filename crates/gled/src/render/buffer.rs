//! Buffer and vertex array management
//!
//! Every operation here works on whatever the [`GlContext`] currently has
//! bound, so the call order matters:
//!
//! 1. bind a buffer to a target before uploading to that target;
//! 2. bind a vertex array before configuring attributes;
//! 3. attribute configuration reads the vertex buffer bound *at that moment*,
//!    and the vertex array remembers it; it is not reissued per frame.
//!
//! Out-of-order calls are rejected with a [`GledError`] before anything is
//! sent to the driver.

use crate::render::context::GlContext;
use crate::render::error::{GledError, GledResult};
use crate::render::opengl::{BufferTarget, BufferUsage, GlApi};
use crate::render::handles::{BufferHandle, VertexArrayHandle};

/// Bytes per uploaded element; both `f32` and `u32` are four bytes wide
pub const ELEMENT_SIZE: usize = 4;

/// Allocate a buffer and bind it to `target`
pub fn bind_new_buffer<A: GlApi>(ctx: &mut GlContext<A>, target: BufferTarget) -> GledResult<BufferHandle> {
    let (api, bindings) = ctx.parts()?;
    let id = api.gen_buffer();
    api.bind_buffer(target, id);
    bindings.set_buffer(target, Some(id));
    log::debug!("[BUFFER] Created {target} buffer {id}");
    Ok(BufferHandle::new(id, target))
}

/// Rebind an existing buffer to its target
pub fn bind_buffer<A: GlApi>(ctx: &mut GlContext<A>, buffer: &BufferHandle) -> GledResult<()> {
    let (api, bindings) = ctx.parts()?;
    api.bind_buffer(buffer.target(), buffer.id());
    bindings.set_buffer(buffer.target(), Some(buffer.id()));
    Ok(())
}

/// Allocate a vertex array and bind it
pub fn bind_new_vertex_array<A: GlApi>(ctx: &mut GlContext<A>) -> GledResult<VertexArrayHandle> {
    let (api, bindings) = ctx.parts()?;
    let id = api.gen_vertex_array();
    api.bind_vertex_array(id);
    bindings.set_vertex_array(Some(id));
    log::debug!("[BUFFER] Created vertex array {id}");
    Ok(VertexArrayHandle::new(id))
}

/// Bind an existing vertex array
pub fn bind_vertex_array<A: GlApi>(ctx: &mut GlContext<A>, vertex_array: &VertexArrayHandle) -> GledResult<()> {
    let (api, bindings) = ctx.parts()?;
    api.bind_vertex_array(vertex_array.id());
    bindings.set_vertex_array(Some(vertex_array.id()));
    Ok(())
}

/// Unbind the current vertex array
pub fn unbind_vertex_array<A: GlApi>(ctx: &mut GlContext<A>) -> GledResult<()> {
    let (api, bindings) = ctx.parts()?;
    api.bind_vertex_array(0);
    bindings.set_vertex_array(None);
    Ok(())
}

/// Copy floats into the buffer bound to `target`, returning the byte size
pub fn upload_floats<A: GlApi>(
    ctx: &mut GlContext<A>,
    target: BufferTarget,
    data: &[f32],
    usage: BufferUsage,
) -> GledResult<usize> {
    upload_bytes(ctx, target, bytemuck::cast_slice(data), usage)
}

/// Copy indices into the buffer bound to `target`, returning the byte size
pub fn upload_indices<A: GlApi>(
    ctx: &mut GlContext<A>,
    target: BufferTarget,
    data: &[u32],
    usage: BufferUsage,
) -> GledResult<usize> {
    upload_bytes(ctx, target, bytemuck::cast_slice(data), usage)
}

fn upload_bytes<A: GlApi>(
    ctx: &mut GlContext<A>,
    target: BufferTarget,
    bytes: &[u8],
    usage: BufferUsage,
) -> GledResult<usize> {
    let (api, bindings) = ctx.parts()?;
    let Some(buffer) = bindings.buffer(target) else {
        return Err(GledError::NothingBound(target));
    };
    api.buffer_data(target, bytes, usage);
    log::debug!("[BUFFER] Uploaded {} bytes to {target} buffer {buffer}", bytes.len());
    Ok(bytes.len())
}

/// Describe a float attribute on the bound vertex array and enable it
///
/// `stride` and `offset` are in bytes. The data comes from the vertex buffer
/// bound when this is called.
pub fn configure_attribute<A: GlApi>(
    ctx: &mut GlContext<A>,
    slot: u32,
    components_per_vertex: i32,
    stride: i32,
    offset: usize,
) -> GledResult<()> {
    if !(1..=4).contains(&components_per_vertex) {
        return Err(GledError::InvalidAttribute {
            slot,
            components: components_per_vertex,
        });
    }

    let (api, bindings) = ctx.parts()?;
    let Some(vertex_array) = bindings.vertex_array() else {
        return Err(GledError::NoVertexArrayBound);
    };
    let Some(vertex_buffer) = bindings.vertex_buffer() else {
        return Err(GledError::NothingBound(BufferTarget::VertexData));
    };

    api.vertex_attrib_pointer(slot, components_per_vertex, stride, offset);
    api.enable_vertex_attrib_array(slot);
    bindings.enable_attribute(slot);
    log::debug!(
        "[BUFFER] Attribute {slot} on vertex array {vertex_array}: {components_per_vertex} floats, stride {stride}, offset {offset}, from buffer {vertex_buffer}"
    );
    Ok(())
}

/// Delete a buffer object
pub fn delete_buffer<A: GlApi>(ctx: &mut GlContext<A>, buffer: BufferHandle) -> GledResult<()> {
    let (api, bindings) = ctx.parts()?;
    api.delete_buffer(buffer.id());
    bindings.forget_buffer(buffer.id());
    Ok(())
}

/// Delete a vertex array object
pub fn delete_vertex_array<A: GlApi>(ctx: &mut GlContext<A>, vertex_array: VertexArrayHandle) -> GledResult<()> {
    let (api, bindings) = ctx.parts()?;
    api.delete_vertex_array(vertex_array.id());
    bindings.forget_vertex_array(vertex_array.id());
    Ok(())
}
