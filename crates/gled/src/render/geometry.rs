//! Static shapes and their GPU upload
//!
//! A [`Shape`] is a flat table of position floats plus triangle indices.
//! [`upload_shape`] runs the full authoring sequence for it and returns the
//! buffers together with a [`DrawSpec`] whose count is derived from what was
//! actually uploaded.

use crate::render::buffer::{self, ELEMENT_SIZE};
use crate::render::context::GlContext;
use crate::render::error::{GledError, GledResult};
use crate::render::opengl::{BufferTarget, BufferUsage, GlApi};
use crate::render::handles::{BufferHandle, VertexArrayHandle};

/// Floats per vertex position (x, y, z)
pub const POSITION_COMPONENTS: usize = 3;

/// Byte distance between consecutive positions
pub const POSITION_STRIDE: i32 = (POSITION_COMPONENTS * ELEMENT_SIZE) as i32;

/// Shader input slot that receives positions (`layout (location = 0)`)
pub const POSITION_SLOT: u32 = 0;

/// Immutable vertex and index table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape<'a> {
    /// Flat vertex components, [`POSITION_COMPONENTS`] per vertex
    pub vertices: &'a [f32],
    /// Triangle indices into `vertices`; empty for non-indexed shapes
    pub indices: &'a [u32],
}

impl<'a> Shape<'a> {
    /// Create a shape from its tables
    pub const fn new(vertices: &'a [f32], indices: &'a [u32]) -> Self {
        Self { vertices, indices }
    }

    /// Number of whole vertices in the table
    pub const fn vertex_count(&self) -> usize {
        self.vertices.len() / POSITION_COMPONENTS
    }

    /// Whether the shape is drawn through an index buffer
    pub const fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

/// How many vertices one draw call consumes, and how they are addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSpec {
    /// `glDrawElements` over the bound element buffer
    Indexed {
        /// Number of `u32` indices
        index_count: usize,
    },
    /// `glDrawArrays` over consecutive vertices
    Ordered {
        /// Total floats in the vertex buffer
        float_count: usize,
        /// Floats per vertex
        components_per_vertex: usize,
    },
}

impl DrawSpec {
    /// Draw every index in `indices`
    pub const fn indexed(indices: &[u32]) -> Self {
        Self::Indexed {
            index_count: indices.len(),
        }
    }

    /// Draw every whole vertex in `vertices`
    pub const fn ordered(vertices: &[f32], components_per_vertex: usize) -> Self {
        Self::Ordered {
            float_count: vertices.len(),
            components_per_vertex,
        }
    }

    /// Vertices consumed by one draw call
    pub const fn vertex_count(&self) -> usize {
        match *self {
            Self::Indexed { index_count } => index_count,
            Self::Ordered {
                float_count,
                components_per_vertex,
            } => match float_count.checked_div(components_per_vertex) {
                Some(count) => count,
                None => 0,
            },
        }
    }

    /// Vertex count as the GL count type
    pub fn gl_count(&self) -> GledResult<i32> {
        let count = self.vertex_count();
        i32::try_from(count).map_err(|_| GledError::DrawTooLarge(count))
    }
}

/// GPU objects backing an uploaded [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryBuffers {
    /// Vertex array holding the attribute layout and element binding
    pub vertex_array: VertexArrayHandle,
    /// Position buffer
    pub vertex_buffer: BufferHandle,
    /// Index buffer, for indexed shapes
    pub element_buffer: Option<BufferHandle>,
    /// Draw call matching the uploaded data
    pub draw: DrawSpec,
}

impl GeometryBuffers {
    /// Delete the vertex array and its buffers
    pub fn release<A: GlApi>(self, ctx: &mut GlContext<A>) -> GledResult<()> {
        buffer::delete_vertex_array(ctx, self.vertex_array)?;
        buffer::delete_buffer(ctx, self.vertex_buffer)?;
        if let Some(element_buffer) = self.element_buffer {
            buffer::delete_buffer(ctx, element_buffer)?;
        }
        Ok(())
    }
}

/// Upload `shape` and record its position layout in a new vertex array
///
/// The vertex array is bound first so that it captures the element buffer
/// and the attribute layout, and is unbound again before returning.
pub fn upload_shape<A: GlApi>(
    ctx: &mut GlContext<A>,
    shape: &Shape<'_>,
    usage: BufferUsage,
) -> GledResult<GeometryBuffers> {
    let vertex_array = buffer::bind_new_vertex_array(ctx)?;

    let vertex_buffer = buffer::bind_new_buffer(ctx, BufferTarget::VertexData)?;
    buffer::upload_floats(ctx, BufferTarget::VertexData, shape.vertices, usage)?;

    let element_buffer = if shape.is_indexed() {
        let element_buffer = buffer::bind_new_buffer(ctx, BufferTarget::IndexData)?;
        buffer::upload_indices(ctx, BufferTarget::IndexData, shape.indices, usage)?;
        Some(element_buffer)
    } else {
        None
    };

    buffer::configure_attribute(ctx, POSITION_SLOT, POSITION_COMPONENTS as i32, POSITION_STRIDE, 0)?;
    buffer::unbind_vertex_array(ctx)?;

    let draw = if shape.is_indexed() {
        DrawSpec::indexed(shape.indices)
    } else {
        DrawSpec::ordered(shape.vertices, POSITION_COMPONENTS)
    };
    log::info!(
        "Uploaded shape: {} vertices, {} draw vertices",
        shape.vertex_count(),
        draw.vertex_count()
    );

    Ok(GeometryBuffers {
        vertex_array,
        vertex_buffer,
        element_buffer,
        draw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{GlCall, RecordingGl};

    const SQUARE_VERTICES: [f32; 12] = [
        0.5, 0.5, 0.0, //
        0.5, -0.5, 0.0, //
        -0.5, -0.5, 0.0, //
        -0.5, 0.5, 0.0,
    ];
    const SQUARE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

    #[test]
    fn test_ordered_count_divides_floats() {
        let draw = DrawSpec::ordered(&SQUARE_VERTICES, 3);
        assert_eq!(draw.vertex_count(), 4);
    }

    #[test]
    fn test_ordered_zero_components() {
        assert_eq!(DrawSpec::ordered(&SQUARE_VERTICES, 0).vertex_count(), 0);
    }

    #[test]
    fn test_indexed_count_is_index_length() {
        assert_eq!(DrawSpec::indexed(&SQUARE_INDICES).gl_count().unwrap(), 6);
    }

    #[test]
    fn test_upload_indexed_shape() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let shape = Shape::new(&SQUARE_VERTICES, &SQUARE_INDICES);
        let geometry = upload_shape(&mut ctx, &shape, BufferUsage::Static).unwrap();

        assert_eq!(geometry.draw, DrawSpec::Indexed { index_count: 6 });
        assert!(geometry.element_buffer.is_some());
        assert_eq!(ctx.api().uploaded_bytes(BufferTarget::VertexData), Some(48));
        assert_eq!(ctx.api().uploaded_bytes(BufferTarget::IndexData), Some(24));
        assert_eq!(ctx.bindings().vertex_array(), None);
    }

    #[test]
    fn test_vertex_array_bound_before_layout() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let shape = Shape::new(&SQUARE_VERTICES, &SQUARE_INDICES);
        let geometry = upload_shape(&mut ctx, &shape, BufferUsage::Static).unwrap();

        let calls = ctx.api().calls();
        let bind_vao = calls
            .iter()
            .position(|call| *call == GlCall::BindVertexArray(geometry.vertex_array.id()))
            .unwrap();
        let bind_ebo = calls
            .iter()
            .position(|call| matches!(call, GlCall::BindBuffer { target: BufferTarget::IndexData, .. }))
            .unwrap();
        let pointer = calls
            .iter()
            .position(|call| matches!(call, GlCall::VertexAttribPointer { .. }))
            .unwrap();
        assert!(bind_vao < bind_ebo);
        assert!(bind_ebo < pointer);
    }

    #[test]
    fn test_upload_unindexed_shape() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let shape = Shape::new(&SQUARE_VERTICES, &[]);
        let geometry = upload_shape(&mut ctx, &shape, BufferUsage::Static).unwrap();

        assert!(geometry.element_buffer.is_none());
        assert_eq!(geometry.draw.vertex_count(), 4);
        assert_eq!(ctx.api().uploaded_bytes(BufferTarget::IndexData), None);
    }

    #[test]
    fn test_release_deletes_everything() {
        let mut ctx = GlContext::new(RecordingGl::new());
        let shape = Shape::new(&SQUARE_VERTICES, &SQUARE_INDICES);
        let geometry = upload_shape(&mut ctx, &shape, BufferUsage::Static).unwrap();
        geometry.release(&mut ctx).unwrap();

        assert_eq!(ctx.api().count(|call| matches!(call, GlCall::DeleteBuffer(_))), 2);
        assert_eq!(ctx.api().count(|call| matches!(call, GlCall::DeleteVertexArray(_))), 1);
    }
}
