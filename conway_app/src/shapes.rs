//! Static geometry drawn by the application

use gled::prelude::Shape;

/// Corners of an axis-aligned square, counter-clockwise from top right
const SQUARE_VERTICES: [f32; 12] = [
    0.5, 0.5, 0.0, // top right
    0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5, 0.5, 0.0, // top left
];

/// Two triangles sharing the top-right to bottom-left diagonal
const SQUARE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Unit square centred on the origin, drawn through an index buffer
pub const SQUARE: Shape<'static> = Shape::new(&SQUARE_VERTICES, &SQUARE_INDICES);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_indices_in_range() {
        assert_eq!(SQUARE.vertex_count(), 4);
        assert!(SQUARE.indices.iter().all(|&index| (index as usize) < SQUARE.vertex_count()));
    }
}
