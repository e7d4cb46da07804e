//! Geometry batching: per-topology accumulation buffers, the vertex
//! stream state machine that fills them, and the texture-grouped draw
//! descriptor list consumed at flush.

pub mod buffer;
pub mod draws;
pub mod stream;

/// The primitive topology of an emitted shape.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum DrawTopology {
    Lines,
    Triangles,
    Quads,
}

impl DrawTopology {
    /// The number of vertices that make up one primitive.
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            DrawTopology::Lines => 2,
            DrawTopology::Triangles => 3,
            DrawTopology::Quads => 4,
        }
    }

    /// The primitive the GPU actually draws for this topology. Quads are
    /// assembled into triangles through the precomputed index pattern.
    #[inline]
    pub fn primitive(self) -> Primitive {
        match self {
            DrawTopology::Lines => Primitive::Lines,
            DrawTopology::Triangles | DrawTopology::Quads => Primitive::Triangles,
        }
    }
}

/// The assembly primitives the backend draws with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Lines,
    Triangles,
}

impl Primitive {
    /// Returns the number of primitives assembled from `indices` vertices.
    #[inline]
    pub fn assemble(self, indices: u32) -> u32 {
        match self {
            Primitive::Lines => indices / 2,
            Primitive::Triangles => indices / 3,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arity() {
        assert_eq!(DrawTopology::Lines.arity(), 2);
        assert_eq!(DrawTopology::Triangles.arity(), 3);
        assert_eq!(DrawTopology::Quads.arity(), 4);
    }

    #[test]
    fn assemble() {
        assert_eq!(Primitive::Lines.assemble(8), 4);
        assert_eq!(Primitive::Triangles.assemble(6), 2);
        assert_eq!(DrawTopology::Quads.primitive(), Primitive::Triangles);
    }
}
