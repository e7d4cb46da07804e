//! Capacity-bounded attribute storage for one topology.
//!
//! A `BatchBuffer` is pure storage: parallel arrays for positions, colors
//! and (quads only) texcoords, plus the precomputed quad index pattern.
//! Capacity checks and attribute reconciliation live in the vertex stream
//! state machine; the buffer only appends, truncates and resets.

use std::mem;
use std::slice;

use super::DrawTopology;

#[derive(Debug)]
pub struct BatchBuffer {
    topology: DrawTopology,
    capacity: usize,
    positions: Vec<f32>,
    colors: Vec<u8>,
    texcoords: Option<Vec<f32>>,
    indices: Option<Vec<u16>>,
}

impl BatchBuffer {
    /// Creates a buffer for `capacity` primitives of `topology`. Quads get
    /// a texcoord array and the index pattern [4k, 4k+1, 4k+2, 4k, 4k+2,
    /// 4k+3] for every quad k.
    pub fn new(topology: DrawTopology, capacity: usize) -> Self {
        let vertices = capacity * topology.arity();

        let (texcoords, indices) = if topology == DrawTopology::Quads {
            let mut pattern = Vec::with_capacity(capacity * 6);
            for k in 0..capacity as u16 {
                pattern.push(4 * k);
                pattern.push(4 * k + 1);
                pattern.push(4 * k + 2);
                pattern.push(4 * k);
                pattern.push(4 * k + 2);
                pattern.push(4 * k + 3);
            }

            (Some(Vec::with_capacity(vertices * 2)), Some(pattern))
        } else {
            (None, None)
        };

        BatchBuffer {
            topology,
            capacity,
            positions: Vec::with_capacity(vertices * 3),
            colors: Vec::with_capacity(vertices * 4),
            texcoords,
            indices,
        }
    }

    #[inline]
    pub fn topology(&self) -> DrawTopology {
        self.topology
    }

    /// Capacity in primitives.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity in vertices.
    #[inline]
    pub fn vertex_capacity(&self) -> usize {
        self.capacity * self.topology.arity()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn color_count(&self) -> usize {
        self.colors.len() / 4
    }

    #[inline]
    pub fn texcoord_count(&self) -> usize {
        self.texcoords.as_ref().map(|v| v.len() / 2).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn push_vertex(&mut self, x: f32, y: f32, z: f32) {
        debug_assert!(self.vertex_count() < self.vertex_capacity());
        self.positions.push(x);
        self.positions.push(y);
        self.positions.push(z);
    }

    pub fn push_color(&mut self, c: [u8; 4]) {
        debug_assert!(self.color_count() < self.vertex_capacity());
        self.colors.extend_from_slice(&c);
    }

    pub fn push_texcoord(&mut self, u: f32, v: f32) {
        debug_assert!(self.texcoord_count() < self.vertex_capacity());
        if let Some(buf) = self.texcoords.as_mut() {
            buf.push(u);
            buf.push(v);
        }
    }

    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    #[inline]
    pub fn texcoords(&self) -> Option<&[f32]> {
        self.texcoords.as_ref().map(|v| v.as_slice())
    }

    /// The most recently written color, across every shape still batched.
    pub fn last_color(&self) -> Option<[u8; 4]> {
        if self.colors.is_empty() {
            return None;
        }

        let i = self.colors.len() - 4;
        Some([
            self.colors[i],
            self.colors[i + 1],
            self.colors[i + 2],
            self.colors[i + 3],
        ])
    }

    pub fn truncate_vertices(&mut self, vertices: usize) {
        self.positions.truncate(vertices * 3);
    }

    pub fn truncate_colors(&mut self, vertices: usize) {
        self.colors.truncate(vertices * 4);
    }

    pub fn truncate_texcoords(&mut self, vertices: usize) {
        if let Some(buf) = self.texcoords.as_mut() {
            buf.truncate(vertices * 2);
        }
    }

    /// Zeroes all fill counters, keeping the allocations and the index
    /// pattern.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.colors.clear();
        if let Some(buf) = self.texcoords.as_mut() {
            buf.clear();
        }
    }

    /// The filled prefix of the position array, ready for upload.
    #[inline]
    pub fn positions_bytes(&self) -> &[u8] {
        as_bytes(&self.positions)
    }

    #[inline]
    pub fn colors_bytes(&self) -> &[u8] {
        as_bytes(&self.colors)
    }

    #[inline]
    pub fn texcoords_bytes(&self) -> Option<&[u8]> {
        self.texcoords.as_ref().map(|v| as_bytes(v.as_slice()))
    }

    /// The full precomputed index pattern. Uploaded once at startup.
    #[inline]
    pub fn indices_bytes(&self) -> Option<&[u8]> {
        self.indices.as_ref().map(|v| as_bytes(v.as_slice()))
    }
}

fn as_bytes<T: Copy>(values: &[T]) -> &[u8] {
    let len = values.len() * mem::size_of::<T>();
    unsafe { slice::from_raw_parts(values.as_ptr() as *const u8, len) }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quad_index_pattern() {
        let buf = BatchBuffer::new(DrawTopology::Quads, 2);
        let bytes = buf.indices_bytes().unwrap();
        assert_eq!(bytes.len(), 2 * 6 * 2);

        let indices: Vec<u16> = bytes
            .chunks(2)
            .map(|c| u16::from(c[0]) | (u16::from(c[1]) << 8))
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn counters() {
        let mut buf = BatchBuffer::new(DrawTopology::Lines, 8);
        assert!(buf.is_empty());
        assert_eq!(buf.vertex_capacity(), 16);
        assert!(buf.texcoords_bytes().is_none());

        buf.push_vertex(0.0, 0.0, 0.0);
        buf.push_vertex(1.0, 0.0, 0.0);
        buf.push_color([255, 0, 0, 255]);

        assert_eq!(buf.vertex_count(), 2);
        assert_eq!(buf.color_count(), 1);
        assert_eq!(buf.last_color(), Some([255, 0, 0, 255]));
        assert_eq!(buf.positions_bytes().len(), 2 * 3 * 4);

        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.color_count(), 0);
        assert_eq!(buf.last_color(), None);
    }

    #[test]
    fn truncation() {
        let mut buf = BatchBuffer::new(DrawTopology::Quads, 4);
        for _ in 0..3 {
            buf.push_color([1, 2, 3, 4]);
        }
        buf.push_texcoord(0.5, 0.5);

        buf.truncate_colors(2);
        buf.truncate_texcoords(0);
        assert_eq!(buf.color_count(), 2);
        assert_eq!(buf.texcoord_count(), 0);
    }
}
