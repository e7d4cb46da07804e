//! Texture-grouped draw descriptors for the quads batch.
//!
//! Lines and triangles are always drawn untextured in a single pass each,
//! so only quads carry a descriptor list. The list always holds at least
//! one descriptor; the last one is "active" and accepted quad vertices
//! tally into it.

use smallvec::SmallVec;

use crate::assets::prelude::TextureHandle;

/// One contiguous textured draw: the texture to bind and the number of
/// batched quad vertices it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawDescriptor {
    pub texture: TextureHandle,
    pub vertices: u32,
}

/// Ordered, bounded list of draw descriptors.
#[derive(Debug)]
pub struct DrawBatch {
    descriptors: SmallVec<[DrawDescriptor; 32]>,
    capacity: usize,
    default_texture: TextureHandle,
}

impl DrawBatch {
    pub fn new(capacity: usize, default_texture: TextureHandle) -> Self {
        let mut descriptors = SmallVec::new();
        descriptors.push(DrawDescriptor {
            texture: default_texture,
            vertices: 0,
        });

        DrawBatch {
            descriptors,
            capacity,
            default_texture,
        }
    }

    /// Makes `texture` the active descriptor's texture. Binding the texture
    /// that is already active changes nothing; otherwise a descriptor
    /// without vertices is overwritten in place, and one with vertices gets
    /// a fresh descriptor appended after it.
    pub fn bind(&mut self, texture: TextureHandle) {
        if let Some(last) = self.descriptors.last_mut() {
            if last.texture == texture {
                return;
            }

            if last.vertices == 0 {
                last.texture = texture;
                return;
            }
        }

        if self.descriptors.len() >= self.capacity {
            warn!("Draw descriptor list is full, texture bind dropped.");
            return;
        }

        self.descriptors.push(DrawDescriptor {
            texture,
            vertices: 0,
        });
    }

    /// Credits one accepted quad vertex to the active descriptor.
    #[inline]
    pub fn tally(&mut self) {
        if let Some(last) = self.descriptors.last_mut() {
            last.vertices += 1;
        }
    }

    /// Takes back vertices credited to the active descriptor.
    pub fn retract(&mut self, vertices: u32) {
        if let Some(last) = self.descriptors.last_mut() {
            last.vertices = last.vertices.saturating_sub(vertices);
        }
    }

    #[inline]
    pub fn descriptors(&self) -> &[DrawDescriptor] {
        &self.descriptors
    }

    /// Drops every descriptor and restores the single default one.
    pub fn reset(&mut self) {
        self.descriptors.clear();
        self.descriptors.push(DrawDescriptor {
            texture: self.default_texture,
            vertices: 0,
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::Handle;

    fn texture(index: u32) -> TextureHandle {
        Handle::new(index, 1).into()
    }

    #[test]
    fn coalesces_repeated_binds() {
        let mut batch = DrawBatch::new(4, texture(0));
        batch.bind(texture(0));
        batch.bind(texture(0));
        assert_eq!(batch.descriptors().len(), 1);
    }

    #[test]
    fn overwrites_empty_descriptor() {
        let mut batch = DrawBatch::new(4, texture(0));
        batch.bind(texture(1));
        batch.bind(texture(2));

        assert_eq!(batch.descriptors().len(), 1);
        assert_eq!(batch.descriptors()[0].texture, texture(2));
    }

    #[test]
    fn appends_after_vertices() {
        let mut batch = DrawBatch::new(4, texture(0));
        batch.bind(texture(1));
        for _ in 0..4 {
            batch.tally();
        }
        batch.bind(texture(2));

        assert_eq!(batch.descriptors().len(), 2);
        assert_eq!(batch.descriptors()[0].texture, texture(1));
        assert_eq!(batch.descriptors()[0].vertices, 4);
        assert_eq!(batch.descriptors()[1].vertices, 0);
    }

    #[test]
    fn drops_binds_when_full() {
        let mut batch = DrawBatch::new(2, texture(0));
        batch.bind(texture(1));
        batch.tally();
        batch.bind(texture(2));
        batch.tally();
        batch.bind(texture(3));

        assert_eq!(batch.descriptors().len(), 2);
        assert_eq!(batch.descriptors()[1].texture, texture(2));

        // The dropped bind leaves vertices accumulating into the survivor.
        batch.tally();
        assert_eq!(batch.descriptors()[1].vertices, 2);
    }

    #[test]
    fn reset_restores_default() {
        let mut batch = DrawBatch::new(4, texture(0));
        batch.bind(texture(1));
        batch.tally();
        batch.reset();

        assert_eq!(batch.descriptors().len(), 1);
        assert_eq!(batch.descriptors()[0].texture, texture(0));
        assert_eq!(batch.descriptors()[0].vertices, 0);
    }
}
