//! The vertex stream state machine.
//!
//! Emission calls arrive one attribute at a time and are routed into the
//! per-topology batch buffers. While a transform push is pending, raw
//! vertices are parked in the `Deferred` routing buffer and only enter
//! their topology buffer at `end`, after the model-view matrix has been
//! applied to each of them.
//!
//! Counters are reconciled at `end` so that the color and texcoord counts
//! of the active topology always equal its vertex count between shapes.

use std::mem;

use crate::math::prelude::*;
use crate::settings::Settings;

use super::buffer::BatchBuffer;
use super::draws::DrawBatch;
use super::DrawTopology;

/// Pseudo-depth assigned to 2D vertices, advanced per shape so that
/// later shapes win the depth test over earlier ones.
const DEPTH_BASE: f32 = -1.0;
const DEPTH_STEP: f32 = 1.0 / 20_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Building(DrawTopology),
}

/// Where incoming vertices go: straight into the active topology buffer,
/// or parked until the next `end` applies the pending transform.
#[derive(Debug)]
enum Routing {
    Direct,
    Deferred(Vec<Vector3<f32>>),
}

#[derive(Debug)]
pub struct VertexStream {
    state: State,
    routing: Routing,
    spare: Vec<Vector3<f32>>,
    temp_capacity: usize,
    depth: f32,
    lines: BatchBuffer,
    triangles: BatchBuffer,
    quads: BatchBuffer,
}

impl VertexStream {
    pub fn new(settings: &Settings) -> Self {
        VertexStream {
            state: State::Idle,
            routing: Routing::Direct,
            spare: Vec::with_capacity(settings.temp_vertex_capacity),
            temp_capacity: settings.temp_vertex_capacity,
            depth: DEPTH_BASE,
            lines: BatchBuffer::new(DrawTopology::Lines, settings.max_lines),
            triangles: BatchBuffer::new(DrawTopology::Triangles, settings.max_triangles),
            quads: BatchBuffer::new(DrawTopology::Quads, settings.max_quads),
        }
    }

    /// Opens a shape of `topology`. Opening a shape while another is
    /// still open is diagnosed and ignored, the open shape stays active.
    pub fn begin(&mut self, topology: DrawTopology) {
        match self.state {
            State::Idle => self.state = State::Building(topology),
            State::Building(open) => {
                error!(
                    "`begin({:?})` while a {:?} shape is open, ignored.",
                    topology, open
                );
            }
        }
    }

    /// Parks subsequent vertices until the next `end` applies the
    /// model-view matrix to them. No-op while already parked.
    pub fn defer(&mut self) {
        if let Routing::Direct = self.routing {
            self.routing = Routing::Deferred(mem::replace(&mut self.spare, Vec::new()));
        }
    }

    /// Emits a 3D vertex into the active shape.
    pub fn vertex(&mut self, x: f32, y: f32, z: f32, draws: &mut DrawBatch) {
        let topology = match self.state {
            State::Building(v) => v,
            State::Idle => {
                warn!("Vertex emitted outside begin/end, ignored.");
                return;
            }
        };

        if let Routing::Deferred(ref mut pending) = self.routing {
            if pending.len() >= self.temp_capacity {
                warn!("Pending transform buffer is full, vertex dropped.");
                return;
            }

            pending.push(Vector3::new(x, y, z));
            return;
        }

        self.push_direct(topology, x, y, z, draws);
    }

    /// Emits a 2D vertex at the current batching depth.
    pub fn vertex2(&mut self, x: f32, y: f32, draws: &mut DrawBatch) {
        let z = self.depth;
        self.vertex(x, y, z, draws);
    }

    /// Appends a color to the active shape. One color may cover many
    /// vertices; missing entries are replicated at `end`.
    pub fn color(&mut self, c: [u8; 4]) {
        let topology = match self.state {
            State::Building(v) => v,
            State::Idle => {
                warn!("Color emitted outside begin/end, ignored.");
                return;
            }
        };

        let buf = self.buffer_mut(topology);
        if buf.color_count() >= buf.vertex_capacity() {
            warn!("{:?} color array is full, color dropped.", topology);
            return;
        }

        buf.push_color(c);
    }

    /// Appends a texcoord to the active shape. Only quads are textured;
    /// for any other topology the call is silently ignored.
    pub fn texcoord(&mut self, u: f32, v: f32) {
        match self.state {
            State::Building(DrawTopology::Quads) => {}
            State::Building(_) => return,
            State::Idle => {
                warn!("Texcoord emitted outside begin/end, ignored.");
                return;
            }
        }

        if self.quads.texcoord_count() >= self.quads.vertex_capacity() {
            warn!("Quads texcoord array is full, texcoord dropped.");
            return;
        }

        self.quads.push_texcoord(u, v);
    }

    /// Closes the active shape: replays parked vertices through
    /// `modelview`, reconciles attribute counters and advances the
    /// batching depth.
    pub fn end(&mut self, modelview: &Matrix4<f32>, draws: &mut DrawBatch) {
        let topology = match self.state {
            State::Building(v) => v,
            State::Idle => {
                warn!("`end` without a matching `begin`, ignored.");
                return;
            }
        };

        if let Routing::Deferred(mut pending) = mem::replace(&mut self.routing, Routing::Direct) {
            for v in &pending {
                let h = modelview * v.extend(1.0);
                self.push_direct(topology, h.x, h.y, h.z, draws);
            }

            pending.clear();
            self.spare = pending;
        }

        // A shape that ends mid-primitive would misalign every shape
        // batched after it, so the partial primitive is trimmed.
        let trimmed = {
            let buf = self.buffer_mut(topology);
            let rem = buf.vertex_count() % topology.arity();
            if rem != 0 {
                let vertices = buf.vertex_count() - rem;
                buf.truncate_vertices(vertices);
            }
            rem
        };

        if trimmed != 0 {
            warn!(
                "Shape ended with a partial {:?} primitive, {} vertices trimmed.",
                topology, trimmed
            );

            if topology == DrawTopology::Quads {
                draws.retract(trimmed as u32);
            }
        }

        let buf = self.buffer_mut(topology);
        let vertices = buf.vertex_count();

        if buf.color_count() < vertices {
            let c = buf.last_color().unwrap_or([255, 255, 255, 255]);
            while buf.color_count() < vertices {
                buf.push_color(c);
            }
        }
        buf.truncate_colors(vertices);

        if topology == DrawTopology::Quads {
            while buf.texcoord_count() < vertices {
                buf.push_texcoord(0.0, 0.0);
            }
            buf.truncate_texcoords(vertices);
        }

        self.depth += DEPTH_STEP;
        self.state = State::Idle;
    }

    #[inline]
    pub fn lines(&self) -> &BatchBuffer {
        &self.lines
    }

    #[inline]
    pub fn triangles(&self) -> &BatchBuffer {
        &self.triangles
    }

    #[inline]
    pub fn quads(&self) -> &BatchBuffer {
        &self.quads
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty() && self.quads.is_empty()
    }

    /// Zeroes every topology buffer and rewinds the batching depth.
    /// Called after a flush has consumed the batched geometry.
    pub fn reset(&mut self) {
        self.lines.reset();
        self.triangles.reset();
        self.quads.reset();
        self.depth = DEPTH_BASE;
    }

    fn push_direct(&mut self, topology: DrawTopology, x: f32, y: f32, z: f32, draws: &mut DrawBatch) {
        let buf = self.buffer_mut(topology);
        if buf.vertex_count() >= buf.vertex_capacity() {
            warn!("{:?} batch buffer is full, vertex dropped.", topology);
            return;
        }

        buf.push_vertex(x, y, z);
        if topology == DrawTopology::Quads {
            draws.tally();
        }
    }

    fn buffer_mut(&mut self, topology: DrawTopology) -> &mut BatchBuffer {
        match topology {
            DrawTopology::Lines => &mut self.lines,
            DrawTopology::Triangles => &mut self.triangles,
            DrawTopology::Quads => &mut self.quads,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assets::prelude::TextureHandle;
    use crate::utils::Handle;

    fn settings() -> Settings {
        Settings {
            max_lines: 4,
            max_triangles: 4,
            max_quads: 4,
            max_draws: 4,
            max_matrix_depth: 4,
            temp_vertex_capacity: 8,
        }
    }

    fn draws() -> DrawBatch {
        let white: TextureHandle = Handle::new(0, 1).into();
        DrawBatch::new(4, white)
    }

    #[test]
    fn replicates_missing_colors() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.begin(DrawTopology::Quads);
        stream.color([10, 20, 30, 40]);
        for _ in 0..4 {
            stream.vertex(0.0, 0.0, 0.0, &mut draws);
        }
        stream.end(&Matrix4::identity(), &mut draws);

        assert_eq!(stream.quads().color_count(), 4);
        for chunk in stream.quads().colors().chunks(4) {
            assert_eq!(chunk, [10, 20, 30, 40]);
        }
    }

    #[test]
    fn truncates_excess_colors() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.begin(DrawTopology::Triangles);
        for i in 0..5u8 {
            stream.color([i, i, i, 255]);
        }
        for _ in 0..3 {
            stream.vertex(0.0, 0.0, 0.0, &mut draws);
        }
        stream.end(&Matrix4::identity(), &mut draws);

        assert_eq!(stream.triangles().color_count(), 3);
        assert_eq!(stream.triangles().colors()[8], 2);
    }

    #[test]
    fn fills_missing_texcoords() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.begin(DrawTopology::Quads);
        stream.texcoord(0.5, 0.5);
        for _ in 0..4 {
            stream.vertex(0.0, 0.0, 0.0, &mut draws);
        }
        stream.end(&Matrix4::identity(), &mut draws);

        let texcoords = stream.quads().texcoords().unwrap();
        assert_eq!(stream.quads().texcoord_count(), 4);
        assert_eq!(&texcoords[..2], [0.5, 0.5]);
        assert_eq!(&texcoords[2..], [0.0; 6]);
    }

    #[test]
    fn ignores_texcoords_for_untextured_topologies() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.begin(DrawTopology::Lines);
        stream.texcoord(0.5, 0.5);
        stream.vertex(0.0, 0.0, 0.0, &mut draws);
        stream.vertex(1.0, 0.0, 0.0, &mut draws);
        stream.end(&Matrix4::identity(), &mut draws);

        assert_eq!(stream.quads().texcoord_count(), 0);
    }

    #[test]
    fn ignores_emission_outside_shape() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.vertex(0.0, 0.0, 0.0, &mut draws);
        stream.color([1, 2, 3, 4]);
        stream.end(&Matrix4::identity(), &mut draws);

        assert!(stream.is_empty());
    }

    #[test]
    fn nested_begin_keeps_open_shape() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.begin(DrawTopology::Lines);
        stream.vertex(0.0, 0.0, 0.0, &mut draws);
        stream.begin(DrawTopology::Quads);
        stream.vertex(1.0, 0.0, 0.0, &mut draws);
        stream.end(&Matrix4::identity(), &mut draws);

        assert_eq!(stream.lines().vertex_count(), 2);
        assert_eq!(stream.quads().vertex_count(), 0);
    }

    #[test]
    fn drops_vertices_at_capacity() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        // Capacity is 4 quads, emit 5.
        stream.begin(DrawTopology::Quads);
        for _ in 0..20 {
            stream.vertex(0.0, 0.0, 0.0, &mut draws);
        }
        stream.end(&Matrix4::identity(), &mut draws);

        assert_eq!(stream.quads().vertex_count(), 16);
        assert_eq!(draws.descriptors()[0].vertices, 16);
    }

    #[test]
    fn trims_partial_primitives() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.begin(DrawTopology::Triangles);
        stream.vertex(0.0, 0.0, 0.0, &mut draws);
        stream.vertex(1.0, 0.0, 0.0, &mut draws);
        stream.end(&Matrix4::identity(), &mut draws);

        assert_eq!(stream.triangles().vertex_count(), 0);
        assert_eq!(stream.triangles().color_count(), 0);
    }

    #[test]
    fn deferred_vertices_transform_at_end() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.defer();
        stream.begin(DrawTopology::Quads);
        for &(x, y) in &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)] {
            stream.vertex(x, y, 0.0, &mut draws);
        }

        // Nothing lands in the topology buffer until the shape ends.
        assert_eq!(stream.quads().vertex_count(), 0);

        let m = Matrix4::from_translation(Vector3::new(5.0, 0.0, 0.0));
        stream.end(&m, &mut draws);

        assert_eq!(stream.quads().vertex_count(), 4);
        assert_eq!(draws.descriptors()[0].vertices, 4);
        assert_eq!(&stream.quads().positions()[..3], [5.0, 0.0, 0.0]);
        assert_eq!(&stream.quads().positions()[6..9], [6.0, 1.0, 0.0]);
    }

    #[test]
    fn drops_deferred_vertices_at_capacity() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.defer();
        stream.begin(DrawTopology::Quads);
        for _ in 0..12 {
            stream.vertex(0.0, 0.0, 0.0, &mut draws);
        }
        stream.end(&Matrix4::identity(), &mut draws);

        // The pending buffer holds 8, the rest were dropped.
        assert_eq!(stream.quads().vertex_count(), 8);
    }

    #[test]
    fn depth_advances_per_shape() {
        let mut stream = VertexStream::new(&settings());
        let mut draws = draws();

        stream.begin(DrawTopology::Lines);
        stream.vertex2(0.0, 0.0, &mut draws);
        stream.vertex2(1.0, 0.0, &mut draws);
        stream.end(&Matrix4::identity(), &mut draws);

        stream.begin(DrawTopology::Lines);
        stream.vertex2(0.0, 0.0, &mut draws);
        stream.vertex2(1.0, 0.0, &mut draws);
        stream.end(&Matrix4::identity(), &mut draws);

        let positions = stream.lines().positions();
        assert_eq!(positions[2], -1.0);
        assert_eq!(positions[8], -1.0 + 1.0 / 20_000.0);

        stream.reset();
        assert!(stream.is_empty());
    }
}
