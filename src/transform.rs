//! A bounded stack of 4x4 transform matrices.
//!
//! Two matrices are maintained, one per `MatrixMode`, and exactly one of
//! them is "current" at a time. Transform operations compose onto the
//! current matrix in issue order, so the last-issued operation applies
//! first to each vertex, matching the legacy fixed-function convention.
//! A single save stack is shared by both modes.

use crate::math::prelude::*;

/// The matrix a transform operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixMode {
    ModelView,
    Projection,
}

/// Bounded matrix stack with a current matrix per mode.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Matrix4<f32>>,
    capacity: usize,
    mode: MatrixMode,
    modelview: Matrix4<f32>,
    projection: Matrix4<f32>,
}

impl MatrixStack {
    pub fn new(capacity: usize) -> Self {
        MatrixStack {
            stack: Vec::with_capacity(capacity),
            capacity,
            mode: MatrixMode::ModelView,
            modelview: Matrix4::identity(),
            projection: Matrix4::identity(),
        }
    }

    #[inline]
    pub fn mode(&self) -> MatrixMode {
        self.mode
    }

    #[inline]
    pub fn set_mode(&mut self, mode: MatrixMode) {
        self.mode = mode;
    }

    /// Saves the current matrix and resets it to identity. Returns false
    /// without touching anything when the stack is full.
    pub fn push(&mut self) -> bool {
        if self.stack.len() >= self.capacity {
            return false;
        }

        let v = *self.current();
        self.stack.push(v);
        self.load_identity();
        true
    }

    /// Restores the most recently saved matrix. No-op on an empty stack.
    pub fn pop(&mut self) {
        if let Some(v) = self.stack.pop() {
            *self.current_mut() = v;
        }
    }

    /// The number of saved matrices.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn load_identity(&mut self) {
        *self.current_mut() = Matrix4::identity();
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.compose(Matrix4::from_translation(Vector3::new(x, y, z)));
    }

    /// Composes a rotation of `angle_degrees` around `axis`. The axis is
    /// normalized first; a zero-length axis is ignored.
    pub fn rotate(&mut self, angle_degrees: f32, axis: Vector3<f32>) {
        if axis.magnitude2() <= ::std::f32::EPSILON {
            warn!("Rotation around a zero-length axis, ignored.");
            return;
        }

        self.compose(Matrix4::from_axis_angle(axis.normalize(), Deg(angle_degrees)));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.compose(Matrix4::from_nonuniform_scale(x, y, z));
    }

    /// Composes a caller-supplied column-major matrix unchanged.
    #[inline]
    pub fn multiply(&mut self, m: Matrix4<f32>) {
        self.compose(m);
    }

    pub fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.compose(frustum(left, right, bottom, top, near, far));
    }

    pub fn ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.compose(ortho(left, right, bottom, top, near, far));
    }

    #[inline]
    pub fn current(&self) -> &Matrix4<f32> {
        match self.mode {
            MatrixMode::ModelView => &self.modelview,
            MatrixMode::Projection => &self.projection,
        }
    }

    #[inline]
    pub fn modelview(&self) -> &Matrix4<f32> {
        &self.modelview
    }

    #[inline]
    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }

    #[inline]
    fn current_mut(&mut self) -> &mut Matrix4<f32> {
        match self.mode {
            MatrixMode::ModelView => &mut self.modelview,
            MatrixMode::Projection => &mut self.projection,
        }
    }

    #[inline]
    fn compose(&mut self, m: Matrix4<f32>) {
        let v = *self.current() * m;
        *self.current_mut() = v;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn composition() {
        let mut stack = MatrixStack::new(16);
        stack.translate(5.0, 0.0, 0.0);
        stack.scale(2.0, 2.0, 2.0);

        let t = Matrix4::from_translation(Vector3::new(5.0, 0.0, 0.0));
        let s = Matrix4::from_nonuniform_scale(2.0, 2.0, 2.0);
        assert!(ulps_eq!(*stack.current(), t * s));

        // The last issued operation applies first to each vertex.
        let v = *stack.current() * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert!(ulps_eq!(v, Vector4::new(7.0, 2.0, 2.0, 1.0)));
    }

    #[test]
    fn rotation() {
        let mut stack = MatrixStack::new(16);
        stack.rotate(90.0, Vector3::new(0.0, 0.0, 2.0));

        let v = *stack.current() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(ulps_eq!(v, Vector4::new(0.0, 1.0, 0.0, 1.0), epsilon = 1e-6));
    }

    #[test]
    fn degenerate_rotation() {
        let mut stack = MatrixStack::new(16);
        stack.translate(1.0, 2.0, 3.0);

        let before = *stack.current();
        stack.rotate(45.0, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(*stack.current(), before);
    }

    #[test]
    fn push_and_pop() {
        let mut stack = MatrixStack::new(16);
        stack.translate(1.0, 0.0, 0.0);
        let saved = *stack.current();

        assert!(stack.push());
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.current(), Matrix4::identity());

        stack.scale(3.0, 3.0, 3.0);
        stack.pop();
        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), saved);
    }

    #[test]
    fn pop_on_empty() {
        let mut stack = MatrixStack::new(16);
        stack.translate(1.0, 2.0, 3.0);

        let before = *stack.current();
        stack.pop();
        assert_eq!(*stack.current(), before);
    }

    #[test]
    fn overflow() {
        let mut stack = MatrixStack::new(4);
        for _ in 0..4 {
            assert!(stack.push());
        }

        assert!(!stack.push());
        assert_eq!(stack.depth(), 4);
    }

    #[test]
    fn modes_are_independent() {
        let mut stack = MatrixStack::new(16);
        stack.translate(1.0, 0.0, 0.0);

        stack.set_mode(MatrixMode::Projection);
        stack.ortho(0.0, 640.0, 480.0, 0.0, -1.0, 1.0);
        assert_eq!(*stack.current(), *stack.projection());

        stack.set_mode(MatrixMode::ModelView);
        assert_eq!(
            *stack.current(),
            Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn stack_is_shared_across_modes() {
        let mut stack = MatrixStack::new(16);
        stack.set_mode(MatrixMode::Projection);
        stack.translate(0.0, 7.0, 0.0);
        let saved = *stack.current();
        stack.push();

        stack.set_mode(MatrixMode::ModelView);
        stack.pop();
        assert_eq!(*stack.modelview(), saved);
    }
}
