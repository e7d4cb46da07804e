extern crate cgmath;
extern crate graphite;
#[macro_use]
extern crate approx;

use graphite::prelude::*;

fn context() -> Context {
    Context::headless(Settings::default()).unwrap()
}

#[test]
fn composition_order() {
    let mut ctx = context();

    ctx.translate(5.0, 0.0, 0.0);
    ctx.scale(2.0, 2.0, 2.0);

    // The last issued operation applies first to each vertex.
    let v = ctx.current_matrix() * Vector4::new(1.0, 1.0, 1.0, 1.0);
    assert_ulps_eq!(v, Vector4::new(7.0, 2.0, 2.0, 1.0));
}

#[test]
fn rotation_about_axis() {
    let mut ctx = context();
    ctx.rotate(90.0, Vector3::new(0.0, 0.0, 1.0));

    let v = ctx.current_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert_ulps_eq!(v, Vector4::new(0.0, 1.0, 0.0, 1.0), epsilon = 1e-6);
}

#[test]
fn projection_is_independent_of_modelview() {
    let mut ctx = context();
    ctx.translate(1.0, 2.0, 3.0);

    ctx.set_matrix_mode(MatrixMode::Projection);
    ctx.ortho(0.0, 640.0, 480.0, 0.0, -1.0, 1.0);
    assert_ulps_eq!(
        ctx.current_matrix(),
        cgmath::ortho(0.0, 640.0, 480.0, 0.0, -1.0, 1.0)
    );

    ctx.set_matrix_mode(MatrixMode::ModelView);
    assert_ulps_eq!(
        ctx.current_matrix(),
        Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
    );
}

#[test]
fn push_resets_pop_restores() {
    let mut ctx = context();

    ctx.translate(3.0, 0.0, 0.0);
    let saved = ctx.current_matrix();

    ctx.push_matrix();
    assert_ulps_eq!(ctx.current_matrix(), Matrix4::identity());

    ctx.scale(2.0, 2.0, 2.0);
    ctx.pop_matrix();
    assert_ulps_eq!(ctx.current_matrix(), saved);
}

#[test]
fn push_beyond_capacity_is_ignored() {
    let settings = Settings {
        max_matrix_depth: 2,
        ..Default::default()
    };
    let mut ctx = Context::headless(settings).unwrap();

    ctx.translate(1.0, 0.0, 0.0);
    ctx.push_matrix();
    ctx.translate(2.0, 0.0, 0.0);
    ctx.push_matrix();

    // The stack is full: this push must leave the current matrix alone.
    ctx.translate(4.0, 0.0, 0.0);
    ctx.push_matrix();
    assert_ulps_eq!(
        ctx.current_matrix(),
        Matrix4::from_translation(Vector3::new(4.0, 0.0, 0.0))
    );

    ctx.pop_matrix();
    assert_ulps_eq!(
        ctx.current_matrix(),
        Matrix4::from_translation(Vector3::new(2.0, 0.0, 0.0))
    );
    ctx.pop_matrix();
    assert_ulps_eq!(
        ctx.current_matrix(),
        Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0))
    );
}

#[test]
fn mult_matrix_composes_verbatim() {
    let mut ctx = context();

    let m = Matrix4::from_translation(Vector3::new(0.0, 7.0, 0.0));
    ctx.mult_matrix(m);
    ctx.mult_matrix(m);
    assert_ulps_eq!(
        ctx.current_matrix(),
        Matrix4::from_translation(Vector3::new(0.0, 14.0, 0.0))
    );
}

#[test]
fn frustum_matches_reference() {
    let mut ctx = context();
    ctx.set_matrix_mode(MatrixMode::Projection);
    ctx.frustum(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0);

    assert_ulps_eq!(
        ctx.current_matrix(),
        cgmath::frustum(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0)
    );
}

#[test]
fn degenerate_rotation_is_ignored() {
    let mut ctx = context();
    ctx.translate(1.0, 2.0, 3.0);

    let before = ctx.current_matrix();
    ctx.rotate(45.0, Vector3::new(0.0, 0.0, 0.0));
    assert_ulps_eq!(ctx.current_matrix(), before);
}
