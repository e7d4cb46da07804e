//! Math types, mostly re-exported from `cgmath`.

pub use cgmath::*;

pub mod color;
pub use self::color::Color;

pub mod prelude {
    pub use cgmath::prelude::*;
    pub use cgmath::{frustum, ortho, Deg, Matrix4, Rad, Vector2, Vector3, Vector4};

    pub use super::color::Color;
}
