//! The most commonly used types, re-exported in one place.

pub use crate::assets::prelude::*;
pub use crate::backends::Device;
pub use crate::batch::{DrawTopology, Primitive};
pub use crate::context::{Context, FrameInfo};
pub use crate::errors::{Error, Result};
pub use crate::math::prelude::*;
pub use crate::settings::Settings;
pub use crate::transform::MatrixMode;
