//! # Graphite
//!
//! Graphite is an immediate-mode rendering layer. Callers emit vertices
//! one attribute at a time between `begin` and `end`, and the library
//! accumulates them into per-topology batches that a single `flush`
//! turns into a handful of draw calls, grouped by texture.
//!
//! ## Example
//!
//! ```rust,no_run
//! use graphite::prelude::*;
//!
//! let mut ctx = Context::headless(Settings::default()).unwrap();
//!
//! ctx.begin(DrawTopology::Triangles);
//! ctx.color4b(255, 0, 0, 255);
//! ctx.vertex2(0.0, 0.5);
//! ctx.vertex2(-0.5, -0.5);
//! ctx.vertex2(0.5, -0.5);
//! ctx.end();
//!
//! ctx.flush().unwrap();
//! ```

#[cfg(test)]
#[macro_use]
extern crate approx;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

#[macro_use]
pub mod utils;

pub mod assets;
pub mod backends;
pub mod batch;
pub mod context;
pub mod errors;
pub mod math;
pub mod settings;
pub mod transform;

pub mod prelude;

pub use self::context::{Context, FrameInfo};
pub use self::errors::{Error, Result};
pub use self::settings::Settings;
