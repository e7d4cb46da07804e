//! Error types shared across the crate.
//!
//! Recoverable per-frame conditions (dropped vertices, ignored calls) are
//! surfaced through `log` and never through this module; `Error` covers the
//! failures a caller can actually act on.

use crate::assets::prelude::{BufferHandle, ShaderHandle, TextureHandle};

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
    #[fail(display = "OpenGL implementation doesn't support {}.", _0)]
    Requirement(String),
    #[fail(display = "Invalid settings: {}", _0)]
    SettingsInvalid(String),
    #[fail(display = "{} is invalid.", _0)]
    BufferHandleInvalid(BufferHandle),
    #[fail(display = "{} is invalid.", _0)]
    TextureHandleInvalid(TextureHandle),
    #[fail(display = "{} is invalid.", _0)]
    ShaderHandleInvalid(ShaderHandle),
    #[fail(display = "Failed to create shader, errors:\n{}.", _0)]
    ShaderCreationFailure(String),
    #[fail(display = "Out of bounds.")]
    OutOfBounds,
}
