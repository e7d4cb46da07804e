//! Immutable 2D texture objects.

use crate::errors::{Error, Result};
use crate::math::prelude::Vector2;

impl_handle!(TextureHandle);

/// The setup parameters of a texture object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    /// Sets the pixel layout of the texture.
    pub format: TextureFormat,
    /// Sets the wrap parameter for the texture.
    pub wrap: TextureWrap,
    /// Specifies the filtering used when sampling the texture.
    pub filter: TextureFilter,
    /// Sets the dimensions of the texture in pixels.
    pub dimensions: Vector2<u32>,
}

impl Default for TextureParams {
    fn default() -> Self {
        TextureParams {
            format: TextureFormat::R8G8B8A8,
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
            dimensions: Vector2::new(0, 0),
        }
    }
}

impl TextureParams {
    pub fn validate(&self, data: Option<&[u8]>) -> Result<()> {
        if self.dimensions.x == 0 || self.dimensions.y == 0 {
            return Err(Error::Backend("Texture dimensions must be non-zero.".into()).into());
        }

        if let Some(buf) = data {
            let len = self.format.size(self.dimensions) as usize;
            if buf.len() != len {
                return Err(Error::OutOfBounds.into());
            }
        }

        Ok(())
    }
}

/// The uncompressed pixel formats a texture can be created with.
///
/// Every format stores its components in the order the name lists them,
/// tightly packed per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFormat {
    /// Single 8-bit channel.
    R8,
    /// Two 8-bit channels.
    R8G8,
    /// Three 8-bit channels.
    R8G8B8,
    /// Four 8-bit channels.
    R8G8B8A8,
    /// Packed 16-bit, 5/6/5 bits per channel.
    R5G6B5,
    /// Packed 16-bit with a 1-bit alpha.
    R5G5B5A1,
    /// Packed 16-bit, 4 bits per channel.
    R4G4B4A4,
}

impl TextureFormat {
    /// Returns the size in bytes of a texture with `dimensions`.
    pub fn size(self, dimensions: Vector2<u32>) -> u32 {
        let bits = match self {
            TextureFormat::R8 => 8,
            TextureFormat::R8G8 => 16,
            TextureFormat::R8G8B8 => 24,
            TextureFormat::R8G8B8A8 => 32,
            TextureFormat::R5G6B5 | TextureFormat::R5G5B5A1 | TextureFormat::R4G4B4A4 => 16,
        };
        dimensions.x * dimensions.y * bits / 8
    }
}

/// Sets the wrap parameter for texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureWrap {
    /// Samples at coord x + 1 map to coord x.
    Repeat,
    /// Samples at coord x + 1 map to coord 1 - x.
    Mirror,
    /// Samples at coord x + 1 map to coord 1.
    Clamp,
}

/// Specifies how the texture is filtered when sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureFilter {
    /// Nearest-neighbor filtering.
    Nearest,
    /// Linear interpolation of the four closest texels.
    Linear,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn format_size() {
        let dims = Vector2::new(4, 2);
        assert_eq!(TextureFormat::R8.size(dims), 8);
        assert_eq!(TextureFormat::R8G8B8A8.size(dims), 32);
        assert_eq!(TextureFormat::R5G6B5.size(dims), 16);
    }

    #[test]
    fn validate() {
        let params = TextureParams {
            format: TextureFormat::R8G8B8A8,
            dimensions: Vector2::new(1, 1),
            ..Default::default()
        };

        assert!(params.validate(None).is_ok());
        assert!(params.validate(Some(&[255, 255, 255, 255])).is_ok());
        assert!(params.validate(Some(&[255, 255])).is_err());

        let degenerate = TextureParams {
            dimensions: Vector2::new(0, 4),
            ..Default::default()
        };
        assert!(degenerate.validate(None).is_err());
    }
}
