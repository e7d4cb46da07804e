use gl;
use gl::types::*;

use crate::assets::prelude::*;
use crate::batch::Primitive;

use super::capabilities::{Capabilities, Version};

impl From<BufferHint> for GLenum {
    fn from(hint: BufferHint) -> Self {
        match hint {
            BufferHint::Immutable => gl::STATIC_DRAW,
            BufferHint::Stream => gl::STREAM_DRAW,
            BufferHint::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}

impl From<Equation> for GLenum {
    fn from(eq: Equation) -> Self {
        match eq {
            Equation::Add => gl::FUNC_ADD,
            Equation::Subtract => gl::FUNC_SUBTRACT,
            Equation::ReverseSubtract => gl::FUNC_REVERSE_SUBTRACT,
        }
    }
}

impl From<BlendFactor> for GLenum {
    fn from(factor: BlendFactor) -> Self {
        match factor {
            BlendFactor::Zero => gl::ZERO,
            BlendFactor::One => gl::ONE,
            BlendFactor::Value(BlendValue::SourceColor) => gl::SRC_COLOR,
            BlendFactor::Value(BlendValue::SourceAlpha) => gl::SRC_ALPHA,
            BlendFactor::Value(BlendValue::DestinationColor) => gl::DST_COLOR,
            BlendFactor::Value(BlendValue::DestinationAlpha) => gl::DST_ALPHA,
            BlendFactor::OneMinusValue(BlendValue::SourceColor) => gl::ONE_MINUS_SRC_COLOR,
            BlendFactor::OneMinusValue(BlendValue::SourceAlpha) => gl::ONE_MINUS_SRC_ALPHA,
            BlendFactor::OneMinusValue(BlendValue::DestinationColor) => gl::ONE_MINUS_DST_COLOR,
            BlendFactor::OneMinusValue(BlendValue::DestinationAlpha) => gl::ONE_MINUS_DST_ALPHA,
        }
    }
}

impl From<VertexFormat> for GLenum {
    fn from(format: VertexFormat) -> Self {
        match format {
            VertexFormat::Byte => gl::BYTE,
            VertexFormat::UByte => gl::UNSIGNED_BYTE,
            VertexFormat::Short => gl::SHORT,
            VertexFormat::UShort => gl::UNSIGNED_SHORT,
            VertexFormat::Float => gl::FLOAT,
        }
    }
}

impl From<Primitive> for GLenum {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Lines => gl::LINES,
            Primitive::Triangles => gl::TRIANGLES,
        }
    }
}

impl From<IndexFormat> for GLenum {
    fn from(format: IndexFormat) -> Self {
        match format {
            IndexFormat::U16 => gl::UNSIGNED_SHORT,
            IndexFormat::U32 => gl::UNSIGNED_INT,
        }
    }
}

impl From<TextureWrap> for GLenum {
    fn from(wrap: TextureWrap) -> Self {
        match wrap {
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::Mirror => gl::MIRRORED_REPEAT,
            TextureWrap::Clamp => gl::CLAMP_TO_EDGE,
        }
    }
}

/// The (internal format, format, pixel type) triple a texture format maps
/// to. Desktop GL and ES 3 take sized internal formats; ES 2 takes the
/// unsized ones.
pub fn texture_format(format: TextureFormat, caps: &Capabilities) -> (GLenum, GLenum, GLenum) {
    let sized = match caps.version {
        Version::GL(_, _) => true,
        Version::ES(major, _) => major >= 3,
    };

    if sized {
        match format {
            TextureFormat::R8 => (gl::R8, gl::RED, gl::UNSIGNED_BYTE),
            TextureFormat::R8G8 => (gl::RG8, gl::RG, gl::UNSIGNED_BYTE),
            TextureFormat::R8G8B8 => (gl::RGB8, gl::RGB, gl::UNSIGNED_BYTE),
            TextureFormat::R8G8B8A8 => (gl::RGBA8, gl::RGBA, gl::UNSIGNED_BYTE),
            TextureFormat::R5G6B5 => (gl::RGB565, gl::RGB, gl::UNSIGNED_SHORT_5_6_5),
            TextureFormat::R5G5B5A1 => (gl::RGB5_A1, gl::RGBA, gl::UNSIGNED_SHORT_5_5_5_1),
            TextureFormat::R4G4B4A4 => (gl::RGBA4, gl::RGBA, gl::UNSIGNED_SHORT_4_4_4_4),
        }
    } else {
        match format {
            TextureFormat::R8 => (gl::RED, gl::RED, gl::UNSIGNED_BYTE),
            TextureFormat::R8G8 => (gl::RG, gl::RG, gl::UNSIGNED_BYTE),
            TextureFormat::R8G8B8 => (gl::RGB, gl::RGB, gl::UNSIGNED_BYTE),
            TextureFormat::R8G8B8A8 => (gl::RGBA, gl::RGBA, gl::UNSIGNED_BYTE),
            TextureFormat::R5G6B5 => (gl::RGB, gl::RGB, gl::UNSIGNED_SHORT_5_6_5),
            TextureFormat::R5G5B5A1 => (gl::RGBA, gl::RGBA, gl::UNSIGNED_SHORT_5_5_5_1),
            TextureFormat::R4G4B4A4 => (gl::RGBA, gl::RGBA, gl::UNSIGNED_SHORT_4_4_4_4),
        }
    }
}
