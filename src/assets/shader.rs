//! Shader program descriptions and the blending states that accompany them.
//!
//! The batching pipeline drives every program through a fixed convention:
//! the attributes named by `Attribute` and the uniforms named by the
//! `UNIFORM_*` constants. Custom programs have to follow it as well, since
//! the flush pass knows nothing else about them.

use crate::errors::{Error, Result};

impl_handle!(ShaderHandle);

/// Name of the combined model-view-projection matrix uniform.
pub const UNIFORM_MVP: &str = "u_MVPMatrix";
/// Name of the tint color uniform applied to every fragment.
pub const UNIFORM_TINT: &str = "u_TintColor";
/// Name of the sampler uniform, always bound to texture unit 0.
pub const UNIFORM_TEXTURE: &str = "u_Texture0";

/// The setup parameters of a shader program.
#[derive(Debug, Clone, Default)]
pub struct ShaderParams {
    pub vs: String,
    pub fs: String,
}

impl ShaderParams {
    pub fn validate(&self) -> Result<()> {
        if self.vs.is_empty() {
            return Err(Error::ShaderCreationFailure(
                "Vertex shader source is required.".into(),
            )
            .into());
        }

        if self.fs.is_empty() {
            return Err(Error::ShaderCreationFailure(
                "Fragment shader source is required.".into(),
            )
            .into());
        }

        Ok(())
    }
}

/// The named attributes a vertex stream can feed into a program.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Position = 0,
    Color0 = 1,
    Texcoord0 = 2,
}

impl Attribute {
    /// The binding location every program uses for this attribute.
    pub fn location(self) -> u32 {
        self as u32
    }
}

impl Into<&'static str> for Attribute {
    fn into(self) -> &'static str {
        match self {
            Attribute::Position => "Position",
            Attribute::Color0 => "Color0",
            Attribute::Texcoord0 => "Texcoord0",
        }
    }
}

/// How incoming fragments are combined with the framebuffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BlendMode {
    /// Standard alpha blending.
    Alpha,
    /// Additive blending, source weighted by its alpha.
    Additive,
    /// Multiplied blending against the destination color.
    Multiplied,
}

impl BlendMode {
    /// The blend equation and factor pair this mode expands to.
    pub fn factors(self) -> (Equation, BlendFactor, BlendFactor) {
        match self {
            BlendMode::Alpha => (
                Equation::Add,
                BlendFactor::Value(BlendValue::SourceAlpha),
                BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
            ),
            BlendMode::Additive => (
                Equation::Add,
                BlendFactor::Value(BlendValue::SourceAlpha),
                BlendFactor::One,
            ),
            BlendMode::Multiplied => (
                Equation::Add,
                BlendFactor::Value(BlendValue::DestinationColor),
                BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
            ),
        }
    }
}

/// Specifies how source and destination are combined.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Equation {
    Add,
    Subtract,
    ReverseSubtract,
}

/// Blend values.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlendValue {
    SourceColor,
    SourceAlpha,
    DestinationColor,
    DestinationAlpha,
}

/// Blend factors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlendFactor {
    Zero,
    One,
    Value(BlendValue),
    OneMinusValue(BlendValue),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate() {
        let params = ShaderParams {
            vs: "void main() {}".into(),
            fs: "void main() {}".into(),
        };
        assert!(params.validate().is_ok());

        let missing = ShaderParams {
            vs: String::new(),
            fs: "void main() {}".into(),
        };
        assert!(missing.validate().is_err());
    }

    #[test]
    fn attribute_names() {
        let name: &'static str = Attribute::Texcoord0.into();
        assert_eq!(name, "Texcoord0");
        assert_eq!(Attribute::Position.location(), 0);
        assert_eq!(Attribute::Color0.location(), 1);
    }
}
