//! Resource descriptions: handles, creation parameters and the enums that
//! describe how buffers, textures and shader programs are laid out.

pub mod buffer;
pub mod shader;
pub mod texture;

pub mod prelude {
    pub use super::buffer::{
        BufferHandle, BufferHint, BufferParams, BufferRole, IndexFormat, VertexAttribute,
        VertexBundle, VertexFormat,
    };
    pub use super::shader::{
        Attribute, BlendFactor, BlendMode, BlendValue, Equation, ShaderHandle, ShaderParams,
    };
    pub use super::texture::{
        TextureFilter, TextureFormat, TextureHandle, TextureParams, TextureWrap,
    };
}
