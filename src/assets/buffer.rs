//! GPU-resident data arrays that back the batch buffers.

use crate::errors::{Error, Result};

use super::shader::Attribute;

impl_handle!(BufferHandle);

/// The setup parameters of a buffer object.
#[derive(Debug, Copy, Clone)]
pub struct BufferParams {
    /// Hint abouts the intended update strategy of the data.
    pub hint: BufferHint,
    /// What the buffer feeds: one vertex attribute, or primitive indices.
    pub role: BufferRole,
    /// The capacity of this buffer in bytes.
    pub len: usize,
}

impl BufferParams {
    pub fn validate(&self, data: Option<&[u8]>) -> Result<()> {
        if self.len == 0 {
            return Err(Error::OutOfBounds.into());
        }

        let stride = match self.role {
            BufferRole::Vertices(attr) => attr.stride(),
            BufferRole::Indices(format) => format.len(),
        };

        if self.len % stride != 0 {
            return Err(Error::OutOfBounds.into());
        }

        if let Some(buf) = data {
            if buf.len() > self.len {
                return Err(Error::OutOfBounds.into());
            }
        }

        Ok(())
    }
}

/// Hint abouts the intended update strategy of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BufferHint {
    /// The resource is initialized with data and cannot be changed later.
    Immutable,
    /// The resource is updated by the CPU in each frame.
    Stream,
    /// The resource will be written by the CPU before use, updates will
    /// be infrequent.
    Dynamic,
}

/// What a buffer feeds during draws.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BufferRole {
    Vertices(VertexAttribute),
    Indices(IndexFormat),
}

/// Vertex indices can be either 16- or 32-bit.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    pub fn len(self) -> usize {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

/// The data type of each component in a vertex attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum VertexFormat {
    Byte,
    UByte,
    Short,
    UShort,
    Float,
}

impl VertexFormat {
    pub fn len(self) -> usize {
        match self {
            VertexFormat::Byte | VertexFormat::UByte => 1,
            VertexFormat::Short | VertexFormat::UShort => 2,
            VertexFormat::Float => 4,
        }
    }
}

/// The details of a single vertex attribute stored in its own buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VertexAttribute {
    /// The name of this attribute.
    pub name: Attribute,
    /// The data type of each component of this element.
    pub format: VertexFormat,
    /// The number of components per vertex.
    pub size: u8,
    /// Whether fixed-point data values should be normalized.
    pub normalized: bool,
}

impl VertexAttribute {
    pub fn new(name: Attribute, format: VertexFormat, size: u8, normalized: bool) -> Self {
        assert!(size > 0 && size <= 4);
        VertexAttribute {
            name,
            format,
            size,
            normalized,
        }
    }

    /// Bytes taken by one vertex in this buffer.
    pub fn stride(&self) -> usize {
        self.format.len() * self.size as usize
    }
}

/// The per-attribute buffers one topology draws from. Positions and colors
/// are always present; texcoords and indices only exist for quads.
#[derive(Debug, Clone, Copy)]
pub struct VertexBundle {
    pub positions: BufferHandle,
    pub colors: BufferHandle,
    pub texcoords: Option<BufferHandle>,
    pub indices: Option<BufferHandle>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn attribute_stride() {
        let positions = VertexAttribute::new(Attribute::Position, VertexFormat::Float, 3, false);
        assert_eq!(positions.stride(), 12);

        let colors = VertexAttribute::new(Attribute::Color0, VertexFormat::UByte, 4, true);
        assert_eq!(colors.stride(), 4);
    }

    #[test]
    fn validate() {
        let params = BufferParams {
            hint: BufferHint::Stream,
            role: BufferRole::Vertices(VertexAttribute::new(
                Attribute::Position,
                VertexFormat::Float,
                3,
                false,
            )),
            len: 120,
        };
        assert!(params.validate(None).is_ok());
        assert!(params.validate(Some(&[0; 120])).is_ok());
        assert!(params.validate(Some(&[0; 121])).is_err());

        let misaligned = BufferParams { len: 11, ..params };
        assert!(misaligned.validate(None).is_err());
    }
}
