//! The GPU backend, responsible for only one thing: turning uploaded
//! attribute arrays and draw requests into low-level video API calls.
//!
//! The batching core is written once against the `Device` trait; the GL
//! implementation picks one of its operating paths at creation time, and
//! the headless implementation accepts everything and draws nothing.

pub mod gl;
pub mod headless;
mod utils;

use std::os::raw::c_void;

use crate::assets::prelude::*;
use crate::batch::Primitive;
use crate::errors::Result;
use crate::math::prelude::{Color, Matrix4, Vector4};

pub trait Device {
    unsafe fn create_buffer(
        &mut self,
        handle: BufferHandle,
        params: BufferParams,
        data: Option<&[u8]>,
    ) -> Result<()>;

    /// Partial update of a GPU-resident array, starting at `offset` bytes.
    unsafe fn update_buffer(
        &mut self,
        handle: BufferHandle,
        offset: usize,
        data: &[u8],
    ) -> Result<()>;

    unsafe fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()>;

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        data: Option<&[u8]>,
    ) -> Result<()>;

    unsafe fn bind_texture(&mut self, handle: TextureHandle) -> Result<()>;

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()>;

    unsafe fn create_shader(&mut self, handle: ShaderHandle, params: ShaderParams) -> Result<()>;

    /// Creates the built-in program for `handle`, written in whatever
    /// shading dialect the device speaks.
    unsafe fn create_default_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    unsafe fn set_uniform_matrix4(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        matrix: &Matrix4<f32>,
    ) -> Result<()>;

    unsafe fn set_uniform_vec4(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        value: Vector4<f32>,
    ) -> Result<()>;

    /// Selects the attribute source buffers for subsequent draws.
    unsafe fn bind_vertex_bundle(
        &mut self,
        shader: ShaderHandle,
        bundle: VertexBundle,
    ) -> Result<()>;

    /// Issues a non-indexed draw. Returns the number of primitives drawn.
    unsafe fn draw_arrays(
        &mut self,
        primitive: Primitive,
        first: usize,
        count: usize,
    ) -> Result<u32>;

    /// Issues an indexed draw starting `offset` bytes into the bound index
    /// buffer. Returns the number of primitives drawn.
    unsafe fn draw_indexed(
        &mut self,
        primitive: Primitive,
        count: usize,
        format: IndexFormat,
        offset: usize,
    ) -> Result<u32>;

    unsafe fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()>;

    unsafe fn clear(&mut self, color: Option<Color<f32>>, depth: Option<f32>) -> Result<()>;

    /// Blocks until every submitted command has taken effect.
    unsafe fn flush(&mut self) -> Result<()>;
}

/// Creates the OpenGL device. `loader` resolves GL entry points by name;
/// the context it loads from must be current on the calling thread and
/// stay current for the lifetime of the device.
pub fn new<F>(loader: F) -> Result<Box<dyn Device>>
where
    F: FnMut(&str) -> *const c_void,
{
    let device = unsafe { self::gl::device::GLDevice::new(loader)? };
    Ok(Box::new(device))
}

/// Creates a device that accepts every call and draws nothing. Useful for
/// tests and CI environments without a GL context.
pub fn new_headless() -> Box<dyn Device> {
    Box::new(self::headless::HeadlessDevice::new())
}
