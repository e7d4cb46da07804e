use crate::assets::prelude::*;
use crate::batch::Primitive;
use crate::errors::Result;
use crate::math::prelude::{Color, Matrix4, Vector4};

use super::Device;

pub struct HeadlessDevice {}

impl HeadlessDevice {
    pub fn new() -> Self {
        HeadlessDevice {}
    }
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        HeadlessDevice::new()
    }
}

impl Device for HeadlessDevice {
    unsafe fn create_buffer(
        &mut self,
        _: BufferHandle,
        _: BufferParams,
        _: Option<&[u8]>,
    ) -> Result<()> {
        Ok(())
    }

    unsafe fn update_buffer(&mut self, _: BufferHandle, _: usize, _: &[u8]) -> Result<()> {
        Ok(())
    }

    unsafe fn delete_buffer(&mut self, _: BufferHandle) -> Result<()> {
        Ok(())
    }

    unsafe fn create_texture(
        &mut self,
        _: TextureHandle,
        _: TextureParams,
        _: Option<&[u8]>,
    ) -> Result<()> {
        Ok(())
    }

    unsafe fn bind_texture(&mut self, _: TextureHandle) -> Result<()> {
        Ok(())
    }

    unsafe fn delete_texture(&mut self, _: TextureHandle) -> Result<()> {
        Ok(())
    }

    unsafe fn create_shader(&mut self, _: ShaderHandle, _: ShaderParams) -> Result<()> {
        Ok(())
    }

    unsafe fn create_default_shader(&mut self, _: ShaderHandle) -> Result<()> {
        Ok(())
    }

    unsafe fn bind_shader(&mut self, _: ShaderHandle) -> Result<()> {
        Ok(())
    }

    unsafe fn delete_shader(&mut self, _: ShaderHandle) -> Result<()> {
        Ok(())
    }

    unsafe fn set_uniform_matrix4(
        &mut self,
        _: ShaderHandle,
        _: &str,
        _: &Matrix4<f32>,
    ) -> Result<()> {
        Ok(())
    }

    unsafe fn set_uniform_vec4(&mut self, _: ShaderHandle, _: &str, _: Vector4<f32>) -> Result<()> {
        Ok(())
    }

    unsafe fn bind_vertex_bundle(&mut self, _: ShaderHandle, _: VertexBundle) -> Result<()> {
        Ok(())
    }

    unsafe fn draw_arrays(&mut self, _: Primitive, _: usize, _: usize) -> Result<u32> {
        Ok(0)
    }

    unsafe fn draw_indexed(
        &mut self,
        _: Primitive,
        _: usize,
        _: IndexFormat,
        _: usize,
    ) -> Result<u32> {
        Ok(0)
    }

    unsafe fn set_blend_mode(&mut self, _: BlendMode) -> Result<()> {
        Ok(())
    }

    unsafe fn clear(&mut self, _: Option<Color<f32>>, _: Option<f32>) -> Result<()> {
        Ok(())
    }

    unsafe fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
