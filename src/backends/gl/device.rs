//! The OpenGL implementation of `Device`.
//!
//! One of three operating paths is selected when the device is created:
//! `VertexArrayObject` caches a VAO per (shader, bundle) pair,
//! `VertexBufferObjectOnly` re-binds attribute pointers before every draw,
//! and `ImmediateLegacy` keeps attribute data client-side and specifies it
//! from CPU memory. The batching core above is identical for all three.

use std::cell::RefCell;
use std::os::raw::c_void;

use gl;
use gl::types::*;

use crate::assets::prelude::*;
use crate::assets::shader::UNIFORM_TEXTURE;
use crate::batch::Primitive;
use crate::errors::{Error, Result};
use crate::math::prelude::{Color, Matrix4, Vector4};
use crate::utils::hash::FastHashMap;
use crate::utils::hash_value::HashValue;

use super::super::utils::DataVec;
use super::super::Device;
use super::capabilities::{Capabilities, DevicePath, Version};
use super::types;

const VS_330: &str = r#"
#version 330 core
in vec3 Position;
in vec4 Color0;
in vec2 Texcoord0;
out vec4 v_Color;
out vec2 v_Texcoord;
uniform mat4 u_MVPMatrix;
void main() {
    v_Color = Color0;
    v_Texcoord = Texcoord0;
    gl_Position = u_MVPMatrix * vec4(Position, 1.0);
}
"#;

const FS_330: &str = r#"
#version 330 core
in vec4 v_Color;
in vec2 v_Texcoord;
out vec4 o_Color;
uniform sampler2D u_Texture0;
uniform vec4 u_TintColor;
void main() {
    o_Color = texture(u_Texture0, v_Texcoord) * v_Color * u_TintColor;
}
"#;

const VS_110: &str = r#"
#version 110
attribute vec3 Position;
attribute vec4 Color0;
attribute vec2 Texcoord0;
varying vec4 v_Color;
varying vec2 v_Texcoord;
uniform mat4 u_MVPMatrix;
void main() {
    v_Color = Color0;
    v_Texcoord = Texcoord0;
    gl_Position = u_MVPMatrix * vec4(Position, 1.0);
}
"#;

const FS_110: &str = r#"
#version 110
varying vec4 v_Color;
varying vec2 v_Texcoord;
uniform sampler2D u_Texture0;
uniform vec4 u_TintColor;
void main() {
    gl_FragColor = texture2D(u_Texture0, v_Texcoord) * v_Color * u_TintColor;
}
"#;

const VS_ES100: &str = r#"
#version 100
attribute vec3 Position;
attribute vec4 Color0;
attribute vec2 Texcoord0;
varying vec4 v_Color;
varying vec2 v_Texcoord;
uniform mat4 u_MVPMatrix;
void main() {
    v_Color = Color0;
    v_Texcoord = Texcoord0;
    gl_Position = u_MVPMatrix * vec4(Position, 1.0);
}
"#;

const FS_ES100: &str = r#"
#version 100
precision mediump float;
varying vec4 v_Color;
varying vec2 v_Texcoord;
uniform sampler2D u_Texture0;
uniform vec4 u_TintColor;
void main() {
    gl_FragColor = texture2D(u_Texture0, v_Texcoord) * v_Color * u_TintColor;
}
"#;

#[derive(Debug, Clone)]
struct GLBufferData {
    // 0 on the legacy path; attribute data lives in `cpu` instead.
    id: GLuint,
    params: BufferParams,
    cpu: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
struct GLTextureData {
    id: GLuint,
    params: TextureParams,
}

#[derive(Debug, Clone)]
struct GLShaderData {
    id: GLuint,
    uniforms: RefCell<FastHashMap<HashValue<str>, GLint>>,
}

impl GLShaderData {
    unsafe fn uniform_location(&self, name: &str) -> Result<GLint> {
        let hash = name.into();
        let mut uniforms = self.uniforms.borrow_mut();
        match uniforms.get(&hash).cloned() {
            Some(location) => Ok(location),
            None => {
                let c_name = ::std::ffi::CString::new(name.as_bytes()).unwrap();
                let location = gl::GetUniformLocation(self.id, c_name.as_ptr());
                check()?;

                uniforms.insert(hash, location);
                Ok(location)
            }
        }
    }
}

struct GLMutableState {
    bound_shader: Option<ShaderHandle>,
    bound_texture: Option<TextureHandle>,
    bound_vao: Option<(ShaderHandle, BufferHandle)>,
    bound_indices: Option<BufferHandle>,
    blend: Option<(Equation, BlendFactor, BlendFactor)>,
    vaos: FastHashMap<(ShaderHandle, BufferHandle), GLuint>,
}

pub struct GLDevice {
    path: DevicePath,
    capabilities: Capabilities,
    state: GLMutableState,
    buffers: DataVec<GLBufferData>,
    textures: DataVec<GLTextureData>,
    shaders: DataVec<GLShaderData>,
}

impl GLDevice {
    /// # Unsafe
    ///
    /// The context `loader` resolves symbols from must be current on the
    /// calling thread and stay current for the lifetime of the device.
    pub unsafe fn new<F>(mut loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(|symbol| loader(symbol));

        let capabilities = Capabilities::parse()?;
        let path = DevicePath::select(&capabilities)?;
        info!(
            "GLDevice {:?}, {} {} ({:?})",
            path, capabilities.vendor, capabilities.renderer, capabilities.version
        );

        let mut device = GLDevice {
            path,
            capabilities,
            state: GLMutableState {
                bound_shader: None,
                bound_texture: None,
                bound_vao: None,
                bound_indices: None,
                blend: None,
                vaos: FastHashMap::default(),
            },
            buffers: DataVec::new(),
            textures: DataVec::new(),
            shaders: DataVec::new(),
        };

        device.reset_state()?;
        Ok(device)
    }

    #[inline]
    pub fn path(&self) -> DevicePath {
        self.path
    }

    unsafe fn reset_state(&mut self) -> Result<()> {
        gl::Disable(gl::CULL_FACE);
        gl::Disable(gl::SCISSOR_TEST);

        // Batched 2D shapes rely on the depth test to composite in
        // submission order through the per-shape pseudo-depth.
        gl::Enable(gl::DEPTH_TEST);
        gl::DepthFunc(gl::LEQUAL);

        let (equation, src, dst) = BlendMode::Alpha.factors();
        gl::Enable(gl::BLEND);
        gl::BlendFunc(src.into(), dst.into());
        gl::BlendEquation(equation.into());
        self.state.blend = Some((equation, src, dst));

        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        check()
    }

    unsafe fn compile(stage: GLenum, src: &str) -> Result<GLuint> {
        let shader = gl::CreateShader(stage);
        let c_str = ::std::ffi::CString::new(src.as_bytes()).unwrap();
        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ::std::ptr::null());
        gl::CompileShader(shader);

        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader,
                len,
                ::std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );
            gl::DeleteShader(shader);

            let log = String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string();
            Err(Error::ShaderCreationFailure(log).into())
        } else {
            Ok(shader)
        }
    }

    unsafe fn link(vs: GLuint, fs: GLuint) -> Result<GLuint> {
        let id = gl::CreateProgram();
        gl::AttachShader(id, vs);
        gl::AttachShader(id, fs);

        // Attribute locations follow the crate-wide convention, so every
        // vertex bundle feeds every program the same way.
        for attr in &[Attribute::Position, Attribute::Color0, Attribute::Texcoord0] {
            let name: &'static str = (*attr).into();
            let c_name = ::std::ffi::CString::new(name).unwrap();
            gl::BindAttribLocation(id, attr.location(), c_name.as_ptr());
        }

        gl::LinkProgram(id);

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(id, gl::LINK_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len: GLint = 0;
            gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetProgramInfoLog(
                id,
                len,
                ::std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );
            gl::DeleteProgram(id);

            let log = String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string();
            Err(Error::ShaderCreationFailure(log).into())
        } else {
            Ok(id)
        }
    }

    /// Points one attribute location at its source buffer.
    unsafe fn attach_attribute(&self, handle: BufferHandle) -> Result<()> {
        let buf = self
            .buffers
            .get(handle)
            .ok_or(Error::BufferHandleInvalid(handle))?;

        let attr = match buf.params.role {
            BufferRole::Vertices(attr) => attr,
            BufferRole::Indices(_) => {
                return Err(
                    Error::Backend("Index buffer used as an attribute source.".into()).into(),
                );
            }
        };

        let location = attr.name.location();
        if let Some(ref cpu) = buf.cpu {
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::EnableVertexAttribArray(location);
            gl::VertexAttribPointer(
                location,
                GLint::from(attr.size),
                attr.format.into(),
                attr.normalized as u8,
                0,
                cpu.as_ptr() as *const c_void,
            );
        } else {
            gl::BindBuffer(gl::ARRAY_BUFFER, buf.id);
            gl::EnableVertexAttribArray(location);
            gl::VertexAttribPointer(
                location,
                GLint::from(attr.size),
                attr.format.into(),
                attr.normalized as u8,
                0,
                ::std::ptr::null(),
            );
        }

        check()
    }

    unsafe fn bind_index_buffer(&self, handle: BufferHandle) -> Result<()> {
        let buf = self
            .buffers
            .get(handle)
            .ok_or(Error::BufferHandleInvalid(handle))?;

        if buf.cpu.is_none() {
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, buf.id);
            check()?;
        }

        Ok(())
    }

    /// Leaves the VAO binding in a known state before touching global
    /// buffer bindings, so a cached VAO never captures them by accident.
    unsafe fn unbind_vao(&mut self) {
        if self.path == DevicePath::VertexArrayObject && self.state.bound_vao.is_some() {
            gl::BindVertexArray(0);
            self.state.bound_vao = None;
        }
    }

    fn default_sources(&self) -> (&'static str, &'static str) {
        match self.capabilities.version {
            Version::ES(_, _) => (VS_ES100, FS_ES100),
            Version::GL(_, _) if self.capabilities.version >= Version::GL(3, 3) => (VS_330, FS_330),
            Version::GL(_, _) => (VS_110, FS_110),
        }
    }
}

impl Device for GLDevice {
    unsafe fn create_buffer(
        &mut self,
        handle: BufferHandle,
        params: BufferParams,
        data: Option<&[u8]>,
    ) -> Result<()> {
        params.validate(data)?;

        let data_vec = if self.path == DevicePath::ImmediateLegacy {
            let mut cpu = vec![0u8; params.len];
            if let Some(v) = data {
                cpu[..v.len()].copy_from_slice(v);
            }

            GLBufferData {
                id: 0,
                params,
                cpu: Some(cpu),
            }
        } else {
            self.unbind_vao();

            let target = match params.role {
                BufferRole::Vertices(_) => gl::ARRAY_BUFFER,
                BufferRole::Indices(_) => gl::ELEMENT_ARRAY_BUFFER,
            };

            let mut id = 0;
            gl::GenBuffers(1, &mut id);
            assert!(id != 0);

            gl::BindBuffer(target, id);
            let ptr = match data {
                Some(v) if !v.is_empty() => v.as_ptr() as *const c_void,
                _ => ::std::ptr::null(),
            };
            gl::BufferData(target, params.len as isize, ptr, params.hint.into());
            check()?;

            GLBufferData {
                id,
                params,
                cpu: None,
            }
        };

        self.buffers.create(handle, data_vec);
        Ok(())
    }

    unsafe fn update_buffer(
        &mut self,
        handle: BufferHandle,
        offset: usize,
        data: &[u8],
    ) -> Result<()> {
        self.unbind_vao();

        let buf = self
            .buffers
            .get_mut(handle)
            .ok_or(Error::BufferHandleInvalid(handle))?;

        if buf.params.hint == BufferHint::Immutable {
            return Err(Error::Backend("Trying to update an immutable buffer.".into()).into());
        }

        if offset + data.len() > buf.params.len {
            return Err(Error::OutOfBounds.into());
        }

        if let Some(ref mut cpu) = buf.cpu {
            cpu[offset..offset + data.len()].copy_from_slice(data);
            return Ok(());
        }

        let target = match buf.params.role {
            BufferRole::Vertices(_) => gl::ARRAY_BUFFER,
            BufferRole::Indices(_) => gl::ELEMENT_ARRAY_BUFFER,
        };

        gl::BindBuffer(target, buf.id);
        gl::BufferSubData(
            target,
            offset as isize,
            data.len() as isize,
            data.as_ptr() as *const c_void,
        );
        check()
    }

    unsafe fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        let buf = self
            .buffers
            .free(handle)
            .ok_or(Error::BufferHandleInvalid(handle))?;

        // Removes deprecated `VertexArrayObject`s.
        self.state.vaos.retain(|&(_, h), vao| {
            if h == handle {
                gl::DeleteVertexArrays(1, vao as *mut u32);
                false
            } else {
                true
            }
        });

        if let Some((_, h)) = self.state.bound_vao {
            if h == handle {
                gl::BindVertexArray(0);
                self.state.bound_vao = None;
            }
        }

        if self.state.bound_indices == Some(handle) {
            self.state.bound_indices = None;
        }

        if buf.cpu.is_none() {
            gl::DeleteBuffers(1, &buf.id);
            check()?;
        }

        Ok(())
    }

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        data: Option<&[u8]>,
    ) -> Result<()> {
        params.validate(data)?;

        if params.dimensions.x > self.capabilities.max_texture_size
            || params.dimensions.y > self.capabilities.max_texture_size
        {
            return Err(Error::Backend(format!(
                "Texture dimensions {}x{} exceed the context limit of {}.",
                params.dimensions.x, params.dimensions.y, self.capabilities.max_texture_size
            ))
            .into());
        }

        let mut id = 0;
        gl::GenTextures(1, &mut id);
        assert!(id != 0);

        gl::ActiveTexture(gl::TEXTURE0);
        gl::BindTexture(gl::TEXTURE_2D, id);
        self.state.bound_texture = None;

        let wrap: GLenum = params.wrap.into();
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap as GLint);

        let filter = match params.filter {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        };
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter as GLint);

        let (internal_format, format, pixel_type) =
            types::texture_format(params.format, &self.capabilities);

        let ptr = match data {
            Some(v) if !v.is_empty() => v.as_ptr() as *const c_void,
            _ => ::std::ptr::null(),
        };

        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            internal_format as GLint,
            params.dimensions.x as GLsizei,
            params.dimensions.y as GLsizei,
            0,
            format,
            pixel_type,
            ptr,
        );
        check()?;

        self.textures.create(handle, GLTextureData { id, params });
        Ok(())
    }

    unsafe fn bind_texture(&mut self, handle: TextureHandle) -> Result<()> {
        if self.state.bound_texture == Some(handle) {
            return Ok(());
        }

        let texture = self
            .textures
            .get(handle)
            .ok_or(Error::TextureHandleInvalid(handle))?;

        gl::ActiveTexture(gl::TEXTURE0);
        gl::BindTexture(gl::TEXTURE_2D, texture.id);
        self.state.bound_texture = Some(handle);
        check()
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        let texture = self
            .textures
            .free(handle)
            .ok_or(Error::TextureHandleInvalid(handle))?;

        if self.state.bound_texture == Some(handle) {
            self.state.bound_texture = None;
        }

        gl::DeleteTextures(1, &texture.id);
        check()
    }

    unsafe fn create_shader(&mut self, handle: ShaderHandle, params: ShaderParams) -> Result<()> {
        params.validate()?;

        let vs = Self::compile(gl::VERTEX_SHADER, &params.vs)?;
        let fs = Self::compile(gl::FRAGMENT_SHADER, &params.fs)?;
        let id = Self::link(vs, fs)?;

        gl::DetachShader(id, vs);
        gl::DeleteShader(vs);
        gl::DetachShader(id, fs);
        gl::DeleteShader(fs);
        check()?;

        // The sampler convention is fixed: u_Texture0 always reads unit 0.
        gl::UseProgram(id);
        let c_name = ::std::ffi::CString::new(UNIFORM_TEXTURE).unwrap();
        let location = gl::GetUniformLocation(id, c_name.as_ptr());
        if location != -1 {
            gl::Uniform1i(location, 0);
        }
        self.state.bound_shader = None;
        check()?;

        self.shaders.create(
            handle,
            GLShaderData {
                id,
                uniforms: RefCell::new(FastHashMap::default()),
            },
        );

        Ok(())
    }

    unsafe fn create_default_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let (vs, fs) = self.default_sources();
        self.create_shader(
            handle,
            ShaderParams {
                vs: vs.into(),
                fs: fs.into(),
            },
        )
    }

    unsafe fn bind_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        if self.state.bound_shader == Some(handle) {
            return Ok(());
        }

        let shader = self
            .shaders
            .get(handle)
            .ok_or(Error::ShaderHandleInvalid(handle))?;

        gl::UseProgram(shader.id);
        self.state.bound_shader = Some(handle);
        check()
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .free(handle)
            .ok_or(Error::ShaderHandleInvalid(handle))?;

        // Removes deprecated `VertexArrayObject`s.
        self.state.vaos.retain(|&(h, _), vao| {
            if h == handle {
                gl::DeleteVertexArrays(1, vao as *mut u32);
                false
            } else {
                true
            }
        });

        if let Some((h, _)) = self.state.bound_vao {
            if h == handle {
                gl::BindVertexArray(0);
                self.state.bound_vao = None;
            }
        }

        if self.state.bound_shader == Some(handle) {
            self.state.bound_shader = None;
        }

        gl::DeleteProgram(shader.id);
        check()
    }

    unsafe fn set_uniform_matrix4(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        matrix: &Matrix4<f32>,
    ) -> Result<()> {
        self.bind_shader(handle)?;

        let shader = self
            .shaders
            .get(handle)
            .ok_or(Error::ShaderHandleInvalid(handle))?;

        let location = shader.uniform_location(name)?;
        if location == -1 {
            return Err(Error::Backend(format!("Uniform {} is undefined.", name)).into());
        }

        let m: [[f32; 4]; 4] = (*matrix).into();
        gl::UniformMatrix4fv(location, 1, gl::FALSE, m[0].as_ptr());
        check()
    }

    unsafe fn set_uniform_vec4(
        &mut self,
        handle: ShaderHandle,
        name: &str,
        value: Vector4<f32>,
    ) -> Result<()> {
        self.bind_shader(handle)?;

        let shader = self
            .shaders
            .get(handle)
            .ok_or(Error::ShaderHandleInvalid(handle))?;

        let location = shader.uniform_location(name)?;
        if location == -1 {
            return Err(Error::Backend(format!("Uniform {} is undefined.", name)).into());
        }

        gl::Uniform4f(location, value.x, value.y, value.z, value.w);
        check()
    }

    unsafe fn bind_vertex_bundle(
        &mut self,
        shader: ShaderHandle,
        bundle: VertexBundle,
    ) -> Result<()> {
        self.bind_shader(shader)?;

        match self.path {
            DevicePath::VertexArrayObject => {
                let key = (shader, bundle.positions);
                if self.state.bound_vao != Some(key) {
                    if let Some(vao) = self.state.vaos.get(&key).cloned() {
                        gl::BindVertexArray(vao);
                        check()?;
                    } else {
                        let mut vao = 0;
                        gl::GenVertexArrays(1, &mut vao);
                        gl::BindVertexArray(vao);

                        self.attach_attribute(bundle.positions)?;
                        self.attach_attribute(bundle.colors)?;
                        if let Some(v) = bundle.texcoords {
                            self.attach_attribute(v)?;
                        }

                        // The element binding is part of the VAO state.
                        if let Some(v) = bundle.indices {
                            self.bind_index_buffer(v)?;
                        }

                        check()?;
                        self.state.vaos.insert(key, vao);
                    }

                    self.state.bound_vao = Some(key);
                }
            }

            DevicePath::VertexBufferObjectOnly | DevicePath::ImmediateLegacy => {
                self.attach_attribute(bundle.positions)?;
                self.attach_attribute(bundle.colors)?;
                if let Some(v) = bundle.texcoords {
                    self.attach_attribute(v)?;
                } else {
                    // The generic attribute value (0, 0, 0, 1) stands in,
                    // sampling the bound texture at its origin.
                    gl::DisableVertexAttribArray(Attribute::Texcoord0.location());
                }

                if let Some(v) = bundle.indices {
                    self.bind_index_buffer(v)?;
                }
            }
        }

        self.state.bound_indices = bundle.indices;
        Ok(())
    }

    unsafe fn draw_arrays(
        &mut self,
        primitive: Primitive,
        first: usize,
        count: usize,
    ) -> Result<u32> {
        if count == 0 {
            return Ok(0);
        }

        gl::DrawArrays(primitive.into(), first as GLint, count as GLsizei);
        check()?;
        Ok(primitive.assemble(count as u32))
    }

    unsafe fn draw_indexed(
        &mut self,
        primitive: Primitive,
        count: usize,
        format: IndexFormat,
        offset: usize,
    ) -> Result<u32> {
        if count == 0 {
            return Ok(0);
        }

        let ptr = if self.path == DevicePath::ImmediateLegacy {
            let handle = self
                .state
                .bound_indices
                .ok_or_else(|| Error::Backend("No index buffer is bound.".into()))?;
            let buf = self
                .buffers
                .get(handle)
                .ok_or(Error::BufferHandleInvalid(handle))?;
            let cpu = buf
                .cpu
                .as_ref()
                .ok_or_else(|| Error::Backend("No index buffer is bound.".into()))?;

            if offset + count * format.len() > cpu.len() {
                return Err(Error::OutOfBounds.into());
            }

            cpu.as_ptr().add(offset) as *const c_void
        } else {
            offset as *const c_void
        };

        gl::DrawElements(primitive.into(), count as GLsizei, format.into(), ptr);
        check()?;
        Ok(primitive.assemble(count as u32))
    }

    unsafe fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()> {
        let (equation, src, dst) = mode.factors();
        if self.state.blend != Some((equation, src, dst)) {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(src.into(), dst.into());
            gl::BlendEquation(equation.into());
            self.state.blend = Some((equation, src, dst));
            check()?;
        }

        Ok(())
    }

    unsafe fn clear(&mut self, color: Option<Color<f32>>, depth: Option<f32>) -> Result<()> {
        let mut bits = 0;
        if let Some(v) = color {
            bits |= gl::COLOR_BUFFER_BIT;
            let [r, g, b, a] = v.rgba();
            gl::ClearColor(r, g, b, a);
        }

        if let Some(v) = depth {
            bits |= gl::DEPTH_BUFFER_BIT;
            gl::ClearDepth(f64::from(v));
        }

        if bits != 0 {
            gl::Clear(bits);
            check()
        } else {
            Ok(())
        }
    }

    unsafe fn flush(&mut self) -> Result<()> {
        gl::Flush();
        check()
    }
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => Err(Error::Backend(
            "[GL] An unacceptable value is specified for an enumerated argument.".into(),
        )
        .into()),

        gl::INVALID_VALUE => {
            Err(Error::Backend("[GL] A numeric argument is out of range.".into()).into())
        }

        gl::INVALID_OPERATION => Err(Error::Backend(
            "[GL] The specified operation is not allowed in the current state.".into(),
        )
        .into()),

        gl::INVALID_FRAMEBUFFER_OPERATION => Err(Error::Backend(
            "[GL] The command is trying to render to or read from the framebuffer \
             while the currently bound framebuffer is not framebuffer complete."
                .into(),
        )
        .into()),

        gl::OUT_OF_MEMORY => Err(Error::Backend(
            "[GL] There is not enough memory left to execute the command.".into(),
        )
        .into()),

        _ => Err(Error::Backend("[GL] Unknown OpenGL error.".into()).into()),
    }
}
