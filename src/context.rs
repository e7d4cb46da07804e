//! The batching context: the single object callers drive.
//!
//! A `Context` owns every piece of batching state for its lifetime: the
//! matrix stack, the vertex stream and its topology buffers, the draw
//! descriptor list, the GPU-side buffer objects, and the reserved white
//! texture and default shader. Emission calls accumulate geometry;
//! `flush` uploads it and issues the minimum number of draws, grouped by
//! texture for quads.

use std::os::raw::c_void;
use std::time::{Duration, Instant};

use crate::assets::prelude::*;
use crate::assets::shader::{UNIFORM_MVP, UNIFORM_TINT};
use crate::backends::{self, Device};
use crate::batch::draws::DrawBatch;
use crate::batch::stream::VertexStream;
use crate::batch::{DrawTopology, Primitive};
use crate::errors::Result;
use crate::math::prelude::*;
use crate::settings::Settings;
use crate::transform::{MatrixMode, MatrixStack};
use crate::utils::HandlePool;

/// The statistics of the last completed flush.
#[derive(Debug, Copy, Clone, Default)]
pub struct FrameInfo {
    pub duration: Duration,
    pub drawcalls: u32,
    pub triangles: u32,
    pub alive_textures: u32,
    pub alive_shaders: u32,
}

/// The per-topology GPU buffers one flush draws from.
#[derive(Debug, Clone, Copy)]
struct TopologyBundles {
    lines: VertexBundle,
    triangles: VertexBundle,
    quads: VertexBundle,
}

pub struct Context {
    device: Box<dyn Device>,
    settings: Settings,

    matrices: MatrixStack,
    stream: VertexStream,
    draws: DrawBatch,

    buffers: HandlePool,
    textures: HandlePool,
    shaders: HandlePool,

    bundles: TopologyBundles,
    white: TextureHandle,
    default_shader: ShaderHandle,
    custom_shader: Option<ShaderHandle>,
    blend: BlendMode,
    clear_color: Color<f32>,
    info: FrameInfo,
}

impl Context {
    /// Creates a `Context` rendering through OpenGL. `loader` resolves GL
    /// entry points by name from a context that must be current on the
    /// calling thread.
    pub fn new<F>(settings: Settings, loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        Self::with_device(settings, backends::new(loader)?)
    }

    /// Creates a `Context` that batches normally but draws nothing.
    pub fn headless(settings: Settings) -> Result<Self> {
        Self::with_device(settings, backends::new_headless())
    }

    /// Creates a `Context` over a caller-supplied device.
    pub fn with_device(settings: Settings, mut device: Box<dyn Device>) -> Result<Self> {
        settings.validate()?;

        let stream = VertexStream::new(&settings);
        let mut buffers = HandlePool::new();
        let mut textures = HandlePool::new();
        let mut shaders = HandlePool::new();

        let white: TextureHandle = textures.create().into();
        unsafe {
            device.create_texture(
                white,
                TextureParams {
                    format: TextureFormat::R8G8B8A8,
                    wrap: TextureWrap::Clamp,
                    filter: TextureFilter::Nearest,
                    dimensions: Vector2::new(1, 1),
                },
                Some(&[255, 255, 255, 255]),
            )?;
        }

        let default_shader: ShaderHandle = shaders.create().into();
        unsafe {
            device.create_default_shader(default_shader)?;
        }

        let positions = VertexAttribute::new(Attribute::Position, VertexFormat::Float, 3, false);
        let colors = VertexAttribute::new(Attribute::Color0, VertexFormat::UByte, 4, true);
        let texcoords = VertexAttribute::new(Attribute::Texcoord0, VertexFormat::Float, 2, false);

        let lines_vertices = settings.max_lines * DrawTopology::Lines.arity();
        let triangles_vertices = settings.max_triangles * DrawTopology::Triangles.arity();
        let quads_vertices = settings.max_quads * DrawTopology::Quads.arity();

        let bundles = unsafe {
            TopologyBundles {
                lines: VertexBundle {
                    positions: attribute_buffer(
                        &mut *device,
                        &mut buffers,
                        positions,
                        lines_vertices,
                    )?,
                    colors: attribute_buffer(&mut *device, &mut buffers, colors, lines_vertices)?,
                    texcoords: None,
                    indices: None,
                },
                triangles: VertexBundle {
                    positions: attribute_buffer(
                        &mut *device,
                        &mut buffers,
                        positions,
                        triangles_vertices,
                    )?,
                    colors: attribute_buffer(
                        &mut *device,
                        &mut buffers,
                        colors,
                        triangles_vertices,
                    )?,
                    texcoords: None,
                    indices: None,
                },
                quads: VertexBundle {
                    positions: attribute_buffer(
                        &mut *device,
                        &mut buffers,
                        positions,
                        quads_vertices,
                    )?,
                    colors: attribute_buffer(&mut *device, &mut buffers, colors, quads_vertices)?,
                    texcoords: Some(attribute_buffer(
                        &mut *device,
                        &mut buffers,
                        texcoords,
                        quads_vertices,
                    )?),
                    // The index pattern never changes, so it is uploaded
                    // exactly once.
                    indices: Some(index_buffer(
                        &mut *device,
                        &mut buffers,
                        stream.quads().indices_bytes().unwrap_or(&[]),
                    )?),
                },
            }
        };

        info!(
            "Context up: {} lines / {} triangles / {} quads per flush, {} draw descriptors.",
            settings.max_lines, settings.max_triangles, settings.max_quads, settings.max_draws
        );

        Ok(Context {
            device,
            matrices: MatrixStack::new(settings.max_matrix_depth),
            stream,
            draws: DrawBatch::new(settings.max_draws, white),
            buffers,
            textures,
            shaders,
            bundles,
            white,
            default_shader,
            custom_shader: None,
            blend: BlendMode::Alpha,
            clear_color: Color::black(),
            info: FrameInfo::default(),
            settings,
        })
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The statistics of the last completed flush.
    #[inline]
    pub fn frame_info(&self) -> FrameInfo {
        self.info
    }
}

// Shape emission.
impl Context {
    /// Opens a shape of `topology`.
    #[inline]
    pub fn begin(&mut self, topology: DrawTopology) {
        self.stream.begin(topology);
    }

    /// Emits a 2D vertex; its depth comes from the per-shape counter so
    /// that later shapes composite over earlier ones.
    #[inline]
    pub fn vertex2(&mut self, x: f32, y: f32) {
        self.stream.vertex2(x, y, &mut self.draws);
    }

    #[inline]
    pub fn vertex2i(&mut self, x: i32, y: i32) {
        self.vertex2(x as f32, y as f32);
    }

    #[inline]
    pub fn vertex3(&mut self, x: f32, y: f32, z: f32) {
        self.stream.vertex(x, y, z, &mut self.draws);
    }

    /// Sets the color of the vertices that follow. One call may cover many
    /// vertices; the last written color is replicated at `end`.
    #[inline]
    pub fn color4b(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.stream.color([r, g, b, a]);
    }

    #[inline]
    pub fn color4f(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.color(Color::new(r, g, b, a));
    }

    #[inline]
    pub fn color3f(&mut self, r: f32, g: f32, b: f32) {
        self.color(Color::new(r, g, b, 1.0));
    }

    #[inline]
    pub fn color(&mut self, c: Color<f32>) {
        self.stream.color(c.into());
    }

    /// Sets the texcoord of the vertices that follow. Only quads sample
    /// textures; the call is ignored for other topologies.
    #[inline]
    pub fn texcoord(&mut self, u: f32, v: f32) {
        self.stream.texcoord(u, v);
    }

    /// Closes the open shape, applying any pending transform and
    /// reconciling attribute counts.
    pub fn end(&mut self) {
        let modelview = *self.matrices.modelview();
        self.stream.end(&modelview, &mut self.draws);
    }
}

// Transform control.
impl Context {
    #[inline]
    pub fn set_matrix_mode(&mut self, mode: MatrixMode) {
        self.matrices.set_mode(mode);
    }

    /// Saves the current matrix. In model-view mode this also defers the
    /// vertices of subsequent shapes, so the matrix built after the push
    /// applies to them at `end`.
    pub fn push_matrix(&mut self) {
        if !self.matrices.push() {
            warn!(
                "Matrix stack is full ({} saved), push ignored.",
                self.matrices.depth()
            );
            return;
        }

        if self.matrices.mode() == MatrixMode::ModelView {
            self.stream.defer();
        }
    }

    #[inline]
    pub fn pop_matrix(&mut self) {
        self.matrices.pop();
    }

    #[inline]
    pub fn load_identity(&mut self) {
        self.matrices.load_identity();
    }

    #[inline]
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.matrices.translate(x, y, z);
    }

    #[inline]
    pub fn rotate(&mut self, angle_degrees: f32, axis: Vector3<f32>) {
        self.matrices.rotate(angle_degrees, axis);
    }

    #[inline]
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.matrices.scale(x, y, z);
    }

    #[inline]
    pub fn mult_matrix(&mut self, m: Matrix4<f32>) {
        self.matrices.multiply(m);
    }

    #[inline]
    pub fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.matrices.frustum(left, right, bottom, top, near, far);
    }

    #[inline]
    pub fn ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.matrices.ortho(left, right, bottom, top, near, far);
    }

    #[inline]
    pub fn current_matrix(&self) -> Matrix4<f32> {
        *self.matrices.current()
    }
}

// Texture binding and resources.
impl Context {
    /// Routes subsequent quads to `handle`. A dead handle falls back to
    /// the reserved white texture so rendering degrades instead of
    /// failing.
    pub fn bind_texture(&mut self, handle: TextureHandle) {
        if self.textures.is_alive(handle) {
            self.draws.bind(handle);
        } else {
            warn!("{} is dead, binding the default texture.", handle);
            self.draws.bind(self.white);
        }
    }

    /// Reverts quads to the reserved white texture.
    #[inline]
    pub fn unbind_texture(&mut self) {
        self.draws.bind(self.white);
    }

    pub fn create_texture(
        &mut self,
        params: TextureParams,
        data: Option<&[u8]>,
    ) -> Result<TextureHandle> {
        params.validate(data)?;

        let handle: TextureHandle = self.textures.create().into();
        if let Err(err) = unsafe { self.device.create_texture(handle, params, data) } {
            self.textures.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_texture(&mut self, handle: TextureHandle) {
        if handle == self.white {
            warn!("The default texture cannot be deleted.");
            return;
        }

        if self.textures.free(handle) {
            if let Err(err) = unsafe { self.device.delete_texture(handle) } {
                warn!("Failed to delete {}: {}", handle, err);
            }
        } else {
            warn!("{} is dead, delete ignored.", handle);
        }
    }

    pub fn create_shader(&mut self, vs: &str, fs: &str) -> Result<ShaderHandle> {
        let params = ShaderParams {
            vs: vs.into(),
            fs: fs.into(),
        };
        params.validate()?;

        let handle: ShaderHandle = self.shaders.create().into();
        if let Err(err) = unsafe { self.device.create_shader(handle, params) } {
            self.shaders.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_shader(&mut self, handle: ShaderHandle) {
        if handle == self.default_shader {
            warn!("The default shader cannot be deleted.");
            return;
        }

        if self.custom_shader == Some(handle) {
            self.custom_shader = None;
        }

        if self.shaders.free(handle) {
            if let Err(err) = unsafe { self.device.delete_shader(handle) } {
                warn!("Failed to delete {}: {}", handle, err);
            }
        } else {
            warn!("{} is dead, delete ignored.", handle);
        }
    }
}

// Render state and frame control.
impl Context {
    /// Swaps the program the next flush renders with; `None` restores the
    /// default shader. A swap is an ordering boundary, so pending geometry
    /// is flushed first.
    pub fn set_shader(&mut self, shader: Option<ShaderHandle>) -> Result<()> {
        let resolved = match shader {
            Some(v) if self.shaders.is_alive(v) => Some(v),
            Some(v) => {
                warn!("{} is dead, using the default shader.", v);
                None
            }
            None => None,
        };

        if resolved != self.custom_shader {
            self.flush()?;
            self.custom_shader = resolved;
        }

        Ok(())
    }

    /// Swaps the blend mode, flushing pending geometry first since the
    /// mode applies per draw, not per vertex.
    pub fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()> {
        if mode != self.blend {
            self.flush()?;
            self.blend = mode;
        }

        Ok(())
    }

    #[inline]
    pub fn clear_color(&mut self, color: Color<f32>) {
        self.clear_color = color;
    }

    /// Clears the framebuffer to the configured clear color and resets
    /// the depth buffer.
    pub fn clear(&mut self) -> Result<()> {
        unsafe { self.device.clear(Some(self.clear_color), Some(1.0)) }
    }

    /// Uploads all batched geometry and issues the pending draws: lines,
    /// then triangles, then quads descriptor by descriptor. Afterwards
    /// every batching counter is back at zero.
    pub fn flush(&mut self) -> Result<FrameInfo> {
        let ts = Instant::now();
        let mut info = FrameInfo::default();

        let result = unsafe { self.dispatch(&mut info) };

        // Reset even when the backend failed; keeping half-consumed
        // batches around would corrupt the next frame.
        self.stream.reset();
        self.draws.reset();
        result?;

        info.alive_textures = self.textures.len() as u32;
        info.alive_shaders = self.shaders.len() as u32;
        info.duration = ts.elapsed();
        self.info = info;
        Ok(info)
    }

    unsafe fn dispatch(&mut self, info: &mut FrameInfo) -> Result<()> {
        if self.stream.is_empty() {
            return Ok(());
        }

        if !self.stream.lines().is_empty() {
            self.device.update_buffer(
                self.bundles.lines.positions,
                0,
                self.stream.lines().positions_bytes(),
            )?;
            self.device.update_buffer(
                self.bundles.lines.colors,
                0,
                self.stream.lines().colors_bytes(),
            )?;
        }

        if !self.stream.triangles().is_empty() {
            self.device.update_buffer(
                self.bundles.triangles.positions,
                0,
                self.stream.triangles().positions_bytes(),
            )?;
            self.device.update_buffer(
                self.bundles.triangles.colors,
                0,
                self.stream.triangles().colors_bytes(),
            )?;
        }

        if !self.stream.quads().is_empty() {
            self.device.update_buffer(
                self.bundles.quads.positions,
                0,
                self.stream.quads().positions_bytes(),
            )?;
            self.device.update_buffer(
                self.bundles.quads.colors,
                0,
                self.stream.quads().colors_bytes(),
            )?;
            if let (Some(handle), Some(bytes)) = (
                self.bundles.quads.texcoords,
                self.stream.quads().texcoords_bytes(),
            ) {
                self.device.update_buffer(handle, 0, bytes)?;
            }
        }

        let shader = self.custom_shader.unwrap_or(self.default_shader);
        self.device.bind_shader(shader)?;

        let mvp = *self.matrices.projection() * *self.matrices.modelview();
        self.device.set_uniform_matrix4(shader, UNIFORM_MVP, &mvp)?;
        self.device
            .set_uniform_vec4(shader, UNIFORM_TINT, Vector4::new(1.0, 1.0, 1.0, 1.0))?;
        self.device.set_blend_mode(self.blend)?;

        // Submission order is the compositing contract: lines first, then
        // triangles, then quads in descriptor order.
        if !self.stream.lines().is_empty() {
            self.device.bind_texture(self.white)?;
            self.device.bind_vertex_bundle(shader, self.bundles.lines)?;
            self.device
                .draw_arrays(Primitive::Lines, 0, self.stream.lines().vertex_count())?;
            info.drawcalls += 1;
        }

        if !self.stream.triangles().is_empty() {
            self.device.bind_texture(self.white)?;
            self.device
                .bind_vertex_bundle(shader, self.bundles.triangles)?;
            info.triangles += self.device.draw_arrays(
                Primitive::Triangles,
                0,
                self.stream.triangles().vertex_count(),
            )?;
            info.drawcalls += 1;
        }

        if !self.stream.quads().is_empty() {
            self.device.bind_vertex_bundle(shader, self.bundles.quads)?;

            let mut offset = 0;
            for descriptor in self.draws.descriptors() {
                if descriptor.vertices == 0 {
                    continue;
                }

                let texture = if self.textures.is_alive(descriptor.texture) {
                    descriptor.texture
                } else {
                    warn!(
                        "{} died while batched, drawing with the default texture.",
                        descriptor.texture
                    );
                    self.white
                };
                self.device.bind_texture(texture)?;

                // Four batched vertices expand to six indices per quad.
                let indices = descriptor.vertices as usize / 4 * 6;
                info.triangles += self.device.draw_indexed(
                    Primitive::Triangles,
                    indices,
                    IndexFormat::U16,
                    offset,
                )?;
                info.drawcalls += 1;

                offset += indices * IndexFormat::U16.len();
            }
        }

        self.device.flush()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe {
            for bundle in &[self.bundles.lines, self.bundles.triangles, self.bundles.quads] {
                let _ = self.device.delete_buffer(bundle.positions);
                let _ = self.device.delete_buffer(bundle.colors);
                if let Some(v) = bundle.texcoords {
                    let _ = self.device.delete_buffer(v);
                }
                if let Some(v) = bundle.indices {
                    let _ = self.device.delete_buffer(v);
                }
            }

            let textures: Vec<TextureHandle> = self.textures.iter().map(|v| v.into()).collect();
            for v in textures {
                let _ = self.device.delete_texture(v);
            }

            let shaders: Vec<ShaderHandle> = self.shaders.iter().map(|v| v.into()).collect();
            for v in shaders {
                let _ = self.device.delete_shader(v);
            }
        }
    }
}

unsafe fn attribute_buffer(
    device: &mut dyn Device,
    pool: &mut HandlePool,
    attr: VertexAttribute,
    vertices: usize,
) -> Result<BufferHandle> {
    let handle: BufferHandle = pool.create().into();
    let params = BufferParams {
        hint: BufferHint::Stream,
        role: BufferRole::Vertices(attr),
        len: vertices * attr.stride(),
    };

    if let Err(err) = device.create_buffer(handle, params, None) {
        pool.free(handle);
        return Err(err);
    }

    Ok(handle)
}

unsafe fn index_buffer(
    device: &mut dyn Device,
    pool: &mut HandlePool,
    data: &[u8],
) -> Result<BufferHandle> {
    let handle: BufferHandle = pool.create().into();
    let params = BufferParams {
        hint: BufferHint::Immutable,
        role: BufferRole::Indices(IndexFormat::U16),
        len: data.len(),
    };

    if let Err(err) = device.create_buffer(handle, params, Some(data)) {
        pool.free(handle);
        return Err(err);
    }

    Ok(handle)
}
