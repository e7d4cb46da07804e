use gl;
use gl::types::*;
use std::cmp;
use std::ffi;

use crate::errors::{Error, Result};

/// Describes the OpenGL context profile.
#[derive(Debug, Copy, Clone)]
pub enum Profile {
    /// The context uses only future-compatible functions and definitions.
    Core,
    /// The context includes all immediate mode functions and definitions.
    Compatibility,
}

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the
/// same API. For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and
/// `Version::ES(3, 0) >= Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl Version {
    /// Obtains the OpenGL version of the current context using the loaded
    /// functions.
    ///
    /// # Unsafe
    ///
    /// You must ensure that the functions belong to the current context,
    /// otherwise you will get an undefined behavior.
    pub unsafe fn parse() -> Result<Version> {
        let desc = gl::GetString(gl::VERSION);
        if desc.is_null() {
            return Err(Error::Backend("[GL] Version string is null.".into()).into());
        }

        let desc = String::from_utf8(ffi::CStr::from_ptr(desc as *const _).to_bytes().to_vec())
            .map_err(|_| Error::Backend("[GL] Version string is unformatted.".into()))?;

        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-") {
            (true, &desc[13..])
        } else {
            (false, &desc[..])
        };

        let desc = desc
            .split(' ')
            .next()
            .ok_or_else(|| Error::Backend("[GL] Version string is unformatted.".into()))?;

        let mut iter = desc.split(move |c: char| c == '.');
        let major = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| Error::Backend("[GL] Version string is unformatted.".into()))?;
        let minor = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| Error::Backend("[GL] Version string is unformatted.".into()))?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

macro_rules! extensions {
    ($($string:expr => $field:ident,)+) => {
/// Contains data about the list of extensions.
        #[derive(Debug, Clone, Copy)]
        pub struct Extensions {
            $(
                pub $field: bool,
            )+
        }

/// Returns the list of extensions supported by the backend.
///
/// The version must match the one of the backend.
///
/// *Safety*: the OpenGL context corresponding to `gl` must be current in
/// the thread.
        impl Extensions {
            pub unsafe fn parse(version: Version) -> Result<Extensions> {
                let strings: Vec<String> = if version >= Version::GL(3, 0) || version >= Version::ES(3, 0) {
                    let mut num_extensions = 0;
                    gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions);
                    (0 .. num_extensions).map(|i| {
                        let ext = gl::GetStringi(gl::EXTENSIONS, i as gl::types::GLuint);
                        String::from_utf8(ffi::CStr::from_ptr(ext as *const _).to_bytes().to_vec()).unwrap_or_default()
                    }).collect()
                } else {
                    let list = gl::GetString(gl::EXTENSIONS);
                    if list.is_null() {
                        return Err(Error::Backend("[GL] Extension string is null.".into()).into());
                    }
                    let list = String::from_utf8(ffi::CStr::from_ptr(list as *const _).to_bytes().to_vec())
                        .map_err(|_| Error::Backend("[GL] Extension string is unformatted.".into()))?;
                    list.split(' ').map(|e| e.to_owned()).collect()
                };

                let mut extensions = Extensions {
                    $(
                        $field: false,
                    )+
                };

                for extension in strings {
                    match &extension[..] {
                        $(
                            $string => extensions.$field = true,
                        )+
                        _ => ()
                    }
                }

                Ok(extensions)
            }
        }
    }
}

extensions! {
    "GL_ARB_shader_objects" => gl_arb_shader_objects,
    "GL_ARB_vertex_shader" => gl_arb_vertex_shader,
    "GL_ARB_fragment_shader" => gl_arb_fragment_shader,
    "GL_ARB_vertex_buffer_object" => gl_arb_vertex_buffer_object,
    "GL_ARB_vertex_array_object" => gl_arb_vertex_array_object,
    "GL_APPLE_vertex_array_object" => gl_apple_vertex_array_object,
    "GL_OES_vertex_array_object" => gl_oes_vertex_array_object,
}

/// The operating mode a `GLDevice` runs in, selected once at creation
/// from the context's capabilities.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DevicePath {
    /// Client-side vertex arrays re-specified before every draw. No buffer
    /// objects are created; attribute data stays in CPU memory.
    ImmediateLegacy,
    /// Buffer objects with one cached vertex array object per (shader,
    /// bundle) pair.
    VertexArrayObject,
    /// Buffer objects with attribute pointers re-bound before every draw.
    VertexBufferObjectOnly,
}

impl DevicePath {
    pub fn select(caps: &Capabilities) -> Result<DevicePath> {
        // Programmable shading is the baseline of every path; the batching
        // pipeline cannot render without it.
        let shaders = caps.version >= Version::GL(2, 0)
            || caps.version >= Version::ES(2, 0)
            || (caps.extensions.gl_arb_shader_objects
                && caps.extensions.gl_arb_vertex_shader
                && caps.extensions.gl_arb_fragment_shader);

        if !shaders {
            return Err(Error::Requirement("shader objects".into()).into());
        }

        let vaos = caps.version >= Version::GL(3, 0)
            || caps.version >= Version::ES(3, 0)
            || caps.extensions.gl_arb_vertex_array_object
            || caps.extensions.gl_apple_vertex_array_object
            || caps.extensions.gl_oes_vertex_array_object;

        if vaos {
            return Ok(DevicePath::VertexArrayObject);
        }

        let vbos = caps.version >= Version::GL(1, 5)
            || caps.version >= Version::ES(2, 0)
            || caps.extensions.gl_arb_vertex_buffer_object;

        if vbos {
            Ok(DevicePath::VertexBufferObjectOnly)
        } else {
            Ok(DevicePath::ImmediateLegacy)
        }
    }
}

/// Represents the capabilities of the context.
///
/// Contrary to the state, these values never change.
#[derive(Debug)]
pub struct Capabilities {
    /// Returns a version or release number. Vendor-specific information
    /// may follow the version number.
    pub version: Version,

    /// The company responsible for this GL implementation.
    pub vendor: String,

    /// The list of OpenGL extensions support by this implementation.
    pub extensions: Extensions,

    /// The name of the renderer. This name is typically specific to a
    /// particular configuration of a hardware platform.
    pub renderer: String,

    /// The OpenGL context profile if available.
    ///
    /// The context profile is available from OpenGL 3.2 onwards. `None` if
    /// not supported.
    pub profile: Option<Profile>,

    /// Maximum dimension of a texture, in pixels.
    pub max_texture_size: u32,

    /// Maximum number of textures that can be bound to a program.
    pub max_combined_texture_image_units: u8,
}

impl Capabilities {
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::parse()?;
        let extensions = Extensions::parse(version)?;

        Ok(Capabilities {
            version,
            extensions,
            vendor: Capabilities::parse_str(gl::VENDOR)?,
            renderer: Capabilities::parse_str(gl::RENDERER)?,
            profile: Capabilities::parse_profile(version),
            max_texture_size: Capabilities::parse_texture_size(),
            max_combined_texture_image_units: Capabilities::parse_texture_image_units(),
        })
    }

    #[inline]
    unsafe fn parse_str(id: GLenum) -> Result<String> {
        let s = gl::GetString(id);
        if s.is_null() {
            return Err(Error::Backend(format!("[GL] String of {} is null.", id)).into());
        }

        String::from_utf8(ffi::CStr::from_ptr(s as *const _).to_bytes().to_vec())
            .map_err(|_| Error::Backend(format!("[GL] String of {} is unformatted.", id)).into())
    }

    #[inline]
    unsafe fn parse_profile(version: Version) -> Option<Profile> {
        if version >= Version::GL(3, 2) {
            let mut val = 0;
            gl::GetIntegerv(gl::CONTEXT_PROFILE_MASK, &mut val);
            let val = val as GLenum;
            if (val & gl::CONTEXT_COMPATIBILITY_PROFILE_BIT) != 0 {
                Some(Profile::Compatibility)
            } else if (val & gl::CONTEXT_CORE_PROFILE_BIT) != 0 {
                Some(Profile::Core)
            } else {
                None
            }
        } else {
            None
        }
    }

    #[inline]
    unsafe fn parse_texture_size() -> u32 {
        let mut val = 64;
        gl::GetIntegerv(gl::MAX_TEXTURE_SIZE, &mut val);
        val as u32
    }

    #[inline]
    unsafe fn parse_texture_image_units() -> u8 {
        let mut val = 2;
        gl::GetIntegerv(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut val);
        val as u8
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn version_ordering() {
        assert!(Version::GL(3, 3) > Version::GL(3, 0));
        assert!(Version::GL(2, 1) < Version::GL(3, 0));
        assert!(Version::ES(3, 0) >= Version::ES(2, 0));

        // Versions of different APIs never compare.
        assert_eq!(
            Version::GL(3, 0).partial_cmp(&Version::ES(3, 0)),
            None
        );
        assert!(!(Version::GL(3, 0) >= Version::ES(3, 0)));
    }
}
