use gl::types::*;
use glam::{Mat4, Vec3};
use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::ptr;

/// Errors raised while building a shader program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader source contains an interior NUL byte")]
    InvalidSource { stage: &'static str },

    #[error("{stage} shader compile error: {log}")]
    Compile { stage: &'static str, log: String },

    #[error("shader link error: {0}")]
    Link(String),
}

/// Driver handle for a resolved uniform. The driver's "not found" sentinel
/// (-1) never becomes a `UniformLocation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub const fn from_raw(raw: GLint) -> Option<Self> {
        if raw >= 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub fn raw(self) -> GLint {
        self.0
    }
}

/// The surface of a linked program that uniform binders talk to.
pub trait UniformProgram {
    /// Activate the program for subsequent uploads and draw calls.
    fn bind(&self);

    /// Look a uniform up by its fully qualified name.
    fn uniform_location(&self, name: &str) -> Option<UniformLocation>;

    fn set_int(&mut self, location: UniformLocation, value: i32);
    fn set_float(&mut self, location: UniformLocation, value: f32);
    fn set_vec3(&mut self, location: UniformLocation, value: Vec3);
    fn set_mat4(&mut self, location: UniformLocation, value: &Mat4);
}

pub struct ShaderProgram {
    pub id: GLuint,
}

impl ShaderProgram {
    pub fn from_files(
        vert_path: impl AsRef<Path>,
        frag_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vert_src = read_source(vert_path.as_ref())?;
        let frag_src = read_source(frag_path.as_ref())?;
        log::debug!(
            "compiling {} + {}",
            vert_path.as_ref().display(),
            frag_path.as_ref().display()
        );
        Self::from_sources(&vert_src, &frag_src)
    }

    pub fn from_sources(vert_src: &str, frag_src: &str) -> Result<Self, ShaderError> {
        unsafe {
            let vert = compile_shader(vert_src, gl::VERTEX_SHADER)?;
            let frag = match compile_shader(frag_src, gl::FRAGMENT_SHADER) {
                Ok(frag) => frag,
                Err(e) => {
                    gl::DeleteShader(vert);
                    return Err(e);
                }
            };

            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            let mut success = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
            if success == 0 {
                let mut len = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
                let mut buf = vec![0u8; len.max(1) as usize];
                gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf.as_mut_ptr() as *mut _);
                buf.pop(); // remove null terminator
                let msg = String::from_utf8_lossy(&buf).to_string();
                gl::DeleteProgram(program);
                gl::DeleteShader(vert);
                gl::DeleteShader(frag);
                return Err(ShaderError::Link(msg));
            }

            gl::DetachShader(program, vert);
            gl::DetachShader(program, frag);
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            Ok(Self { id: program })
        }
    }
}

impl UniformProgram for ShaderProgram {
    fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        let cname = CString::new(name).ok()?;
        let loc = unsafe { gl::GetUniformLocation(self.id, cname.as_ptr()) };
        UniformLocation::from_raw(loc)
    }

    fn set_int(&mut self, location: UniformLocation, value: i32) {
        unsafe {
            gl::Uniform1i(location.raw(), value);
        }
    }

    fn set_float(&mut self, location: UniformLocation, value: f32) {
        unsafe {
            gl::Uniform1f(location.raw(), value);
        }
    }

    fn set_vec3(&mut self, location: UniformLocation, v: Vec3) {
        unsafe {
            gl::Uniform3f(location.raw(), v.x, v.y, v.z);
        }
    }

    fn set_mat4(&mut self, location: UniformLocation, mat: &Mat4) {
        // glam is column-major, which is what GL expects untransposed.
        unsafe {
            gl::UniformMatrix4fv(location.raw(), 1, gl::FALSE, mat.to_cols_array().as_ptr());
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn stage_name(shader_type: GLenum) -> &'static str {
    if shader_type == gl::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    }
}

unsafe fn compile_shader(src: &str, shader_type: GLenum) -> Result<GLuint, ShaderError> {
    let c_src = CString::new(src).map_err(|_| ShaderError::InvalidSource {
        stage: stage_name(shader_type),
    })?;
    let shader = gl::CreateShader(shader_type);
    gl::ShaderSource(shader, 1, &c_src.as_ptr(), ptr::null());
    gl::CompileShader(shader);

    let mut success = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    if success == 0 {
        let mut len = 0;
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf.as_mut_ptr() as *mut _);
        buf.pop();
        let msg = String::from_utf8_lossy(&buf).to_string();
        gl::DeleteShader(shader);
        return Err(ShaderError::Compile {
            stage: stage_name(shader_type),
            log: msg,
        });
    }
    Ok(shader)
}
