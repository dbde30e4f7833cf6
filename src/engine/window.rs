use sdl2::video::{GLContext, GLProfile, Window};
use sdl2::Sdl;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("failed to init SDL2 video: {0}")]
    Video(String),

    #[error("failed to create window: {0}")]
    Build(#[from] sdl2::video::WindowBuildError),

    #[error("failed to create GL context: {0}")]
    Context(String),
}

pub struct GameWindow {
    _gl_context: GLContext,
    window: Window,
}

impl GameWindow {
    pub fn new(sdl: &Sdl, title: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        let video = sdl.video().map_err(WindowError::Video)?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);

        let window = video
            .window(title, width, height)
            .opengl()
            .resizable()
            .position_centered()
            .build()?;

        let gl_context = window.gl_create_context().map_err(WindowError::Context)?;

        gl::load_with(|s| video.gl_get_proc_address(s) as *const _);

        log::info!("created {width}x{height} window with a GL 3.3 core context");

        Ok(Self {
            _gl_context: gl_context,
            window,
        })
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    pub fn size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.size();
        w as f32 / h.max(1) as f32
    }
}
