use std::path::PathBuf;

use glam::Vec3;
use hecs::World;
use sdl2::keyboard::Scancode;
use sdl2::Sdl;

use crate::camera::Camera;
use crate::components::lighting::{
    add_directional_light_to_ui, add_point_light_to_ui, add_spot_light_to_ui,
    directional_light_float_mut, point_light_float_mut, spot_light_float_mut,
};
use crate::components::{BaseLight, DirectionalLight, PointLight, Spin, SpotLight};
use crate::engine::input::{InputEvent, InputState};
use crate::engine::time::{FpsCounter, FrameTimer};
use crate::engine::window::{GameWindow, WindowError};
use crate::renderer::lighting::LightingError;
use crate::renderer::{MaterialParams, Renderer};
use crate::scene::demo_scene::{load_demo_scene, SceneAssets, DEFAULT_SPIN_SPEED};
use crate::systems::{spin_system, transform_propagation_system};
use crate::ui::tweak::{FloatNudge, TweakBar, TweakKind, TweakRegistry};

const WINDOW_TITLE: &str = "Basic Lighting";
const SPIN_SPEED_VAR: &str = "speed";
const FPS_REPORT_INTERVAL: f32 = 2.0;
/// Tweak steps applied per second while Up or Down is held.
const NUDGE_STEPS_PER_SECOND: f32 = 60.0;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("error initializing the lighting technique: {0}")]
    Lighting(#[from] LightingError),
}

pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub shader_dir: PathBuf,
}

/// The light the demo starts with: white, mostly ambient, shining along +X.
pub fn default_sun() -> DirectionalLight {
    DirectionalLight {
        base: BaseLight::new("DirLight", Vec3::ONE, 0.66, 1.0),
        direction: Vec3::X,
    }
}

pub struct DemoApp {
    sdl: Sdl,
    window: GameWindow,
    world: World,
    assets: SceneAssets,
    camera: Camera,
    renderer: Renderer,
    tweak_bar: TweakBar,
}

impl DemoApp {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let window = GameWindow::new(&sdl, WINDOW_TITLE, config.width, config.height)?;

        let renderer = Renderer::init(
            &config.shader_dir,
            &MaterialParams {
                specular_intensity: 0.0,
                specular_power: 0.0,
            },
        )?;

        let mut world = World::new();
        let assets = load_demo_scene(&mut world, default_sun());

        let camera = Camera::new(config.fov)
            .looking_along(Vec3::new(0.0, 6.0, -14.0), Vec3::new(0.0, -0.3, 1.0));

        let mut tweak_bar = TweakBar::new("Lighting");
        register_tweaks(&world, &mut tweak_bar);
        tweak_bar.log_layout();

        let mut app = Self {
            sdl,
            window,
            world,
            assets,
            camera,
            renderer,
            tweak_bar,
        };
        let (w, h) = app.window.size();
        app.renderer.resize(w, h);
        Ok(app)
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        self.sdl.mouse().set_relative_mouse_mode(true);
        let mut event_pump = self.sdl.event_pump().map_err(AppError::Sdl)?;
        let mut input = InputState::new();
        let mut timer = FrameTimer::new();
        let mut fps = FpsCounter::new();

        loop {
            timer.tick();
            input.update(&mut event_pump);

            if input.should_quit() {
                break;
            }

            self.handle_input(&input, timer.dt);

            spin_system(&mut self.world, timer.dt);
            transform_propagation_system(&mut self.world);
            self.render();

            fps.update(timer.dt);
            if let Some(rate) = fps.report(FPS_REPORT_INTERVAL) {
                log::debug!("{rate:.0} fps");
            }

            self.window.swap();
        }

        log::info!("leaving main loop");
        Ok(())
    }

    fn handle_input(&mut self, input: &InputState, dt: f32) {
        for event in &input.events {
            match event {
                InputEvent::KeyPressed(Scancode::Tab) => {
                    if let Some(var) = self.tweak_bar.select_next() {
                        if var.kind.is_editable() {
                            log::info!("tweak: {} [{}]", var.name, var.kind);
                        } else {
                            log::info!("tweak: {} [{}] (read-only)", var.name, var.kind);
                        }
                    }
                }
                InputEvent::Resized(w, h) => self.renderer.resize(*w, *h),
                _ => {}
            }
        }

        let steps = nudge_steps(
            input.is_key_held(Scancode::Up),
            input.is_key_held(Scancode::Down),
            dt,
        );
        if steps != 0.0 {
            if let Some(nudge) = self.tweak_bar.nudge(steps) {
                apply_nudge(&mut self.world, &nudge);
            }
        }

        self.camera.look(input.mouse_dx, input.mouse_dy);
        self.camera.move_wasd(input, dt);
    }

    fn render(&mut self) {
        let view = self.camera.view_matrix();
        let proj = self.camera.projection_matrix(self.window.aspect_ratio());

        self.renderer.draw_scene(
            &self.world,
            &self.assets.meshes,
            &self.assets.textures,
            &view,
            &proj,
            self.camera.position,
        );
    }
}

/// Tweak steps for one frame of `dt` seconds with the arrow keys held.
fn nudge_steps(up: bool, down: bool, dt: f32) -> f32 {
    let direction = match (up, down) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    };
    direction * NUDGE_STEPS_PER_SECOND * dt
}

/// Register the spin speed and every light in the world, directional
/// first, then point and spot lights.
pub fn register_tweaks(world: &World, bar: &mut impl TweakRegistry) {
    bar.add_var(
        SPIN_SPEED_VAR.to_string(),
        TweakKind::Float {
            min: 0.0,
            max: 2.0,
            step: 0.01,
        },
    );
    for (_e, light) in world.query::<&DirectionalLight>().iter() {
        add_directional_light_to_ui(light, bar);
    }
    for (_e, light) in world.query::<&PointLight>().iter() {
        add_point_light_to_ui(light, bar);
    }
    for (_e, light) in world.query::<&SpotLight>().iter() {
        add_spot_light_to_ui(light, bar);
    }
}

/// Apply a float edit from the tweak bar to whatever it names.
pub fn apply_nudge(world: &mut World, nudge: &FloatNudge) {
    let mut applied = None;

    if nudge.name == SPIN_SPEED_VAR {
        for (_e, spin) in world.query_mut::<&mut Spin>() {
            nudge.apply(&mut spin.0);
            applied = Some(spin.0);
        }
    }
    for (_e, light) in world.query_mut::<&mut DirectionalLight>() {
        if let Some(value) = directional_light_float_mut(light, &nudge.name) {
            nudge.apply(value);
            applied = Some(*value);
        }
    }
    for (_e, light) in world.query_mut::<&mut PointLight>() {
        if let Some(value) = point_light_float_mut(light, &nudge.name) {
            nudge.apply(value);
            applied = Some(*value);
        }
    }
    for (_e, light) in world.query_mut::<&mut SpotLight>() {
        if let Some(value) = spot_light_float_mut(light, &nudge.name) {
            nudge.apply(value);
            applied = Some(*value);
        }
    }

    match applied {
        Some(value) => log::info!("{} = {value:.3}", nudge.name),
        None => log::warn!("tweak '{}' matches nothing in the scene", nudge.name),
    }
}
