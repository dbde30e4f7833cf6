use glam::Vec3;

use crate::ui::tweak::{TweakKind, TweakRegistry};

/// Fields every light kind shares.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseLight {
    /// Label used as the prefix of the light's tweak-bar entries.
    pub name: String,
    pub color: Vec3,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
}

impl BaseLight {
    pub fn new(name: &str, color: Vec3, ambient_intensity: f32, diffuse_intensity: f32) -> Self {
        Self {
            name: name.to_string(),
            color,
            ambient_intensity,
            diffuse_intensity,
        }
    }
}

/// Directional light (sun-like). `direction` need not be unit length.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub base: BaseLight,
    pub direction: Vec3,
}

/// Distance falloff coefficients: `constant + linear * d + exp * d^2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub exp: f32,
}

impl Attenuation {
    /// Coefficients that fade the light out to roughly nothing at `radius`.
    /// A zero or negative radius is treated as the smallest positive one.
    pub fn from_radius(radius: f32) -> Self {
        let radius = radius.max(f32::EPSILON);
        Self {
            constant: 1.0,
            linear: 4.5 / radius,
            exp: 75.0 / (radius * radius),
        }
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.0,
            exp: 0.0,
        }
    }
}

/// Point light with distance attenuation.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub base: BaseLight,
    pub position: Vec3,
    pub attenuation: Attenuation,
}

/// Spot light: a point light restricted to a cone around `direction`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpotLight {
    pub point: PointLight,
    pub direction: Vec3,
    /// Cone half-angle in degrees.
    pub cutoff: f32,
}

const CUTOFF_RANGE: TweakKind = TweakKind::Float {
    min: 0.0,
    max: 90.0,
    step: 0.5,
};

pub fn add_base_light_to_ui(light: &BaseLight, bar: &mut impl TweakRegistry) {
    bar.add_var(format!("{}.Color", light.name), TweakKind::Color3);
    bar.add_var(format!("{}.Ambient Intensity", light.name), TweakKind::INTENSITY);
    bar.add_var(format!("{}.Diffuse Intensity", light.name), TweakKind::INTENSITY);
}

pub fn add_directional_light_to_ui(light: &DirectionalLight, bar: &mut impl TweakRegistry) {
    add_base_light_to_ui(&light.base, bar);
    bar.add_var(
        format!("{}.Direction", light.base.name),
        TweakKind::Dir3 { flip_z: true },
    );
}

pub fn add_point_light_to_ui(light: &PointLight, bar: &mut impl TweakRegistry) {
    add_base_light_to_ui(&light.base, bar);
    bar.add_var(
        format!("{}.Position", light.base.name),
        TweakKind::Point3 { flip_z: true },
    );
    bar.add_var(format!("{}.Attenuation", light.base.name), TweakKind::Attenuation);
}

pub fn add_spot_light_to_ui(light: &SpotLight, bar: &mut impl TweakRegistry) {
    add_point_light_to_ui(&light.point, bar);
    let name = &light.point.base.name;
    bar.add_var(format!("{name}.Direction"), TweakKind::Dir3 { flip_z: true });
    bar.add_var(format!("{name}.Cutoff"), CUTOFF_RANGE);
}

/// Field suffix of `path` if it belongs to the light called `name`.
fn field_of<'a>(name: &str, path: &'a str) -> Option<&'a str> {
    path.strip_prefix(name)?.strip_prefix('.')
}

/// Resolve a tweak-bar path such as `Sun.Ambient Intensity` to the float it edits.
pub fn base_light_float_mut<'a>(light: &'a mut BaseLight, path: &str) -> Option<&'a mut f32> {
    match field_of(&light.name, path)? {
        "Ambient Intensity" => Some(&mut light.ambient_intensity),
        "Diffuse Intensity" => Some(&mut light.diffuse_intensity),
        _ => None,
    }
}

pub fn directional_light_float_mut<'a>(
    light: &'a mut DirectionalLight,
    path: &str,
) -> Option<&'a mut f32> {
    base_light_float_mut(&mut light.base, path)
}

pub fn point_light_float_mut<'a>(light: &'a mut PointLight, path: &str) -> Option<&'a mut f32> {
    base_light_float_mut(&mut light.base, path)
}

pub fn spot_light_float_mut<'a>(light: &'a mut SpotLight, path: &str) -> Option<&'a mut f32> {
    if field_of(&light.point.base.name, path) == Some("Cutoff") {
        return Some(&mut light.cutoff);
    }
    point_light_float_mut(&mut light.point, path)
}
