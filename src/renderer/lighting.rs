//! Basic lighting technique: one directional light plus fixed-size arrays of
//! point and spot lights, bound to the uniforms of `basic_lighting.frag`.
//!
//! Every uniform handle is resolved once in [`LightingTechnique::new`]. A
//! technique value only exists if the program declares the whole uniform
//! contract, so the per-frame setters never touch an unresolved handle.

use std::borrow::Borrow;
use std::path::Path;

use glam::{Mat4, Vec3};

use crate::components::lighting::{Attenuation, BaseLight, DirectionalLight, PointLight, SpotLight};
use crate::renderer::shader::{ShaderError, ShaderProgram, UniformLocation, UniformProgram};

/// Must match `MAX_POINT_LIGHTS` in `basic_lighting.frag`.
pub const MAX_POINT_LIGHTS: usize = 2;
/// Must match `MAX_SPOT_LIGHTS` in `basic_lighting.frag`.
pub const MAX_SPOT_LIGHTS: usize = 2;

/// Uploaded in place of a zero-length or non-finite light direction.
pub const FALLBACK_LIGHT_DIRECTION: Vec3 = Vec3::NEG_Y;

pub const WVP_UNIFORM: &str = "gWVP";
pub const WORLD_UNIFORM: &str = "gWorld";
pub const COLOR_MAP_UNIFORM: &str = "gColorMap";
pub const EYE_WORLD_POS_UNIFORM: &str = "gEyeWorldPos";
pub const MAT_SPECULAR_INTENSITY_UNIFORM: &str = "gMatSpecularIntensity";
pub const SPECULAR_POWER_UNIFORM: &str = "gSpecularPower";
pub const NUM_POINT_LIGHTS_UNIFORM: &str = "gNumPointLights";
pub const NUM_SPOT_LIGHTS_UNIFORM: &str = "gNumSpotLights";

#[derive(Debug, thiserror::Error)]
pub enum LightingError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("shader program is missing lighting uniforms: {}", .0.join(", "))]
    MissingUniforms(Vec<String>),
}

/// Which light a uniform belongs to. Array slots carry their index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightSlot {
    Directional,
    Point(usize),
    Spot(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightField {
    Color,
    AmbientIntensity,
    DiffuseIntensity,
    Position,
    AttenConstant,
    AttenLinear,
    AttenExp,
    Direction,
    Cutoff,
}

/// Fully qualified uniform name for `field` of the light in `slot`, or
/// `None` if that kind of light has no such field.
///
/// The shader nests structs: a spot light's `Base` is a point light whose
/// `Base` is the shared base light, e.g. `gSpotLights[1].Base.Base.Color`.
pub fn uniform_name(slot: LightSlot, field: LightField) -> Option<String> {
    let (own, point, base) = match slot {
        LightSlot::Directional => (
            Some("gDirectionalLight".to_string()),
            None,
            "gDirectionalLight.Base".to_string(),
        ),
        LightSlot::Point(i) => (
            None,
            Some(format!("gPointLights[{i}]")),
            format!("gPointLights[{i}].Base"),
        ),
        LightSlot::Spot(i) => (
            Some(format!("gSpotLights[{i}]")),
            Some(format!("gSpotLights[{i}].Base")),
            format!("gSpotLights[{i}].Base.Base"),
        ),
    };

    let name = match field {
        LightField::Color => format!("{base}.Color"),
        LightField::AmbientIntensity => format!("{base}.AmbientIntensity"),
        LightField::DiffuseIntensity => format!("{base}.DiffuseIntensity"),
        LightField::Position => format!("{}.Position", point?),
        LightField::AttenConstant => format!("{}.Atten.Constant", point?),
        LightField::AttenLinear => format!("{}.Atten.Linear", point?),
        LightField::AttenExp => format!("{}.Atten.Exp", point?),
        LightField::Direction => format!("{}.Direction", own?),
        LightField::Cutoff => match slot {
            LightSlot::Spot(_) => format!("{}.Cutoff", own?),
            _ => return None,
        },
    };
    Some(name)
}

/// Looks names up and remembers the ones that failed. A failed lookup
/// yields a placeholder that is discarded together with the whole set.
struct Resolver<'a, P: UniformProgram> {
    program: &'a P,
    missing: Vec<String>,
}

impl<'a, P: UniformProgram> Resolver<'a, P> {
    fn named(&mut self, name: &str) -> UniformLocation {
        match self.program.uniform_location(name) {
            Some(loc) => loc,
            None => {
                self.missing.push(name.to_string());
                UNRESOLVED
            }
        }
    }

    fn field(&mut self, slot: LightSlot, field: LightField) -> UniformLocation {
        match uniform_name(slot, field) {
            Some(name) => self.named(&name),
            None => {
                self.missing.push(format!("{slot:?}.{field:?}"));
                UNRESOLVED
            }
        }
    }

    fn base(&mut self, slot: LightSlot) -> BaseLightLocations {
        BaseLightLocations {
            color: self.field(slot, LightField::Color),
            ambient_intensity: self.field(slot, LightField::AmbientIntensity),
            diffuse_intensity: self.field(slot, LightField::DiffuseIntensity),
        }
    }

    fn point(&mut self, slot: LightSlot) -> PointLightLocations {
        PointLightLocations {
            base: self.base(slot),
            position: self.field(slot, LightField::Position),
            atten: AttenuationLocations {
                constant: self.field(slot, LightField::AttenConstant),
                linear: self.field(slot, LightField::AttenLinear),
                exp: self.field(slot, LightField::AttenExp),
            },
        }
    }

    fn spot(&mut self, index: usize) -> SpotLightLocations {
        let slot = LightSlot::Spot(index);
        SpotLightLocations {
            point: self.point(slot),
            direction: self.field(slot, LightField::Direction),
            cutoff: self.field(slot, LightField::Cutoff),
        }
    }
}

// Never observable: any use of it makes `LightingTechnique::new` fail.
const UNRESOLVED: UniformLocation = match UniformLocation::from_raw(0) {
    Some(loc) => loc,
    None => unreachable!(),
};

#[derive(Clone, Copy, Debug)]
struct BaseLightLocations {
    color: UniformLocation,
    ambient_intensity: UniformLocation,
    diffuse_intensity: UniformLocation,
}

#[derive(Clone, Copy, Debug)]
struct AttenuationLocations {
    constant: UniformLocation,
    linear: UniformLocation,
    exp: UniformLocation,
}

#[derive(Clone, Copy, Debug)]
struct DirectionalLightLocations {
    base: BaseLightLocations,
    direction: UniformLocation,
}

#[derive(Clone, Copy, Debug)]
struct PointLightLocations {
    base: BaseLightLocations,
    position: UniformLocation,
    atten: AttenuationLocations,
}

#[derive(Clone, Copy, Debug)]
struct SpotLightLocations {
    point: PointLightLocations,
    direction: UniformLocation,
    cutoff: UniformLocation,
}

pub struct LightingTechnique<P: UniformProgram> {
    program: P,
    wvp: UniformLocation,
    world: UniformLocation,
    color_map: UniformLocation,
    eye_world_pos: UniformLocation,
    mat_specular_intensity: UniformLocation,
    specular_power: UniformLocation,
    num_point_lights: UniformLocation,
    num_spot_lights: UniformLocation,
    directional: DirectionalLightLocations,
    point_lights: [PointLightLocations; MAX_POINT_LIGHTS],
    spot_lights: [SpotLightLocations; MAX_SPOT_LIGHTS],
}

impl LightingTechnique<ShaderProgram> {
    /// Compile and link the lighting shaders, then resolve their uniforms.
    pub fn load(
        vert_path: impl AsRef<Path>,
        frag_path: impl AsRef<Path>,
    ) -> Result<Self, LightingError> {
        let program = ShaderProgram::from_files(vert_path, frag_path)?;
        Self::new(program)
    }
}

impl<P: UniformProgram> LightingTechnique<P> {
    /// Resolve every lighting uniform of `program`. Fails, listing each
    /// missing name, unless the full contract is declared.
    pub fn new(program: P) -> Result<Self, LightingError> {
        let mut r = Resolver {
            program: &program,
            missing: Vec::new(),
        };

        let wvp = r.named(WVP_UNIFORM);
        let world = r.named(WORLD_UNIFORM);
        let color_map = r.named(COLOR_MAP_UNIFORM);
        let eye_world_pos = r.named(EYE_WORLD_POS_UNIFORM);
        let directional = DirectionalLightLocations {
            base: r.base(LightSlot::Directional),
            direction: r.field(LightSlot::Directional, LightField::Direction),
        };
        let mat_specular_intensity = r.named(MAT_SPECULAR_INTENSITY_UNIFORM);
        let specular_power = r.named(SPECULAR_POWER_UNIFORM);
        let num_point_lights = r.named(NUM_POINT_LIGHTS_UNIFORM);
        let num_spot_lights = r.named(NUM_SPOT_LIGHTS_UNIFORM);
        let point_lights = std::array::from_fn(|i| r.point(LightSlot::Point(i)));
        let spot_lights = std::array::from_fn(|i| r.spot(i));

        if !r.missing.is_empty() {
            return Err(LightingError::MissingUniforms(r.missing));
        }

        log::debug!(
            "lighting technique resolved ({} point, {} spot slots)",
            MAX_POINT_LIGHTS,
            MAX_SPOT_LIGHTS
        );

        Ok(Self {
            program,
            wvp,
            world,
            color_map,
            eye_world_pos,
            mat_specular_intensity,
            specular_power,
            num_point_lights,
            num_spot_lights,
            directional,
            point_lights,
            spot_lights,
        })
    }

    /// Bind the program for the uploads and draw calls that follow.
    pub fn enable(&self) {
        self.program.bind();
    }

    pub fn set_wvp(&mut self, wvp: &Mat4) {
        self.program.set_mat4(self.wvp, wvp);
    }

    pub fn set_world_matrix(&mut self, world: &Mat4) {
        self.program.set_mat4(self.world, world);
    }

    pub fn set_color_texture_unit(&mut self, unit: u32) {
        self.program.set_int(self.color_map, unit as i32);
    }

    pub fn set_eye_world_pos(&mut self, eye: Vec3) {
        self.program.set_vec3(self.eye_world_pos, eye);
    }

    pub fn set_mat_specular_intensity(&mut self, intensity: f32) {
        self.program.set_float(self.mat_specular_intensity, intensity);
    }

    pub fn set_mat_specular_power(&mut self, power: f32) {
        self.program.set_float(self.specular_power, power);
    }

    pub fn set_directional_light(&mut self, light: &DirectionalLight) {
        let loc = self.directional;
        self.program.set_vec3(loc.base.color, light.base.color);
        self.program
            .set_float(loc.base.ambient_intensity, light.base.ambient_intensity);
        self.program
            .set_vec3(loc.direction, light_direction(light.direction));
        self.program
            .set_float(loc.base.diffuse_intensity, light.base.diffuse_intensity);
    }

    /// Upload the active point lights. Lights beyond `MAX_POINT_LIGHTS`
    /// are ignored.
    pub fn set_point_lights<L: Borrow<PointLight>>(&mut self, lights: &[L]) {
        let count = active_count(lights.len(), MAX_POINT_LIGHTS, "point");
        self.program.set_int(self.num_point_lights, count as i32);

        for (loc, light) in self.point_lights.iter().zip(lights) {
            upload_point_light(&mut self.program, loc, light.borrow());
        }
    }

    /// Upload the active spot lights. Lights beyond `MAX_SPOT_LIGHTS`
    /// are ignored.
    pub fn set_spot_lights<L: Borrow<SpotLight>>(&mut self, lights: &[L]) {
        let count = active_count(lights.len(), MAX_SPOT_LIGHTS, "spot");
        self.program.set_int(self.num_spot_lights, count as i32);

        for (loc, light) in self.spot_lights.iter().zip(lights) {
            let light = light.borrow();
            let point = &light.point;
            upload_base_light(&mut self.program, &loc.point.base, &point.base);
            self.program.set_vec3(loc.point.position, point.position);
            self.program
                .set_vec3(loc.direction, light_direction(light.direction));
            self.program.set_float(loc.cutoff, cutoff_cosine(light.cutoff));
            upload_attenuation(&mut self.program, &loc.point.atten, &point.attenuation);
        }
    }
}

fn active_count(len: usize, capacity: usize, kind: &str) -> usize {
    if len > capacity {
        log::debug!("{len} {kind} lights given, only {capacity} uploaded");
    }
    len.min(capacity)
}

fn upload_base_light<P: UniformProgram>(program: &mut P, loc: &BaseLightLocations, light: &BaseLight) {
    program.set_vec3(loc.color, light.color);
    program.set_float(loc.ambient_intensity, light.ambient_intensity);
    program.set_float(loc.diffuse_intensity, light.diffuse_intensity);
}

fn upload_attenuation<P: UniformProgram>(
    program: &mut P,
    loc: &AttenuationLocations,
    atten: &Attenuation,
) {
    program.set_float(loc.constant, atten.constant);
    program.set_float(loc.linear, atten.linear);
    program.set_float(loc.exp, atten.exp);
}

fn upload_point_light<P: UniformProgram>(program: &mut P, loc: &PointLightLocations, light: &PointLight) {
    upload_base_light(program, &loc.base, &light.base);
    program.set_vec3(loc.position, light.position);
    upload_attenuation(program, &loc.atten, &light.attenuation);
}

/// Unit-length direction, or [`FALLBACK_LIGHT_DIRECTION`] when `direction`
/// has no usable length.
pub fn light_direction(direction: Vec3) -> Vec3 {
    direction.normalize_or(FALLBACK_LIGHT_DIRECTION)
}

/// The shader compares against a dot product, so the cone half-angle goes
/// up as its cosine.
pub fn cutoff_cosine(degrees: f32) -> f32 {
    degrees.to_radians().cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::{HashMap, HashSet};

    #[derive(Clone, Debug, PartialEq)]
    enum Value {
        Int(i32),
        Float(f32),
        Vec3(Vec3),
        Mat4(Mat4),
    }

    /// Stands in for a linked program: knows a set of declared uniforms and
    /// records every upload by name, in order.
    struct MockProgram {
        declared: HashMap<String, UniformLocation>,
        uploads: Vec<(String, Value)>,
        binds: Cell<usize>,
    }

    impl MockProgram {
        fn declaring(names: impl IntoIterator<Item = String>) -> Self {
            let declared = names
                .into_iter()
                .enumerate()
                .map(|(i, name)| (name, UniformLocation::from_raw(i as i32).unwrap()))
                .collect();
            Self {
                declared,
                uploads: Vec::new(),
                binds: Cell::new(0),
            }
        }

        fn complete() -> Self {
            Self::declaring(contract())
        }

        fn name_of(&self, location: UniformLocation) -> String {
            self.declared
                .iter()
                .find(|(_, loc)| **loc == location)
                .map(|(name, _)| name.clone())
                .expect("upload to a location the program never handed out")
        }

        fn record(&mut self, location: UniformLocation, value: Value) {
            let name = self.name_of(location);
            self.uploads.push((name, value));
        }
    }

    impl UniformProgram for MockProgram {
        fn bind(&self) {
            self.binds.set(self.binds.get() + 1);
        }

        fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
            self.declared.get(name).copied()
        }

        fn set_int(&mut self, location: UniformLocation, value: i32) {
            self.record(location, Value::Int(value));
        }

        fn set_float(&mut self, location: UniformLocation, value: f32) {
            self.record(location, Value::Float(value));
        }

        fn set_vec3(&mut self, location: UniformLocation, value: Vec3) {
            self.record(location, Value::Vec3(value));
        }

        fn set_mat4(&mut self, location: UniformLocation, value: &Mat4) {
            self.record(location, Value::Mat4(*value));
        }
    }

    /// Every uniform name the shader declares, spelled out by hand.
    fn contract() -> Vec<String> {
        let mut names: Vec<String> = [
            "gDirectionalLight.Base.Color",
            "gDirectionalLight.Base.AmbientIntensity",
            "gDirectionalLight.Base.DiffuseIntensity",
            "gDirectionalLight.Direction",
            "gWVP",
            "gWorld",
            "gColorMap",
            "gEyeWorldPos",
            "gMatSpecularIntensity",
            "gSpecularPower",
            "gNumPointLights",
            "gNumSpotLights",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        for i in 0..MAX_POINT_LIGHTS {
            for field in [
                "Base.Color",
                "Base.AmbientIntensity",
                "Base.DiffuseIntensity",
                "Position",
                "Atten.Constant",
                "Atten.Linear",
                "Atten.Exp",
            ] {
                names.push(format!("gPointLights[{i}].{field}"));
            }
        }
        for i in 0..MAX_SPOT_LIGHTS {
            for field in [
                "Base.Base.Color",
                "Base.Base.AmbientIntensity",
                "Base.Base.DiffuseIntensity",
                "Base.Position",
                "Base.Atten.Constant",
                "Base.Atten.Linear",
                "Base.Atten.Exp",
                "Direction",
                "Cutoff",
            ] {
                names.push(format!("gSpotLights[{i}].{field}"));
            }
        }
        names
    }

    fn technique() -> LightingTechnique<MockProgram> {
        LightingTechnique::new(MockProgram::complete()).expect("complete contract")
    }

    fn point_light(name: &str, x: f32) -> PointLight {
        PointLight {
            base: BaseLight::new(name, Vec3::new(1.0, 0.5, 0.25), 0.1, 0.8),
            position: Vec3::new(x, 2.0, -3.0),
            attenuation: Attenuation {
                constant: 1.0,
                linear: 0.2,
                exp: 0.05,
            },
        }
    }

    fn spot_light(direction: Vec3, cutoff: f32) -> SpotLight {
        SpotLight {
            point: point_light("Spot", 1.0),
            direction,
            cutoff,
        }
    }

    fn uploaded<'a>(tech: &'a LightingTechnique<MockProgram>, name: &str) -> Vec<&'a Value> {
        tech.program
            .uploads
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v)
            .collect()
    }

    fn uploaded_vec3(tech: &LightingTechnique<MockProgram>, name: &str) -> Vec3 {
        match uploaded(tech, name).last() {
            Some(Value::Vec3(v)) => *v,
            other => panic!("{name}: expected a vec3 upload, got {other:?}"),
        }
    }

    fn uploaded_float(tech: &LightingTechnique<MockProgram>, name: &str) -> f32 {
        match uploaded(tech, name).last() {
            Some(Value::Float(v)) => *v,
            other => panic!("{name}: expected a float upload, got {other:?}"),
        }
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn naming_follows_struct_nesting() {
        assert_eq!(
            uniform_name(LightSlot::Directional, LightField::Color).unwrap(),
            "gDirectionalLight.Base.Color"
        );
        assert_eq!(
            uniform_name(LightSlot::Directional, LightField::Direction).unwrap(),
            "gDirectionalLight.Direction"
        );
        assert_eq!(
            uniform_name(LightSlot::Point(1), LightField::AmbientIntensity).unwrap(),
            "gPointLights[1].Base.AmbientIntensity"
        );
        assert_eq!(
            uniform_name(LightSlot::Point(0), LightField::AttenExp).unwrap(),
            "gPointLights[0].Atten.Exp"
        );
        assert_eq!(
            uniform_name(LightSlot::Spot(1), LightField::Color).unwrap(),
            "gSpotLights[1].Base.Base.Color"
        );
        assert_eq!(
            uniform_name(LightSlot::Spot(0), LightField::Position).unwrap(),
            "gSpotLights[0].Base.Position"
        );
        assert_eq!(
            uniform_name(LightSlot::Spot(0), LightField::AttenLinear).unwrap(),
            "gSpotLights[0].Base.Atten.Linear"
        );
        assert_eq!(
            uniform_name(LightSlot::Spot(1), LightField::Cutoff).unwrap(),
            "gSpotLights[1].Cutoff"
        );
    }

    #[test]
    fn naming_rejects_fields_a_kind_lacks() {
        assert_eq!(uniform_name(LightSlot::Point(0), LightField::Direction), None);
        assert_eq!(uniform_name(LightSlot::Point(0), LightField::Cutoff), None);
        assert_eq!(uniform_name(LightSlot::Directional, LightField::Position), None);
        assert_eq!(uniform_name(LightSlot::Directional, LightField::AttenConstant), None);
        assert_eq!(uniform_name(LightSlot::Directional, LightField::Cutoff), None);
    }

    #[test]
    fn complete_program_resolves_distinct_handles() {
        let tech = technique();

        let mut all = vec![
            tech.wvp,
            tech.world,
            tech.color_map,
            tech.eye_world_pos,
            tech.mat_specular_intensity,
            tech.specular_power,
            tech.num_point_lights,
            tech.num_spot_lights,
            tech.directional.base.color,
            tech.directional.base.ambient_intensity,
            tech.directional.base.diffuse_intensity,
            tech.directional.direction,
        ];
        let point = |p: &PointLightLocations| {
            [
                p.base.color,
                p.base.ambient_intensity,
                p.base.diffuse_intensity,
                p.position,
                p.atten.constant,
                p.atten.linear,
                p.atten.exp,
            ]
        };
        for p in &tech.point_lights {
            all.extend(point(p));
        }
        for s in &tech.spot_lights {
            all.extend(point(&s.point));
            all.extend([s.direction, s.cutoff]);
        }

        assert_eq!(all.len(), contract().len());
        let distinct: HashSet<_> = all.iter().collect();
        assert_eq!(distinct.len(), all.len());
    }

    #[test]
    fn any_missing_uniform_fails_initialization() {
        for dropped in contract() {
            let names = contract().into_iter().filter(|n| *n != dropped);
            match LightingTechnique::new(MockProgram::declaring(names)) {
                Err(LightingError::MissingUniforms(missing)) => assert_eq!(missing, [dropped]),
                Err(other) => panic!("unexpected error: {other}"),
                Ok(_) => panic!("initialized without {dropped}"),
            }
        }
    }

    #[test]
    fn missing_uniforms_are_all_reported() {
        let names = contract()
            .into_iter()
            .filter(|n| !n.starts_with("gSpotLights[1]"));
        let Err(LightingError::MissingUniforms(missing)) =
            LightingTechnique::new(MockProgram::declaring(names))
        else {
            panic!("expected missing uniforms");
        };
        assert_eq!(missing.len(), 9);
        assert!(missing.contains(&"gSpotLights[1].Cutoff".to_string()));
    }

    #[test]
    fn empty_program_fails() {
        assert!(LightingTechnique::new(MockProgram::declaring(Vec::new())).is_err());
    }

    #[test]
    fn directional_direction_is_normalized() {
        let mut tech = technique();
        let mut light = DirectionalLight {
            base: BaseLight::new("Sun", Vec3::ONE, 0.66, 1.0),
            direction: Vec3::new(2.0, 0.0, 0.0),
        };
        tech.set_directional_light(&light);
        let long = uploaded_vec3(&tech, "gDirectionalLight.Direction");

        light.direction = Vec3::X;
        tech.set_directional_light(&light);
        let unit = uploaded_vec3(&tech, "gDirectionalLight.Direction");

        assert!(approx(long, Vec3::X));
        assert!(approx(long, unit));

        light.direction = Vec3::new(3.0, -4.0, 0.0);
        tech.set_directional_light(&light);
        let d = uploaded_vec3(&tech, "gDirectionalLight.Direction");
        assert!(approx(d, Vec3::new(0.6, -0.8, 0.0)));
    }

    #[test]
    fn directional_scalars_are_verbatim() {
        let mut tech = technique();
        let light = DirectionalLight {
            base: BaseLight::new("Sun", Vec3::new(0.2, 0.4, 0.6), 0.66, 0.9),
            direction: Vec3::X,
        };
        tech.set_directional_light(&light);
        assert_eq!(
            uploaded_vec3(&tech, "gDirectionalLight.Base.Color"),
            Vec3::new(0.2, 0.4, 0.6)
        );
        assert_eq!(uploaded_float(&tech, "gDirectionalLight.Base.AmbientIntensity"), 0.66);
        assert_eq!(uploaded_float(&tech, "gDirectionalLight.Base.DiffuseIntensity"), 0.9);
    }

    #[test]
    fn zero_direction_uploads_fallback_axis() {
        let mut tech = technique();
        let light = DirectionalLight {
            base: BaseLight::new("Sun", Vec3::ONE, 0.5, 0.5),
            direction: Vec3::ZERO,
        };
        tech.set_directional_light(&light);
        assert_eq!(
            uploaded_vec3(&tech, "gDirectionalLight.Direction"),
            FALLBACK_LIGHT_DIRECTION
        );

        tech.set_spot_lights(&[spot_light(Vec3::ZERO, 30.0)]);
        assert_eq!(
            uploaded_vec3(&tech, "gSpotLights[0].Direction"),
            FALLBACK_LIGHT_DIRECTION
        );
    }

    #[test]
    fn zero_point_lights_uploads_only_the_count() {
        let mut tech = technique();
        tech.set_point_lights::<PointLight>(&[]);
        assert_eq!(
            tech.program.uploads,
            [("gNumPointLights".to_string(), Value::Int(0))]
        );
    }

    #[test]
    fn full_point_array_uploads_each_slot_in_order() {
        let mut tech = technique();
        let lights = [point_light("A", 1.0), point_light("B", 2.0)];
        tech.set_point_lights(&lights);

        let names: Vec<&str> = tech.program.uploads.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            [
                "gNumPointLights",
                "gPointLights[0].Base.Color",
                "gPointLights[0].Base.AmbientIntensity",
                "gPointLights[0].Base.DiffuseIntensity",
                "gPointLights[0].Position",
                "gPointLights[0].Atten.Constant",
                "gPointLights[0].Atten.Linear",
                "gPointLights[0].Atten.Exp",
                "gPointLights[1].Base.Color",
                "gPointLights[1].Base.AmbientIntensity",
                "gPointLights[1].Base.DiffuseIntensity",
                "gPointLights[1].Position",
                "gPointLights[1].Atten.Constant",
                "gPointLights[1].Atten.Linear",
                "gPointLights[1].Atten.Exp",
            ]
        );
        assert_eq!(tech.program.uploads[0].1, Value::Int(2));
        assert_eq!(
            uploaded_vec3(&tech, "gPointLights[0].Position"),
            Vec3::new(1.0, 2.0, -3.0)
        );
        assert_eq!(
            uploaded_vec3(&tech, "gPointLights[1].Position"),
            Vec3::new(2.0, 2.0, -3.0)
        );
        assert_eq!(uploaded_float(&tech, "gPointLights[1].Atten.Linear"), 0.2);
        assert_eq!(uploaded_float(&tech, "gPointLights[1].Atten.Exp"), 0.05);
    }

    #[test]
    fn point_lights_beyond_capacity_are_clamped() {
        let mut tech = technique();
        let lights: Vec<PointLight> = (0..MAX_POINT_LIGHTS + 3)
            .map(|i| point_light("P", i as f32))
            .collect();
        tech.set_point_lights(&lights);

        assert_eq!(tech.program.uploads[0].1, Value::Int(MAX_POINT_LIGHTS as i32));
        assert_eq!(tech.program.uploads.len(), 1 + 7 * MAX_POINT_LIGHTS);
    }

    #[test]
    fn spot_lights_beyond_capacity_are_clamped() {
        let mut tech = technique();
        let lights: Vec<SpotLight> = (0..MAX_SPOT_LIGHTS + 3)
            .map(|i| spot_light(Vec3::NEG_Y, 10.0 + i as f32))
            .collect();
        tech.set_spot_lights(&lights);

        assert_eq!(tech.program.uploads[0].1, Value::Int(MAX_SPOT_LIGHTS as i32));
        assert_eq!(tech.program.uploads.len(), 1 + 9 * MAX_SPOT_LIGHTS);
        assert!(uploaded(&tech, &format!("gSpotLights[{MAX_SPOT_LIGHTS}].Cutoff")).is_empty());
    }

    #[test]
    fn point_lights_accept_borrowed_slices() {
        let mut tech = technique();
        let a = point_light("A", 5.0);
        tech.set_point_lights(&[&a]);
        assert_eq!(tech.program.uploads[0].1, Value::Int(1));
        assert_eq!(
            uploaded_vec3(&tech, "gPointLights[0].Position"),
            Vec3::new(5.0, 2.0, -3.0)
        );
    }

    #[test]
    fn spot_cutoff_uploads_cosine() {
        let mut tech = technique();
        tech.set_spot_lights(&[spot_light(Vec3::NEG_Y, 0.0), spot_light(Vec3::NEG_Y, 90.0)]);
        assert!((uploaded_float(&tech, "gSpotLights[0].Cutoff") - 1.0).abs() < 1e-6);
        assert!(uploaded_float(&tech, "gSpotLights[1].Cutoff").abs() < 1e-6);

        tech.set_spot_lights(&[spot_light(Vec3::NEG_Y, 60.0)]);
        assert!((uploaded_float(&tech, "gSpotLights[0].Cutoff") - 0.5).abs() < 1e-6);
    }

    #[test]
    fn spot_cutoff_is_recomputed_every_call() {
        let mut tech = technique();
        let mut light = spot_light(Vec3::NEG_Y, 10.0);
        tech.set_spot_lights(&[&light]);
        light.cutoff = 45.0;
        tech.set_spot_lights(&[&light]);

        let cutoffs = uploaded(&tech, "gSpotLights[0].Cutoff");
        assert_eq!(cutoffs.len(), 2);
        assert_eq!(*cutoffs[1], Value::Float(45.0_f32.to_radians().cos()));
    }

    #[test]
    fn spot_direction_is_magnitude_invariant() {
        let mut tech = technique();
        tech.set_spot_lights(&[
            spot_light(Vec3::new(0.0, -5.0, 0.0), 20.0),
            spot_light(Vec3::NEG_Y, 20.0),
        ]);
        let a = uploaded_vec3(&tech, "gSpotLights[0].Direction");
        let b = uploaded_vec3(&tech, "gSpotLights[1].Direction");
        assert!(approx(a, Vec3::NEG_Y));
        assert!(approx(a, b));
    }

    #[test]
    fn spot_count_and_point_fields_are_uploaded() {
        let mut tech = technique();
        tech.set_spot_lights(&[spot_light(Vec3::NEG_Y, 20.0)]);
        assert_eq!(tech.program.uploads[0], ("gNumSpotLights".to_string(), Value::Int(1)));
        assert_eq!(tech.program.uploads.len(), 1 + 9);
        assert_eq!(uploaded_float(&tech, "gSpotLights[0].Base.Base.AmbientIntensity"), 0.1);
        assert_eq!(
            uploaded_vec3(&tech, "gSpotLights[0].Base.Position"),
            Vec3::new(1.0, 2.0, -3.0)
        );
        assert_eq!(uploaded_float(&tech, "gSpotLights[0].Base.Atten.Constant"), 1.0);
        assert!(uploaded(&tech, "gSpotLights[1].Cutoff").is_empty());
    }

    #[test]
    fn enable_binds_without_uploading() {
        let tech = technique();
        tech.enable();
        assert_eq!(tech.program.binds.get(), 1);
        assert!(tech.program.uploads.is_empty());
    }

    #[test]
    fn pass_through_setters_upload_once() {
        let mut tech = technique();
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        tech.set_wvp(&m);
        tech.set_world_matrix(&Mat4::IDENTITY);
        tech.set_color_texture_unit(0);
        tech.set_eye_world_pos(Vec3::new(0.0, 23.0, -5.0));
        tech.set_mat_specular_intensity(0.0);
        tech.set_mat_specular_power(32.0);

        assert_eq!(
            tech.program.uploads,
            [
                ("gWVP".to_string(), Value::Mat4(m)),
                ("gWorld".to_string(), Value::Mat4(Mat4::IDENTITY)),
                ("gColorMap".to_string(), Value::Int(0)),
                ("gEyeWorldPos".to_string(), Value::Vec3(Vec3::new(0.0, 23.0, -5.0))),
                ("gMatSpecularIntensity".to_string(), Value::Float(0.0)),
                ("gSpecularPower".to_string(), Value::Float(32.0)),
            ]
        );
    }

    #[test]
    fn shader_declares_matching_capacities() {
        let frag = include_str!("../../shaders/basic_lighting.frag");
        assert!(frag.contains(&format!("const int MAX_POINT_LIGHTS = {MAX_POINT_LIGHTS};")));
        assert!(frag.contains(&format!("const int MAX_SPOT_LIGHTS = {MAX_SPOT_LIGHTS};")));
    }
}
