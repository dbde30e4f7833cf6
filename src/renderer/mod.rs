pub mod lighting;
pub mod mesh;
pub mod shader;
pub mod texture;

use std::path::Path;

use glam::{Mat4, Vec3};
use hecs::World;
use lighting::{LightingError, LightingTechnique};
use mesh::Mesh;
use shader::ShaderProgram;
use texture::TextureStore;

use crate::components::{DirectionalLight, GlobalTransform, Material, MeshHandle, PointLight, SpotLight};

pub const VERT_SHADER: &str = "basic_lighting.vert";
pub const FRAG_SHADER: &str = "basic_lighting.frag";

pub const COLOR_TEXTURE_UNIT: u32 = 0;

const CLEAR_COLOR: Vec3 = Vec3::new(0.0, 0.0, 0.0);

/// Holds all loaded meshes. Entities reference meshes by MeshHandle index.
pub struct MeshStore {
    meshes: Vec<Mesh>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self { meshes: Vec::new() }
    }

    pub fn add(&mut self, mesh: Mesh) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len());
        self.meshes.push(mesh);
        handle
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0)
    }
}

/// Material constants uploaded once at startup.
pub struct MaterialParams {
    pub specular_intensity: f32,
    pub specular_power: f32,
}

pub struct Renderer {
    lighting: LightingTechnique<ShaderProgram>,
}

impl Renderer {
    /// Load the lighting technique from `shader_dir` and prime the uniforms
    /// that stay constant for the whole run.
    pub fn init(shader_dir: &Path, material: &MaterialParams) -> Result<Self, LightingError> {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::Enable(gl::CULL_FACE);
            gl::ClearColor(CLEAR_COLOR.x, CLEAR_COLOR.y, CLEAR_COLOR.z, 1.0);
        }

        let mut lighting =
            LightingTechnique::load(shader_dir.join(VERT_SHADER), shader_dir.join(FRAG_SHADER))?;
        lighting.enable();
        lighting.set_color_texture_unit(COLOR_TEXTURE_UNIT);
        lighting.set_mat_specular_intensity(material.specular_intensity);
        lighting.set_mat_specular_power(material.specular_power);

        log::info!("lighting technique ready ({})", shader_dir.display());

        Ok(Self { lighting })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn draw_scene(
        &mut self,
        world: &World,
        meshes: &MeshStore,
        textures: &TextureStore,
        view: &Mat4,
        proj: &Mat4,
        eye: Vec3,
    ) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        self.lighting.enable();
        self.lighting.set_eye_world_pos(eye);

        if let Some((_, sun)) = world.query::<&DirectionalLight>().iter().next() {
            self.lighting.set_directional_light(sun);
        }

        let mut point_query = world.query::<&PointLight>();
        let points: Vec<&PointLight> = point_query.iter().map(|(_, light)| light).collect();
        self.lighting.set_point_lights(&points);

        let mut spot_query = world.query::<&SpotLight>();
        let spots: Vec<&SpotLight> = spot_query.iter().map(|(_, light)| light).collect();
        self.lighting.set_spot_lights(&spots);

        let view_proj = *proj * *view;

        for (_entity, (global_transform, mesh_handle, material)) in world
            .query::<(&GlobalTransform, &MeshHandle, &Material)>()
            .iter()
        {
            let Some(mesh) = meshes.get(*mesh_handle) else {
                continue;
            };
            if let Some(texture) = textures.get(material.texture) {
                texture.bind(COLOR_TEXTURE_UNIT);
            }
            self.lighting.set_wvp(&(view_proj * global_transform.0));
            self.lighting.set_world_matrix(&global_transform.0);
            mesh.draw();
        }
    }
}
