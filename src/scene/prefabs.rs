use glam::{Mat4, Vec3};
use hecs::{Entity, World};

use crate::components::*;
use crate::renderer::mesh::{box_geometry, plane_geometry, sphere_geometry, Mesh};
use crate::renderer::texture::{ImageData, Texture, TextureHandle, TextureStore};
use crate::renderer::MeshStore;

fn solid_texture(textures: &mut TextureStore, color: Vec3) -> TextureHandle {
    textures.add(Texture::upload(&ImageData::solid(color)))
}

pub fn spawn_ground(
    world: &mut World,
    meshes: &mut MeshStore,
    textures: &mut TextureStore,
    size: f32,
) -> Entity {
    let mesh = meshes.add(Mesh::upload(&plane_geometry(size, size / 4.0)));
    let texture = textures.add(Texture::upload(&ImageData::checker(
        64,
        2,
        Vec3::new(0.55, 0.55, 0.55),
        Vec3::new(0.35, 0.35, 0.38),
    )));
    world.spawn((
        LocalTransform::new(Vec3::ZERO),
        GlobalTransform(Mat4::IDENTITY),
        mesh,
        Material { texture },
    ))
}

pub fn spawn_box(
    world: &mut World,
    meshes: &mut MeshStore,
    textures: &mut TextureStore,
    position: Vec3,
    size: Vec3,
    color: Vec3,
) -> Entity {
    let mesh = meshes.add(Mesh::upload(&box_geometry(size.x, size.y, size.z)));
    let texture = solid_texture(textures, color);
    world.spawn((
        LocalTransform::new(position),
        GlobalTransform(Mat4::IDENTITY),
        mesh,
        Material { texture },
    ))
}

pub fn spawn_sphere(
    world: &mut World,
    meshes: &mut MeshStore,
    textures: &mut TextureStore,
    position: Vec3,
    radius: f32,
    color: Vec3,
) -> Entity {
    let mesh = meshes.add(Mesh::upload(&sphere_geometry(radius, 24, 32)));
    let texture = solid_texture(textures, color);
    world.spawn((
        LocalTransform::new(position),
        GlobalTransform(Mat4::IDENTITY),
        mesh,
        Material { texture },
    ))
}

pub fn spawn_directional_light(world: &mut World, light: DirectionalLight) -> Entity {
    world.spawn((light,))
}

pub fn spawn_point_light(
    world: &mut World,
    name: &str,
    position: Vec3,
    color: Vec3,
    diffuse: f32,
    radius: f32,
) -> Entity {
    world.spawn((PointLight {
        base: BaseLight::new(name, color, 0.0, diffuse),
        position,
        attenuation: Attenuation::from_radius(radius),
    },))
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_spot_light(
    world: &mut World,
    name: &str,
    position: Vec3,
    direction: Vec3,
    color: Vec3,
    diffuse: f32,
    cutoff_deg: f32,
    radius: f32,
) -> Entity {
    world.spawn((SpotLight {
        point: PointLight {
            base: BaseLight::new(name, color, 0.0, diffuse),
            position,
            attenuation: Attenuation::from_radius(radius),
        },
        direction,
        cutoff: cutoff_deg,
    },))
}
