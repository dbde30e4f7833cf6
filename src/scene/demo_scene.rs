use glam::{Quat, Vec3};
use hecs::World;

use crate::components::{add_child, DirectionalLight, LocalTransform, Spin};
use crate::renderer::texture::TextureStore;
use crate::renderer::MeshStore;
use crate::scene::prefabs::{
    spawn_box, spawn_directional_light, spawn_ground, spawn_point_light, spawn_sphere,
    spawn_spot_light,
};

/// Turns per second of the centre piece.
pub const DEFAULT_SPIN_SPEED: f32 = 0.3;

/// GPU resources owned by the scene. Entities reference them by handle.
pub struct SceneAssets {
    pub meshes: MeshStore,
    pub textures: TextureStore,
}

/// Build and populate the demo scene around `sun`.
pub fn load_demo_scene(world: &mut World, sun: DirectionalLight) -> SceneAssets {
    let mut meshes = MeshStore::new();
    let mut textures = TextureStore::new();

    spawn_ground(world, &mut meshes, &mut textures, 60.0);

    // Spinning pedestal with a sphere riding on top.
    let pedestal = spawn_box(
        world,
        &mut meshes,
        &mut textures,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(3.0, 2.0, 3.0),
        Vec3::new(0.8, 0.78, 0.72),
    );
    let _ = world.insert_one(pedestal, Spin(DEFAULT_SPIN_SPEED));
    let orb = spawn_sphere(
        world,
        &mut meshes,
        &mut textures,
        Vec3::new(0.0, 2.0, 0.0),
        1.0,
        Vec3::new(0.85, 0.25, 0.2),
    );
    add_child(world, pedestal, orb);

    let grey = Vec3::new(0.5, 0.5, 0.52);
    for &(x, z, h) in &[(6.0_f32, -4.0_f32, 2.0_f32), (-5.0, 3.0, 3.5), (3.0, 7.0, 1.5)] {
        let block = spawn_box(
            world,
            &mut meshes,
            &mut textures,
            Vec3::new(x, h / 2.0, z),
            Vec3::new(2.5, h, 3.5),
            grey,
        );
        if let Ok(mut local) = world.get::<&mut LocalTransform>(block) {
            local.rotation = Quat::from_rotation_y(x * 0.3);
        }
    }

    spawn_directional_light(world, sun);
    spawn_point_light(
        world,
        "PointLight0",
        Vec3::new(4.0, 2.5, 0.0),
        Vec3::new(1.0, 0.6, 0.2),
        1.0,
        15.0,
    );
    spawn_point_light(
        world,
        "PointLight1",
        Vec3::new(-4.0, 2.0, -3.0),
        Vec3::new(0.2, 0.4, 1.0),
        1.0,
        12.0,
    );
    spawn_spot_light(
        world,
        "SpotLight0",
        Vec3::new(0.0, 8.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(1.0, 0.95, 0.8),
        1.0,
        20.0,
        25.0,
    );

    log::info!("demo scene built: {} entities", world.len());

    SceneAssets { meshes, textures }
}
