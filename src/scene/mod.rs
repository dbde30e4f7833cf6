pub mod demo_scene;
pub mod prefabs;
