use crate::renderer::texture::TextureHandle;

/// Index into the MeshStore resource.
#[derive(Clone, Copy)]
pub struct MeshHandle(pub usize);

/// Surface description: the texture sampled through the color map unit.
#[derive(Clone, Copy)]
pub struct Material {
    pub texture: TextureHandle,
}
