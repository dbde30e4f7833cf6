use gl::types::*;
use std::f32::consts::PI;
use std::mem;
use std::ptr;

/// Floats per vertex: position (3), normal (3), texture coordinate (2).
pub const VERTEX_STRIDE: usize = 8;

/// CPU-side geometry, interleaved as described by [`VERTEX_STRIDE`].
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }
}

pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    pub index_count: i32,
}

impl Mesh {
    pub fn upload(data: &MeshData) -> Self {
        log::trace!(
            "uploading mesh: {} vertices, {} indices",
            data.vertex_count(),
            data.indices.len()
        );

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::GenBuffers(1, &mut ebo);

            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.vertices.len() * mem::size_of::<f32>()) as GLsizeiptr,
                data.vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (data.indices.len() * mem::size_of::<u32>()) as GLsizeiptr,
                data.indices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            let stride = (VERTEX_STRIDE * mem::size_of::<f32>()) as GLsizei;

            // position attribute (location 0)
            gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, ptr::null());
            gl::EnableVertexAttribArray(0);

            // normal attribute (location 1)
            gl::VertexAttribPointer(
                1,
                3,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (3 * mem::size_of::<f32>()) as *const _,
            );
            gl::EnableVertexAttribArray(1);

            // texture coordinate attribute (location 2)
            gl::VertexAttribPointer(
                2,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (6 * mem::size_of::<f32>()) as *const _,
            );
            gl::EnableVertexAttribArray(2);

            gl::BindVertexArray(0);
        }

        Mesh {
            vao,
            vbo,
            ebo,
            index_count: data.indices.len() as i32,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(gl::TRIANGLES, self.index_count, gl::UNSIGNED_INT, ptr::null());
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ebo);
        }
    }
}

/// Flat square in the XZ plane facing +Y. The texture repeats `tiles` times
/// along each edge.
pub fn plane_geometry(size: f32, tiles: f32) -> MeshData {
    let h = size * 0.5;

    #[rustfmt::skip]
    let vertices = vec![
        -h, 0.0,  h,  0.0, 1.0, 0.0,  0.0,   0.0,
         h, 0.0,  h,  0.0, 1.0, 0.0,  tiles, 0.0,
         h, 0.0, -h,  0.0, 1.0, 0.0,  tiles, tiles,
        -h, 0.0, -h,  0.0, 1.0, 0.0,  0.0,   tiles,
    ];

    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

pub fn box_geometry(width: f32, height: f32, depth: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let hd = depth * 0.5;

    #[rustfmt::skip]
    let vertices: Vec<f32> = vec![
        // Front face (+Z)
        -hw, -hh,  hd,  0.0,  0.0,  1.0,  0.0, 0.0,
         hw, -hh,  hd,  0.0,  0.0,  1.0,  1.0, 0.0,
         hw,  hh,  hd,  0.0,  0.0,  1.0,  1.0, 1.0,
        -hw,  hh,  hd,  0.0,  0.0,  1.0,  0.0, 1.0,
        // Back face (-Z)
         hw, -hh, -hd,  0.0,  0.0, -1.0,  0.0, 0.0,
        -hw, -hh, -hd,  0.0,  0.0, -1.0,  1.0, 0.0,
        -hw,  hh, -hd,  0.0,  0.0, -1.0,  1.0, 1.0,
         hw,  hh, -hd,  0.0,  0.0, -1.0,  0.0, 1.0,
        // Top face (+Y)
        -hw,  hh,  hd,  0.0,  1.0,  0.0,  0.0, 0.0,
         hw,  hh,  hd,  0.0,  1.0,  0.0,  1.0, 0.0,
         hw,  hh, -hd,  0.0,  1.0,  0.0,  1.0, 1.0,
        -hw,  hh, -hd,  0.0,  1.0,  0.0,  0.0, 1.0,
        // Bottom face (-Y)
        -hw, -hh, -hd,  0.0, -1.0,  0.0,  0.0, 0.0,
         hw, -hh, -hd,  0.0, -1.0,  0.0,  1.0, 0.0,
         hw, -hh,  hd,  0.0, -1.0,  0.0,  1.0, 1.0,
        -hw, -hh,  hd,  0.0, -1.0,  0.0,  0.0, 1.0,
        // Right face (+X)
         hw, -hh,  hd,  1.0,  0.0,  0.0,  0.0, 0.0,
         hw, -hh, -hd,  1.0,  0.0,  0.0,  1.0, 0.0,
         hw,  hh, -hd,  1.0,  0.0,  0.0,  1.0, 1.0,
         hw,  hh,  hd,  1.0,  0.0,  0.0,  0.0, 1.0,
        // Left face (-X)
        -hw, -hh, -hd, -1.0,  0.0,  0.0,  0.0, 0.0,
        -hw, -hh,  hd, -1.0,  0.0,  0.0,  1.0, 0.0,
        -hw,  hh,  hd, -1.0,  0.0,  0.0,  1.0, 1.0,
        -hw,  hh, -hd, -1.0,  0.0,  0.0,  0.0, 1.0,
    ];

    let mut indices = Vec::new();
    for face in 0..6u32 {
        let base = face * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// UV sphere centred on the origin.
pub fn sphere_geometry(radius: f32, stacks: u32, sectors: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=stacks {
        let stack_angle = PI / 2.0 - (i as f32) * PI / (stacks as f32);
        let ring = stack_angle.cos();
        let y = stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = 2.0 * PI * (j as f32) / (sectors as f32);
            let nx = ring * sector_angle.cos();
            let nz = ring * sector_angle.sin();

            vertices.extend_from_slice(&[radius * nx, radius * y, radius * nz]);
            vertices.extend_from_slice(&[nx, y, nz]);
            vertices.extend_from_slice(&[
                j as f32 / sectors as f32,
                1.0 - i as f32 / stacks as f32,
            ]);
        }
    }

    for i in 0..stacks {
        for j in 0..sectors {
            let first = i * (sectors + 1) + j;
            let second = first + sectors + 1;

            // counter-clockwise seen from outside
            indices.extend_from_slice(&[first, first + 1, second]);
            indices.extend_from_slice(&[first + 1, second + 1, second]);
        }
    }

    MeshData { vertices, indices }
}
