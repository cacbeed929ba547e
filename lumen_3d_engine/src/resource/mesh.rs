/// Mesh resource - vertex (and index) buffers on the GPU.
///
/// Two meshes are built in and never touch the asset loader:
/// `__plane__` (unit quad in the XZ plane) and `__cube__` (unit cube).
/// Any other name is imported from `meshes/<name>`.

use crate::asset::{MeshData, Vertex3DTN};
use crate::error::{Error, Result};
use crate::graphics_device::{MeshDesc, MeshHandle, VertexFormat};
use crate::{engine_debug, engine_warn};
use super::resource::UnloadContext;
use super::resource_manager::ResourceManager;

pub const CUBE_MESH: &str = "__cube__";
pub const PLANE_MESH: &str = "__plane__";

#[derive(Debug, Default)]
pub struct Mesh {
    handle: Option<MeshHandle>,
    vertex_count: u32,
    index_count: u32,
}

impl Mesh {
    pub fn handle(&self) -> Option<MeshHandle> {
        self.handle
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Zero for non-indexed meshes
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub(crate) fn load(&mut self, name: &str, rm: &mut ResourceManager) -> Result<()> {
        let data = match name {
            CUBE_MESH => MeshData { vertices: cube_vertices(), indices: Vec::new(), mesh_count: 1 },
            PLANE_MESH => MeshData { vertices: plane_vertices(), indices: Vec::new(), mesh_count: 1 },
            _ => rm.loader().load_mesh(&format!("meshes/{}", name))?,
        };

        if data.mesh_count > 1 {
            engine_warn!(rm.log(), "lumen3d::Mesh",
                "'{}' contains {} meshes, only the first one is used", name, data.mesh_count);
        }
        if data.vertices.is_empty() {
            return Err(Error::InvalidManifest(format!("mesh '{}' has no vertices", name)));
        }

        let indices = (!data.indices.is_empty()).then_some(data.indices.as_slice());
        let handle = rm.device()?.create_mesh(&MeshDesc {
            name,
            format: VertexFormat::Vertex3DTN,
            vertex_data: bytemuck::cast_slice(&data.vertices),
            vertex_count: data.vertices.len() as u32,
            indices,
        })?;

        self.handle = Some(handle);
        self.vertex_count = data.vertices.len() as u32;
        self.index_count = data.indices.len() as u32;

        engine_debug!(rm.log(), "lumen3d::Mesh",
            "'{}' uploaded ({} vertices, {} indices)", name, self.vertex_count, self.index_count);
        Ok(())
    }

    pub(crate) fn unload(&mut self, ctx: &mut UnloadContext) {
        if let Some(handle) = self.handle.take() {
            ctx.with_device(|device| device.destroy_mesh(handle));
        }
    }
}

// ===== BUILT-IN GEOMETRY =====

/// Two triangles spanning [-1, 1] on X and Z, facing +Y
pub fn plane_vertices() -> Vec<Vertex3DTN> {
    let n = [0.0, 1.0, 0.0];
    vec![
        Vertex3DTN::new([-1.0, 0.0, -1.0], [0.0, 0.0], n),
        Vertex3DTN::new([-1.0, 0.0, 1.0], [0.0, 1.0], n),
        Vertex3DTN::new([1.0, 0.0, 1.0], [1.0, 1.0], n),
        Vertex3DTN::new([1.0, 0.0, 1.0], [1.0, 1.0], n),
        Vertex3DTN::new([1.0, 0.0, -1.0], [1.0, 0.0], n),
        Vertex3DTN::new([-1.0, 0.0, -1.0], [0.0, 0.0], n),
    ]
}

/// Cube spanning [-1, 1] on every axis, 6 faces x 2 triangles
pub fn cube_vertices() -> Vec<Vertex3DTN> {
    // (normal, u axis, v axis) per face, counter-clockwise seen from outside
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    const CORNERS: [(f32, f32); 6] = [
        (-1.0, -1.0), (1.0, -1.0), (1.0, 1.0),
        (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (normal, u, v) in FACES {
        for (su, sv) in CORNERS {
            let position = [
                normal[0] + u[0] * su + v[0] * sv,
                normal[1] + u[1] * su + v[1] * sv,
                normal[2] + u[2] * su + v[2] * sv,
            ];
            let uv = [(su + 1.0) * 0.5, (sv + 1.0) * 0.5];
            vertices.push(Vertex3DTN::new(position, uv, normal));
        }
    }
    vertices
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
