use glam::{Vec2, Vec3};
use indexmap::IndexMap;
use wgpu::{
    util::{BufferInitDescriptor, DeviceExt, TextureDataOrder},
    Buffer, BufferUsages, Extent3d, Texture, TextureDescriptor, TextureDimension, TextureFormat,
    TextureUsages,
};

use crate::{render::resource::Vertex, SceneError, SceneResult, WgpuRenderer};

/// RGBA8 pixels decoded from any format the `image` crate understands.
pub struct Image {
    width: u32,
    height: u32,
    raw: Vec<u8>,
}

impl Image {
    pub fn from_bytes(name: &str, bytes: &[u8]) -> SceneResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|source| SceneError::TextureDecode {
                name: name.to_string(),
                source,
            })?
            .into_rgba8();

        Ok(Self {
            width: img.width(),
            height: img.height(),
            raw: img.into_raw(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn to_texture(&self, renderer: &WgpuRenderer) -> Texture {
        renderer.device.create_texture_with_data(
            &renderer.queue,
            &TextureDescriptor {
                label: None,
                size: Extent3d {
                    width: self.width,
                    height: self.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: TextureDimension::D2,
                format: TextureFormat::Rgba8UnormSrgb,
                usage: TextureUsages::COPY_DST | TextureUsages::TEXTURE_BINDING,
                view_formats: &[TextureFormat::Rgba8UnormSrgb],
            },
            TextureDataOrder::LayerMajor,
            &self.raw,
        )
    }
}

/// Indexed triangle list.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

type ObjKey = (usize, Option<usize>, Option<usize>);

impl Mesh {
    /// Parses a Wavefront OBJ, merging every object and group into one mesh.
    ///
    /// Identical position/uv/normal tuples share a vertex. Missing uvs become
    /// zero, missing normals are averaged from the adjacent faces.
    pub fn from_obj(name: &str, source: &[u8]) -> SceneResult<Self> {
        let obj = obj::ObjData::load_buf(source).map_err(|err| SceneError::MeshParse {
            name: name.to_string(),
            reason: err.to_string(),
        })?;

        let out_of_range = |what: &str, index: usize| SceneError::MeshParse {
            name: name.to_string(),
            reason: format!("{what} index {index} out of range"),
        };

        let mut unique = IndexMap::<ObjKey, Vertex>::new();
        let mut indices = Vec::new();

        for group in obj.objects.iter().flat_map(|o| &o.groups) {
            for poly in &group.polys {
                // Fan triangulation.
                for end_index in 2..poly.0.len() {
                    for &index in &[0, end_index - 1, end_index] {
                        let obj::IndexTuple(position_id, texture_id, normal_id) = poly.0[index];
                        let key = (position_id, texture_id, normal_id);

                        if !unique.contains_key(&key) {
                            let position = *obj
                                .position
                                .get(position_id)
                                .ok_or_else(|| out_of_range("position", position_id))?;
                            let uv = match texture_id {
                                Some(id) => *obj
                                    .texture
                                    .get(id)
                                    .ok_or_else(|| out_of_range("texture", id))?,
                                None => [0.; 2],
                            };
                            let normal = match normal_id {
                                Some(id) => *obj
                                    .normal
                                    .get(id)
                                    .ok_or_else(|| out_of_range("normal", id))?,
                                None => [0.; 3],
                            };

                            unique.insert(
                                key,
                                Vertex {
                                    position: position.into(),
                                    normal: normal.into(),
                                    uv: Vec2::from(uv),
                                },
                            );
                        }

                        let (vertex_index, _, _) = unique.get_full(&key).ok_or_else(|| {
                            SceneError::MeshParse {
                                name: name.to_string(),
                                reason: "vertex table out of sync".into(),
                            }
                        })?;
                        indices.push(vertex_index as u32);
                    }
                }
            }
        }

        if indices.is_empty() {
            return Err(SceneError::EmptyMesh(name.to_string()));
        }

        let needs_normal = unique.keys().map(|(_, _, n)| n.is_none()).collect::<Vec<_>>();
        let mut mesh = Self {
            vertices: unique.into_values().collect(),
            indices,
        };
        if needs_normal.iter().any(|n| *n) {
            mesh.recalculate_normals(&needs_normal);
        }

        log::debug!(
            "Parsed mesh `{name}`: {} vertices, {} triangles.",
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );

        Ok(mesh)
    }

    fn recalculate_normals(&mut self, needs_normal: &[bool]) {
        let mut accumulated = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = self.vertices[i0].position;
            // Area weighted.
            let n = (self.vertices[i1].position - p0).cross(self.vertices[i2].position - p0);
            accumulated[i0] += n;
            accumulated[i1] += n;
            accumulated[i2] += n;
        }

        for (i_vert, vertex) in self.vertices.iter_mut().enumerate() {
            if needs_normal[i_vert] {
                vertex.normal = accumulated[i_vert].normalize_or_zero();
            }
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn to_buffers(&self, renderer: &WgpuRenderer) -> (Buffer, Buffer) {
        let vertex_buffer = renderer.device.create_buffer_init(&BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = renderer.device.create_buffer_init(&BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: BufferUsages::INDEX,
        });
        (vertex_buffer, index_buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quads_are_fanned_into_shared_vertices() {
        let mesh = Mesh::from_obj("quad.obj", QUAD.as_bytes()).unwrap();

        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices()[2].uv, Vec2::new(1., 1.));
        assert_eq!(mesh.vertices()[3].normal, Vec3::Z);
    }

    #[test]
    fn missing_normals_are_generated() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 0 -1\nf 1 2 3\n";
        let mesh = Mesh::from_obj("tri.obj", source.as_bytes()).unwrap();

        for vertex in mesh.vertices() {
            assert!(vertex.normal.abs_diff_eq(Vec3::Y, 1e-6));
            assert_eq!(vertex.uv, Vec2::ZERO);
        }
    }

    #[test]
    fn meshes_without_faces_are_rejected() {
        let err = Mesh::from_obj("points.obj", b"v 0 0 0\nv 1 0 0\n").unwrap_err();
        assert!(matches!(err, SceneError::EmptyMesh(name) if name == "points.obj"));
    }

    #[test]
    fn dangling_indices_are_reported() {
        let err = Mesh::from_obj("bad.obj", b"v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, SceneError::MeshParse { .. }));
    }

    #[test]
    fn images_decode_to_rgba() {
        // 2x1 binary PPM: red, blue.
        let mut ppm = b"P6\n2 1\n255\n".to_vec();
        ppm.extend_from_slice(&[255, 0, 0, 0, 0, 255]);

        let image = Image::from_bytes("tiny.ppm", &ppm).unwrap();
        assert_eq!((image.width(), image.height()), (2, 1));
        assert_eq!(image.raw, vec![255, 0, 0, 255, 0, 0, 255, 255]);

        assert!(matches!(
            Image::from_bytes("garbage.png", b"not an image"),
            Err(SceneError::TextureDecode { .. })
        ));
    }
}
