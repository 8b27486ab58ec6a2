use bytemuck::{Pod, Zeroable};

use crate::api::types::NodeId;
use crate::assets::textures::TextureId;
use crate::bridge::protocol::FrameHeader;
use crate::components::node::{Node, Renderable};
use crate::components::starfield::Star;
use crate::renderer::camera::CameraUniform;

/// Flag bits packed into `NodeInstance::flags`.
pub const FLAG_VISIBLE: u32 = 1;
pub const FLAG_TRANSPARENT: u32 = 1 << 1;
pub const FLAG_DEPTH_WRITE: u32 = 1 << 2;

/// One scene node as the host reads it: 36 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct NodeInstance {
    pub id: f32,
    pub kind: f32,
    /// -1 for roots.
    pub parent: f32,
    pub flags: f32,
    pub radius: f32,
    pub segments: f32,
    pub opacity: f32,
    pub roughness: f32,
    /// Texture ids, -1 when absent.
    pub color_map: f32,
    pub bump_map: f32,
    pub bump_scale: f32,
    pub displacement_scale: f32,
    /// Light intensity.
    pub intensity: f32,
    /// Axis half-length.
    pub line_length: f32,
    pub reserved: [f32; 2],
    /// Light color, alpha unused.
    pub color: [f32; 4],
    /// Column-major world matrix.
    pub world: [f32; 16],
}

impl NodeInstance {
    pub const FLOATS: usize = 36;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_node(node: &Node, world: [f32; 16]) -> Self {
        let mut inst = NodeInstance {
            id: node.id.0 as f32,
            kind: node.kind.code(),
            parent: node.parent.map_or(-1.0, |p| p.0 as f32),
            opacity: 1.0,
            color_map: -1.0,
            bump_map: -1.0,
            world,
            ..Default::default()
        };
        let mut flags = if node.visible { FLAG_VISIBLE } else { 0 };
        match &node.renderable {
            Renderable::Mesh(mesh) => {
                let m = &mesh.material;
                inst.radius = mesh.radius;
                inst.segments = mesh.segments as f32;
                inst.opacity = m.opacity;
                inst.roughness = m.roughness;
                inst.color_map = TextureId::code(m.color_map);
                inst.bump_map = TextureId::code(m.bump_map);
                inst.bump_scale = m.bump_scale;
                inst.displacement_scale = m.displacement_scale;
                if m.transparent {
                    flags |= FLAG_TRANSPARENT;
                }
                if m.depth_write {
                    flags |= FLAG_DEPTH_WRITE;
                }
            }
            Renderable::Light(light) => {
                inst.intensity = light.intensity;
                inst.color = [light.color[0], light.color[1], light.color[2], 1.0];
            }
            Renderable::Line { length } => inst.line_length = *length,
            Renderable::Points(_) | Renderable::None => {}
        }
        inst.flags = flags as f32;
        inst
    }
}

/// Everything the host needs to draw one frame.
pub struct RenderBuffer {
    pub header: FrameHeader,
    pub camera: CameraUniform,
    pub nodes: Vec<NodeInstance>,
    /// Only rewritten when the starfield is rebuilt.
    pub stars: Vec<Star>,
    /// Bumped each time `stars` changes so the host can skip re-uploads.
    pub star_generation: u32,
    /// Starfield node the current `stars` came from.
    pub star_source: Option<NodeId>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max_nodes: usize) -> Self {
        Self {
            header: FrameHeader::default(),
            camera: CameraUniform::default(),
            nodes: Vec::with_capacity(max_nodes),
            stars: Vec::new(),
            star_generation: 0,
            star_source: None,
        }
    }

    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, instance: NodeInstance) {
        self.nodes.push(instance);
    }

    pub fn replace_stars(&mut self, stars: &[Star]) {
        self.stars.clear();
        self.stars.extend_from_slice(stars);
        self.star_generation = self.star_generation.wrapping_add(1);
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    pub fn star_count(&self) -> u32 {
        self.stars.len() as u32
    }

    // ---- Raw pointers for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        &self.header as *const FrameHeader as *const f32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn nodes_ptr(&self) -> *const f32 {
        self.nodes.as_ptr() as *const f32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.stars.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{LightDesc, MaterialDesc, MeshDesc};
    use crate::components::node::{BodyKind, NodeKind};
    use glam::Mat4;

    #[test]
    fn node_instance_is_36_floats() {
        assert_eq!(std::mem::size_of::<NodeInstance>(), NodeInstance::STRIDE_BYTES);
    }

    #[test]
    fn mesh_node_packs_material() {
        let node = Node::new(NodeKind::Body(BodyKind::Clouds)).with_renderable(Renderable::Mesh(
            MeshDesc::sphere(1.5, 48).with_material(MaterialDesc {
                color_map: Some(TextureId(3)),
                opacity: 0.8,
                transparent: true,
                depth_write: false,
                ..Default::default()
            }),
        ));
        let inst = NodeInstance::from_node(&node, Mat4::IDENTITY.to_cols_array());
        assert_eq!(inst.radius, 1.5);
        assert_eq!(inst.segments, 48.0);
        assert_eq!(inst.color_map, 3.0);
        assert_eq!(inst.bump_map, -1.0);
        assert_eq!(inst.parent, -1.0);
        assert_eq!(inst.flags as u32, FLAG_VISIBLE | FLAG_TRANSPARENT);
    }

    #[test]
    fn light_node_packs_color() {
        let node = Node::new(NodeKind::PointLight).with_renderable(Renderable::Light(LightDesc {
            color: [1.0, 0.5, 0.25],
            intensity: 70.0,
        }));
        let inst = NodeInstance::from_node(&node, Mat4::IDENTITY.to_cols_array());
        assert_eq!(inst.intensity, 70.0);
        assert_eq!(inst.color, [1.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn replacing_stars_bumps_generation() {
        let mut buf = RenderBuffer::new();
        buf.replace_stars(&[Star::default(); 3]);
        assert_eq!(buf.star_count(), 3);
        assert_eq!(buf.star_generation, 1);
        buf.replace_stars(&[]);
        assert_eq!(buf.star_generation, 2);
    }
}
