use glam::{Mat4, Quat, Vec3};

use crate::api::types::NodeId;
use crate::components::mesh::{LightDesc, MeshDesc};
use crate::components::starfield::Star;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Earth,
    Moon,
    /// Transparent shell around the earth.
    Clouds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Holds the lights and the world root.
    SceneRoot,
    /// Rotated by the orbit integrator.
    WorldRoot,
    Body(BodyKind),
    OrbitPivot,
    Starfield,
    PointLight,
    AmbientLight,
    /// Rotation-axis helper line.
    Axis,
}

impl NodeKind {
    /// Numeric code written into node instances.
    pub fn code(self) -> f32 {
        match self {
            NodeKind::SceneRoot => 0.0,
            NodeKind::WorldRoot => 1.0,
            NodeKind::Body(BodyKind::Earth) => 2.0,
            NodeKind::Body(BodyKind::Moon) => 3.0,
            NodeKind::Body(BodyKind::Clouds) => 4.0,
            NodeKind::OrbitPivot => 5.0,
            NodeKind::Starfield => 6.0,
            NodeKind::PointLight => 7.0,
            NodeKind::AmbientLight => 8.0,
            NodeKind::Axis => 9.0,
        }
    }
}

/// Local transform relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Turn about the node's own Y axis.
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(angle)).normalize();
    }
}

/// What, if anything, the host draws for a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    None,
    Mesh(MeshDesc),
    Points(Vec<Star>),
    Light(LightDesc),
    Line { length: f32 },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Name for lookups and debugging.
    pub tag: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub transform: Transform,
    pub renderable: Renderable,
    pub visible: bool,
}

impl Node {
    /// A detached node. The scene graph assigns `id` and `parent` on insert.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId(0),
            kind,
            tag: String::new(),
            parent: None,
            children: Vec::new(),
            transform: Transform::default(),
            renderable: Renderable::None,
            visible: true,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = renderable;
        self
    }

    /// Mesh descriptor, if this node draws one.
    pub fn mesh(&self) -> Option<&MeshDesc> {
        match &self.renderable {
            Renderable::Mesh(m) => Some(m),
            _ => None,
        }
    }
}
