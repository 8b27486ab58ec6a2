//! Buffer layout shared with the JS renderer.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Each section is exposed through its own pointer:
//! ```text
//! [Header: 16 floats]
//! [Camera: 36 floats]              view, projection, position + fov
//! [Nodes:  max_nodes × 36 floats]
//! [Stars:  max_stars × 4 floats]   rewritten only when the generation changes
//! ```

use bytemuck::{Pod, Zeroable};

use crate::components::starfield::Star;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::NodeInstance;

pub const HEADER_FLOATS: usize = 16;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Per-frame scalars: 16 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameHeader {
    pub frame_counter: f32,
    pub protocol_version: f32,
    pub node_count: f32,
    pub star_count: f32,
    pub star_generation: f32,
    /// `SceneVariant::code`.
    pub variant: f32,
    /// `CursorStyle::code`.
    pub cursor: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub camera_distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom_target: f32,
    /// 1.0 when the debug overlay is on.
    pub debug: f32,
    /// 1.0 while the scheduler is running.
    pub running: f32,
    pub last_dt: f32,
}

/// Capacities and float offsets for hosts that copy the sections into a
/// single shared buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_nodes: usize,
    pub max_stars: usize,

    pub camera_offset: usize,
    pub node_offset: usize,
    pub star_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_nodes: usize, max_stars: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let node_offset = camera_offset + CameraUniform::FLOATS;
        let star_offset = node_offset + max_nodes * NodeInstance::FLOATS;
        let buffer_total_floats = star_offset + max_stars * Star::FLOATS;
        Self {
            max_nodes,
            max_stars,
            camera_offset,
            node_offset,
            star_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }
}
