pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::ViewerConfig;
pub use api::error::ViewerError;
pub use api::types::{CursorStyle, NodeId, SceneVariant};
pub use assets::textures::{TextureId, TextureRegistry, TextureState};
pub use bridge::protocol::{FrameHeader, ProtocolLayout, PROTOCOL_VERSION};
pub use components::node::{BodyKind, Node, NodeKind, Renderable, Transform};
pub use core::builder::{SceneBuilder, StandardBuilder};
pub use core::rig::BodyRig;
pub use core::scene::SceneGraph;
pub use core::scheduler::{FrameScheduler, FrameStats, Lifecycle};
pub use input::queue::{InputEvent, InputQueue, Touches};
pub use input::tracker::{Gesture, InputTracker};
pub use renderer::camera::{CameraUniform, PerspectiveCamera};
pub use renderer::instance::{NodeInstance, RenderBuffer};
pub use renderer::traits::{HostSurface, Renderer};
pub use systems::orbit::{OrbitIntegrator, OrbitPhase};
pub use systems::spin::SpinState;
pub use systems::zoom::ZoomSmoother;
