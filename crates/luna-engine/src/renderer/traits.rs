//! Seams between the engine and whatever actually puts pixels on screen.
//!
//! In the browser both sides live in the bridge crate: the renderer packs a
//! `RenderBuffer` that JS reads, and the surface forwards cursor changes to
//! the canvas element. Native backends would implement the same traits.

use crate::api::types::CursorStyle;
use crate::core::scene::SceneGraph;
use crate::renderer::camera::PerspectiveCamera;

/// Consumes the scene once per frame.
pub trait Renderer {
    /// Backend identifier (e.g. "buffer", "webgl").
    fn backend(&self) -> &'static str;

    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera);

    fn resize(&mut self, width: u32, height: u32);

    /// Drop GPU resources. Called once when the scheduler stops.
    fn release(&mut self);
}

/// The element the viewer is mounted in.
pub trait HostSurface {
    /// Size in CSS pixels.
    fn size(&self) -> (f32, f32);

    fn set_cursor(&mut self, style: CursorStyle);

    /// Unhook from the page. Called once when the scheduler stops.
    fn detach(&mut self);
}
