//! Per-frame driver: owns the scene, the integrators and the lifecycle.

use serde_json::{json, Value};

use crate::api::config::ViewerConfig;
use crate::api::error::ViewerError;
use crate::api::types::{CursorStyle, NodeId, SceneVariant};
use crate::components::node::{Node, NodeKind};
use crate::core::builder::{SceneBuilder, StandardBuilder};
use crate::core::rig::BodyRig;
use crate::core::scene::SceneGraph;
use crate::core::time::{FrameClock, IdleTimer};
use crate::input::queue::{InputEvent, InputQueue};
use crate::input::tracker::{Gesture, InputTracker};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::{HostSurface, Renderer};
use crate::systems::orbit::OrbitIntegrator;
use crate::systems::zoom::ZoomSmoother;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, not yet attached to a surface.
    Created,
    Running,
    /// Terminal.
    Stopped,
}

/// Counters for the debug overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub last_dt: f32,
    pub elapsed_ms: f64,
    /// Body subtree rebuilds since start.
    pub rebuilds: u32,
}

/// Node ids of the parts of the scene that live outside the body rig.
#[derive(Debug, Clone, Copy)]
struct Skeleton {
    root: NodeId,
    world: NodeId,
    starfield: NodeId,
    point_light: NodeId,
    ambient_light: NodeId,
}

pub struct FrameScheduler<R: Renderer, H: HostSurface, B: SceneBuilder = StandardBuilder> {
    config: ViewerConfig,
    /// Validated patch result waiting for the next frame.
    pending: Option<ViewerConfig>,
    renderer: R,
    surface: Option<H>,
    builder: B,
    scene: SceneGraph,
    skeleton: Option<Skeleton>,
    rig: Option<BodyRig>,
    input: InputQueue,
    tracker: InputTracker,
    gestures: Vec<Gesture>,
    orbit: OrbitIntegrator,
    zoom: ZoomSmoother,
    camera: PerspectiveCamera,
    clock: FrameClock,
    idle: IdleTimer,
    cursor: CursorStyle,
    lifecycle: Lifecycle,
    rebuilds: u32,
}

impl<R: Renderer, H: HostSurface> FrameScheduler<R, H, StandardBuilder> {
    pub fn new(config: ViewerConfig, renderer: R) -> Self {
        Self::with_builder(config, renderer, StandardBuilder::new())
    }
}

impl<R: Renderer, H: HostSurface, B: SceneBuilder> FrameScheduler<R, H, B> {
    pub fn with_builder(config: ViewerConfig, renderer: R, builder: B) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}; falling back to defaults", e);
                ViewerConfig::default()
            }
        };
        let zoom = ZoomSmoother::new(&config.zoom);
        let camera = PerspectiveCamera::new(&config.camera, zoom.distance());
        Self {
            orbit: OrbitIntegrator::new(&config),
            zoom,
            camera,
            config,
            pending: None,
            renderer,
            surface: None,
            builder,
            scene: SceneGraph::new(),
            skeleton: None,
            rig: None,
            input: InputQueue::new(),
            tracker: InputTracker::new(),
            gestures: Vec::with_capacity(16),
            clock: FrameClock::new(),
            idle: IdleTimer::new(0.0),
            cursor: CursorStyle::Grab,
            lifecycle: Lifecycle::Created,
            rebuilds: 0,
        }
    }

    /// Attach to `surface`, build the scene and start accepting frames.
    pub fn start(&mut self, surface: Option<H>) -> Result<(), ViewerError> {
        match self.lifecycle {
            Lifecycle::Stopped => return Err(ViewerError::Stopped),
            Lifecycle::Running => return Err(ViewerError::AlreadyRunning),
            Lifecycle::Created => {}
        }
        let mut surface = surface.ok_or(ViewerError::SurfaceMissing)?;

        let (width, height) = surface.size();
        self.resize(width, height);

        self.zoom = ZoomSmoother::new(&self.config.zoom);
        self.camera.distance = self.zoom.distance();
        self.idle = IdleTimer::new(self.clock.now_ms());
        self.cursor = CursorStyle::Grab;
        surface.set_cursor(self.cursor);
        self.surface = Some(surface);

        self.build_scene();
        self.lifecycle = Lifecycle::Running;
        log::info!(
            "viewer started: {} view, {}x{}, {} nodes, renderer {}",
            self.config.selected.as_str(),
            width,
            height,
            self.scene.len(),
            self.renderer.backend()
        );
        Ok(())
    }

    /// Queue a host event for the next frame. Ignored unless running.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.lifecycle == Lifecycle::Running {
            self.input.push(event);
        }
    }

    /// Merge `patch` into the configuration.
    ///
    /// The merged result is validated now. While running it takes effect at
    /// the start of the next frame; several patches in one frame accumulate.
    /// Before start it applies immediately.
    pub fn set_config(&mut self, patch: &Value) -> Result<(), ViewerError> {
        if self.lifecycle == Lifecycle::Stopped {
            return Err(ViewerError::Stopped);
        }
        let base = self.pending.as_ref().unwrap_or(&self.config);
        let next = match base.merged(patch) {
            Ok(next) => next,
            Err(e) => {
                log::warn!("rejected config patch: {}", e);
                return Err(e);
            }
        };
        match self.lifecycle {
            Lifecycle::Running => self.pending = Some(next),
            _ => self.apply_config(next),
        }
        Ok(())
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), ViewerError> {
        let patch: Value = serde_json::from_str(json)?;
        self.set_config(&patch)
    }

    pub fn select_variant(&mut self, variant: SceneVariant) -> Result<(), ViewerError> {
        self.set_config(&json!({ "selected": variant.as_str() }))
    }

    /// Advance one display frame. `dt` (seconds) only drives the idle clock;
    /// all motion advances a fixed step per call.
    pub fn tick(&mut self, dt: f32) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.clock.advance(dt);

        if let Some(next) = self.pending.take() {
            self.apply_config(next);
        }

        let mut gestures = std::mem::take(&mut self.gestures);
        for event in self.input.drain() {
            self.tracker.process(&event, &self.config.zoom, &mut gestures);
        }
        for gesture in gestures.drain(..) {
            self.handle_gesture(gesture);
        }
        self.gestures = gestures;

        self.orbit.coast();
        if let Some(world) = self.skeleton.map(|s| s.world) {
            if let Some(node) = self.scene.get_mut(world) {
                node.transform.rotation = self.orbit.orientation();
            }
        }

        if let Some(rig) = &mut self.rig {
            rig.animate(&mut self.scene);
        }

        self.camera.distance = self.zoom.step();

        self.update_cursor();

        self.renderer.render(&self.scene, &self.camera);
    }

    /// Release the renderer and the surface. Safe to call repeatedly, and
    /// before `start`; the scheduler is unusable afterwards.
    pub fn stop(&mut self) {
        match self.lifecycle {
            Lifecycle::Stopped => return,
            Lifecycle::Running => {
                self.renderer.release();
                if let Some(mut surface) = self.surface.take() {
                    surface.detach();
                }
                log::info!("viewer stopped after {} frames", self.clock.frames());
            }
            Lifecycle::Created => log::debug!("viewer stopped before start"),
        }
        self.input.clear();
        self.tracker.reset();
        self.pending = None;
        self.rig = None;
        self.skeleton = None;
        self.scene.clear();
        self.lifecycle = Lifecycle::Stopped;
    }

    /// New viewport size in CSS pixels. Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.camera.resize(width, height) {
            self.renderer
                .resize(width.round() as u32, height.round() as u32);
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn pending_config(&self) -> Option<&ViewerConfig> {
        self.pending.as_ref()
    }

    /// Pretty dump of the active configuration.
    pub fn config_json(&self) -> Result<String, ViewerError> {
        self.config.to_json()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn rig(&self) -> Option<&BodyRig> {
        self.rig.as_ref()
    }

    pub fn world(&self) -> Option<NodeId> {
        self.skeleton.map(|s| s.world)
    }

    pub fn starfield(&self) -> Option<NodeId> {
        self.skeleton.map(|s| s.starfield)
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitIntegrator {
        &self.orbit
    }

    pub fn zoom(&self) -> &ZoomSmoother {
        &self.zoom
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frames: self.clock.frames(),
            last_dt: self.clock.last_dt(),
            elapsed_ms: self.clock.now_ms(),
            rebuilds: self.rebuilds,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn surface(&self) -> Option<&H> {
        self.surface.as_ref()
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    // -- Internals --

    fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Motion => self.idle.touch(self.clock.now_ms()),
            Gesture::DragStart => self.orbit.begin_drag(),
            Gesture::Drag { delta } => self.orbit.drag(delta),
            Gesture::DragEnd => self.orbit.end_drag(),
            Gesture::PinchStart => self.zoom.begin_pinch(),
            Gesture::Pinch { delta } => self.zoom.pinch(delta),
            Gesture::PinchEnd => self.zoom.end_pinch(),
            Gesture::Zoom { delta } => self.zoom.nudge(delta),
            Gesture::Resize { width, height } => self.resize(width, height),
        }
    }

    fn update_cursor(&mut self) {
        let wanted = if self.orbit.is_dragging() {
            CursorStyle::Grabbing
        } else if self
            .idle
            .expired(self.clock.now_ms(), self.config.cursor.cursor_hide_delay)
        {
            CursorStyle::Hidden
        } else {
            CursorStyle::Grab
        };
        if wanted != self.cursor {
            self.cursor = wanted;
            if let Some(surface) = &mut self.surface {
                surface.set_cursor(wanted);
            }
        }
    }

    fn build_scene(&mut self) {
        self.scene.clear();
        let root = self
            .scene
            .insert(None, Node::new(NodeKind::SceneRoot).with_tag("scene"));
        let (point, ambient) = self.builder.build_lights(&self.config.light);
        let point_light = self.scene.insert(Some(root), point);
        let ambient_light = self.scene.insert(Some(root), ambient);
        let world = self
            .scene
            .insert(Some(root), Node::new(NodeKind::WorldRoot).with_tag("world"));
        let starfield = self.scene.insert(
            Some(world),
            self.builder.build_starfield(&self.config.starfield),
        );
        self.skeleton = Some(Skeleton {
            root,
            world,
            starfield,
            point_light,
            ambient_light,
        });
        self.rig = Some(BodyRig::build(
            &mut self.builder,
            &mut self.scene,
            world,
            &self.config,
        ));
    }

    /// Swap in a validated config and bring every subsystem in line with it.
    fn apply_config(&mut self, next: ViewerConfig) {
        let prev = std::mem::replace(&mut self.config, next);
        self.orbit.configure(&self.config);
        self.zoom.configure(&self.config.zoom);
        self.camera.configure(&self.config.camera);

        let Some(skeleton) = self.skeleton else {
            // Not started: the scene is built from this config later.
            return;
        };

        if prev.selected != self.config.selected {
            log::info!(
                "switching view {} -> {}",
                prev.selected.as_str(),
                self.config.selected.as_str()
            );
            self.rebuild_rig(false);
        } else if prev.body_layout() != self.config.body_layout() {
            log::debug!("body geometry changed, rebuilding");
            self.rebuild_rig(true);
        } else if let Some(rig) = &mut self.rig {
            rig.retarget(&self.config);
        }

        if prev.starfield != self.config.starfield {
            self.scene.remove(skeleton.starfield);
            let starfield = self.scene.insert(
                Some(skeleton.world),
                self.builder.build_starfield(&self.config.starfield),
            );
            self.skeleton = Some(Skeleton {
                starfield,
                ..skeleton
            });
        }

        if prev.light != self.config.light {
            self.scene.remove(skeleton.point_light);
            self.scene.remove(skeleton.ambient_light);
            let (point, ambient) = self.builder.build_lights(&self.config.light);
            let point_light = self.scene.insert(Some(skeleton.root), point);
            let ambient_light = self.scene.insert(Some(skeleton.root), ambient);
            if let Some(s) = &mut self.skeleton {
                s.point_light = point_light;
                s.ambient_light = ambient_light;
            }
        }
    }

    /// Replace the body subtree. Camera, orbit and zoom are untouched.
    fn rebuild_rig(&mut self, carry_rates: bool) {
        let Some(world) = self.skeleton.map(|s| s.world) else {
            return;
        };
        let old = self.rig.take();
        if let Some(old) = &old {
            old.teardown(&mut self.scene);
        }
        let mut rig = BodyRig::build(&mut self.builder, &mut self.scene, world, &self.config);
        if carry_rates {
            if let Some(old) = &old {
                rig.carry_rates_from(old);
            }
        }
        self.rig = Some(rig);
        self.rebuilds += 1;
    }
}
