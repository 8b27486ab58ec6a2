use luna_engine::systems::render::build_render_buffer;
use luna_engine::{
    CursorStyle, FrameScheduler, HostSurface, InputEvent, PerspectiveCamera, ProtocolLayout,
    RenderBuffer, Renderer, SceneGraph, SceneVariant, TextureId, ViewerConfig,
    ViewerError, PROTOCOL_VERSION,
};

/// Upper bound on scene nodes, for hosts that preallocate.
pub const MAX_NODES: usize = 32;

/// Renderer that packs each frame into flat buffers for the JS side.
pub struct BufferRenderer {
    buffer: RenderBuffer,
    size: (u32, u32),
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self {
            buffer: RenderBuffer::with_capacity(MAX_NODES),
            size: (0, 0),
        }
    }

    pub fn buffer(&self) -> &RenderBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut RenderBuffer {
        &mut self.buffer
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl Default for BufferRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for BufferRenderer {
    fn backend(&self) -> &'static str {
        "buffer"
    }

    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) {
        build_render_buffer(scene, camera, &mut self.buffer);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn release(&mut self) {
        self.buffer.clear_nodes();
        self.buffer.replace_stars(&[]);
        self.buffer.star_source = None;
    }
}

/// The canvas element as seen from Rust. JS polls the cursor code and
/// applies it to the element's CSS.
pub struct CanvasSurface {
    width: f32,
    height: f32,
    cursor: CursorStyle,
    attached: bool,
}

impl CanvasSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            cursor: CursorStyle::Grab,
            attached: true,
        }
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl HostSurface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn set_cursor(&mut self, style: CursorStyle) {
        log::debug!("cursor -> {}", style.css());
        self.cursor = style;
    }

    fn detach(&mut self) {
        self.attached = false;
    }
}

/// Owns the scheduler for one canvas.
///
/// wasm-bindgen cannot export generic structs, so each app keeps a
/// `thread_local!` ViewerRunner and exports free functions through
/// `export_viewer!`.
pub struct ViewerRunner {
    scheduler: FrameScheduler<BufferRenderer, CanvasSurface>,
    layout: ProtocolLayout,
}

impl ViewerRunner {
    pub fn new(config: ViewerConfig) -> Self {
        let layout = ProtocolLayout::new(MAX_NODES, config.starfield.star_count as usize);
        Self {
            scheduler: FrameScheduler::new(config, BufferRenderer::new()),
            layout,
        }
    }

    /// Attach to a canvas of `width` × `height` CSS pixels and start.
    pub fn init(&mut self, width: f32, height: f32) -> Result<(), ViewerError> {
        self.scheduler.start(Some(CanvasSurface::new(width, height)))?;
        self.write_header();
        Ok(())
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.scheduler.push_input(event);
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.scheduler.is_running() {
            return;
        }
        self.scheduler.tick(dt);
        self.write_header();
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), ViewerError> {
        self.scheduler.set_config_json(json)?;
        if let Some(next) = self.scheduler.pending_config() {
            self.layout = ProtocolLayout::new(MAX_NODES, next.starfield.star_count as usize);
        }
        Ok(())
    }

    pub fn select(&mut self, name: &str) -> Result<(), ViewerError> {
        let variant = SceneVariant::from_name(name)
            .ok_or_else(|| ViewerError::InvalidConfig(format!("unknown view '{name}'")))?;
        self.scheduler.select_variant(variant)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.write_header();
    }

    /// Put `self` into `slot`. A runner already there is stopped first and
    /// handed back.
    pub fn install(self, slot: &mut Option<ViewerRunner>) -> Option<ViewerRunner> {
        let previous = slot.take().map(|mut old| {
            old.stop();
            old
        });
        *slot = Some(self);
        previous
    }

    pub fn scheduler(&self) -> &FrameScheduler<BufferRenderer, CanvasSurface> {
        &self.scheduler
    }

    /// Per-frame scalars that come from the scheduler rather than the scene.
    fn write_header(&mut self) {
        let stats = self.scheduler.stats();
        let config = self.scheduler.config();
        let yaw = self.scheduler.orbit().yaw();
        let pitch = self.scheduler.orbit().pitch();
        let zoom_target = self.scheduler.zoom().target();
        let cursor = self.scheduler.cursor();
        let running = self.scheduler.is_running();
        let variant = config.selected.code();
        let debug = config.debug;

        let mut header = self.scheduler.renderer().buffer().header;
        header.frame_counter = stats.frames as f32;
        header.protocol_version = PROTOCOL_VERSION;
        header.variant = variant;
        header.cursor = cursor.code() as f32;
        header.yaw = yaw;
        header.pitch = pitch;
        header.zoom_target = zoom_target;
        header.debug = if debug { 1.0 } else { 0.0 };
        header.running = if running { 1.0 } else { 0.0 };
        header.last_dt = stats.last_dt;
        self.scheduler.renderer_mut().buffer_mut().header = header;
    }

    // ---- Pointer accessors for host reads ----

    fn buffer(&self) -> &RenderBuffer {
        self.scheduler.renderer().buffer()
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.buffer().header_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.buffer().camera_ptr()
    }

    pub fn nodes_ptr(&self) -> *const f32 {
        self.buffer().nodes_ptr()
    }

    pub fn node_count(&self) -> u32 {
        self.buffer().node_count()
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.buffer().stars_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.buffer().star_count()
    }

    pub fn star_generation(&self) -> u32 {
        self.buffer().star_generation
    }

    pub fn cursor_code(&self) -> u32 {
        self.scheduler.cursor().code()
    }

    pub fn config_json(&self) -> String {
        match self.scheduler.config_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("config dump failed: {}", e);
                String::from("{}")
            }
        }
    }

    pub fn textures_json(&self) -> String {
        match self.scheduler.builder().textures().to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("texture list failed: {}", e);
                String::from("[]")
            }
        }
    }

    /// The host finished loading texture `id`.
    pub fn texture_ready(&mut self, id: u32) -> bool {
        self.scheduler.builder_mut().textures_mut().mark_ready(TextureId(id))
    }

    // ---- Capacity accessors ----

    pub fn max_nodes(&self) -> u32 {
        self.layout.max_nodes as u32
    }

    pub fn max_stars(&self) -> u32 {
        self.layout.max_stars as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> ViewerRunner {
        let mut r = ViewerRunner::new(ViewerConfig::default());
        r.init(800.0, 600.0).unwrap();
        r
    }

    #[test]
    fn tick_fills_buffers() {
        let mut r = running();
        r.tick(1.0 / 60.0);
        assert!(r.node_count() > 0);
        assert_eq!(r.star_count(), 1000);
        assert_eq!(r.star_generation(), 1);
        let header = r.buffer().header;
        assert_eq!(header.frame_counter, 1.0);
        assert_eq!(header.running, 1.0);
        assert_eq!(header.viewport_width, 800.0);
    }

    #[test]
    fn select_rejects_unknown_view() {
        let mut r = running();
        assert!(r.select("mars").is_err());
        assert!(r.select("earth").is_ok());
        r.tick(1.0 / 60.0);
        assert_eq!(r.buffer().header.variant, 1.0);
    }

    #[test]
    fn stop_clears_running_flag() {
        let mut r = running();
        r.tick(1.0 / 60.0);
        r.stop();
        r.stop();
        assert_eq!(r.buffer().header.running, 0.0);
        assert_eq!(r.node_count(), 0);
        assert!(r.scheduler().surface().is_none());
    }

    #[test]
    fn install_stops_the_replaced_runner() {
        let mut slot = None;
        assert!(running().install(&mut slot).is_none());
        if let Some(r) = slot.as_mut() {
            r.tick(1.0 / 60.0);
        }

        let old = running().install(&mut slot).unwrap();
        assert!(!old.scheduler().is_running());
        assert!(old.scheduler().surface().is_none());
        assert_eq!(old.node_count(), 0);
        assert_eq!(old.buffer().header.running, 0.0);

        let current = slot.as_ref().unwrap();
        assert!(current.scheduler().is_running());
    }

    #[test]
    fn textures_are_listed_and_marked() {
        let mut r = running();
        assert!(r.textures_json().contains("lroc_color_poles_1k.jpg"));
        assert!(r.texture_ready(0));
        assert!(!r.texture_ready(99));
    }
}
