use serde::Serialize;

use crate::api::error::ViewerError;

pub const EARTH_COLOR_MAP: &str = "earth_winter_5400x2700.jpg";
pub const EARTH_CLOUDS_MAP: &str = "Earth-clouds.png";
pub const MOON_COLOR_MAP: &str = "lroc_color_poles_1k.jpg";
pub const MOON_ELEVATION_MAP: &str = "ldem_3_8bit.jpg";

/// Handle to a texture the JS side is asked to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextureId(pub u32);

impl TextureId {
    /// Wire encoding; `-1.0` stands for "no texture".
    pub fn code(id: Option<TextureId>) -> f32 {
        id.map_or(-1.0, |t| t.0 as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureState {
    Pending,
    Ready,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextureEntry {
    pub id: TextureId,
    pub path: String,
    pub state: TextureState,
}

/// Texture requests keyed by path.
///
/// Loading is the host's job. Bodies are built against `Pending` handles and
/// render untextured until the host reports them ready.
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the handle for `path`, registering it as pending on first use.
    pub fn request(&mut self, path: &str) -> TextureId {
        if let Some(entry) = self.entries.iter().find(|e| e.path == path) {
            return entry.id;
        }
        let id = TextureId(self.entries.len() as u32);
        log::debug!("texture {} requested as {:?}", path, id);
        self.entries.push(TextureEntry {
            id,
            path: path.to_owned(),
            state: TextureState::Pending,
        });
        id
    }

    /// Returns false for unknown handles.
    pub fn mark_ready(&mut self, id: TextureId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.state = TextureState::Ready;
                true
            }
            None => false,
        }
    }

    pub fn mark_ready_by_path(&mut self, path: &str) -> bool {
        match self.entries.iter().find(|e| e.path == path) {
            Some(entry) => {
                let id = entry.id;
                self.mark_ready(id)
            }
            None => false,
        }
    }

    pub fn state(&self, id: TextureId) -> Option<TextureState> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.state)
    }

    pub fn is_ready(&self, id: TextureId) -> bool {
        self.state(id) == Some(TextureState::Ready)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load list for the host, as a JSON array.
    pub fn to_json(&self) -> Result<String, ViewerError> {
        Ok(serde_json::to_string(&self.entries)?)
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
