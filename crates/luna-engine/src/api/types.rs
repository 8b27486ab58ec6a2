use serde::{Deserialize, Serialize};

/// Unique identifier for a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Which celestial configuration is on screen.
///
/// Serialized with the names the settings panel uses (`"moon"` / `"earth"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SceneVariant {
    /// One orbitable, self-rotating moon.
    #[default]
    #[serde(rename = "moon")]
    SingleBody,
    /// Earth with a cloud shell and the moon on an inclined orbit.
    #[serde(rename = "earth")]
    CompositeSystem,
}

impl SceneVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            SceneVariant::SingleBody => "moon",
            SceneVariant::CompositeSystem => "earth",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "moon" => Some(SceneVariant::SingleBody),
            "earth" => Some(SceneVariant::CompositeSystem),
            _ => None,
        }
    }

    /// Numeric code written into the frame header.
    pub fn code(self) -> f32 {
        match self {
            SceneVariant::SingleBody => 0.0,
            SceneVariant::CompositeSystem => 1.0,
        }
    }
}

/// Pointer cursor appearance requested from the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// Pointer over the canvas, ready to drag.
    #[default]
    Grab,
    /// A drag is in progress.
    Grabbing,
    /// The pointer has been still for longer than the hide delay.
    Hidden,
}

impl CursorStyle {
    /// Numeric code read by JavaScript (`0` grab, `1` grabbing, `2` hidden).
    pub fn code(self) -> u32 {
        match self {
            CursorStyle::Grab => 0,
            CursorStyle::Grabbing => 1,
            CursorStyle::Hidden => 2,
        }
    }

    /// CSS `cursor` value for this style.
    pub fn css(self) -> &'static str {
        match self {
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
            CursorStyle::Hidden => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_round_trip() {
        for v in [SceneVariant::SingleBody, SceneVariant::CompositeSystem] {
            assert_eq!(SceneVariant::from_name(v.as_str()), Some(v));
        }
        assert_eq!(SceneVariant::from_name("mars"), None);
    }

    #[test]
    fn variant_serializes_as_panel_name() {
        let json = serde_json::to_string(&SceneVariant::CompositeSystem).unwrap();
        assert_eq!(json, "\"earth\"");
    }

    #[test]
    fn cursor_codes_are_distinct() {
        assert_ne!(CursorStyle::Grab.code(), CursorStyle::Hidden.code());
        assert_eq!(CursorStyle::Hidden.css(), "none");
    }
}
