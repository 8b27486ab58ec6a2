//! Viewer configuration snapshot.
//!
//! The settings panel owns the values; the core only reads snapshots and
//! accepts JSON patches that are deep-merged into the current snapshot.
//! Field names are camelCase on the wire, matching the panel's store.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ViewerError;
use crate::api::types::SceneVariant;

/// Earth sidereal day used for the illustrative spin rate (seconds).
pub const EARTH_DAY_SECONDS: f32 = 86_400.0;
/// Lunar rotation period (seconds).
pub const MOON_ROTATION_SECONDS: f32 = 2_359_200.0;
/// Cloud drift per frame at a speed multiplier of 1.
pub const CLOUD_DRIFT_RATE: f32 = -0.000_01;

/// Largest accepted starfield size.
pub const MAX_STAR_COUNT: u32 = 100_000;
/// Sphere tessellation bounds.
pub const MIN_SEGMENTS: u32 = 3;
pub const MAX_SEGMENTS: u32 = 512;

const DEFAULT_SPEED_MULTIPLIER: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// Show the JSON dump overlay.
    pub debug: bool,
    pub selected: SceneVariant,
    /// World units per kilometre of body radius.
    pub radius_multiplier: f32,
    /// Scales every derived rotation and orbit rate.
    pub speed_multiplier: f32,
    /// Sphere segment count for body meshes.
    pub segments: u32,
    /// Attach a rotation-axis line to each primary body.
    pub show_axis: bool,
    pub starfield: StarfieldConfig,
    pub rotation: RotationConfig,
    pub moon: MoonConfig,
    pub earth: EarthConfig,
    pub clouds: CloudsConfig,
    pub cursor: CursorConfig,
    pub zoom: ZoomConfig,
    pub pitch: PitchConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarfieldConfig {
    pub star_count: u32,
    /// Inner radius of the star shell.
    pub star_min_distance: f32,
    /// Outer radius of the star shell.
    pub star_spread: f32,
    pub star_min_size: f32,
    pub star_max_size: f32,
    /// RNG seed, so a rebuild with unchanged parameters is stable.
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RotationConfig {
    /// Radians of orbit per pixel of drag.
    pub drag_speed_factor: f32,
    /// Per-frame inertia multiplier while coasting.
    pub inertia_damping: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoonConfig {
    pub moon_radius_km: f32,
    pub moon_distance_km: f32,
    /// World units per kilometre of orbital distance.
    pub moon_distance_multiplier: f32,
    pub moon_rotation_speed: f32,
    pub moon_rotation_accel: f32,
    /// Orbital period in seconds.
    pub moon_orbit_period: f32,
    /// Orbital angle added to the pivot every frame.
    pub moon_orbit_speed: f32,
    /// Orbit inclination in degrees.
    pub moon_orbit_tilt: f32,
    /// Radius multiplier for the single-body view.
    pub single_body_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EarthConfig {
    pub earth_radius_km: f32,
    pub earth_rotation_speed: f32,
    pub earth_rotation_accel: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudsConfig {
    /// Cloud shell radius relative to the earth radius.
    pub clouds_scale: f32,
    pub clouds_rotation_speed: f32,
    pub clouds_rotation_accel: f32,
    pub clouds_opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CursorConfig {
    /// Milliseconds without pointer motion before the cursor hides.
    pub cursor_hide_delay: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomConfig {
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Distance change per wheel delta unit.
    pub zoom_speed: f32,
    /// Extra gain applied to pinch distance changes.
    pub pinch_gain: f32,
    /// Camera distance when the viewer starts.
    pub initial_distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PitchConfig {
    pub pitch_min: f32,
    pub pitch_max: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
}

/// The subset of fields that shape the body subtree.
/// A change here means the bodies must be rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyLayout {
    radius_multiplier: f32,
    segments: u32,
    show_axis: bool,
    moon_radius_km: f32,
    moon_distance_km: f32,
    moon_distance_multiplier: f32,
    moon_orbit_tilt: f32,
    single_body_scale: f32,
    earth_radius_km: f32,
    clouds_scale: f32,
    clouds_opacity: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let mut config = Self {
            debug: false,
            selected: SceneVariant::SingleBody,
            radius_multiplier: 0.000_15,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            segments: 64,
            show_axis: false,
            starfield: StarfieldConfig::default(),
            rotation: RotationConfig::default(),
            moon: MoonConfig::default(),
            earth: EarthConfig::default(),
            clouds: CloudsConfig::default(),
            cursor: CursorConfig::default(),
            zoom: ZoomConfig::default(),
            pitch: PitchConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
        };
        config.derive_rates();
        config
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: 1000,
            star_min_distance: 5000.0,
            star_spread: 10_000.0,
            star_min_size: 20.0,
            star_max_size: 50.0,
            seed: 42,
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            drag_speed_factor: 0.002,
            inertia_damping: 0.95,
        }
    }
}

impl Default for MoonConfig {
    fn default() -> Self {
        let m = DEFAULT_SPEED_MULTIPLIER;
        Self {
            moon_radius_km: 1737.4,
            moon_distance_km: 384_400.0,
            moon_distance_multiplier: 0.000_01,
            moon_rotation_speed: -(TAU / MOON_ROTATION_SECONDS) * m,
            moon_rotation_accel: 0.005,
            moon_orbit_period: MOON_ROTATION_SECONDS,
            moon_orbit_speed: (TAU / MOON_ROTATION_SECONDS) * m,
            moon_orbit_tilt: 5.0,
            single_body_scale: 3.0,
        }
    }
}

impl Default for EarthConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: 6378.0,
            earth_rotation_speed: -(TAU / EARTH_DAY_SECONDS) * DEFAULT_SPEED_MULTIPLIER,
            earth_rotation_accel: 0.005,
        }
    }
}

impl Default for CloudsConfig {
    fn default() -> Self {
        Self {
            clouds_scale: 1.0001,
            clouds_rotation_speed: CLOUD_DRIFT_RATE * DEFAULT_SPEED_MULTIPLIER,
            clouds_rotation_accel: 0.005,
            clouds_opacity: 0.8,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self { cursor_hide_delay: 2000.0 }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_min: 3.0,
            zoom_max: 20.0,
            zoom_speed: 0.01,
            pinch_gain: 1.0,
            initial_distance: 10.0,
        }
    }
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            pitch_min: -PI / 2.0,
            pitch_max: PI / 2.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let stars = StarfieldConfig::default();
        let zoom = ZoomConfig::default();
        Self {
            camera_fov: 40.0,
            camera_near: 0.1,
            camera_far: stars.star_min_distance + stars.star_spread + zoom.zoom_max,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [5.0, 2.0, 5.0],
            color: [1.0, 1.0, 1.0],
            intensity: 70.0,
            ambient_color: [0.25, 0.25, 0.25],
            ambient_intensity: 0.5,
        }
    }
}

impl ViewerConfig {
    /// Parse a full or partial configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON dump used by the debug overlay.
    pub fn to_json(&self) -> Result<String, ViewerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Recompute every speed-multiplied rate from the real periods.
    pub fn derive_rates(&mut self) {
        let m = self.speed_multiplier;
        self.earth.earth_rotation_speed = -(TAU / EARTH_DAY_SECONDS) * m;
        self.moon.moon_rotation_speed = -(TAU / MOON_ROTATION_SECONDS) * m;
        self.moon.moon_orbit_speed = (TAU / self.moon.moon_orbit_period) * m;
        self.clouds.clouds_rotation_speed = CLOUD_DRIFT_RATE * m;
    }

    /// Deep-merge a JSON patch into a copy of this config.
    ///
    /// Objects merge recursively, scalars and arrays replace, `null` leaves the
    /// field alone. If the patch changes `speedMultiplier` (or the orbit
    /// period) the derived rates follow, except those the patch sets itself.
    /// `self` is untouched when the merged result fails validation.
    pub fn merged(&self, patch: &Value) -> Result<Self, ViewerError> {
        if !patch.is_object() {
            return Err(ViewerError::InvalidConfig(
                "configuration patch must be a JSON object".into(),
            ));
        }

        let mut base = serde_json::to_value(self)?;
        merge_json(&mut base, patch);
        let mut next: ViewerConfig = serde_json::from_value(base)?;

        let speed_changed = next.speed_multiplier != self.speed_multiplier;
        let period_changed = next.moon.moon_orbit_period != self.moon.moon_orbit_period;
        if speed_changed || period_changed {
            let explicit = |path: &str| patch.pointer(path).is_some_and(|v| !v.is_null());
            let mut derived = next.clone();
            derived.derive_rates();
            if speed_changed {
                if !explicit("/earth/earthRotationSpeed") {
                    next.earth.earth_rotation_speed = derived.earth.earth_rotation_speed;
                }
                if !explicit("/moon/moonRotationSpeed") {
                    next.moon.moon_rotation_speed = derived.moon.moon_rotation_speed;
                }
                if !explicit("/clouds/cloudsRotationSpeed") {
                    next.clouds.clouds_rotation_speed = derived.clouds.clouds_rotation_speed;
                }
            }
            if !explicit("/moon/moonOrbitSpeed") {
                next.moon.moon_orbit_speed = derived.moon.moon_orbit_speed;
            }
        }

        next.validate()?;
        Ok(next)
    }

    /// Reject snapshots that would poison the camera or the integrators.
    pub fn validate(&self) -> Result<(), ViewerError> {
        for (name, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite")));
            }
        }
        for (name, v) in [
            ("light.position", self.light.position),
            ("light.color", self.light.color),
            ("light.ambientColor", self.light.ambient_color),
        ] {
            if v.iter().any(|c| !c.is_finite()) {
                return Err(invalid(format!("{name} must be finite")));
            }
        }

        if self.zoom.zoom_min <= 0.0 || self.zoom.zoom_min > self.zoom.zoom_max {
            return Err(invalid("zoomMin must be positive and not exceed zoomMax"));
        }
        if self.pitch.pitch_min > self.pitch.pitch_max {
            return Err(invalid("pitchMin must not exceed pitchMax"));
        }
        for (name, accel) in [
            ("earthRotationAccel", self.earth.earth_rotation_accel),
            ("moonRotationAccel", self.moon.moon_rotation_accel),
            ("cloudsRotationAccel", self.clouds.clouds_rotation_accel),
        ] {
            if accel <= 0.0 || accel > 1.0 {
                return Err(invalid(format!("{name} must be in (0, 1]")));
            }
        }
        if !(0.0..1.0).contains(&self.rotation.inertia_damping) {
            return Err(invalid("inertiaDamping must be in [0, 1)"));
        }
        if self.radius_multiplier <= 0.0
            || self.moon.moon_radius_km <= 0.0
            || self.earth.earth_radius_km <= 0.0
            || self.clouds.clouds_scale <= 0.0
            || self.moon.single_body_scale <= 0.0
        {
            return Err(invalid("radii and radius multipliers must be positive"));
        }
        if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&self.segments) {
            return Err(invalid(format!(
                "segments must be in [{MIN_SEGMENTS}, {MAX_SEGMENTS}]"
            )));
        }
        if self.starfield.star_count > MAX_STAR_COUNT {
            return Err(invalid(format!("starCount must not exceed {MAX_STAR_COUNT}")));
        }
        if self.moon.moon_orbit_period <= 0.0 {
            return Err(invalid("moonOrbitPeriod must be positive"));
        }
        if self.camera.camera_near <= 0.0 || self.camera.camera_near >= self.camera.camera_far {
            return Err(invalid("cameraNear must be positive and below cameraFar"));
        }
        if self.camera.camera_fov <= 0.0 || self.camera.camera_fov >= 180.0 {
            return Err(invalid("cameraFov must be in (0, 180)"));
        }
        if self.starfield.star_min_distance > self.starfield.star_spread
            || self.starfield.star_min_size > self.starfield.star_max_size
        {
            return Err(invalid("starfield minimums must not exceed their maximums"));
        }
        if self.cursor.cursor_hide_delay < 0.0 {
            return Err(invalid("cursorHideDelay must not be negative"));
        }
        Ok(())
    }

    fn numeric_fields(&self) -> [(&'static str, f32); 37] {
        [
            ("radiusMultiplier", self.radius_multiplier),
            ("speedMultiplier", self.speed_multiplier),
            ("starMinDistance", self.starfield.star_min_distance),
            ("starSpread", self.starfield.star_spread),
            ("starMinSize", self.starfield.star_min_size),
            ("starMaxSize", self.starfield.star_max_size),
            ("dragSpeedFactor", self.rotation.drag_speed_factor),
            ("inertiaDamping", self.rotation.inertia_damping),
            ("moonRadiusKm", self.moon.moon_radius_km),
            ("moonDistanceKm", self.moon.moon_distance_km),
            ("moonDistanceMultiplier", self.moon.moon_distance_multiplier),
            ("moonRotationSpeed", self.moon.moon_rotation_speed),
            ("moonRotationAccel", self.moon.moon_rotation_accel),
            ("moonOrbitPeriod", self.moon.moon_orbit_period),
            ("moonOrbitSpeed", self.moon.moon_orbit_speed),
            ("moonOrbitTilt", self.moon.moon_orbit_tilt),
            ("singleBodyScale", self.moon.single_body_scale),
            ("earthRadiusKm", self.earth.earth_radius_km),
            ("earthRotationSpeed", self.earth.earth_rotation_speed),
            ("earthRotationAccel", self.earth.earth_rotation_accel),
            ("cloudsScale", self.clouds.clouds_scale),
            ("cloudsRotationSpeed", self.clouds.clouds_rotation_speed),
            ("cloudsRotationAccel", self.clouds.clouds_rotation_accel),
            ("cloudsOpacity", self.clouds.clouds_opacity),
            ("cursorHideDelay", self.cursor.cursor_hide_delay),
            ("zoomMin", self.zoom.zoom_min),
            ("zoomMax", self.zoom.zoom_max),
            ("zoomSpeed", self.zoom.zoom_speed),
            ("pinchGain", self.zoom.pinch_gain),
            ("initialDistance", self.zoom.initial_distance),
            ("pitchMin", self.pitch.pitch_min),
            ("pitchMax", self.pitch.pitch_max),
            ("cameraFov", self.camera.camera_fov),
            ("cameraNear", self.camera.camera_near),
            ("cameraFar", self.camera.camera_far),
            ("intensity", self.light.intensity),
            ("ambientIntensity", self.light.ambient_intensity),
        ]
    }

    // -- Derived geometry --

    pub fn earth_radius(&self) -> f32 {
        self.earth.earth_radius_km * self.radius_multiplier
    }

    pub fn moon_radius(&self) -> f32 {
        self.moon.moon_radius_km * self.radius_multiplier
    }

    pub fn clouds_radius(&self) -> f32 {
        self.earth_radius() * self.clouds.clouds_scale
    }

    /// Radius of the moon when it is the only body on screen.
    pub fn single_body_radius(&self) -> f32 {
        self.moon_radius() * self.moon.single_body_scale
    }

    pub fn moon_distance(&self) -> f32 {
        self.moon.moon_distance_km * self.moon.moon_distance_multiplier
    }

    pub fn body_layout(&self) -> BodyLayout {
        BodyLayout {
            radius_multiplier: self.radius_multiplier,
            segments: self.segments,
            show_axis: self.show_axis,
            moon_radius_km: self.moon.moon_radius_km,
            moon_distance_km: self.moon.moon_distance_km,
            moon_distance_multiplier: self.moon.moon_distance_multiplier,
            moon_orbit_tilt: self.moon.moon_orbit_tilt,
            single_body_scale: self.moon.single_body_scale,
            earth_radius_km: self.earth.earth_radius_km,
            clouds_scale: self.clouds.clouds_scale,
            clouds_opacity: self.clouds.clouds_opacity,
        }
    }
}

fn invalid(msg: impl Into<String>) -> ViewerError {
    ViewerError::InvalidConfig(msg.into())
}

/// Recursive object merge. `null` in the patch is skipped.
fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                if value.is_null() {
                    continue;
                }
                match target_map.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge_json(existing, value)
                    }
                    _ => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => {
            if !patch.is_null() {
                *target = patch.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_panel_store() {
        let c = ViewerConfig::default();
        assert_eq!(c.selected, SceneVariant::SingleBody);
        assert!((c.earth_radius() - 0.9567).abs() < 1e-4);
        assert!((c.moon_distance() - 3.844).abs() < 1e-4);
        assert!((c.camera.camera_far - 15_020.0).abs() < 1e-3);
        assert!(c.earth.earth_rotation_speed < 0.0);
        assert!(c.moon.moon_orbit_speed > 0.0);
        c.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = ViewerConfig::from_json(r#"{ "selected": "earth", "zoom": { "zoomMax": 30 } }"#).unwrap();
        assert_eq!(c.selected, SceneVariant::CompositeSystem);
        assert_eq!(c.zoom.zoom_max, 30.0);
        assert_eq!(c.zoom.zoom_min, 3.0);
    }

    #[test]
    fn merge_keeps_sibling_fields() {
        let base = ViewerConfig::default();
        let next = base.merged(&json!({ "rotation": { "dragSpeedFactor": 0.005 } })).unwrap();
        assert_eq!(next.rotation.drag_speed_factor, 0.005);
        assert_eq!(next.rotation.inertia_damping, base.rotation.inertia_damping);
        assert_eq!(next.zoom, base.zoom);
    }

    #[test]
    fn merge_ignores_null() {
        let base = ViewerConfig::default();
        let next = base.merged(&json!({ "zoom": null, "debug": true })).unwrap();
        assert_eq!(next.zoom, base.zoom);
        assert!(next.debug);
    }

    #[test]
    fn speed_multiplier_rederives_rates() {
        let base = ViewerConfig::default();
        let next = base.merged(&json!({ "speedMultiplier": 200 })).unwrap();
        let ratio = next.earth.earth_rotation_speed / base.earth.earth_rotation_speed;
        assert!((ratio - 2.0).abs() < 1e-4);
        let ratio = next.moon.moon_orbit_speed / base.moon.moon_orbit_speed;
        assert!((ratio - 2.0).abs() < 1e-4);
    }

    #[test]
    fn explicit_rate_wins_over_derivation() {
        let base = ViewerConfig::default();
        let next = base
            .merged(&json!({ "speedMultiplier": 200, "earth": { "earthRotationSpeed": 0.01 } }))
            .unwrap();
        assert_eq!(next.earth.earth_rotation_speed, 0.01);
    }

    #[test]
    fn rejects_inverted_zoom_bounds() {
        let base = ViewerConfig::default();
        let err = base.merged(&json!({ "zoom": { "zoomMin": 25 } })).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_overflowing_numbers() {
        let base = ViewerConfig::default();
        assert!(base.merged(&json!({ "zoom": { "zoomSpeed": 1e300 } })).is_err());
    }

    #[test]
    fn rejects_oversized_counts() {
        let base = ViewerConfig::default();
        assert!(base.merged(&json!({ "starfield": { "starCount": 4_000_000_000u64 } })).is_err());
        assert!(base.merged(&json!({ "segments": 4_000_000_000u64 })).is_err());
        assert!(base.merged(&json!({ "segments": 513 })).is_err());
        assert!(base.merged(&json!({ "segments": 2 })).is_err());

        let edge = base
            .merged(&json!({ "segments": MAX_SEGMENTS, "starfield": { "starCount": MAX_STAR_COUNT } }))
            .unwrap();
        assert_eq!(edge.segments, MAX_SEGMENTS);
        assert_eq!(edge.starfield.star_count, MAX_STAR_COUNT);
    }

    #[test]
    fn rejects_out_of_range_accel() {
        let base = ViewerConfig::default();
        assert!(base.merged(&json!({ "earth": { "earthRotationAccel": 0.0 } })).is_err());
        assert!(base.merged(&json!({ "moon": { "moonRotationAccel": 1.5 } })).is_err());
    }

    #[test]
    fn rejects_non_object_patch() {
        let base = ViewerConfig::default();
        assert!(base.merged(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn debug_dump_uses_wire_names() {
        let dump = ViewerConfig::default().to_json().unwrap();
        assert!(dump.contains("dragSpeedFactor"));
        assert!(dump.contains("\"selected\": \"moon\""));
    }

    #[test]
    fn body_layout_ignores_rates() {
        let base = ViewerConfig::default();
        let faster = base.merged(&json!({ "speedMultiplier": 500 })).unwrap();
        assert_eq!(base.body_layout(), faster.body_layout());
        let bigger = base.merged(&json!({ "radiusMultiplier": 0.0003 })).unwrap();
        assert_ne!(base.body_layout(), bigger.body_layout());
    }
}
