//! Camera distance easing for wheel and pinch zoom.

use crate::api::config::ZoomConfig;
use crate::systems::smoothing::approach;

/// Fraction of the remaining gap closed each frame.
pub const ZOOM_LERP_FACTOR: f32 = 0.03;

pub struct ZoomSmoother {
    distance: f32,
    target: f32,
    min: f32,
    max: f32,
    /// Target at the moment the current pinch began.
    pinch_baseline: Option<f32>,
}

impl ZoomSmoother {
    pub fn new(config: &ZoomConfig) -> Self {
        let start = config.initial_distance.clamp(config.zoom_min, config.zoom_max);
        Self {
            distance: start,
            target: start,
            min: config.zoom_min,
            max: config.zoom_max,
            pinch_baseline: None,
        }
    }

    /// Adopt new bounds, re-clamping the target. The distance keeps easing.
    pub fn configure(&mut self, config: &ZoomConfig) {
        self.min = config.zoom_min;
        self.max = config.zoom_max;
        self.target = self.clamp(self.target);
        if let Some(base) = self.pinch_baseline {
            self.pinch_baseline = Some(self.clamp(base));
        }
    }

    /// Wheel zoom: shift the target by `delta`.
    pub fn nudge(&mut self, delta: f32) {
        if delta.is_finite() {
            self.target = self.clamp(self.target + delta);
        }
    }

    pub fn begin_pinch(&mut self) {
        self.pinch_baseline = Some(self.target);
    }

    /// Pinch zoom: `delta` is measured from the baseline, not accumulated.
    pub fn pinch(&mut self, delta: f32) {
        let Some(base) = self.pinch_baseline else {
            return;
        };
        if delta.is_finite() {
            self.target = self.clamp(base + delta);
        }
    }

    pub fn end_pinch(&mut self) {
        self.pinch_baseline = None;
    }

    /// Ease one frame toward the target and return the new distance.
    pub fn step(&mut self) -> f32 {
        self.distance = approach(self.distance, self.target, ZOOM_LERP_FACTOR);
        self.distance
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch_baseline.is_some()
    }

    fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }
}
