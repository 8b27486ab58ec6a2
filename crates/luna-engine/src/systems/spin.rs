//! Smoothed self-rotation of bodies and the fixed-rate orbital pivot.

use std::f32::consts::PI;

use glam::Quat;

use crate::api::config::ViewerConfig;
use crate::api::types::NodeId;
use crate::systems::smoothing::approach;

/// A spin rate that eases toward its target.
///
/// The rate is radians per frame. Changing the target never jumps the rate;
/// the next `step` starts easing from wherever it currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    pub rate: f32,
    pub target: f32,
    pub accel: f32,
}

impl SpinState {
    /// Starts at rest.
    pub fn new(target: f32, accel: f32) -> Self {
        Self {
            rate: 0.0,
            target,
            accel,
        }
    }

    pub fn step(&mut self) -> f32 {
        self.rate = approach(self.rate, self.target, self.accel);
        self.rate
    }

    pub fn retarget(&mut self, target: f32, accel: f32) {
        self.target = target;
        self.accel = accel;
    }
}

/// Which config section drives a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinSource {
    Earth,
    Clouds,
    Moon,
}

impl SpinSource {
    /// (target rate, accel) for this source.
    pub fn target(self, config: &ViewerConfig) -> (f32, f32) {
        match self {
            SpinSource::Earth => (
                config.earth.earth_rotation_speed,
                config.earth.earth_rotation_accel,
            ),
            SpinSource::Clouds => (
                config.clouds.clouds_rotation_speed,
                config.clouds.clouds_rotation_accel,
            ),
            SpinSource::Moon => (
                config.moon.moon_rotation_speed,
                config.moon.moon_rotation_accel,
            ),
        }
    }
}

/// Binds a spin to the scene node it turns.
#[derive(Debug, Clone, Copy)]
pub struct SpinDriver {
    pub node: NodeId,
    pub source: SpinSource,
    pub spin: SpinState,
}

impl SpinDriver {
    pub fn new(node: NodeId, source: SpinSource, config: &ViewerConfig) -> Self {
        let (target, accel) = source.target(config);
        Self {
            node,
            source,
            spin: SpinState::new(target, accel),
        }
    }

    pub fn retarget(&mut self, config: &ViewerConfig) {
        let (target, accel) = self.source.target(config);
        self.spin.retarget(target, accel);
    }
}

/// The moon's orbital carrier: a tilted node turning at a constant rate.
#[derive(Debug, Clone, Copy)]
pub struct OrbitPivot {
    pub node: NodeId,
    /// Inclination in radians.
    pub tilt: f32,
    pub angle: f32,
    pub speed: f32,
}

impl OrbitPivot {
    pub fn new(node: NodeId, config: &ViewerConfig) -> Self {
        Self {
            node,
            tilt: config.moon.moon_orbit_tilt * PI / 180.0,
            angle: 0.0,
            speed: config.moon.moon_orbit_speed,
        }
    }

    pub fn advance(&mut self) {
        self.angle += self.speed;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.tilt) * Quat::from_rotation_y(self.angle)
    }
}
