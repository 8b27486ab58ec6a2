//! Drag-to-orbit with inertia.
//!
//! The world root is oriented directly from (yaw, pitch) every frame, so no
//! rotation is ever composed incrementally and no roll can accumulate.

use glam::{EulerRot, Quat, Vec2};

use crate::api::config::ViewerConfig;

/// Inertia below this magnitude is zeroed and coasting stops.
pub const INERTIA_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitPhase {
    Idle,
    Dragging,
    Coasting,
}

pub struct OrbitIntegrator {
    yaw: f32,
    pitch: f32,
    /// Angular step per frame carried over from the last drag event.
    inertia: Vec2,
    phase: OrbitPhase,
    drag_speed_factor: f32,
    damping: f32,
    pitch_min: f32,
    pitch_max: f32,
}

impl OrbitIntegrator {
    pub fn new(config: &ViewerConfig) -> Self {
        let mut orbit = Self {
            yaw: 0.0,
            pitch: 0.0,
            inertia: Vec2::ZERO,
            phase: OrbitPhase::Idle,
            drag_speed_factor: 0.0,
            damping: 0.0,
            pitch_min: 0.0,
            pitch_max: 0.0,
        };
        orbit.configure(config);
        orbit
    }

    /// Pick up new sensitivity, damping and pitch bounds.
    /// Pitch is re-clamped if the bounds moved past it.
    pub fn configure(&mut self, config: &ViewerConfig) {
        self.drag_speed_factor = config.rotation.drag_speed_factor;
        self.damping = config.rotation.inertia_damping;
        self.pitch_min = config.pitch.pitch_min;
        self.pitch_max = config.pitch.pitch_max;
        self.pitch = self.clamp_pitch(self.pitch);
    }

    pub fn begin_drag(&mut self) {
        self.phase = OrbitPhase::Dragging;
    }

    /// Apply one drag event's pixel delta. The scaled delta also becomes the
    /// inertia seed, replacing the previous one.
    pub fn drag(&mut self, delta: Vec2) {
        if self.phase != OrbitPhase::Dragging {
            return;
        }
        let step = delta * self.drag_speed_factor;
        if !step.is_finite() {
            log::debug!("discarding non-finite drag delta {:?}", delta);
            return;
        }
        self.yaw += step.x;
        self.pitch = self.clamp_pitch(self.pitch + step.y);
        self.inertia = step;
    }

    pub fn end_drag(&mut self) {
        if self.phase == OrbitPhase::Dragging {
            self.phase = OrbitPhase::Coasting;
        }
    }

    /// One coasting frame: apply the inertia step, then damp it.
    pub fn coast(&mut self) {
        if self.phase != OrbitPhase::Coasting {
            return;
        }
        if self.inertia.length() <= INERTIA_EPSILON {
            self.inertia = Vec2::ZERO;
            self.phase = OrbitPhase::Idle;
            return;
        }
        self.yaw += self.inertia.x;
        self.pitch = self.clamp_pitch(self.pitch + self.inertia.y);
        self.inertia *= self.damping;
    }

    /// World-root orientation for the current angles.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn inertia(&self) -> Vec2 {
        self.inertia
    }

    pub fn phase(&self) -> OrbitPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == OrbitPhase::Dragging
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.pitch_min, self.pitch_max)
    }
}
