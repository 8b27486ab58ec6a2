//! Turns raw pointer/touch/wheel events into drag and zoom gestures.
//!
//! The tracker knows nothing about the camera. It reports raw pixel drag
//! deltas and already-scaled zoom deltas; the orbit integrator and the zoom
//! smoother decide what those mean.

use glam::Vec2;

use crate::api::config::ZoomConfig;
use crate::input::queue::{InputEvent, Touches};

/// Below this finger separation a pinch has no usable baseline.
pub const MIN_PINCH_SPAN: f32 = 1e-6;

/// A gesture derived from one or more input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Any pointer or touch activity. Resets the idle-cursor timer.
    Motion,
    DragStart,
    /// Pixel delta since the previous drag position.
    Drag { delta: Vec2 },
    DragEnd,
    /// Two fingers down; the zoom smoother snapshots its target as baseline.
    PinchStart,
    /// Zoom change relative to the pinch baseline (positive = farther).
    Pinch { delta: f32 },
    PinchEnd,
    /// Wheel zoom change relative to the current target (positive = farther).
    Zoom { delta: f32 },
    Resize { width: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackMode {
    Idle,
    Dragging,
    Pinching,
}

pub struct InputTracker {
    mode: TrackMode,
    last_pointer: Vec2,
    /// Finger separation when the pinch began.
    pinch_span: f32,
}

impl InputTracker {
    pub fn new() -> Self {
        Self {
            mode: TrackMode::Idle,
            last_pointer: Vec2::ZERO,
            pinch_span: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.mode == TrackMode::Dragging
    }

    pub fn is_pinching(&self) -> bool {
        self.mode == TrackMode::Pinching
    }

    /// Forget any gesture in progress.
    pub fn reset(&mut self) {
        self.mode = TrackMode::Idle;
        self.pinch_span = 0.0;
    }

    /// Translate one event, appending the resulting gestures to `out`.
    /// Events carrying non-finite values are dropped whole.
    pub fn process(&mut self, event: &InputEvent, zoom: &ZoomConfig, out: &mut Vec<Gesture>) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let p = Vec2::new(x, y);
                if !p.is_finite() {
                    return;
                }
                out.push(Gesture::Motion);
                self.begin_drag(p, out);
            }
            InputEvent::PointerMove { x, y } => {
                let p = Vec2::new(x, y);
                if !p.is_finite() {
                    return;
                }
                out.push(Gesture::Motion);
                self.move_drag(p, out);
            }
            InputEvent::PointerUp { x, y } => {
                if Vec2::new(x, y).is_finite() {
                    out.push(Gesture::Motion);
                }
                self.end_drag(out);
            }
            InputEvent::TouchStart { touches } => {
                if !touches.is_finite() {
                    return;
                }
                out.push(Gesture::Motion);
                match touches.count {
                    0 => {}
                    1 if self.mode != TrackMode::Pinching => self.begin_drag(touches.points[0], out),
                    1 => {}
                    _ => self.begin_pinch(&touches, out),
                }
            }
            InputEvent::TouchMove { touches } => {
                if !touches.is_finite() {
                    return;
                }
                out.push(Gesture::Motion);
                match (touches.count, self.mode) {
                    (1, TrackMode::Dragging) => self.move_drag(touches.points[0], out),
                    (2.., TrackMode::Pinching) => self.move_pinch(&touches, zoom, out),
                    // A second finger that arrived without its own start event.
                    (2.., _) => self.begin_pinch(&touches, out),
                    _ => {}
                }
            }
            InputEvent::TouchEnd { remaining } => {
                match self.mode {
                    TrackMode::Pinching if remaining.count < 2 => {
                        // Lifting one finger of a pinch does not resume dragging.
                        self.mode = TrackMode::Idle;
                        self.pinch_span = 0.0;
                        out.push(Gesture::PinchEnd);
                    }
                    TrackMode::Dragging if remaining.count == 0 => self.end_drag(out),
                    _ => {}
                }
            }
            InputEvent::Wheel { delta_y } => {
                let delta = delta_y * zoom.zoom_speed;
                if delta.is_finite() && delta != 0.0 {
                    out.push(Gesture::Zoom { delta });
                }
            }
            InputEvent::Resize { width, height } => {
                if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
                    out.push(Gesture::Resize { width, height });
                }
            }
        }
    }

    fn begin_drag(&mut self, p: Vec2, out: &mut Vec<Gesture>) {
        self.mode = TrackMode::Dragging;
        self.last_pointer = p;
        out.push(Gesture::DragStart);
    }

    fn move_drag(&mut self, p: Vec2, out: &mut Vec<Gesture>) {
        if self.mode != TrackMode::Dragging {
            return;
        }
        let delta = p - self.last_pointer;
        self.last_pointer = p;
        if delta != Vec2::ZERO {
            out.push(Gesture::Drag { delta });
        }
    }

    fn end_drag(&mut self, out: &mut Vec<Gesture>) {
        if self.mode == TrackMode::Dragging {
            self.mode = TrackMode::Idle;
            out.push(Gesture::DragEnd);
        }
    }

    fn begin_pinch(&mut self, touches: &Touches, out: &mut Vec<Gesture>) {
        if self.mode == TrackMode::Dragging {
            out.push(Gesture::DragEnd);
        }
        self.mode = TrackMode::Pinching;
        self.pinch_span = touches.span();
        out.push(Gesture::PinchStart);
    }

    fn move_pinch(&mut self, touches: &Touches, zoom: &ZoomConfig, out: &mut Vec<Gesture>) {
        if self.pinch_span < MIN_PINCH_SPAN {
            log::debug!("pinch baseline is degenerate, ignoring move");
            return;
        }
        let delta = (self.pinch_span - touches.span()) * zoom.zoom_speed * zoom.pinch_gain;
        if delta.is_finite() {
            out.push(Gesture::Pinch { delta });
        }
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tracker: &mut InputTracker, events: &[InputEvent]) -> Vec<Gesture> {
        let zoom = ZoomConfig::default();
        let mut out = Vec::new();
        for e in events {
            tracker.process(e, &zoom, &mut out);
        }
        out
    }

    fn drags(gestures: &[Gesture]) -> Vec<Vec2> {
        gestures
            .iter()
            .filter_map(|g| match g {
                Gesture::Drag { delta } => Some(*delta),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn pointer_drag_reports_per_event_deltas() {
        let mut t = InputTracker::new();
        let out = run(&mut t, &[
            InputEvent::PointerDown { x: 100.0, y: 100.0 },
            InputEvent::PointerMove { x: 110.0, y: 95.0 },
            InputEvent::PointerMove { x: 130.0, y: 95.0 },
            InputEvent::PointerUp { x: 130.0, y: 95.0 },
        ]);
        assert_eq!(drags(&out), vec![Vec2::new(10.0, -5.0), Vec2::new(20.0, 0.0)]);
        assert!(out.contains(&Gesture::DragStart));
        assert_eq!(out.last(), Some(&Gesture::DragEnd));
        assert!(!t.is_dragging());
    }

    #[test]
    fn hover_move_only_reports_motion() {
        let mut t = InputTracker::new();
        let out = run(&mut t, &[InputEvent::PointerMove { x: 5.0, y: 5.0 }]);
        assert_eq!(out, vec![Gesture::Motion]);
    }

    #[test]
    fn non_finite_move_is_discarded() {
        let mut t = InputTracker::new();
        let out = run(&mut t, &[
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerMove { x: f32::NAN, y: 3.0 },
            InputEvent::PointerMove { x: 4.0, y: 0.0 },
        ]);
        assert_eq!(drags(&out), vec![Vec2::new(4.0, 0.0)]);
    }

    #[test]
    fn wheel_scales_by_zoom_speed() {
        let mut t = InputTracker::new();
        let out = run(&mut t, &[InputEvent::Wheel { delta_y: 100.0 }]);
        assert_eq!(out, vec![Gesture::Zoom { delta: 1.0 }]);
        let out = run(&mut t, &[InputEvent::Wheel { delta_y: f32::INFINITY }]);
        assert!(out.is_empty());
    }

    #[test]
    fn two_finger_start_suspends_drag() {
        let mut t = InputTracker::new();
        let out = run(&mut t, &[
            InputEvent::TouchStart { touches: Touches::one(Vec2::new(0.0, 0.0)) },
            InputEvent::TouchStart { touches: Touches::two(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)) },
        ]);
        let ends = out.iter().filter(|g| **g == Gesture::DragEnd).count();
        assert_eq!(ends, 1);
        assert!(out.contains(&Gesture::PinchStart));
        assert!(t.is_pinching());
    }

    #[test]
    fn pinch_in_zooms_out() {
        let mut t = InputTracker::new();
        let out = run(&mut t, &[
            InputEvent::TouchStart { touches: Touches::two(Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0)) },
            InputEvent::TouchMove { touches: Touches::two(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)) },
        ]);
        // (200 - 100) * 0.01 * 1.0
        assert!(out.contains(&Gesture::Pinch { delta: 1.0 }));
    }

    #[test]
    fn degenerate_pinch_produces_no_zoom() {
        let mut t = InputTracker::new();
        let p = Vec2::new(50.0, 50.0);
        let out = run(&mut t, &[
            InputEvent::TouchStart { touches: Touches::two(p, p) },
            InputEvent::TouchMove { touches: Touches::two(p, Vec2::new(150.0, 50.0)) },
        ]);
        assert!(!out.iter().any(|g| matches!(g, Gesture::Pinch { .. })));
    }

    #[test]
    fn lifting_one_pinch_finger_does_not_resume_drag() {
        let mut t = InputTracker::new();
        let out = run(&mut t, &[
            InputEvent::TouchStart { touches: Touches::two(Vec2::ZERO, Vec2::new(10.0, 0.0)) },
            InputEvent::TouchEnd { remaining: Touches::one(Vec2::ZERO) },
            InputEvent::TouchMove { touches: Touches::one(Vec2::new(30.0, 0.0)) },
        ]);
        assert!(out.contains(&Gesture::PinchEnd));
        assert!(drags(&out).is_empty());
        assert!(!t.is_dragging());
    }

    #[test]
    fn resize_requires_positive_size() {
        let mut t = InputTracker::new();
        assert!(run(&mut t, &[InputEvent::Resize { width: 0.0, height: 10.0 }]).is_empty());
        let out = run(&mut t, &[InputEvent::Resize { width: 800.0, height: 600.0 }]);
        assert_eq!(out, vec![Gesture::Resize { width: 800.0, height: 600.0 }]);
    }
}
