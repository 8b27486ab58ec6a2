use glam::Vec2;

/// Up to two active touch points, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touches {
    pub count: u8,
    pub points: [Vec2; 2],
}

impl Touches {
    pub fn none() -> Self {
        Self { count: 0, points: [Vec2::ZERO; 2] }
    }

    pub fn one(p: Vec2) -> Self {
        Self { count: 1, points: [p, Vec2::ZERO] }
    }

    pub fn two(a: Vec2, b: Vec2) -> Self {
        Self { count: 2, points: [a, b] }
    }

    /// Build from raw bridge arguments. Counts above two are treated as two.
    pub fn from_raw(count: u32, x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        match count {
            0 => Self::none(),
            1 => Self::one(Vec2::new(x0, y0)),
            _ => Self::two(Vec2::new(x0, y0), Vec2::new(x1, y1)),
        }
    }

    /// Distance between the first two fingers (0 with fewer than two).
    pub fn span(&self) -> f32 {
        if self.count < 2 {
            return 0.0;
        }
        self.points[0].distance(self.points[1])
    }

    pub fn is_finite(&self) -> bool {
        self.points[..self.count.min(2) as usize].iter().all(|p| p.is_finite())
    }
}

/// Raw host events the viewer understands.
/// Coordinates are surface pixels; nothing here is scaled yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse/pen button pressed at (x, y).
    PointerDown { x: f32, y: f32 },
    /// Pointer moved to (x, y), pressed or not.
    PointerMove { x: f32, y: f32 },
    /// Mouse/pen button released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// One or more fingers touched down; `touches` lists all active fingers.
    TouchStart { touches: Touches },
    /// Active fingers moved.
    TouchMove { touches: Touches },
    /// A finger lifted; `remaining` lists the fingers still down.
    TouchEnd { remaining: Touches },
    /// Wheel scrolled by `delta_y` (positive = away from the user).
    Wheel { delta_y: f32 },
    /// The surface was resized to `width` × `height` pixels.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; the scheduler drains it once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop pending events without handling them.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Wheel { delta_y: 120.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert_eq!(events[1], InputEvent::Wheel { delta_y: 120.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn touches_from_raw_caps_at_two() {
        let t = Touches::from_raw(5, 0.0, 0.0, 3.0, 4.0);
        assert_eq!(t.count, 2);
        assert!((t.span() - 5.0).abs() < 1e-6);
        assert_eq!(Touches::from_raw(1, 1.0, 1.0, 9.0, 9.0).span(), 0.0);
    }

    #[test]
    fn touches_finite_check_ignores_unused_slots() {
        let t = Touches::from_raw(1, 1.0, 2.0, f32::NAN, f32::NAN);
        assert!(t.is_finite());
        let t = Touches::from_raw(2, 1.0, 2.0, f32::NAN, 0.0);
        assert!(!t.is_finite());
    }
}
