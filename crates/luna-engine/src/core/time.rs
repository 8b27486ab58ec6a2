/// Host-driven clock: advances only by the deltas passed to `tick`.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    now_ms: f64,
    frames: u64,
    last_dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `dt` seconds. Negative or non-finite deltas
    /// count as zero so the clock never runs backwards.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.last_dt = dt;
        self.now_ms += dt as f64 * 1000.0;
        self.frames += 1;
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds, as sanitized by `advance`.
    pub fn last_dt(&self) -> f32 {
        self.last_dt
    }
}

/// Time since the last pointer activity.
#[derive(Debug, Clone, Default)]
pub struct IdleTimer {
    last_activity_ms: f64,
}

impl IdleTimer {
    pub fn new(now_ms: f64) -> Self {
        Self {
            last_activity_ms: now_ms,
        }
    }

    pub fn touch(&mut self, now_ms: f64) {
        self.last_activity_ms = now_ms;
    }

    pub fn idle_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.last_activity_ms).max(0.0)
    }

    /// Strictly longer than `delay_ms` without activity.
    pub fn expired(&self, now_ms: f64, delay_ms: f32) -> bool {
        self.idle_ms(now_ms) > delay_ms as f64
    }
}
