//! Exponential smoothing shared by the spin and zoom smoothers.

/// One smoothing step: move `current` toward `target` by `factor` of the gap.
///
/// With `factor` in (0, 1] the gap shrinks geometrically and never changes
/// sign, so repeated calls approach `target` without overshoot.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_factor_snaps() {
        assert_eq!(approach(3.0, 7.0, 1.0), 7.0);
    }

    #[test]
    fn half_factor_halves_gap() {
        assert!((approach(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
        assert!((approach(10.0, 0.0, 0.5) - 5.0).abs() < 1e-6);
    }
}
