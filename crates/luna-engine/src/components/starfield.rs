//! Background stars scattered in a spherical shell around the origin.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::TAU;

use crate::api::config::StarfieldConfig;
use crate::systems::rng::Rng;

/// One star as the host reads it: 4 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Star {
    pub position: [f32; 3],
    pub size: f32,
}

impl Star {
    pub const FLOATS: usize = 4;
}

/// Deterministic star placement: uniform direction, radius uniform in
/// `[star_min_distance, star_spread)`.
pub fn generate(params: &StarfieldConfig) -> Vec<Star> {
    let mut rng = Rng::new(params.seed);
    let mut stars = Vec::with_capacity(params.star_count as usize);
    for _ in 0..params.star_count {
        // Uniform on the sphere: z uniform in [-1, 1), azimuth uniform.
        let z = rng.range(-1.0, 1.0);
        let phi = rng.range(0.0, TAU);
        let r_xy = (1.0 - z * z).max(0.0).sqrt();
        let dir = Vec3::new(r_xy * phi.cos(), r_xy * phi.sin(), z);

        let distance = rng.range(params.star_min_distance, params.star_spread);
        let size = rng.range(params.star_min_size, params.star_max_size);
        stars.push(Star {
            position: (dir * distance).to_array(),
            size,
        });
    }
    stars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_lie_in_the_shell() {
        let params = StarfieldConfig::default();
        let stars = generate(&params);
        assert_eq!(stars.len(), params.star_count as usize);
        let outer = params.star_spread;
        for s in &stars {
            let d = Vec3::from_array(s.position).length();
            assert!(d >= params.star_min_distance * 0.999 && d <= outer * 1.001, "{d}");
            assert!(s.size >= params.star_min_size && s.size <= params.star_max_size);
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let params = StarfieldConfig::default();
        assert_eq!(generate(&params), generate(&params));
        let other = StarfieldConfig { seed: 7, ..params.clone() };
        assert_ne!(generate(&params), generate(&other));
    }

    #[test]
    fn zero_stars() {
        let params = StarfieldConfig { star_count: 0, ..Default::default() };
        assert!(generate(&params).is_empty());
    }
}
