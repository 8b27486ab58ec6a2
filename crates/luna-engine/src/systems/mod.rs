pub mod orbit;
pub mod render;
pub mod rng;
pub mod smoothing;
pub mod spin;
pub mod zoom;
