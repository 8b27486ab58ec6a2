pub mod builder;
pub mod rig;
pub mod scene;
pub mod scheduler;
pub mod time;
