//! Camera module - orbit/zoom/first-person rig and planar follow rig.

mod follow;
mod orbit;
mod plugin;

pub use follow::{smooth_damp, FollowCamera2d};
pub use orbit::{clamp_angle, FpvTransition, OrbitCamera};
pub use plugin::CameraPlugin;
