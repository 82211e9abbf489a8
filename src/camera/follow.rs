//! Side-view camera that smoothly trails a target on two axes.

use bevy::prelude::*;

use crate::player::Avatar;

#[derive(Component, Debug, Clone)]
pub struct FollowCamera2d {
    /// Latched to the avatar on first update when unset
    pub target: Option<Entity>,
    /// `z` is used as the camera's fixed depth
    pub offset: Vec3,
    /// Approximate seconds to reach the target
    pub smooth_time: f32,
    pub(crate) velocity: Vec3,
    pub(crate) warned: bool,
}

impl Default for FollowCamera2d {
    fn default() -> Self {
        Self {
            target: None,
            offset: Vec3::new(0.0, 1.0, 10.0),
            smooth_time: 0.3,
            velocity: Vec3::ZERO,
            warned: false,
        }
    }
}

impl FollowCamera2d {
    /// Where the camera wants to be for a target at `target_position`.
    pub fn desired(&self, target_position: Vec3) -> Vec3 {
        let mut desired = Vec3::new(target_position.x, target_position.y, 0.0) + self.offset;
        desired.z = self.offset.z;
        desired
    }

    /// Move `current` one frame toward the desired position.
    pub fn step(&mut self, current: Vec3, target_position: Vec3, dt: f32) -> Vec3 {
        let desired = self.desired(target_position);
        smooth_damp(current, desired, &mut self.velocity, self.smooth_time, dt)
    }
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries state between calls. The result never overshoots
/// `target`.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }
    output
}

pub fn follow_camera(
    time: Res<Time>,
    avatars: Query<Entity, With<Avatar>>,
    mut cameras: Query<(&mut FollowCamera2d, &mut Transform)>,
    targets: Query<&Transform, Without<FollowCamera2d>>,
) {
    let dt = time.delta_secs();

    for (mut camera, mut transform) in cameras.iter_mut() {
        if camera.target.is_none() {
            if let Ok(avatar) = avatars.get_single() {
                info!("Follow camera latched onto the avatar");
                camera.target = Some(avatar);
            }
        }

        let Some(target_position) = camera
            .target
            .and_then(|target| targets.get(target).ok())
            .map(|t| t.translation)
        else {
            if !camera.warned {
                warn!("Follow camera has no target, skipping camera update");
                camera.warned = true;
            }
            continue;
        };
        camera.warned = false;

        transform.translation = camera.step(transform.translation, target_position, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn desired_position_pins_depth_to_offset() {
        let camera = FollowCamera2d::default();
        let desired = camera.desired(Vec3::new(3.0, 2.0, -7.0));
        assert_eq!(desired, Vec3::new(3.0, 3.0, 10.0));
    }

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let target = Vec3::new(10.0, 0.0, 0.0);
        let mut current = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;
        for _ in 0..300 {
            current = smooth_damp(current, target, &mut velocity, 0.3, 1.0 / 60.0);
            assert!(current.x <= target.x + 1e-5);
        }
        assert_relative_eq!(current.x, 10.0, epsilon = 1e-2);
    }

    #[test]
    fn zero_delta_holds_position() {
        let mut velocity = Vec3::ZERO;
        let current = Vec3::new(1.0, 2.0, 3.0);
        let out = smooth_damp(current, Vec3::ZERO, &mut velocity, 0.3, 0.0);
        assert_eq!(out, current);
    }
}
