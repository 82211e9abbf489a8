//! Simple velocity integration and 2D play-plane constraint.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Linear velocity integrated into `Transform` every frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub velocity: Vec3,
}

/// Confines an actor to the plane `z = self.z`.
///
/// The constraint is re-applied after every integration step so drift is
/// corrected rather than only avoided at spawn.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayPlane {
    pub z: f32,
}

impl PlayPlane {
    /// Force `position` back onto the plane. Returns true if it had drifted.
    pub fn pin(&self, position: &mut Vec3) -> bool {
        if position.z != self.z {
            position.z = self.z;
            true
        } else {
            false
        }
    }
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + to_target / distance * max_delta
    }
}

/// Advance every moving entity by its velocity.
///
/// With a rapier context, bodies carrying a `KinematicCharacterController`
/// hand the step to rapier so it is resolved against colliders. Everything
/// else is moved directly.
pub fn integrate_motion(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    mut query: Query<(&mut Transform, &Motion, Option<&mut KinematicCharacterController>)>,
) {
    let dt = time.delta_secs();
    let physics = rapier_context.get_single().is_ok();

    for (mut transform, motion, controller) in query.iter_mut() {
        match controller {
            Some(mut controller) if physics => {
                controller.translation = Some(motion.velocity * dt);
            }
            _ => {
                if motion.velocity != Vec3::ZERO {
                    transform.translation += motion.velocity * dt;
                }
            }
        }
    }
}

/// Snap plane-confined actors back onto their plane.
pub fn pin_to_plane(mut query: Query<(&mut Transform, &PlayPlane)>) {
    for (mut transform, plane) in query.iter_mut() {
        let mut position = transform.translation;
        if plane.pin(&mut position) {
            transform.translation = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_corrects_drift_only_when_needed() {
        let plane = PlayPlane { z: 0.0 };
        let mut on_plane = Vec3::new(1.0, 2.0, 0.0);
        assert!(!plane.pin(&mut on_plane));

        let mut drifted = Vec3::new(1.0, 2.0, 0.37);
        assert!(plane.pin(&mut drifted));
        assert_eq!(drifted, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn move_towards_never_overshoots() {
        let start = Vec3::ZERO;
        let target = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(move_towards(start, target, 1.0), Vec3::new(0.6, 0.8, 0.0));
        assert_eq!(move_towards(start, target, 10.0), target);
        assert_eq!(move_towards(target, target, 1.0), target);
    }
}
