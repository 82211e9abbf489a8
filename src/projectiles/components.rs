//! Projectile components and steering math.

use bevy::prelude::*;

/// A shot flying along its heading on the x/y plane.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Units per second along the heading
    pub speed: f32,
    /// Maximum turn rate in degrees per second
    pub rotate_speed: f32,
    pub damage: f32,
    /// Entity that fired this projectile; never hit by it
    pub owner: Entity,
    /// Entity being homed on, latched once at spawn
    pub target: Option<Entity>,
    /// Heading in degrees, counter-clockwise from +x
    pub heading_degrees: f32,
}

impl Projectile {
    pub fn forward(&self) -> Vec3 {
        let radians = self.heading_degrees.to_radians();
        Vec3::new(radians.cos(), radians.sin(), 0.0)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.heading_degrees.to_radians())
    }

    /// Turn toward `target` by at most `rotate_speed * dt` degrees.
    pub fn steer(&mut self, position: Vec3, target: Vec3, dt: f32) {
        let to_target = (target - position).truncate();
        if to_target.length_squared() <= f32::EPSILON {
            return;
        }
        let direction = to_target.normalize();
        let desired = direction.y.atan2(direction.x).to_degrees();
        self.heading_degrees =
            rotate_towards_angle(self.heading_degrees, desired, self.rotate_speed * dt);
    }

    /// Position after flying forward for `dt`.
    pub fn advance(&self, position: Vec3, dt: f32) -> Vec3 {
        position + self.forward() * self.speed * dt
    }
}

/// Shortest signed difference `to - from`, in `(-180, 180]`.
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Rotate `current` toward `target` along the shorter arc by at most
/// `max_delta` degrees.
pub fn rotate_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = delta_angle(current, target);
    if delta.abs() <= max_delta {
        current + delta
    } else {
        current + max_delta.copysign(delta)
    }
}

/// Projectile parameters an enemy fires with.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ProjectileTemplate {
    pub speed: f32,
    pub rotate_speed: f32,
    pub radius: f32,
    pub color: Color,
}

impl Default for ProjectileTemplate {
    fn default() -> Self {
        Self {
            speed: 4.0,
            rotate_speed: 200.0,
            radius: 0.25,
            color: Color::srgb(0.6, 0.4, 0.2),
        }
    }
}

/// Remaining seconds before an unspent projectile is removed.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
}
