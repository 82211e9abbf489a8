//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component, Debug, Default)]
pub struct Enemy;

/// Back-and-forth patrol along x around a fixed anchor.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Patrol {
    pub anchor: Vec3,
    /// Half-width of the corridor
    pub range: f32,
    /// Zero makes a stationary turret
    pub speed: f32,
    pub moving_right: bool,
}

impl Patrol {
    pub fn new(anchor: Vec3, range: f32, speed: f32) -> Self {
        Self {
            anchor,
            range: range.abs(),
            speed,
            moving_right: true,
        }
    }

    /// The boundary the patrol is currently heading for.
    pub fn target_x(&self) -> f32 {
        if self.moving_right {
            self.anchor.x + self.range
        } else {
            self.anchor.x - self.range
        }
    }

    /// Flip at the active boundary and return the x velocity to use.
    pub fn step(&mut self, x: f32) -> f32 {
        if self.speed <= 0.0 {
            return 0.0;
        }
        let target = self.target_x();
        if self.moving_right && x >= target {
            self.moving_right = false;
        } else if !self.moving_right && x <= target {
            self.moving_right = true;
        }
        if self.moving_right {
            self.speed
        } else {
            -self.speed
        }
    }

    /// Clamp `x` into the corridor.
    pub fn confine(&self, x: f32) -> f32 {
        x.clamp(self.anchor.x - self.range, self.anchor.x + self.range)
    }
}

/// Independently rotatable aiming part, positioned relative to the body.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Turret {
    /// Offset from the body origin in body space
    pub local_offset: Vec3,
    /// Current aim in degrees, counter-clockwise from +x
    pub aim_degrees: f32,
    /// Child entity drawn as the turret, if any
    pub visual: Option<Entity>,
}

impl Turret {
    pub fn new(local_offset: Vec3) -> Self {
        Self {
            local_offset,
            aim_degrees: 0.0,
            visual: None,
        }
    }

    pub fn world_position(&self, body: &Transform) -> Vec3 {
        body.translation + body.rotation * self.local_offset
    }

    pub fn world_rotation(&self) -> Quat {
        Quat::from_rotation_z(self.aim_degrees.to_radians())
    }

    /// Rotation to give the visual child so its world rotation matches the aim.
    pub fn local_rotation(&self, body: &Transform) -> Quat {
        body.rotation.inverse() * self.world_rotation()
    }
}

/// Fixed-interval fire timer.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FireControl {
    /// Seconds between shots
    pub interval: f32,
    /// Damage carried by each projectile
    pub damage: f32,
    remaining: f32,
}

impl FireControl {
    pub fn new(interval: f32, damage: f32) -> Self {
        Self {
            interval,
            damage,
            remaining: interval,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down; returns true and rearms when a shot is due.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }
}

/// Moves straight at the avatar along the play plane.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Chase {
    pub speed: f32,
}

/// Damage dealt to the avatar on touch, when the profile allows it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ContactDamage {
    pub amount: f32,
}

/// Angle in degrees from `from` to `to` on the x/y plane.
pub fn aim_angle(from: Vec3, to: Vec3) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Vec3::new(1.0, 0.0, 0.0), 0.0)]
    #[case(Vec3::new(0.0, 1.0, 0.0), 90.0)]
    #[case(Vec3::new(-1.0, 0.0, 0.0), 180.0)]
    #[case(Vec3::new(1.0, -1.0, 0.0), -45.0)]
    fn aim_angle_uses_atan2(#[case] target: Vec3, #[case] expected: f32) {
        assert_relative_eq!(aim_angle(Vec3::ZERO, target), expected, epsilon = 1e-4);
    }

    #[test]
    fn patrol_flips_only_at_boundaries() {
        let mut patrol = Patrol::new(Vec3::ZERO, 5.0, 2.0);
        assert_eq!(patrol.step(0.0), 2.0);
        assert_eq!(patrol.step(4.99), 2.0);
        assert_eq!(patrol.step(5.0), -2.0);
        assert!(!patrol.moving_right);
        assert_eq!(patrol.step(0.0), -2.0);
        assert_eq!(patrol.step(-5.0), 2.0);
        assert!(patrol.moving_right);
    }

    #[test]
    fn stationary_patrol_never_moves() {
        let mut patrol = Patrol::new(Vec3::ZERO, 5.0, 0.0);
        assert_eq!(patrol.step(10.0), 0.0);
        assert!(patrol.moving_right);
    }

    #[test]
    fn confine_clamps_into_corridor() {
        let patrol = Patrol::new(Vec3::new(2.0, 0.0, 0.0), 3.0, 1.0);
        assert_eq!(patrol.confine(5.2), 5.0);
        assert_eq!(patrol.confine(-4.0), -1.0);
        assert_eq!(patrol.confine(3.0), 3.0);
    }

    #[test]
    fn fire_control_rearms_after_each_shot() {
        let mut fire = FireControl::new(0.5, 20.0);
        assert!(!fire.tick(0.3));
        assert!(fire.tick(0.3));
        assert_eq!(fire.remaining(), 0.5);
        assert!(!fire.tick(0.25));
    }

    #[test]
    fn turret_follows_body_transform() {
        let turret = Turret::new(Vec3::new(0.0, 0.5, 0.0));
        let body = Transform::from_xyz(3.0, 1.0, 0.0);
        assert_eq!(turret.world_position(&body), Vec3::new(3.0, 1.5, 0.0));
    }
}
