//! Avatar-related components.

use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for the controllable avatar.
#[derive(Component, Debug, Default)]
pub struct Avatar;

/// How input maps to movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Locomotion {
    /// Side-scroller: x input drives x velocity, jumping is allowed
    #[default]
    Planar2d,
    /// Ground plane movement on x/z with the body turning toward travel
    Free3d,
}

/// Movement tuning for a controllable actor.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovementTuning {
    pub locomotion: Locomotion,
    /// Horizontal speed in units per second
    pub speed: f32,
    /// Apex height of a jump
    pub jump_height: f32,
    /// Vertical acceleration (negative is down)
    pub gravity: f32,
    /// Hard cap on velocity magnitude
    pub max_speed: f32,
    /// Degrees per second the body turns toward its travel direction
    pub turn_rate: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            locomotion: Locomotion::Planar2d,
            speed: 5.0,
            jump_height: 3.75,
            gravity: -30.0,
            max_speed: 50.0,
            turn_rate: 720.0,
        }
    }
}

/// Horizontal facing for side-scrolling actors.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facing {
    /// True when facing -x
    pub flip_x: bool,
}

impl Facing {
    /// Face the sign of `horizontal`; zero keeps the current facing.
    pub fn update(&mut self, horizontal: f32) {
        if horizontal > 0.0 {
            self.flip_x = false;
        } else if horizontal < 0.0 {
            self.flip_x = true;
        }
    }

    pub fn direction(&self) -> Vec3 {
        if self.flip_x {
            Vec3::NEG_X
        } else {
            Vec3::X
        }
    }
}

/// Melee attack resolved as a sphere overlap just ahead of the body.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MeleeAttack {
    pub damage: f32,
    /// Distance from the body to the overlap center
    pub reach: f32,
    pub radius: f32,
}

impl Default for MeleeAttack {
    fn default() -> Self {
        Self {
            damage: 1.0,
            reach: 0.75,
            radius: 0.75,
        }
    }
}
