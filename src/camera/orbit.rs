//! Orbit/zoom camera with a first-person transition.

use bevy::prelude::*;

use crate::input::FrameInput;

/// Multiplier applied to pointer deltas before the per-axis speeds.
const LEGACY_INPUT_SCALE: f32 = 0.02;

/// Below this distance the final look-at snap is skipped.
const LOOK_AT_EPSILON: f32 = 1e-3;

/// Orbit camera state: yaw/pitch accumulators and zoom distance around a target.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    /// Entity being orbited; not owned
    pub target: Option<Entity>,
    /// Degrees
    pub yaw: f32,
    /// Degrees, kept within `[pitch_min, pitch_max]`
    pub pitch: f32,
    /// Kept within `[min_distance, max_distance]`
    pub distance: f32,
    pub x_speed: f32,
    pub y_speed: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Added to the target position to get the orbit pivot
    pub offset: Vec3,
    /// Zoom distance under which the camera switches to first person
    pub fpv_threshold: f32,
    /// World-space shift of the pivot while in first person
    pub fpv_bias: Vec3,
    fpv: bool,
    parts: Vec<Entity>,
    cached_for: Option<Entity>,
    warned: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: None,
            yaw: 0.0,
            pitch: 0.0,
            distance: 7.0,
            x_speed: 200.0,
            y_speed: 100.0,
            pitch_min: -20.0,
            pitch_max: 80.0,
            zoom_speed: 5.0,
            min_distance: 0.0,
            max_distance: 15.0,
            offset: Vec3::new(0.0, 1.5, 0.0),
            fpv_threshold: 0.5,
            fpv_bias: Vec3::new(0.0, 0.2, -0.1),
            fpv: false,
            parts: Vec::new(),
            cached_for: None,
            warned: false,
        }
    }
}

/// Edge produced when the zoom crosses the first-person threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpvTransition {
    Enter,
    Exit,
}

impl OrbitCamera {
    pub fn new(target: Entity, distance: f32) -> Self {
        Self {
            target: Some(target),
            distance,
            ..default()
        }
    }

    /// Start with yaw and pitch read from an existing camera rotation.
    pub fn from_rotation(target: Entity, distance: f32, rotation: Quat) -> Self {
        let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
        let mut camera = Self::new(target, distance);
        camera.yaw = -yaw.to_degrees();
        camera.pitch = clamp_angle(-pitch.to_degrees(), camera.pitch_min, camera.pitch_max);
        camera
    }

    pub fn is_fpv(&self) -> bool {
        self.fpv
    }

    /// Visual parts hidden while in first person.
    pub fn cached_parts(&self) -> &[Entity] {
        &self.parts
    }

    /// Accumulate pointer and scroll input, clamp, and report an FPV edge.
    pub fn apply_input(&mut self, look: Vec2, scroll: f32) -> Option<FpvTransition> {
        self.yaw += look.x * self.x_speed * LEGACY_INPUT_SCALE;
        self.pitch -= look.y * self.y_speed * LEGACY_INPUT_SCALE;
        self.pitch = clamp_angle(self.pitch, self.pitch_min, self.pitch_max);

        self.distance = (self.distance - scroll * self.zoom_speed)
            .clamp(self.min_distance, self.max_distance);

        let wants_fpv = self.distance < self.fpv_threshold;
        if wants_fpv == self.fpv {
            return None;
        }
        self.fpv = wants_fpv;
        Some(if wants_fpv {
            FpvTransition::Enter
        } else {
            FpvTransition::Exit
        })
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            0.0,
        )
    }

    /// Camera transform orbiting `target_position`.
    pub fn pose(&self, target_position: Vec3) -> Transform {
        let rotation = self.rotation();
        let mut pivot = target_position + self.offset;
        if self.fpv {
            pivot += self.fpv_bias;
        }
        let translation = pivot + rotation * Vec3::new(0.0, 0.0, self.distance);

        let mut transform = Transform::from_translation(translation).with_rotation(rotation);
        if self.distance > LOOK_AT_EPSILON {
            transform.look_at(pivot, Vec3::Y);
        }
        transform
    }
}

/// Wrap `angle` into `[-360, 360]` and clamp it to `[min, max]`.
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    while angle < -360.0 {
        angle += 360.0;
    }
    while angle > 360.0 {
        angle -= 360.0;
    }
    angle.clamp(min, max)
}

fn collect_parts(root: Entity, children: &Query<&Children>, out: &mut Vec<Entity>) {
    out.push(root);
    if let Ok(kids) = children.get(root) {
        for &child in kids.iter() {
            collect_parts(child, children, out);
        }
    }
}

fn set_parts_visibility(parts: &[Entity], hidden: bool, visibility: &mut Query<&mut Visibility>) {
    let value = if hidden {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    for &part in parts {
        if let Ok(mut current) = visibility.get_mut(part) {
            *current = value;
        }
    }
}

/// Orbit every `OrbitCamera` around its target using this frame's input.
pub fn orbit_camera(
    input: Res<FrameInput>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
    targets: Query<&Transform, Without<OrbitCamera>>,
    children: Query<&Children>,
    mut visibility: Query<&mut Visibility>,
) {
    for (mut camera, mut transform) in cameras.iter_mut() {
        let Some(target_position) = camera
            .target
            .and_then(|target| targets.get(target).ok())
            .map(|t| t.translation)
        else {
            if !camera.warned {
                warn!("Orbit camera has no target, skipping camera update");
                camera.warned = true;
            }
            continue;
        };
        camera.warned = false;

        if camera.cached_for != camera.target {
            if camera.fpv {
                set_parts_visibility(&camera.parts, false, &mut visibility);
            }
            let mut parts = Vec::new();
            if let Some(target) = camera.target {
                collect_parts(target, &children, &mut parts);
            }
            camera.parts = parts;
            camera.cached_for = camera.target;
            if camera.fpv {
                set_parts_visibility(&camera.parts, true, &mut visibility);
            }
        }

        match camera.apply_input(input.look_delta, input.scroll) {
            Some(FpvTransition::Enter) => {
                info!("Camera entered first person");
                set_parts_visibility(&camera.parts, true, &mut visibility);
            }
            Some(FpvTransition::Exit) => {
                info!("Camera left first person");
                set_parts_visibility(&camera.parts, false, &mut visibility);
            }
            None => {}
        }

        *transform = camera.pose(target_position);
    }
}
