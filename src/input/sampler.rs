//! Device sampling into a backend-independent `FrameInput`.
//!
//! Backends are tried in priority order. Keyboard (plus mouse buttons) comes
//! first; a gamepad is only consulted for axes the keyboard left at zero.
//! A backend whose resource is absent is skipped without complaint.

use bevy::input::gamepad::{Gamepad, GamepadAxis, GamepadButton};
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

/// Stick values below this magnitude read as zero.
const STICK_DEAD_ZONE: f32 = 0.1;

/// One frame of normalized input.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// x = right, y = forward/up, each in `[-1, 1]`
    pub movement: Vec2,
    /// Jump was pressed this frame
    pub jump_pressed: bool,
    /// Attack was pressed this frame
    pub attack_pressed: bool,
    /// New session was requested this frame
    pub restart_pressed: bool,
    /// Pointer delta in legacy axis units, y positive when moving up
    pub look_delta: Vec2,
    /// Scroll in legacy axis units, positive when scrolling away from the user
    pub scroll: f32,
}

/// Where `FrameInput` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Sample keyboard, mouse and gamepads
    #[default]
    Devices,
    /// Leave `FrameInput` to be written by the driver
    Scripted,
}

/// Input sampling configuration.
#[derive(Resource, Debug, Clone)]
pub struct InputSettings {
    pub source: InputSource,
    /// Pixels of pointer motion to legacy axis units
    pub pointer_scale: f32,
    /// Scroll lines to legacy axis units
    pub scroll_line_scale: f32,
    /// Scroll pixels to legacy axis units
    pub scroll_pixel_scale: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            source: InputSource::Devices,
            pointer_scale: 0.1,
            scroll_line_scale: 0.1,
            scroll_pixel_scale: 0.001,
        }
    }
}

/// Pointer data gathered from the accumulated mouse resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub motion: Vec2,
    pub scroll: Vec2,
    pub scroll_unit: Option<MouseScrollUnit>,
}

/// Build a `FrameInput` from whichever backends are available.
pub fn sample_frame_input<'a>(
    settings: &InputSettings,
    keyboard: Option<&ButtonInput<KeyCode>>,
    mouse_buttons: Option<&ButtonInput<MouseButton>>,
    gamepads: impl IntoIterator<Item = &'a Gamepad>,
    pointer: PointerSample,
) -> FrameInput {
    let mut input = FrameInput::default();

    if let Some(keys) = keyboard {
        input.movement.x = key_axis(keys, [KeyCode::KeyA, KeyCode::ArrowLeft], [KeyCode::KeyD, KeyCode::ArrowRight]);
        input.movement.y = key_axis(keys, [KeyCode::KeyS, KeyCode::ArrowDown], [KeyCode::KeyW, KeyCode::ArrowUp]);
        input.jump_pressed = keys.just_pressed(KeyCode::Space);
        input.attack_pressed = keys.just_pressed(KeyCode::KeyF);
        input.restart_pressed = keys.just_pressed(KeyCode::KeyR);
    }

    if let Some(buttons) = mouse_buttons {
        input.attack_pressed |= buttons.just_pressed(MouseButton::Left);
    }

    for gamepad in gamepads {
        if input.movement == Vec2::ZERO {
            let stick = Vec2::new(
                gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0),
                gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0),
            );
            if stick.length() > STICK_DEAD_ZONE {
                input.movement = stick.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
            }
        }
        input.jump_pressed |= gamepad.just_pressed(GamepadButton::South);
        input.attack_pressed |= gamepad.just_pressed(GamepadButton::West);
        input.restart_pressed |= gamepad.just_pressed(GamepadButton::Start);
    }

    // Screen-space y grows downward; legacy axes grow upward.
    input.look_delta = Vec2::new(pointer.motion.x, -pointer.motion.y) * settings.pointer_scale;
    input.scroll = match pointer.scroll_unit {
        Some(MouseScrollUnit::Line) => pointer.scroll.y * settings.scroll_line_scale,
        Some(MouseScrollUnit::Pixel) => pointer.scroll.y * settings.scroll_pixel_scale,
        None => 0.0,
    };

    input
}

fn key_axis(keys: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    if keys.any_pressed(negative) {
        -1.0
    } else if keys.any_pressed(positive) {
        1.0
    } else {
        0.0
    }
}

/// Refresh `FrameInput` from devices unless the driver scripts it.
pub fn sample_input(
    settings: Res<InputSettings>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    gamepads: Query<&Gamepad>,
    motion: Option<Res<AccumulatedMouseMotion>>,
    scroll: Option<Res<AccumulatedMouseScroll>>,
    mut input: ResMut<FrameInput>,
) {
    if settings.source == InputSource::Scripted {
        return;
    }

    let mut pointer = PointerSample::default();
    if let Some(motion) = motion {
        pointer.motion = motion.delta;
    }
    if let Some(scroll) = scroll {
        pointer.scroll = scroll.delta;
        pointer.scroll_unit = Some(scroll.unit);
    }

    *input = sample_frame_input(
        &settings,
        keyboard.as_deref(),
        mouse_buttons.as_deref(),
        gamepads.iter(),
        pointer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_gamepads() -> Vec<&'static Gamepad> {
        Vec::new()
    }

    #[test]
    fn no_backends_yield_neutral_input() {
        let input = sample_frame_input(
            &InputSettings::default(),
            None,
            None,
            no_gamepads(),
            PointerSample::default(),
        );
        assert_eq!(input, FrameInput::default());
    }

    #[test]
    fn keyboard_left_wins_over_right() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyA);
        keys.press(KeyCode::ArrowRight);
        let input = sample_frame_input(
            &InputSettings::default(),
            Some(&keys),
            None,
            no_gamepads(),
            PointerSample::default(),
        );
        assert_eq!(input.movement.x, -1.0);
    }

    #[test]
    fn jump_is_an_edge_signal() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Space);
        let settings = InputSettings::default();
        let first = sample_frame_input(&settings, Some(&keys), None, no_gamepads(), PointerSample::default());
        assert!(first.jump_pressed);

        keys.clear();
        let held = sample_frame_input(&settings, Some(&keys), None, no_gamepads(), PointerSample::default());
        assert!(!held.jump_pressed);
    }

    #[test]
    fn restart_key_requests_a_new_session() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyR);
        let input = sample_frame_input(
            &InputSettings::default(),
            Some(&keys),
            None,
            no_gamepads(),
            PointerSample::default(),
        );
        assert!(input.restart_pressed);
        assert!(!input.jump_pressed);
    }

    #[test]
    fn mouse_button_triggers_attack() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        let input = sample_frame_input(
            &InputSettings::default(),
            None,
            Some(&buttons),
            no_gamepads(),
            PointerSample::default(),
        );
        assert!(input.attack_pressed);
    }

    #[test]
    fn pointer_is_scaled_to_legacy_axes() {
        let pointer = PointerSample {
            motion: Vec2::new(10.0, 20.0),
            scroll: Vec2::new(0.0, 2.0),
            scroll_unit: Some(MouseScrollUnit::Line),
        };
        let input = sample_frame_input(&InputSettings::default(), None, None, no_gamepads(), pointer);
        assert_eq!(input.look_delta, Vec2::new(1.0, -2.0));
        assert!((input.scroll - 0.2).abs() < 1e-6);
    }
}
