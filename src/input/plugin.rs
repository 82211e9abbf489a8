//! Input plugin - samples devices into `FrameInput` each frame.

use bevy::prelude::*;

use super::sampler::{sample_input, FrameInput, InputSettings};
use crate::core::SimSet;

/// Input plugin - owns the `FrameInput` snapshot.
pub struct InputSamplingPlugin;

impl Plugin for InputSamplingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameInput>()
            .init_resource::<InputSettings>()
            .add_systems(Update, sample_input.in_set(SimSet::Input));
    }
}
