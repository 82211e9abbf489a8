//! Audio plugin - plays sounds requested by the simulation.

use bevy::prelude::*;
use bevy_kira_audio::prelude::SpatialAudio;

use super::library::{
    despawn_finished_emitters, load_sound_library, play_requested_sounds, SoundLibrary,
};

/// Distance at which positional sounds fade out completely.
const HEARING_DISTANCE: f32 = 40.0;

/// Audio plugin - expects `bevy_kira_audio::AudioPlugin` to be added by the app.
pub struct AudioBridgePlugin;

impl Plugin for AudioBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundLibrary>()
            .insert_resource(SpatialAudio {
                max_distance: HEARING_DISTANCE,
            })
            .add_systems(Startup, load_sound_library)
            .add_systems(Update, (play_requested_sounds, despawn_finished_emitters));
    }
}
