//! Named sound clips and playback of `PlaySound` requests.

use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl, AudioEmitter, AudioSource};
use std::collections::HashMap;
use std::path::Path;

use crate::core::PlaySound;

/// Clips the game knows about, by name and asset path.
const KNOWN_CLIPS: &[(&str, &str)] = &[("Explosion", "audio/explosion.ogg")];

/// Clips that were found on disk at startup.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    clips: HashMap<String, Handle<AudioSource>>,
}

impl SoundLibrary {
    pub fn insert(&mut self, name: impl Into<String>, handle: Handle<AudioSource>) {
        self.clips.insert(name.into(), handle);
    }

    pub fn get(&self, name: &str) -> Option<&Handle<AudioSource>> {
        self.clips.get(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Register every known clip whose file exists under `assets/`.
pub fn load_sound_library(asset_server: Res<AssetServer>, mut library: ResMut<SoundLibrary>) {
    for (name, path) in KNOWN_CLIPS {
        if !Path::new("assets").join(path).exists() {
            debug!("Sound clip '{}' not found at {}", name, path);
            continue;
        }
        library.insert(*name, asset_server.load(*path));
    }
    info!("{} sound clips available", library.len());
}

/// Marks the short-lived entity a positional sound is emitted from.
#[derive(Component, Debug)]
pub struct SoundEmitter;

/// Play requested clips from an emitter at the requested position.
///
/// Volume and panning follow the `AudioReceiver` camera; unknown clips are
/// reported and skipped.
pub fn play_requested_sounds(
    mut commands: Commands,
    mut requests: EventReader<PlaySound>,
    library: Res<SoundLibrary>,
    audio: Res<Audio>,
) {
    for request in requests.read() {
        let Some(clip) = library.get(&request.clip) else {
            warn!("Sound clip '{}' not found!", request.clip);
            continue;
        };
        debug!("Playing '{}' at {:?}", request.clip, request.position);
        let instance = audio.play(clip.clone()).handle();
        commands.spawn((
            Name::new(format!("Sound {}", request.clip)),
            SoundEmitter,
            Transform::from_translation(request.position),
            AudioEmitter {
                instances: vec![instance],
            },
        ));
    }
}

/// Remove emitters whose sounds have all stopped.
pub fn despawn_finished_emitters(
    mut commands: Commands,
    emitters: Query<(Entity, &AudioEmitter), With<SoundEmitter>>,
) {
    for (entity, emitter) in emitters.iter() {
        if emitter.instances.is_empty() {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_clip_is_absent() {
        let mut library = SoundLibrary::default();
        assert!(library.is_empty());
        library.insert("Explosion", Handle::default());
        assert!(library.get("Explosion").is_some());
        assert!(library.get("Missing").is_none());
    }

    #[test]
    fn emitters_without_sounds_are_removed() {
        let mut app = App::new();
        app.add_systems(Update, despawn_finished_emitters);
        let finished = app
            .world_mut()
            .spawn((SoundEmitter, Transform::default(), AudioEmitter::default()))
            .id();
        let playing = app
            .world_mut()
            .spawn((
                SoundEmitter,
                Transform::default(),
                AudioEmitter {
                    instances: vec![Handle::default()],
                },
            ))
            .id();

        app.update();

        assert!(app.world().get::<SoundEmitter>(finished).is_none());
        assert!(app.world().get::<SoundEmitter>(playing).is_some());
    }
}
