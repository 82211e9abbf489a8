//! Core plugin that sets up states, events, phase ordering and timers.

use bevy::prelude::*;

use super::config::ConfigSource;
use super::events::*;
use super::schedule::*;
use super::states::*;

/// Per-frame simulation phases, run in this order during `InGame`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Sample input and ground contact
    Input,
    /// Controllers decide velocities, headings and spawns
    Act,
    /// Velocities are integrated and positions constrained
    Integrate,
    /// Contacts, overlaps, damage and deaths
    Resolve,
    /// Deferred timers come due
    Timers,
}

/// Sub-phases of `SimSet::Resolve`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolveSet {
    /// Backend collisions become `ContactEvent`s
    Forward,
    /// Contacts and overlaps become `DamageEvent`s
    Contacts,
    /// Damage is applied to health
    Damage,
    /// Death policies run
    Deaths,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Reloading)
/// - Global events (DamageEvent, ContactEvent, etc.)
/// - The `SimSet` phase chain and the deferred-timer queue
#[derive(Default)]
pub struct CorePlugin {
    pub config: ConfigSource,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.resolve())
            .init_resource::<Scheduler>()
            .init_state::<GameState>()
            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<HealthChanged>()
            .add_event::<Respawned>()
            .add_event::<ContactEvent>()
            .add_event::<PlaySound>()
            .add_event::<ReloadSession>()
            .add_event::<TimerFired>()
            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Act,
                    SimSet::Integrate,
                    SimSet::Resolve,
                    SimSet::Timers,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .configure_sets(
                Update,
                (
                    ResolveSet::Forward,
                    ResolveSet::Contacts,
                    ResolveSet::Damage,
                    ResolveSet::Deaths,
                )
                    .chain()
                    .in_set(SimSet::Resolve),
            )
            // Nothing is loaded asynchronously yet, so enter the game directly
            .add_systems(OnEnter(GameState::Loading), enter_game)
            .add_systems(OnEnter(GameState::Reloading), enter_game)
            .add_systems(Update, fire_due_timers.in_set(SimSet::Timers));
    }
}

fn enter_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}
