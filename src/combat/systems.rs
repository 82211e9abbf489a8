//! Damage application, death resolution and flash reverts.

use bevy::prelude::*;

use super::components::*;
use crate::core::{
    display_name, DamageEvent, DeathEvent, HealthChanged, Respawned, Scheduler,
    SimulationConfig, TimerAction, TimerFired,
};
use crate::physics::Motion;
use crate::session::{GameSession, ScoreValue};

/// Apply queued damage to health, notify observers and start hit flashes.
pub fn apply_damage(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut scheduler: ResMut<Scheduler>,
    mut damage_events: EventReader<DamageEvent>,
    mut query: Query<(&mut Health, Option<&mut HitFlash>, Option<&Name>)>,
    mut health_changed: EventWriter<HealthChanged>,
    mut deaths: EventWriter<DeathEvent>,
) {
    let now = time.elapsed_secs();

    for event in damage_events.read() {
        let Ok((mut health, flash, name)) = query.get_mut(event.target) else {
            continue;
        };

        let outcome = health.take_damage(event.amount);
        if outcome == DamageOutcome::Ignored {
            continue;
        }

        info!(
            "{} took {} damage! Health: {}/{}",
            display_name(event.target, name),
            event.amount,
            health.current(),
            health.maximum()
        );
        health_changed.send(HealthChanged {
            entity: event.target,
            fraction: health.fraction(),
        });

        if let Some(mut flash) = flash {
            flash.trigger(event.target, &mut scheduler, now, config.flash_duration);
        }

        if outcome == DamageOutcome::Killed {
            deaths.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Run each dead entity's death policy.
#[allow(clippy::type_complexity)]
pub fn resolve_deaths(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut scheduler: ResMut<Scheduler>,
    mut session: ResMut<GameSession>,
    mut death_events: EventReader<DeathEvent>,
    mut query: Query<(
        &DeathPolicy,
        &mut Health,
        &mut Transform,
        Option<&mut Motion>,
        Option<&SpawnAnchor>,
        Option<&mut HitFlash>,
        Option<&ScoreValue>,
        Option<&Name>,
    )>,
    mut health_changed: EventWriter<HealthChanged>,
    mut respawned: EventWriter<Respawned>,
) {
    for event in death_events.read() {
        let Ok((policy, mut health, mut transform, motion, anchor, flash, score, name)) =
            query.get_mut(event.entity)
        else {
            continue;
        };
        let label = display_name(event.entity, name);

        match policy {
            DeathPolicy::RespawnInPlace => {
                info!("{} died! Respawning...", label);
                match anchor {
                    Some(anchor) => transform.translation = anchor.0,
                    None => warn!("{} has no spawn anchor, respawning where it fell", label),
                }
                if let Some(mut motion) = motion {
                    motion.velocity = Vec3::ZERO;
                }
                if let Some(mut flash) = flash {
                    flash.clear(&mut scheduler);
                }
                health.restore();
                health_changed.send(HealthChanged {
                    entity: event.entity,
                    fraction: health.fraction(),
                });
                respawned.send(Respawned {
                    entity: event.entity,
                });
            }
            DeathPolicy::GameOver => {
                info!("{} died!", label);
                session.game_over(&mut scheduler, time.elapsed_secs(), config.restart_delay);
            }
            DeathPolicy::Defeat => {
                info!("{} defeated!", label);
                if let Some(mut flash) = flash {
                    flash.clear(&mut scheduler);
                }
                if let Some(score) = score {
                    session.add_score(score.0);
                }
                commands.entity(event.entity).despawn_recursive();
            }
        }
    }
}

/// Restore base tints whose flash timer came due.
pub fn revert_flashes(mut fired: EventReader<TimerFired>, mut query: Query<&mut HitFlash>) {
    for event in fired.read() {
        let TimerAction::RevertFlash(entity) = event.action else {
            continue;
        };
        if let Ok(mut flash) = query.get_mut(entity) {
            flash.revert(event.token);
        }
    }
}
