//! Health, death policy and hit-flash components.

use bevy::prelude::*;

use crate::core::{Scheduler, TimerAction, TimerToken};

/// Component for entities that can take damage.
///
/// `current` never leaves `[0, maximum]`. Reaching zero latches the entity
/// as dead until `restore` is called, so a death is reported exactly once.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    current: f32,
    maximum: f32,
    dead: bool,
}

/// Result of a single damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed
    Ignored,
    Hurt,
    /// This hit brought health to zero
    Killed,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            maximum: max,
            dead: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.maximum);
        if self.current <= 0.0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Back to full health and alive.
    pub fn restore(&mut self) {
        self.current = self.maximum;
        self.dead = false;
    }

    /// Current health as a fraction of max, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0.0 {
            0.0
        } else {
            (self.current / self.maximum).clamp(0.0, 1.0)
        }
    }
}

/// What happens when health reaches zero.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeathPolicy {
    /// Return to the spawn anchor at full health
    #[default]
    RespawnInPlace,
    /// End the session; the scene reloads after a short delay
    GameOver,
    /// Award score and despawn
    Defeat,
}

/// Position an actor respawns at, captured when it was spawned.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnAnchor(pub Vec3);

/// Transient tint shown when an entity is hit.
///
/// At most one revert is pending; re-triggering cancels it and starts over.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct HitFlash {
    pub base: Color,
    pub alert: Color,
    pending: Option<TimerToken>,
}

impl HitFlash {
    pub fn new(base: Color, alert: Color) -> Self {
        Self {
            base,
            alert,
            pending: None,
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.pending.is_some()
    }

    /// Color the entity should currently be drawn with.
    pub fn color(&self) -> Color {
        if self.is_flashing() {
            self.alert
        } else {
            self.base
        }
    }

    pub fn trigger(&mut self, entity: Entity, scheduler: &mut Scheduler, now: f32, duration: f32) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
        self.pending = Some(scheduler.schedule(now, duration, TimerAction::RevertFlash(entity)));
    }

    /// Apply a due revert. Stale tokens are ignored.
    pub fn revert(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Drop any pending revert and show the base color immediately.
    pub fn clear(&mut self, scheduler: &mut Scheduler) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn damage_reduces_health_and_reports_fraction() {
        let mut health = Health::new(100.0);
        assert_eq!(health.take_damage(20.0), DamageOutcome::Hurt);
        assert_eq!(health.current(), 80.0);
        assert_eq!(health.fraction(), 0.8);
    }

    #[rstest]
    #[case(&[30.0, 30.0, 30.0, 30.0])]
    #[case(&[250.0])]
    #[case(&[99.0, 0.5, 0.5, 7.0])]
    #[case(&[-10.0, 40.0, 80.0])]
    fn health_stays_in_range_and_dies_once(#[case] hits: &[f32]) {
        let mut health = Health::new(100.0);
        let mut deaths = 0;
        for &hit in hits {
            if health.take_damage(hit) == DamageOutcome::Killed {
                deaths += 1;
                assert_eq!(health.current(), 0.0);
            }
            assert!((0.0..=100.0).contains(&health.current()));
        }
        assert!(deaths <= 1);
        assert_eq!(deaths == 1, health.is_dead());
    }

    #[test]
    fn dead_health_ignores_damage_until_restored() {
        let mut health = Health::new(10.0);
        assert_eq!(health.take_damage(10.0), DamageOutcome::Killed);
        assert_eq!(health.take_damage(5.0), DamageOutcome::Ignored);

        health.restore();
        assert_eq!(health.current(), 10.0);
        assert_eq!(health.take_damage(10.0), DamageOutcome::Killed);
    }

    #[test]
    fn retriggered_flash_keeps_one_pending_revert() {
        let mut scheduler = Scheduler::default();
        let entity = Entity::from_raw(3);
        let mut flash = HitFlash::new(Color::WHITE, Color::srgb(1.0, 0.0, 0.0));

        flash.trigger(entity, &mut scheduler, 0.0, 0.2);
        flash.trigger(entity, &mut scheduler, 0.1, 0.2);
        assert_eq!(scheduler.len(), 1);
        assert!(flash.is_flashing());

        // The first revert would have been due at 0.2 but was cancelled.
        assert!(scheduler.drain_due(0.25).is_empty());
        let due = scheduler.drain_due(0.3);
        assert_eq!(due.len(), 1);
        assert!(flash.revert(due[0].0));
        assert_eq!(flash.color(), Color::WHITE);
    }
}
