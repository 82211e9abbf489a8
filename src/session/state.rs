//! The process-wide game session.
//!
//! Exactly one `GameSession` lives in the world for the whole run. It is
//! installed by the driver at build time; a second install attempt leaves
//! the first session untouched instead of replacing it.

use bevy::prelude::*;

use crate::core::{ReloadSession, Scheduler, TimerAction, TimerFired, TimerToken};
use crate::input::FrameInput;

/// Score awarded when this entity is defeated or collected.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreValue(pub u32);

impl Default for ScoreValue {
    fn default() -> Self {
        Self(10)
    }
}

/// Outcome of installing a session into a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInstall {
    Installed,
    /// A session already existed and was kept
    AlreadyPresent,
}

/// Score and restart bookkeeping that survive scene reloads.
#[derive(Resource, Debug)]
pub struct GameSession {
    score: u64,
    scene: String,
    restart: Option<TimerToken>,
}

impl GameSession {
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            score: 0,
            scene: scene.into(),
            restart: None,
        }
    }

    /// Install a session unless one is already live.
    pub fn install(world: &mut World, scene: impl Into<String>) -> SessionInstall {
        if world.contains_resource::<GameSession>() {
            warn!("A game session is already running; keeping the existing one");
            return SessionInstall::AlreadyPresent;
        }
        world.insert_resource(GameSession::new(scene));
        SessionInstall::Installed
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn scene(&self) -> &str {
        &self.scene
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(u64::from(amount));
        info!("Score: {}", self.score);
    }

    /// Start a fresh session: score back to zero, no restart pending.
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        if let Some(token) = self.restart.take() {
            scheduler.cancel(token);
        }
        self.score = 0;
    }

    pub fn restart_pending(&self) -> bool {
        self.restart.is_some()
    }

    /// Schedule a reload of the current scene. Returns false if one is
    /// already pending.
    pub fn game_over(&mut self, scheduler: &mut Scheduler, now: f32, delay: f32) -> bool {
        if self.restart.is_some() {
            return false;
        }
        info!("Game Over! Restarting in {delay}s...");
        self.restart = Some(scheduler.schedule(now, delay, TimerAction::RestartSession));
        true
    }

    fn take_restart(&mut self, token: TimerToken) -> bool {
        if self.restart == Some(token) {
            self.restart = None;
            true
        } else {
            false
        }
    }
}

/// On a restart press, reset the session and reload its scene right away.
pub fn start_new_session(
    input: Res<FrameInput>,
    mut session: ResMut<GameSession>,
    mut scheduler: ResMut<Scheduler>,
    mut reloads: EventWriter<ReloadSession>,
) {
    if !input.restart_pressed {
        return;
    }
    session.reset(&mut scheduler);
    info!("New session in scene '{}'", session.scene());
    reloads.send(ReloadSession {
        scene: session.scene().to_string(),
    });
}

/// Turn a due restart timer into a scene reload request.
pub fn request_scene_reload(
    mut fired: EventReader<TimerFired>,
    mut session: ResMut<GameSession>,
    mut reloads: EventWriter<ReloadSession>,
) {
    for event in fired.read() {
        if event.action != TimerAction::RestartSession || !session.take_restart(event.token) {
            continue;
        }
        info!("Reloading scene '{}'", session.scene());
        reloads.send(ReloadSession {
            scene: session.scene().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_keeps_the_first_session() {
        let mut world = World::new();
        assert_eq!(GameSession::install(&mut world, "first"), SessionInstall::Installed);
        world.resource_mut::<GameSession>().add_score(30);

        assert_eq!(
            GameSession::install(&mut world, "second"),
            SessionInstall::AlreadyPresent
        );
        let session = world.resource::<GameSession>();
        assert_eq!(session.scene(), "first");
        assert_eq!(session.score(), 30);
    }

    #[test]
    fn score_is_additive_in_any_order() {
        let mut forward = GameSession::new("s");
        let mut backward = GameSession::new("s");
        for amount in [5, 10, 25] {
            forward.add_score(amount);
        }
        for amount in [25, 10, 5] {
            backward.add_score(amount);
        }
        assert_eq!(forward.score(), 40);
        assert_eq!(forward.score(), backward.score());
    }

    #[test]
    fn game_over_schedules_a_single_restart() {
        let mut scheduler = Scheduler::default();
        let mut session = GameSession::new("s");
        assert!(session.game_over(&mut scheduler, 1.0, 0.5));
        assert!(!session.game_over(&mut scheduler, 1.1, 0.5));
        assert_eq!(scheduler.len(), 1);
        assert!(session.restart_pending());
    }

    #[test]
    fn reset_clears_score_and_pending_restart() {
        let mut scheduler = Scheduler::default();
        let mut session = GameSession::new("s");
        session.add_score(50);
        session.game_over(&mut scheduler, 0.0, 0.5);

        session.reset(&mut scheduler);
        assert_eq!(session.score(), 0);
        assert!(!session.restart_pending());
        assert!(scheduler.is_empty());
    }
}
