//! Deferred-callback queue driven by the frame tick.
//!
//! Cosmetic and session timers (hit-flash revert, game-over restart) are
//! scheduled here instead of running as free-standing coroutines. Each entry
//! carries a token; cancelling the token drops the entry before it fires.

use bevy::prelude::*;

/// Handle to a scheduled entry, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// What happens when a scheduled entry comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Restore an entity's base tint after a hit flash
    RevertFlash(Entity),
    /// Reload the current scene after game over
    RestartSession,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    fire_at: f32,
    token: TimerToken,
    action: TimerAction,
}

/// Timer queue owned by the simulation driver.
#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    next_token: u64,
    entries: Vec<Scheduled>,
}

impl Scheduler {
    /// Schedule `action` to fire once `now + delay` has been reached.
    pub fn schedule(&mut self, now: f32, delay: f32, action: TimerAction) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.push(Scheduled {
            fire_at: now + delay.max(0.0),
            token,
            action,
        });
        token
    }

    /// Drop a pending entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.token != token);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every entry due at `now`, earliest first.
    pub fn drain_due(&mut self, now: f32) -> Vec<(TimerToken, TimerAction)> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.entries.retain(|entry| {
            if entry.fire_at <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        due.into_iter().map(|entry| (entry.token, entry.action)).collect()
    }
}

/// Sent when a scheduled entry comes due.
#[derive(Event, Debug, Clone, Copy)]
pub struct TimerFired {
    pub token: TimerToken,
    pub action: TimerAction,
}

/// Drain due entries into `TimerFired` events for the owning plugins.
pub fn fire_due_timers(
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    mut fired: EventWriter<TimerFired>,
) {
    for (token, action) in scheduler.drain_due(time.elapsed_secs()) {
        fired.send(TimerFired { token, action });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_fire_only_once_due() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(1.0, 0.5, TimerAction::RestartSession);

        assert!(scheduler.drain_due(1.4).is_empty());
        let due = scheduler.drain_due(1.5);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1, TimerAction::RestartSession);
        assert!(scheduler.drain_due(10.0).is_empty());
    }

    #[test]
    fn cancelled_entries_never_fire() {
        let mut scheduler = Scheduler::default();
        let entity = Entity::from_raw(7);
        let first = scheduler.schedule(0.0, 0.2, TimerAction::RevertFlash(entity));
        assert!(scheduler.cancel(first));
        assert!(!scheduler.cancel(first));
        let second = scheduler.schedule(0.1, 0.2, TimerAction::RevertFlash(entity));

        let due = scheduler.drain_due(0.25);
        assert!(due.is_empty());
        let due = scheduler.drain_due(0.3);
        assert_eq!(due, vec![(second, TimerAction::RevertFlash(entity))]);
    }

    #[test]
    fn due_entries_come_out_in_time_order() {
        let mut scheduler = Scheduler::default();
        let late = scheduler.schedule(0.0, 0.4, TimerAction::RestartSession);
        let early = scheduler.schedule(0.0, 0.1, TimerAction::RevertFlash(Entity::from_raw(1)));

        let order: Vec<TimerToken> = scheduler.drain_due(1.0).into_iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec![early, late]);
    }
}
