//! Scheduled Actions
//!
//! One-shot callbacks that fire after a delay measured in frame time.
//! Time only advances through `update`, so a paused or unticked action never
//! fires, and replaying the same frame deltas fires on the same frame.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::core::guid::{Guid, GuidSource};

/// A callback that runs once after a delay.
///
/// The delay is truncated to whole seconds. After the callback runs (or is
/// cancelled) the action is empty and further updates do nothing.
pub struct ScheduledAction<F = Box<dyn FnOnce()>> {
    guid: Guid,
    seconds_to_wait: f32,
    action: Option<F>,
    seconds_elapsed: f32,
    paused: bool,
}

impl<F: FnOnce()> ScheduledAction<F> {
    /// Empty action: has an id, never fires.
    pub fn new<G: GuidSource + ?Sized>(guids: &mut G) -> Self {
        Self {
            guid: guids.generate(),
            seconds_to_wait: 0.0,
            action: None,
            seconds_elapsed: 0.0,
            paused: false,
        }
    }

    /// Run `action` once `delay` of un-paused frame time has passed.
    pub fn with_action<G: GuidSource + ?Sized>(guids: &mut G, delay: Duration, action: F) -> Self {
        Self {
            guid: guids.generate(),
            seconds_to_wait: delay.as_secs() as f32,
            action: Some(action),
            seconds_elapsed: 0.0,
            paused: false,
        }
    }

    /// Identifier assigned at construction.
    pub fn guid(&self) -> Guid {
        self.guid
    }

    /// Drop the callback without running it.
    pub fn cancel(&mut self) {
        if self.action.take().is_some() {
            debug!(guid = %self.guid, "scheduled action cancelled");
        }
    }

    /// Stop the countdown.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue the countdown.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the countdown is stopped.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the callback is still waiting to run.
    pub fn is_pending(&self) -> bool {
        self.action.is_some()
    }

    /// Seconds of un-paused time counted so far.
    pub fn seconds_elapsed(&self) -> f32 {
        self.seconds_elapsed
    }

    /// Advance the countdown. Returns true if the callback ran this call.
    pub fn update(&mut self, delta_seconds: f32) -> bool {
        if self.paused || self.action.is_none() {
            return false;
        }

        self.seconds_elapsed += delta_seconds;
        if self.seconds_elapsed < self.seconds_to_wait {
            return false;
        }

        match self.action.take() {
            Some(action) => {
                debug!(guid = %self.guid, elapsed = self.seconds_elapsed, "scheduled action fired");
                action();
                true
            }
            None => false,
        }
    }
}

impl<F> std::fmt::Debug for ScheduledAction<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledAction")
            .field("guid", &self.guid)
            .field("seconds_to_wait", &self.seconds_to_wait)
            .field("seconds_elapsed", &self.seconds_elapsed)
            .field("pending", &self.action.is_some())
            .field("paused", &self.paused)
            .finish()
    }
}

// =============================================================================
// SCHEDULER
// =============================================================================

/// A set of scheduled actions, addressed by id.
///
/// Actions are updated in id order and removed once they fire or are
/// cancelled.
pub struct Scheduler<G, F = Box<dyn FnOnce()>> {
    guids: G,
    actions: BTreeMap<Guid, ScheduledAction<F>>,
}

impl<G: GuidSource, F: FnOnce()> Scheduler<G, F> {
    /// Empty scheduler drawing ids from `guids`.
    pub fn new(guids: G) -> Self {
        Self {
            guids,
            actions: BTreeMap::new(),
        }
    }

    /// Schedule `action` after `delay`. Returns its id.
    pub fn schedule(&mut self, delay: Duration, action: F) -> Guid {
        let scheduled = ScheduledAction::with_action(&mut self.guids, delay, action);
        let guid = scheduled.guid();
        self.actions.insert(guid, scheduled);
        guid
    }

    /// Cancel a pending action. Returns false if the id is unknown.
    pub fn cancel(&mut self, guid: Guid) -> bool {
        match self.actions.remove(&guid) {
            Some(mut scheduled) => {
                scheduled.cancel();
                true
            }
            None => false,
        }
    }

    /// Pause a pending action. Returns false if the id is unknown.
    pub fn pause(&mut self, guid: Guid) -> bool {
        self.actions.get_mut(&guid).map(ScheduledAction::pause).is_some()
    }

    /// Resume a paused action. Returns false if the id is unknown.
    pub fn resume(&mut self, guid: Guid) -> bool {
        self.actions.get_mut(&guid).map(ScheduledAction::resume).is_some()
    }

    /// Whether `guid` is still waiting to fire.
    pub fn is_pending(&self, guid: Guid) -> bool {
        self.actions.contains_key(&guid)
    }

    /// Advance every action. Returns the number that fired.
    pub fn update(&mut self, delta_seconds: f32) -> usize {
        let mut fired = 0;
        for scheduled in self.actions.values_mut() {
            if scheduled.update(delta_seconds) {
                fired += 1;
            }
        }
        self.actions.retain(|_, scheduled| scheduled.is_pending());
        fired
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use crate::core::guid::SequentialGuids;
    use crate::testing::ScriptedGuids;

    fn one() -> Guid {
        Guid::from_str_bytes("0000000000000001")
    }

    #[test]
    fn test_scheduled_action_takes_generated_guid() {
        let mut guids = ScriptedGuids::new([one()]);
        let action: ScheduledAction = ScheduledAction::new(&mut guids);
        assert_eq!(action.guid(), one());
        assert_eq!(guids.generated(), 1);
        assert!(!action.is_pending());
    }

    #[test]
    fn test_fires_once_at_end_of_delay() {
        let mut guids = ScriptedGuids::new([one()]);
        let x = Cell::new(0);
        let mut action = ScheduledAction::with_action(&mut guids, Duration::from_secs(1), || x.set(42));

        assert!(!action.update(0.5));
        assert_eq!(x.get(), 0);
        assert!(action.update(0.5));
        assert_eq!(x.get(), 42);

        x.set(10);
        assert!(!action.update(2.0));
        assert_eq!(x.get(), 10);
        assert!(!action.is_pending());
    }

    #[test]
    fn test_cancel() {
        let mut guids = ScriptedGuids::new([one()]);
        let x = Cell::new(0);
        let mut action = ScheduledAction::with_action(&mut guids, Duration::from_secs(1), || x.set(42));

        action.update(0.5);
        action.cancel();
        action.update(0.5);
        assert_eq!(x.get(), 0);
        assert!(!action.is_pending());
    }

    #[test]
    fn test_pause() {
        let mut guids = ScriptedGuids::new([one()]);
        let x = Cell::new(0);
        let mut action = ScheduledAction::with_action(&mut guids, Duration::from_secs(1), || x.set(42));

        action.update(0.5);
        action.pause();
        assert!(action.is_paused());
        action.update(0.5);
        assert_eq!(x.get(), 0);
        assert_eq!(action.seconds_elapsed(), 0.5);
    }

    #[test]
    fn test_resume() {
        let mut guids = ScriptedGuids::new([one()]);
        let x = Cell::new(0);
        let mut action = ScheduledAction::with_action(&mut guids, Duration::from_secs(1), || x.set(42));

        action.update(0.5);
        action.pause();
        action.update(0.5);
        assert_eq!(x.get(), 0);
        action.resume();
        action.update(0.5);
        assert_eq!(x.get(), 42);
    }

    #[test]
    fn test_delay_truncates_to_whole_seconds() {
        let mut guids = SequentialGuids::starting_at(1);
        let fired = Cell::new(false);
        let mut action = ScheduledAction::with_action(&mut guids, Duration::from_millis(1900), || fired.set(true));

        action.update(0.5);
        assert!(!fired.get());
        action.update(0.5);
        assert!(fired.get());
    }

    #[test]
    fn test_scheduler_fires_and_prunes() {
        let hits = Rc::new(Cell::new(0));
        let mut scheduler: Scheduler<SequentialGuids> = Scheduler::new(SequentialGuids::starting_at(1));

        let short = {
            let hits = Rc::clone(&hits);
            scheduler.schedule(Duration::from_secs(1), Box::new(move || hits.set(hits.get() + 1)))
        };
        let long = {
            let hits = Rc::clone(&hits);
            scheduler.schedule(Duration::from_secs(3), Box::new(move || hits.set(hits.get() + 10)))
        };
        assert_ne!(short, long);
        assert_eq!(scheduler.len(), 2);

        assert_eq!(scheduler.update(1.0), 1);
        assert_eq!(hits.get(), 1);
        assert!(!scheduler.is_pending(short));
        assert!(scheduler.is_pending(long));

        assert_eq!(scheduler.update(1.0), 0);
        assert_eq!(scheduler.update(1.0), 1);
        assert_eq!(hits.get(), 11);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_scheduler_cancel_and_pause() {
        let hits = Rc::new(Cell::new(0));
        let mut scheduler: Scheduler<SequentialGuids> = Scheduler::new(SequentialGuids::starting_at(1));
        let make = |amount: i32| {
            let hits = Rc::clone(&hits);
            Box::new(move || hits.set(hits.get() + amount)) as Box<dyn FnOnce()>
        };

        let cancelled = scheduler.schedule(Duration::from_secs(1), make(1));
        let paused = scheduler.schedule(Duration::from_secs(1), make(100));

        assert!(scheduler.cancel(cancelled));
        assert!(!scheduler.cancel(cancelled));
        assert!(scheduler.pause(paused));

        assert_eq!(scheduler.update(5.0), 0);
        assert_eq!(hits.get(), 0);

        assert!(scheduler.resume(paused));
        assert_eq!(scheduler.update(1.0), 1);
        assert_eq!(hits.get(), 100);
        assert!(!scheduler.pause(paused));
    }
}
