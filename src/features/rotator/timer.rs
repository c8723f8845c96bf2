//! Timer handles and the scheduling seam

use std::time::Duration;

/// Opaque handle for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Source of one-shot and recurring timers.
///
/// Firings are delivered back to the rotator through
/// [`super::Rotator::on_timer`] with the id returned here. Cancelling an id
/// that already fired or was already cancelled must be harmless.
pub trait Scheduler {
    /// Fire once after `after`
    fn schedule_once(&mut self, after: Duration) -> TimerId;

    /// Fire every `every`, first firing one interval from now
    fn schedule_repeating(&mut self, every: Duration) -> TimerId;

    /// Stop a timer from firing again
    fn cancel(&mut self, id: TimerId);
}

/// Deterministic virtual-time scheduler for driving the rotator in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    id: TimerId,
    due: Duration,
    every: Option<Duration>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that can still fire
    pub fn live(&self) -> usize {
        self.timers.len()
    }

    /// Number of recurring timers that can still fire
    pub fn live_repeating(&self) -> usize {
        self.timers.iter().filter(|t| t.every.is_some()).count()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to it.
    /// Recurring timers are re-armed one interval later.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (pos, timer) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(pos, t)| (pos, *t))?;

        self.now = timer.due;
        match timer.every {
            Some(every) => self.timers[pos].due = timer.due + every,
            None => {
                self.timers.remove(pos);
            }
        }
        Some(timer.id)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = now;
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId::new(self.next_id)
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, after: Duration) -> TimerId {
        let id = self.allocate();
        self.timers.push(PendingTimer {
            id,
            due: self.now + after,
            every: None,
        });
        id
    }

    fn schedule_repeating(&mut self, every: Duration) -> TimerId {
        let id = self.allocate();
        self.timers.push(PendingTimer {
            id,
            due: self.now + every,
            every: Some(every),
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.schedule_once(Duration::from_millis(300));
        let early = scheduler.schedule_once(Duration::from_millis(100));

        let until = Duration::from_secs(1);
        assert_eq!(scheduler.pop_due(until), Some(early));
        assert_eq!(scheduler.pop_due(until), Some(late));
        assert_eq!(scheduler.pop_due(until), None);
        assert_eq!(scheduler.now(), Duration::from_millis(300));
    }

    #[test]
    fn repeating_timer_rearms_until_cancelled() {
        let mut scheduler = ManualScheduler::new();
        let id = scheduler.schedule_repeating(Duration::from_secs(2));

        let until = Duration::from_secs(5);
        assert_eq!(scheduler.pop_due(until), Some(id));
        assert_eq!(scheduler.pop_due(until), Some(id));
        assert_eq!(scheduler.pop_due(until), None, "third firing is at 6s");

        scheduler.cancel(id);
        assert_eq!(scheduler.live(), 0);
        scheduler.cancel(id);
        assert_eq!(scheduler.live(), 0, "double cancel is harmless");
    }
}
