// src/app/scheduler.rs
//! Rotator timers backed by abortable iced tasks

use std::collections::HashMap;
use std::time::Duration;

use iced::Task;
use iced::task::Handle;

use crate::app::message::Message;
use crate::features::rotator::{Scheduler, TimerId};

struct LiveTimer {
    handle: Handle,
    repeating: bool,
}

/// Turns rotator timer requests into tasks.
///
/// Scheduling only queues a task; [`TaskScheduler::take_tasks`] hands the
/// queued tasks to the runtime at the end of each update. Every firing comes
/// back as [`Message::TimerFired`].
#[derive(Default)]
pub struct TaskScheduler {
    next_id: u64,
    live: HashMap<TimerId, LiveTimer>,
    pending: Vec<Task<Message>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the tasks scheduled since the last call
    pub fn take_tasks(&mut self) -> Task<Message> {
        if self.pending.is_empty() {
            return Task::none();
        }
        Task::batch(std::mem::take(&mut self.pending))
    }

    /// Bookkeeping after a firing: one-shot timers are done
    pub fn fired(&mut self, id: TimerId) {
        if self.live.get(&id).is_some_and(|timer| !timer.repeating) {
            self.live.remove(&id);
        }
    }

    /// Number of timers that may still fire
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.live.len()
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId::new(self.next_id)
    }

    fn track(&mut self, id: TimerId, task: Task<Message>, repeating: bool) -> TimerId {
        let (task, handle) = task.abortable();
        self.live.insert(id, LiveTimer { handle, repeating });
        self.pending.push(task);
        id
    }
}

impl Scheduler for TaskScheduler {
    fn schedule_once(&mut self, after: Duration) -> TimerId {
        let id = self.allocate();
        // Sleep is created lazily so it is bound to the executor's runtime
        let task = Task::perform(async move { tokio::time::sleep(after).await }, move |_| {
            Message::TimerFired(id)
        });
        self.track(id, task, false)
    }

    fn schedule_repeating(&mut self, every: Duration) -> TimerId {
        let id = self.allocate();
        let task = Task::run(
            async_stream::stream! {
                let start = tokio::time::Instant::now() + every;
                let mut ticker = tokio::time::interval_at(start, every);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    yield ();
                }
            },
            move |_| Message::TimerFired(id),
        );
        self.track(id, task, true)
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(timer) = self.live.remove(&id) {
            timer.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut scheduler = TaskScheduler::new();
        let a = scheduler.schedule_once(Duration::from_millis(10));
        let b = scheduler.schedule_repeating(Duration::from_secs(1));
        let c = scheduler.schedule_once(Duration::from_millis(10));
        assert!(a != b && b != c && a != c);
        assert_eq!(scheduler.live(), 3);
    }

    #[test]
    fn cancel_and_fire_release_timers() {
        let mut scheduler = TaskScheduler::new();
        let once = scheduler.schedule_once(Duration::from_millis(10));
        let every = scheduler.schedule_repeating(Duration::from_secs(1));

        scheduler.fired(once);
        scheduler.fired(every);
        assert_eq!(scheduler.live(), 1, "Repeating timer survives a firing");

        scheduler.cancel(every);
        scheduler.cancel(every);
        assert_eq!(scheduler.live(), 0);
    }

    #[test]
    fn take_tasks_drains_queue() {
        let mut scheduler = TaskScheduler::new();
        scheduler.schedule_once(Duration::from_millis(10));
        let _ = scheduler.take_tasks();
        assert!(scheduler.pending.is_empty());
    }
}
