use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Delayed redraw requests for one window.
///
/// Widgets post a deadline and keep the returned [`TimerHandle`]; the runtime
/// sleeps until [`next_deadline`](Self::next_deadline) and redraws once
/// [`take_due`](Self::take_due) reports that something fired.
///
/// Cloning is cheap and shares the same queue. The scheduler is confined to
/// the event-loop thread.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<TimerQueue>>,
}

#[derive(Debug, Default)]
struct TimerQueue {
    next_id: u64,
    pending: Vec<Pending>,
}

#[derive(Debug, Copy, Clone)]
struct Pending {
    id: u64,
    deadline: Instant,
}

impl TimerQueue {
    fn remove(&mut self, id: u64) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    fn contains(&self, id: u64) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a redraw `delay` from now.
    #[must_use = "dropping the handle cancels the request"]
    pub fn post_delayed(&self, delay: Duration) -> TimerHandle {
        self.post_at(Instant::now() + delay)
    }

    /// Requests a redraw at `deadline`.
    #[must_use = "dropping the handle cancels the request"]
    pub fn post_at(&self, deadline: Instant) -> TimerHandle {
        let mut q = self.queue.borrow_mut();
        let id = q.next_id;
        q.next_id = q.next_id.wrapping_add(1);
        q.pending.push(Pending { id, deadline });

        TimerHandle { id, deadline, queue: Rc::downgrade(&self.queue) }
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.borrow().pending.iter().map(|p| p.deadline).min()
    }

    /// Removes every request due at or before `now` and returns how many fired.
    pub fn take_due(&self, now: Instant) -> usize {
        let mut q = self.queue.borrow_mut();
        let before = q.pending.len();
        q.pending.retain(|p| p.deadline > now);
        before - q.pending.len()
    }

    /// Number of requests still waiting.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }
}

/// Owner's side of a posted redraw request.
///
/// Dropping the handle cancels the request if it has not fired yet. A handle
/// that outlives its [`Scheduler`] is inert.
#[derive(Debug)]
pub struct TimerHandle {
    id: u64,
    deadline: Instant,
    queue: Weak<RefCell<TimerQueue>>,
}

impl TimerHandle {
    /// When the request is (or was) due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// `true` while the request is queued and has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|q| q.borrow().contains(self.id))
    }

    /// Withdraws the request. Returns `true` if it was still pending.
    pub fn cancel(self) -> bool {
        self.withdraw()
    }

    fn withdraw(&self) -> bool {
        match self.queue.upgrade() {
            Some(q) => q.borrow_mut().remove(self.id),
            None => false,
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.withdraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_then_fire() {
        let sched = Scheduler::new();
        let t0 = Instant::now();
        let handle = sched.post_at(t0 + Duration::from_millis(1000));

        assert_eq!(sched.next_deadline(), Some(t0 + Duration::from_millis(1000)));
        assert_eq!(sched.take_due(t0 + Duration::from_millis(999)), 0);
        assert!(handle.is_pending());

        assert_eq!(sched.take_due(t0 + Duration::from_millis(1000)), 1);
        assert!(!handle.is_pending());
        assert_eq!(sched.next_deadline(), None);
    }

    #[test]
    fn cancel_removes_request() {
        let sched = Scheduler::new();
        let handle = sched.post_delayed(Duration::from_secs(1));
        assert_eq!(sched.pending(), 1);
        assert!(handle.cancel());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn drop_cancels_request() {
        let sched = Scheduler::new();
        {
            let _handle = sched.post_delayed(Duration::from_secs(1));
            assert_eq!(sched.pending(), 1);
        }
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn dropping_a_fired_handle_leaves_others_alone() {
        let sched = Scheduler::new();
        let t0 = Instant::now();
        let early = sched.post_at(t0);
        let late = sched.post_at(t0 + Duration::from_secs(1));

        assert_eq!(sched.take_due(t0), 1);
        drop(early);
        assert_eq!(sched.pending(), 1);
        assert!(late.is_pending());
    }

    #[test]
    fn replacing_a_handle_keeps_one_request() {
        let sched = Scheduler::new();
        let mut slot = Some(sched.post_delayed(Duration::from_secs(1)));
        for _ in 0..5 {
            slot = Some(sched.post_delayed(Duration::from_secs(1)));
        }
        assert!(slot.is_some());
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn handle_outliving_scheduler_is_inert() {
        let sched = Scheduler::new();
        let handle = sched.post_delayed(Duration::from_secs(1));
        drop(sched);
        assert!(!handle.is_pending());
        assert!(!handle.cancel());
    }

    #[test]
    fn next_deadline_is_earliest() {
        let sched = Scheduler::new();
        let t0 = Instant::now();
        let _a = sched.post_at(t0 + Duration::from_secs(3));
        let _b = sched.post_at(t0 + Duration::from_secs(1));
        let _c = sched.post_at(t0 + Duration::from_secs(2));
        assert_eq!(sched.next_deadline(), Some(t0 + Duration::from_secs(1)));
    }
}
