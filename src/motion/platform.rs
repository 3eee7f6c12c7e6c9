use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

/// Timer and animation-frame primitives of the host.
///
/// A `None` handle means the host refused to schedule the task; callers treat
/// that as "nothing pending".
pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    fn timeout(&self, delay: Duration, task: Task) -> Option<Self::Handle>;
    fn frame(&self, task: Task) -> Option<Self::Handle>;
    fn cancel(&self, handle: Self::Handle);
}

/// Deterministic scheduler with a manually advanced clock.
///
/// Timers fire in due order (ties in scheduling order) when [`advance`] moves
/// the clock past them; frame callbacks queue until [`run_frame`].
///
/// [`advance`]: ManualScheduler::advance
/// [`run_frame`]: ManualScheduler::run_frame
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<(Duration, u64), Task>,
    frames: Vec<(u64, Task)>,
    ignore_cancel: bool,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose `cancel` is recorded but never removes anything, as
    /// if every callback had already been queued by the host when torn down.
    pub fn without_cancellation() -> Self {
        let scheduler = Self::default();
        scheduler.inner.borrow_mut().ignore_cancel = true;
        scheduler
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn cancelled(&self) -> usize {
        self.inner.borrow().cancelled
    }

    /// Delay until the earliest pending timer, relative to now.
    pub fn next_delay(&self) -> Option<Duration> {
        let inner = self.inner.borrow();
        inner
            .timers
            .keys()
            .next()
            .map(|(due, _)| due.saturating_sub(inner.now))
    }

    /// Moves the clock forward, firing every timer that falls due on the way,
    /// including timers scheduled by the timers being fired.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.borrow().now + by;
        loop {
            let task = {
                let mut inner = self.inner.borrow_mut();
                let first = inner.timers.keys().next().copied();
                match first {
                    Some(key) if key.0 <= target => {
                        inner.now = key.0;
                        inner.timers.remove(&key)
                    }
                    _ => {
                        inner.now = target;
                        None
                    }
                }
            };
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }

    /// Fires the earliest timer regardless of its due time.
    pub fn fire_next(&self) -> bool {
        let task = {
            let mut inner = self.inner.borrow_mut();
            let key = inner.timers.keys().next().copied();
            key.and_then(|key| {
                inner.now = inner.now.max(key.0);
                inner.timers.remove(&key)
            })
        };
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Runs the callbacks queued for the current frame. Frames requested while
    /// running land in the next frame.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut self.inner.borrow_mut().frames);
        let count = frames.len();
        for (_, task) in frames {
            task();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn timeout(&self, delay: Duration, task: Task) -> Option<u64> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due = inner.now + delay;
        inner.timers.insert((due, id), task);
        Some(id)
    }

    fn frame(&self, task: Task) -> Option<u64> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.frames.push((id, task));
        Some(id)
    }

    fn cancel(&self, handle: u64) {
        let mut inner = self.inner.borrow_mut();
        inner.cancelled += 1;
        if inner.ignore_cancel {
            return;
        }
        inner.timers.retain(|(_, id), _| *id != handle);
        inner.frames.retain(|(id, _)| *id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_timers_fire_in_due_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(30, "c"), (10, "a"), (20, "b")] {
            let log = log.clone();
            scheduler.timeout(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(name)),
            );
        }

        scheduler.advance(Duration::from_millis(15));
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(scheduler.next_delay(), Some(Duration::from_millis(5)));

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now(), Duration::from_millis(115));
    }

    #[test]
    fn test_nested_timers_fire_within_one_advance() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));

        let inner_scheduler = scheduler.clone();
        let inner_hits = hits.clone();
        scheduler.timeout(
            Duration::from_millis(10),
            Box::new(move || {
                inner_hits.set(inner_hits.get() + 1);
                let hits = inner_hits.clone();
                inner_scheduler.timeout(
                    Duration::from_millis(10),
                    Box::new(move || hits.set(hits.get() + 1)),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(20));
        assert_eq!(hits.get(), 2);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn test_cancel_removes_timer_and_frame() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let timer = scheduler
            .timeout(Duration::ZERO, Box::new(move || h.set(h.get() + 1)))
            .unwrap();
        let h = hits.clone();
        let frame = scheduler
            .frame(Box::new(move || h.set(h.get() + 1)))
            .unwrap();

        scheduler.cancel(timer);
        scheduler.cancel(frame);
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(scheduler.run_frame(), 0);
        assert_eq!(hits.get(), 0);
        assert_eq!(scheduler.cancelled(), 2);
    }

    #[test]
    fn test_without_cancellation_keeps_callbacks() {
        let scheduler = ManualScheduler::without_cancellation();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let timer = scheduler
            .timeout(Duration::ZERO, Box::new(move || h.set(h.get() + 1)))
            .unwrap();
        scheduler.cancel(timer);

        assert!(scheduler.fire_next());
        assert_eq!(hits.get(), 1);
    }
}
