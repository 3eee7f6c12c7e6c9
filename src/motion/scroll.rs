use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::platform::Scheduler;

/// How scroll/resize notifications reach the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Throttle {
    /// Every notification runs the callback.
    None,
    /// Notifications are coalesced into at most one callback per frame.
    #[default]
    AnimationFrame,
}

/// Receives scroll and resize notifications for one hook instance.
///
/// The callback runs once synchronously on construction so the first paint
/// never uses defaults. After [`dispose`] nothing runs again, including a
/// frame callback that was already queued.
///
/// [`dispose`]: ScrollListener::dispose
pub struct ScrollListener<S: Scheduler> {
    inner: Rc<ListenerInner<S>>,
}

struct ListenerInner<S: Scheduler> {
    scheduler: S,
    throttle: Throttle,
    callback: RefCell<Box<dyn FnMut()>>,
    pending: RefCell<Option<S::Handle>>,
    disposed: Cell<bool>,
}

impl<S: Scheduler> ScrollListener<S> {
    pub fn new(scheduler: S, throttle: Throttle, callback: impl FnMut() + 'static) -> Self {
        let listener = Self {
            inner: Rc::new(ListenerInner {
                scheduler,
                throttle,
                callback: RefCell::new(Box::new(callback)),
                pending: RefCell::new(None),
                disposed: Cell::new(false),
            }),
        };
        listener.inner.run();
        listener
    }

    /// Called for every scroll or resize event.
    pub fn notify(&self) {
        let inner = &self.inner;
        if inner.disposed.get() {
            return;
        }
        match inner.throttle {
            Throttle::None => inner.run(),
            Throttle::AnimationFrame => {
                if inner.pending.borrow().is_some() {
                    return;
                }
                let weak: Weak<ListenerInner<S>> = Rc::downgrade(inner);
                let handle = inner.scheduler.frame(Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.pending.borrow_mut().take();
                        inner.run();
                    }
                }));
                match handle {
                    Some(handle) => *inner.pending.borrow_mut() = Some(handle),
                    None => {
                        log::warn!("scroll listener: frame request refused, running inline");
                        inner.run();
                    }
                }
            }
        }
    }

    pub fn is_frame_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        self.inner.cancel_pending();
        log::debug!("scroll listener disposed");
    }
}

impl<S: Scheduler> ListenerInner<S> {
    fn run(&self) {
        if self.disposed.get() {
            return;
        }
        let mut callback = self.callback.borrow_mut();
        (*callback)();
    }

    fn cancel_pending(&self) {
        let pending = self.pending.borrow_mut().take();
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> Drop for ListenerInner<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::platform::ManualScheduler;

    fn counting(
        scheduler: &ManualScheduler,
        throttle: Throttle,
    ) -> (ScrollListener<ManualScheduler>, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let listener = ScrollListener::new(scheduler.clone(), throttle, move || c.set(c.get() + 1));
        (listener, calls)
    }

    #[test]
    fn test_initial_computation_is_synchronous() {
        let scheduler = ManualScheduler::new();
        let (_listener, calls) = counting(&scheduler, Throttle::AnimationFrame);
        assert_eq!(calls.get(), 1);
        assert_eq!(scheduler.pending_frames(), 0);
    }

    #[test]
    fn test_unthrottled_runs_every_event() {
        let scheduler = ManualScheduler::new();
        let (listener, calls) = counting(&scheduler, Throttle::None);

        for _ in 0..5 {
            listener.notify();
        }
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn test_frame_coalesces_bursts() {
        let scheduler = ManualScheduler::new();
        let (listener, calls) = counting(&scheduler, Throttle::AnimationFrame);

        for _ in 0..10 {
            listener.notify();
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(scheduler.pending_frames(), 1);
        assert!(listener.is_frame_pending());

        scheduler.run_frame();
        assert_eq!(calls.get(), 2);
        assert!(!listener.is_frame_pending());

        // next burst gets its own frame
        listener.notify();
        listener.notify();
        scheduler.run_frame();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_dispose_cancels_pending_frame() {
        let scheduler = ManualScheduler::new();
        let (listener, calls) = counting(&scheduler, Throttle::AnimationFrame);

        listener.notify();
        listener.dispose();
        assert_eq!(scheduler.pending_frames(), 0);

        listener.notify();
        scheduler.run_frame();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_stale_frame_after_dispose_is_ignored() {
        let scheduler = ManualScheduler::without_cancellation();
        let (listener, calls) = counting(&scheduler, Throttle::AnimationFrame);

        listener.notify();
        listener.dispose();
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_repeated_mount_cycles_do_not_leak() {
        let scheduler = ManualScheduler::new();
        for _ in 0..100 {
            let (listener, _) = counting(&scheduler, Throttle::AnimationFrame);
            listener.notify();
            listener.dispose();
        }
        assert_eq!(scheduler.pending_frames(), 0);
    }
}
