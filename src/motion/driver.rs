use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::platform::Scheduler;

/// Result of one transition: what to present (if anything changed) and how
/// long to wait before the next transition. `next: None` halts the machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<T> {
    pub output: Option<T>,
    pub next: Option<Duration>,
}

impl<T> Step<T> {
    pub fn emit(output: T, next: Duration) -> Self {
        Self {
            output: Some(output),
            next: Some(next),
        }
    }

    pub fn wait(next: Duration) -> Self {
        Self {
            output: None,
            next: Some(next),
        }
    }

    pub fn halt() -> Self {
        Self {
            output: None,
            next: None,
        }
    }
}

/// A timer-driven state machine with a single transition function.
pub trait Machine: 'static {
    type Output: 'static;

    fn step(&mut self) -> Step<Self::Output>;

    /// `false` makes [`TimerDriver::start`] a no-op.
    fn is_runnable(&self) -> bool {
        true
    }

    /// A static frame to present instead of animating.
    fn still_frame(&self) -> Option<Self::Output> {
        None
    }
}

/// Runs a [`Machine`] on a [`Scheduler`], holding at most one pending timer.
///
/// Every callback checks the disposal flag and the generation it was
/// scheduled under, so a timer that slips through after [`dispose`] or
/// [`reset`] cannot touch the machine or the sink.
///
/// [`dispose`]: TimerDriver::dispose
/// [`reset`]: TimerDriver::reset
pub struct TimerDriver<S: Scheduler, M: Machine> {
    inner: Rc<DriverInner<S, M>>,
}

struct DriverInner<S: Scheduler, M: Machine> {
    scheduler: S,
    machine: RefCell<M>,
    sink: Box<dyn Fn(M::Output)>,
    timer: RefCell<Option<S::Handle>>,
    started: Cell<bool>,
    disposed: Cell<bool>,
    generation: Cell<u64>,
}

impl<S: Scheduler, M: Machine> TimerDriver<S, M> {
    pub fn new(scheduler: S, machine: M, sink: impl Fn(M::Output) + 'static) -> Self {
        Self {
            inner: Rc::new(DriverInner {
                scheduler,
                machine: RefCell::new(machine),
                sink: Box::new(sink),
                timer: RefCell::new(None),
                started: Cell::new(false),
                disposed: Cell::new(false),
                generation: Cell::new(0),
            }),
        }
    }

    /// Starts ticking; the first transition runs after a zero delay.
    /// Calling it again while started does nothing.
    pub fn start(&self) {
        let inner = &self.inner;
        if inner.disposed.get() || inner.started.get() {
            return;
        }
        if !inner.machine.borrow().is_runnable() {
            log::debug!("timer driver: machine not runnable, not starting");
            return;
        }
        inner.started.set(true);

        let still = inner.machine.borrow().still_frame();
        if let Some(frame) = still {
            (inner.sink)(frame);
            return;
        }
        DriverInner::schedule(inner, Duration::ZERO);
    }

    /// Swaps in a fresh machine and cancels whatever was pending. The driver
    /// is left stopped.
    pub fn reset(&self, machine: M) {
        let inner = &self.inner;
        inner.cancel_pending();
        inner.generation.set(inner.generation.get() + 1);
        *inner.machine.borrow_mut() = machine;
        inner.started.set(false);
    }

    pub fn dispose(&self) {
        let inner = &self.inner;
        if inner.disposed.replace(true) {
            return;
        }
        inner.cancel_pending();
        inner.generation.set(inner.generation.get() + 1);
        log::debug!("timer driver disposed");
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.timer.borrow().is_some()
    }

    pub fn with_machine<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&self.inner.machine.borrow())
    }
}

impl<S: Scheduler, M: Machine> DriverInner<S, M> {
    fn schedule(this: &Rc<Self>, delay: Duration) {
        this.cancel_pending();
        let weak: Weak<Self> = Rc::downgrade(this);
        let generation = this.generation.get();
        let handle = this.scheduler.timeout(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Self::fire(&inner, generation);
                }
            }),
        );
        if handle.is_none() {
            log::warn!("timer driver: host refused to schedule a timer");
        }
        *this.timer.borrow_mut() = handle;
    }

    fn fire(this: &Rc<Self>, generation: u64) {
        if this.disposed.get() || this.generation.get() != generation {
            log::trace!("timer driver: ignoring stale callback");
            return;
        }
        // the handle that just fired
        this.timer.borrow_mut().take();

        let step = this.machine.borrow_mut().step();
        if let Some(output) = step.output {
            (this.sink)(output);
        }
        // the sink may have disposed or reset us
        if this.disposed.get() || this.generation.get() != generation {
            return;
        }
        match step.next {
            Some(delay) => Self::schedule(this, delay),
            None => log::debug!("timer driver: machine halted"),
        }
    }

    fn cancel_pending(&self) {
        let pending = self.timer.borrow_mut().take();
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler, M: Machine> Drop for DriverInner<S, M> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
