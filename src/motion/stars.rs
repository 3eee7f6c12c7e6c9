use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::driver::{Machine, Step, TimerDriver};
use super::platform::Scheduler;

pub const SPAWN_INTERVAL: Duration = Duration::from_millis(1500);
/// Grace period after a star's fall before it is removed.
pub const CLEANUP_GRACE: Duration = Duration::from_millis(500);
/// Viewports this narrow (CSS px, inclusive) get no star field.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// One falling star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSpec {
    pub id: u64,
    /// Horizontal position, percent of container width.
    pub left_pct: f64,
    pub duration: Duration,
    pub width: f64,
    pub height: f64,
}

impl StarSpec {
    /// Maps four uniform samples in `0..1` onto position, fall duration
    /// (10–30s), width (4–10px) and height (10–20px).
    pub fn from_samples(id: u64, samples: [f64; 4]) -> Self {
        let [x, d, w, h] = samples.map(|s| s.clamp(0.0, 1.0));
        Self {
            id,
            left_pct: x * 100.0,
            duration: Duration::from_secs_f64(10.0 + d * 20.0),
            width: 4.0 + w * 6.0,
            height: 10.0 + h * 10.0,
        }
    }

    /// Time until the star can be dropped from the field.
    pub fn lifetime(&self) -> Duration {
        self.duration + CLEANUP_GRACE
    }
}

/// Emits a star immediately and then once per [`SPAWN_INTERVAL`].
pub struct StarEmitter {
    sample: Box<dyn FnMut() -> f64>,
    next_id: u64,
    enabled: bool,
}

impl StarEmitter {
    pub fn new(sample: impl FnMut() -> f64 + 'static) -> Self {
        Self {
            sample: Box::new(sample),
            next_id: 0,
            enabled: true,
        }
    }

    /// Narrow viewports and reduced motion get no stars.
    pub fn with_layout(mut self, is_mobile: bool, reduced_motion: bool) -> Self {
        self.enabled = !is_mobile && !reduced_motion;
        self
    }
}

impl Machine for StarEmitter {
    type Output = StarSpec;

    fn step(&mut self) -> Step<StarSpec> {
        let samples = [(); 4].map(|_| (self.sample)());
        let star = StarSpec::from_samples(self.next_id, samples);
        self.next_id += 1;
        Step::emit(star, SPAWN_INTERVAL)
    }

    fn is_runnable(&self) -> bool {
        self.enabled
    }
}

/// The stars currently falling. Owns the emitter's driver and one expiry
/// timer per star; `publish` receives the full list after every change.
pub struct StarField<S: Scheduler> {
    driver: TimerDriver<S, StarEmitter>,
    state: Rc<FieldState<S>>,
}

struct FieldState<S: Scheduler> {
    scheduler: S,
    stars: RefCell<Vec<StarSpec>>,
    expiries: RefCell<BTreeMap<u64, S::Handle>>,
    /// Bumped on every clear; expiry callbacks from an older epoch are stale.
    epoch: Cell<u64>,
    publish: Box<dyn Fn(Vec<StarSpec>)>,
}

impl<S: Scheduler> StarField<S> {
    pub fn new(scheduler: S, emitter: StarEmitter, publish: impl Fn(Vec<StarSpec>) + 'static) -> Self {
        let state = Rc::new(FieldState {
            scheduler: scheduler.clone(),
            stars: RefCell::new(Vec::new()),
            expiries: RefCell::new(BTreeMap::new()),
            epoch: Cell::new(0),
            publish: Box::new(publish),
        });
        let weak = Rc::downgrade(&state);
        let driver = TimerDriver::new(scheduler, emitter, move |star: StarSpec| {
            if let Some(state) = weak.upgrade() {
                FieldState::add(&state, star);
            }
        });
        Self { driver, state }
    }

    pub fn start(&self) {
        self.driver.start();
    }

    /// Drops every star, cancels their expiries and restarts with `emitter`.
    pub fn reset(&self, emitter: StarEmitter) {
        self.driver.reset(emitter);
        self.state.clear();
        self.state.publish();
        self.driver.start();
    }

    pub fn dispose(&self) {
        self.driver.dispose();
        self.state.clear();
    }

    pub fn stars(&self) -> Vec<StarSpec> {
        self.state.stars.borrow().clone()
    }

    pub fn pending_expiries(&self) -> usize {
        self.state.expiries.borrow().len()
    }
}

impl<S: Scheduler> FieldState<S> {
    fn add(this: &Rc<Self>, star: StarSpec) {
        this.stars.borrow_mut().push(star);
        this.publish();

        let weak: Weak<Self> = Rc::downgrade(this);
        let epoch = this.epoch.get();
        let handle = this.scheduler.timeout(
            star.lifetime(),
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    state.expire(star.id, epoch);
                }
            }),
        );
        match handle {
            Some(handle) => {
                this.expiries.borrow_mut().insert(star.id, handle);
            }
            None => log::warn!("star field: couldn't schedule expiry of star {}", star.id),
        }
    }

    fn expire(&self, id: u64, epoch: u64) {
        if self.epoch.get() != epoch {
            log::trace!("star field: ignoring stale expiry");
            return;
        }
        self.expiries.borrow_mut().remove(&id);
        self.stars.borrow_mut().retain(|s| s.id != id);
        self.publish();
    }

    fn clear(&self) {
        self.epoch.set(self.epoch.get() + 1);
        self.cancel_expiries();
        self.stars.borrow_mut().clear();
    }

    fn cancel_expiries(&self) {
        let expiries = std::mem::take(&mut *self.expiries.borrow_mut());
        for handle in expiries.into_values() {
            self.scheduler.cancel(handle);
        }
    }

    fn publish(&self) {
        let stars = self.stars.borrow().clone();
        (self.publish)(stars);
    }
}

impl<S: Scheduler> Drop for FieldState<S> {
    fn drop(&mut self) {
        self.cancel_expiries();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::platform::ManualScheduler;

    #[test]
    fn test_sample_ranges() {
        let low = StarSpec::from_samples(0, [0.0; 4]);
        assert_eq!(low.left_pct, 0.0);
        assert_eq!(low.duration, Duration::from_secs(10));
        assert_eq!(low.width, 4.0);
        assert_eq!(low.height, 10.0);

        let high = StarSpec::from_samples(1, [1.0; 4]);
        assert_eq!(high.left_pct, 100.0);
        assert_eq!(high.duration, Duration::from_secs(30));
        assert_eq!(high.width, 10.0);
        assert_eq!(high.height, 20.0);

        let clamped = StarSpec::from_samples(2, [-1.0, 5.0, 0.5, 0.5]);
        assert_eq!(clamped.left_pct, 0.0);
        assert_eq!(clamped.duration, Duration::from_secs(30));
        assert_eq!(clamped.lifetime(), Duration::from_millis(30_500));
    }

    #[test]
    fn test_emits_every_interval() {
        let scheduler = ManualScheduler::new();
        let stars = Rc::new(RefCell::new(Vec::new()));
        let sink = stars.clone();
        let driver = TimerDriver::new(
            scheduler.clone(),
            StarEmitter::new(|| 0.5).with_layout(false, false),
            move |star: StarSpec| sink.borrow_mut().push(star.id),
        );

        driver.start();
        scheduler.advance(Duration::ZERO);
        assert_eq!(*stars.borrow(), vec![0]);
        scheduler.advance(Duration::from_millis(4500));
        assert_eq!(*stars.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_disabled_on_mobile_and_reduced_motion() {
        assert!(!StarEmitter::new(|| 0.5).with_layout(true, false).is_runnable());
        assert!(!StarEmitter::new(|| 0.5).with_layout(false, true).is_runnable());
        assert!(!StarEmitter::new(|| 0.5).with_layout(true, true).is_runnable());
        assert!(StarEmitter::new(|| 0.5).with_layout(false, false).is_runnable());
    }

    fn field(
        scheduler: &ManualScheduler,
        emitter: StarEmitter,
    ) -> (StarField<ManualScheduler>, Rc<RefCell<Vec<u64>>>) {
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = published.clone();
        let field = StarField::new(scheduler.clone(), emitter, move |stars: Vec<StarSpec>| {
            *sink.borrow_mut() = stars.iter().map(|s| s.id).collect();
        });
        (field, published)
    }

    fn desktop(sample: f64) -> StarEmitter {
        StarEmitter::new(move || sample).with_layout(false, false)
    }

    #[test]
    fn test_field_drops_stars_after_their_fall() {
        let scheduler = ManualScheduler::new();
        // every star falls for 10s and lingers 0.5s
        let (field, published) = field(&scheduler, desktop(0.0));

        field.start();
        scheduler.advance(Duration::ZERO);
        assert_eq!(*published.borrow(), vec![0]);
        assert_eq!(field.pending_expiries(), 1);

        scheduler.advance(Duration::from_millis(10_499));
        assert!(published.borrow().contains(&0));
        scheduler.advance(Duration::from_millis(1));
        assert!(!published.borrow().contains(&0));
        assert!(published.borrow().contains(&1));
        assert_eq!(field.stars().len(), published.borrow().len());
    }

    #[test]
    fn test_reset_clears_stars_and_cancels_expiries() {
        let scheduler = ManualScheduler::new();
        let (field, published) = field(&scheduler, desktop(0.5));

        field.start();
        scheduler.advance(Duration::from_millis(3000));
        assert_eq!(*published.borrow(), vec![0, 1, 2]);
        assert_eq!(field.pending_expiries(), 3);

        // reduced motion switched on
        field.reset(StarEmitter::new(|| 0.5).with_layout(false, true));
        assert!(published.borrow().is_empty());
        assert_eq!(field.pending_expiries(), 0);
        assert_eq!(scheduler.pending_timers(), 0);
        assert_eq!(scheduler.cancelled(), 4);
        scheduler.advance(Duration::from_secs(60));
        assert!(published.borrow().is_empty());

        // and off again
        field.reset(desktop(0.5));
        scheduler.advance(Duration::ZERO);
        assert_eq!(*published.borrow(), vec![0]);
    }

    #[test]
    fn test_stale_expiry_spares_new_star_with_same_id() {
        let scheduler = ManualScheduler::without_cancellation();
        let (field, published) = field(&scheduler, desktop(0.0));

        field.start();
        scheduler.advance(Duration::ZERO);
        scheduler.advance(Duration::from_millis(1000));

        // new stars fall for 30s
        field.reset(desktop(1.0));
        scheduler.advance(Duration::ZERO);
        assert_eq!(*published.borrow(), vec![0]);

        // the old star 0 was due at 10.5s
        scheduler.advance(Duration::from_millis(10_000));
        assert!(published.borrow().contains(&0));
    }

    #[test]
    fn test_dispose_cancels_every_timer() {
        let scheduler = ManualScheduler::new();
        let (field, published) = field(&scheduler, desktop(0.5));

        field.start();
        scheduler.advance(Duration::from_millis(1500));
        assert_eq!(scheduler.pending_timers(), 3);

        field.dispose();
        assert_eq!(scheduler.pending_timers(), 0);
        assert_eq!(field.pending_expiries(), 0);
        let before = published.borrow().clone();
        scheduler.advance(Duration::from_secs(60));
        assert_eq!(*published.borrow(), before);
    }

    #[test]
    fn test_dropping_field_cancels_expiries() {
        let scheduler = ManualScheduler::new();
        let (field, _) = field(&scheduler, desktop(0.5));

        field.start();
        scheduler.advance(Duration::from_millis(1500));
        drop(field);
        assert_eq!(scheduler.pending_timers(), 0);
    }
}
