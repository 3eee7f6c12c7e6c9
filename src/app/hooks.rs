use std::{cell::Cell, rc::Rc, time::Duration};

use leptos::{ev, html, prelude::*};
use leptos_use::{
    core::IntoElementsMaybeSignal, use_intersection_observer_with_options, use_media_query,
    UseIntersectionObserverOptions,
};

use crate::motion::{
    header::{scroll_cue_visible, HeaderVisibility},
    platform::{Scheduler, Task},
    scale::{Region, ScaleConfig, ScaleParams},
    scroll::{ScrollListener, Throttle},
    ConfigError, FlipCycle, FlipFrame, Machine, StarEmitter, StarField, StarSpec, TimerDriver,
    Typewriter, TypewriterConfig, Visibility, VisibilityConfig, MOBILE_BREAKPOINT,
};

/// Timers and animation frames of the browser window.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

#[derive(Debug, Clone, Copy)]
pub enum BrowserHandle {
    Timeout(TimeoutHandle),
    Frame(AnimationFrameRequestHandle),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserHandle;

    fn timeout(&self, delay: Duration, task: Task) -> Option<BrowserHandle> {
        set_timeout_with_handle(task, delay)
            .map(BrowserHandle::Timeout)
            .map_err(|e| log::warn!("couldn't schedule timeout: {e:?}"))
            .ok()
    }

    fn frame(&self, task: Task) -> Option<BrowserHandle> {
        request_animation_frame_with_handle(task)
            .map(BrowserHandle::Frame)
            .map_err(|e| log::warn!("couldn't request animation frame: {e:?}"))
            .ok()
    }

    fn cancel(&self, handle: BrowserHandle) {
        match handle {
            BrowserHandle::Timeout(h) => h.clear(),
            BrowserHandle::Frame(h) => h.cancel(),
        }
    }
}

fn viewport_height() -> f64 {
    window()
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or_default()
}

fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or_default()
}

fn document_height() -> f64 {
    document()
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or_default()
}

fn region_of(el: &web_sys::Element) -> Region {
    let rect = el.get_bounding_client_rect();
    Region::new(rect.top(), rect.height())
}

/// Falls back to `fallback` when a literal configuration is rejected.
fn or_fallback<T>(config: Result<T, ConfigError>, fallback: impl FnOnce() -> T) -> T {
    config.unwrap_or_else(|e| {
        log::error!("invalid motion config: {e}");
        fallback()
    })
}

/// Scrolls the window down by most of a screen.
pub fn scroll_down_a_screen() {
    window().scroll_by_with_x_and_y(0.0, viewport_height() * 0.8);
}

pub fn use_reduced_motion() -> Signal<bool> {
    use_media_query("(prefers-reduced-motion: reduce)")
}

/// Whether `target` currently meets `config`.
///
/// Trigger-once configs disconnect the observer after the first hit.
pub fn use_visibility<El, M>(target: El, config: VisibilityConfig) -> Signal<bool>
where
    El: IntoElementsMaybeSignal<web_sys::Element, M>,
{
    let (visible, set_visible) = signal(false);
    let options = UseIntersectionObserverOptions::default()
        .thresholds(vec![config.threshold()])
        .root_margin(config.root_margin().to_string());
    let mut state = Visibility::new(config);

    let _ = use_intersection_observer_with_options(
        target,
        move |entries, observer| {
            for entry in entries {
                if state.observe(entry.intersection_ratio()) {
                    set_visible.set(state.is_visible());
                }
                if state.is_latched() {
                    observer.disconnect();
                    break;
                }
            }
        },
        options,
    );

    visible.into()
}

/// Tracks `target` both ways at `threshold` overlap.
pub fn use_on_screen<El, M>(target: El, threshold: f64) -> Signal<bool>
where
    El: IntoElementsMaybeSignal<web_sys::Element, M>,
{
    let config = or_fallback(VisibilityConfig::new(threshold), VisibilityConfig::on_screen);
    use_visibility(target, config)
}

/// Latches once `threshold` of `target` has been seen.
pub fn use_animate_on_view<El, M>(target: El, threshold: f64) -> Signal<bool>
where
    El: IntoElementsMaybeSignal<web_sys::Element, M>,
{
    let config = or_fallback(
        VisibilityConfig::animate_on_view().with_threshold(threshold),
        VisibilityConfig::animate_on_view,
    );
    use_visibility(target, config)
}

/// Runs `update` now and on every scroll or resize, at most once per frame.
fn use_window_scroll(update: impl FnMut() + 'static) {
    let mut update = Some(update);
    Effect::new(move |_| {
        let Some(update) = update.take() else {
            return;
        };
        let listener = Rc::new(ScrollListener::new(
            BrowserScheduler,
            Throttle::AnimationFrame,
            update,
        ));
        let on_scroll = {
            let listener = listener.clone();
            window_event_listener(ev::scroll, move |_| listener.notify())
        };
        let on_resize = {
            let listener = listener.clone();
            window_event_listener(ev::resize, move |_| listener.notify())
        };
        let listener = StoredValue::new_local(listener);
        on_cleanup(move || {
            on_scroll.remove();
            on_resize.remove();
            listener.try_with_value(|l| l.dispose());
        });
    });
}

/// Scale, radius and translation of `target` from its distance to the
/// viewport center.
pub fn use_scroll_scale(target: NodeRef<html::Div>, config: ScaleConfig) -> Signal<ScaleParams> {
    let (params, set_params) = signal(config.resting());
    use_window_scroll(move || {
        // unmounted: keep the last value
        let Some(el) = target.get_untracked() else {
            return;
        };
        set_params.set(config.at_region(region_of(&el), viewport_height()));
    });
    params.into()
}

/// Like [`use_scroll_scale`] but owns the measured element.
pub fn use_scroll_scale_view(config: ScaleConfig) -> (NodeRef<html::Div>, Signal<ScaleParams>) {
    let target = NodeRef::<html::Div>::new();
    let params = use_scroll_scale(target, config);
    (target, params)
}

/// Scale from the page scroll offset. The second signal turns true after
/// the first measurement, so the initial jump is not animated.
pub fn use_scroll_progress(config: ScaleConfig) -> (Signal<ScaleParams>, Signal<bool>) {
    let (params, set_params) = signal(config.resting());
    let (initialized, set_initialized) = signal(false);
    use_window_scroll(move || {
        set_params.set(config.at_scroll(scroll_y()));
        if !initialized.get_untracked() {
            set_initialized.set(true);
        }
    });
    (params.into(), initialized.into())
}

/// Whether the fixed header is hidden.
pub fn use_header_hidden() -> Signal<bool> {
    let (hidden, set_hidden) = signal(false);
    Effect::new(move |_| {
        let state = Rc::new(Cell::new(HeaderVisibility::default()));
        let on_scroll = {
            let state = state.clone();
            move || {
                let mut header = state.get();
                if header.on_scroll(scroll_y()) {
                    set_hidden.set(header.is_hidden());
                }
                state.set(header);
            }
        };
        on_scroll();
        let scroll_handle = window_event_listener(ev::scroll, move |_| on_scroll());
        let pointer_handle = window_event_listener(ev::mousemove, move |e| {
            let mut header = state.get();
            if header.on_pointer(e.client_y() as f64, scroll_y()) {
                set_hidden.set(header.is_hidden());
            }
            state.set(header);
        });
        on_cleanup(move || {
            scroll_handle.remove();
            pointer_handle.remove();
        });
    });
    hidden.into()
}

/// Whether the "scroll down" cue should show.
pub fn use_scroll_cue() -> Signal<bool> {
    let (visible, set_visible) = signal(true);
    use_window_scroll(move || {
        let show = scroll_cue_visible(scroll_y(), viewport_height(), document_height());
        if show != visible.get_untracked() {
            set_visible.set(show);
        }
    });
    visible.into()
}

/// Mounts a [`TimerDriver`] on the client and disposes it with the owning
/// component. The machine is rebuilt whenever reduced motion toggles.
fn use_timer_driver<M>(
    build: impl Fn(bool) -> M + 'static,
    sink: impl Fn(M::Output) + Clone + 'static,
    started: impl Fn(&TimerDriver<BrowserScheduler, M>) + 'static,
) -> StoredValue<Option<TimerDriver<BrowserScheduler, M>>, LocalStorage>
where
    M: Machine,
{
    let reduced = use_reduced_motion();
    let slot = StoredValue::new_local(None::<TimerDriver<BrowserScheduler, M>>);
    Effect::new(move |_| {
        let machine = build(reduced.get());
        if slot.with_value(Option::is_some) {
            slot.with_value(|driver| {
                if let Some(driver) = driver {
                    log::debug!("reduced motion changed, restarting animation");
                    driver.reset(machine);
                    started(driver);
                }
            });
        } else {
            let driver = TimerDriver::new(BrowserScheduler, machine, sink.clone());
            started(&driver);
            slot.set_value(Some(driver));
        }
    });
    on_cleanup(move || {
        slot.try_with_value(|driver| driver.as_ref().map(TimerDriver::dispose));
    });
    slot
}

/// Types and deletes `sentences` in a loop.
pub fn use_type_writer<El, M>(
    target: El,
    sentences: &'static [&'static str],
    config: TypewriterConfig,
) -> Signal<String>
where
    El: IntoElementsMaybeSignal<web_sys::Element, M>,
{
    let (text, set_text) = signal(String::new());
    let seen = use_visibility(target, VisibilityConfig::first_sight());

    let driver = use_timer_driver(
        move |reduced_motion| {
            let config = TypewriterConfig {
                reduced_motion,
                ..config.clone()
            };
            Typewriter::new(sentences.iter(), config)
        },
        move |t: String| set_text.set(t),
        move |driver| {
            driver.mount();
            driver.on_visible(seen.get_untracked());
        },
    );
    Effect::new(move |_| {
        let visible = seen.get();
        driver.with_value(|d| {
            if let Some(d) = d {
                d.on_visible(visible);
            }
        });
    });

    text.into()
}

/// Shared rotation of a flipping word drum.
pub fn use_flip_cycle(words: usize) -> Signal<FlipFrame> {
    let (frame, set_frame) = signal(FlipFrame::default());
    use_timer_driver(
        move |reduced| {
            FlipCycle::new(words, FlipCycle::DEFAULT_INTERVAL, FlipCycle::DEFAULT_FLIP)
                .with_reduced_motion(reduced)
        },
        move |f: FlipFrame| set_frame.set(f),
        |driver| driver.start(),
    );
    frame.into()
}

/// Stars currently falling. The field restarts empty whenever reduced
/// motion or the mobile layout toggles.
pub fn use_star_field() -> Signal<Vec<StarSpec>> {
    let (stars, set_stars) = signal(Vec::<StarSpec>::new());
    let reduced = use_reduced_motion();
    let mobile = use_media_query(format!("(max-width: {MOBILE_BREAKPOINT}px)"));
    let field = StoredValue::new_local(None::<StarField<BrowserScheduler>>);

    Effect::new(move |_| {
        let emitter = StarEmitter::new(js_sys::Math::random).with_layout(mobile.get(), reduced.get());
        if field.with_value(Option::is_some) {
            field.with_value(|f| f.as_ref().map(|f| f.reset(emitter)));
        } else {
            let f = StarField::new(BrowserScheduler, emitter, move |s: Vec<StarSpec>| {
                // the view may be gone by now
                let _ = set_stars.try_set(s);
            });
            f.start();
            field.set_value(Some(f));
        }
    });
    on_cleanup(move || {
        field.try_with_value(|f| f.as_ref().map(StarField::dispose));
    });

    stars.into()
}
