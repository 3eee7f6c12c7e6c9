//! Scroll- and timer-driven view state.
//!
//! Nothing in here touches the DOM. The browser hands in measurements and
//! scheduling through [`platform::Scheduler`], and gets plain values back, so
//! every piece can be exercised natively with [`platform::ManualScheduler`].

pub mod cycle;
pub mod driver;
pub mod flip;
pub mod header;
pub mod platform;
pub mod scale;
pub mod scroll;
pub mod stars;
pub mod typewriter;
pub mod visibility;

pub use cycle::ScrollCycle;
pub use driver::{Machine, Step, TimerDriver};
pub use flip::{FlipCycle, FlipFrame, FlipPhase};
pub use header::{scroll_cue_visible, HeaderVisibility};
pub use platform::{ManualScheduler, Scheduler, Task};
pub use scale::{Easing, Region, ScaleConfig, ScaleParams, TranslateMode};
pub use scroll::{ScrollListener, Throttle};
pub use stars::{StarEmitter, StarField, StarSpec, MOBILE_BREAKPOINT};
pub use typewriter::{Phase, StartPolicy, Typewriter, TypewriterConfig};
pub use visibility::{intersection_ratio, Rect, RootMargin, Visibility, VisibilityConfig};

use thiserror::Error;

/// Rejected configuration. Raised when a config is built, never mid-animation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("scale range must be a positive finite number, got {0}")]
    InvalidScaleRange(f64),
    #[error("minimum scale must be within 0.0..=1.0, got {0}")]
    InvalidMinScale(f64),
    #[error("{name} must be a non-negative finite number, got {value}")]
    NegativeMaximum { name: &'static str, value: f64 },
    #[error("visibility threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),
    #[error("invalid root margin: {0:?}")]
    InvalidRootMargin(String),
}
