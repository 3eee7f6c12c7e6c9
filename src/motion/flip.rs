use std::time::Duration;

use super::driver::{Machine, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipPhase {
    #[default]
    Visible,
    FlippingUp,
    Revealing,
}

impl FlipPhase {
    /// Extra class for a word slot in this phase.
    pub fn class(self) -> &'static str {
        match self {
            Self::Visible => "",
            Self::FlippingUp => "flipping-up",
            Self::Revealing => "revealing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlipFrame {
    pub offset: usize,
    pub phase: FlipPhase,
}

impl FlipFrame {
    pub fn word_for_slot<'a>(&self, words: &[&'a str], slot: usize) -> &'a str {
        if words.is_empty() {
            return "";
        }
        words[(slot + self.offset) % words.len()]
    }
}

/// Word drum shared by every slot: all slots rotate by one word per interval.
///
/// Each interval is split into a flip-up, a reveal (where the offset
/// advances) and a resting phase. The first word stays up for a whole
/// interval before the first flip.
#[derive(Debug, Clone)]
pub struct FlipCycle {
    words: usize,
    interval: Duration,
    flip_duration: Duration,
    frame: FlipFrame,
    primed: bool,
    reduced_motion: bool,
}

impl FlipCycle {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);
    pub const DEFAULT_FLIP: Duration = Duration::from_millis(300);

    pub fn new(words: usize, interval: Duration, flip_duration: Duration) -> Self {
        Self {
            words,
            interval,
            flip_duration,
            frame: FlipFrame::default(),
            primed: false,
            reduced_motion: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn frame(&self) -> FlipFrame {
        self.frame
    }

    fn rest(&self) -> Duration {
        self.interval.saturating_sub(self.flip_duration * 2)
    }
}

impl Machine for FlipCycle {
    type Output = FlipFrame;

    fn step(&mut self) -> Step<FlipFrame> {
        if !self.primed {
            self.primed = true;
            return Step::wait(self.interval);
        }
        let next = match self.frame.phase {
            FlipPhase::Visible => {
                self.frame.phase = FlipPhase::FlippingUp;
                self.flip_duration
            }
            FlipPhase::FlippingUp => {
                self.frame.offset = (self.frame.offset + 1) % self.words.max(1);
                self.frame.phase = FlipPhase::Revealing;
                self.flip_duration
            }
            FlipPhase::Revealing => {
                self.frame.phase = FlipPhase::Visible;
                self.rest()
            }
        };
        Step::emit(self.frame, next)
    }

    fn is_runnable(&self) -> bool {
        self.words > 1
    }

    fn still_frame(&self) -> Option<FlipFrame> {
        self.reduced_motion.then_some(self.frame)
    }
}
