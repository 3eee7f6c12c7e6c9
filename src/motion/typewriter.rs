use std::time::Duration;

use super::driver::{Machine, Step, TimerDriver};
use super::platform::Scheduler;

/// Pause between finishing a deletion and typing the next sentence.
const NEXT_SENTENCE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartPolicy {
    #[default]
    OnMount,
    /// Wait for the owning element's first visibility report.
    WhenVisible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypewriterConfig {
    pub typing_speed: Duration,
    pub deleting_speed: Duration,
    pub pause_at_comma: Duration,
    pub pause_at_period: Duration,
    pub looping: bool,
    pub start: StartPolicy,
    pub reduced_motion: bool,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            typing_speed: Duration::from_millis(100),
            deleting_speed: Duration::from_millis(30),
            pause_at_comma: Duration::from_millis(700),
            pause_at_period: Duration::from_millis(1000),
            looping: true,
            start: StartPolicy::OnMount,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Deleting,
}

/// Types and deletes a rotating list of sentences one character per tick.
#[derive(Debug, Clone)]
pub struct Typewriter {
    sentences: Vec<Vec<char>>,
    config: TypewriterConfig,
    sentence_index: usize,
    char_index: usize,
    phase: Phase,
    halted: bool,
}

impl Typewriter {
    pub fn new<I, S>(sentences: I, config: TypewriterConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            sentences: sentences
                .into_iter()
                .map(|s| s.as_ref().chars().collect())
                .collect(),
            config,
            sentence_index: 0,
            char_index: 0,
            phase: Phase::Typing,
            halted: false,
        }
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn sentence_index(&self) -> usize {
        self.sentence_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Currently revealed prefix.
    pub fn text(&self) -> String {
        self.sentences
            .get(self.sentence_index)
            .map(|s| s[..self.char_index].iter().collect())
            .unwrap_or_default()
    }

    fn current_len(&self) -> usize {
        self.sentences
            .get(self.sentence_index)
            .map_or(0, |s| s.len())
    }

    fn delay_after(&self, revealed: char) -> Duration {
        match revealed {
            ',' => self.config.pause_at_comma,
            '.' => self.config.pause_at_period,
            _ => self.config.typing_speed,
        }
    }
}

impl Machine for Typewriter {
    type Output = String;

    fn step(&mut self) -> Step<String> {
        if self.halted || self.sentences.is_empty() {
            return Step::halt();
        }
        match self.phase {
            Phase::Typing if self.char_index < self.current_len() => {
                self.char_index += 1;
                let revealed = self.sentences[self.sentence_index][self.char_index - 1];
                Step::emit(self.text(), self.delay_after(revealed))
            }
            Phase::Typing => {
                self.phase = Phase::Deleting;
                Step::wait(self.config.pause_at_period)
            }
            Phase::Deleting if self.char_index > 0 => {
                self.char_index -= 1;
                Step::emit(self.text(), self.config.deleting_speed)
            }
            Phase::Deleting => {
                self.phase = Phase::Typing;
                self.sentence_index = (self.sentence_index + 1) % self.sentences.len();
                self.char_index = 0;
                if !self.config.looping && self.sentence_index == 0 {
                    log::debug!("typewriter: last sentence done, not looping");
                    self.halted = true;
                    return Step::halt();
                }
                Step::wait(NEXT_SENTENCE_DELAY)
            }
        }
    }

    fn is_runnable(&self) -> bool {
        !self.sentences.is_empty()
    }

    fn still_frame(&self) -> Option<String> {
        if self.config.reduced_motion {
            self.sentences.first().map(|s| s.iter().collect())
        } else {
            None
        }
    }
}

impl<S: Scheduler> TimerDriver<S, Typewriter> {
    /// Starts right away unless the typewriter waits for visibility.
    pub fn mount(&self) {
        let policy = self.with_machine(|m| m.config().start);
        if policy == StartPolicy::OnMount {
            self.start();
        }
    }

    /// One-shot start for [`StartPolicy::WhenVisible`].
    pub fn on_visible(&self, visible: bool) {
        let policy = self.with_machine(|m| m.config().start);
        if visible && policy == StartPolicy::WhenVisible {
            self.start();
        }
    }
}
