//! Ordered click-sequence matcher with a timed unlock window.
//!
//! [`transition`] is the whole state machine. [`SequenceMatcher`] wires it to an
//! [`UnlockTimer`] so the window closes on its own.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};

pub const DEFAULT_TARGET: [&str; 2] = ["quantum", "dimensions"];
pub const UNLOCK_WINDOW: Duration = Duration::from_secs(12);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceConfig {
    pub target: Vec<String>,
    pub unlock_window: Duration,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.iter().map(|t| t.to_string()).collect(),
            unlock_window: UNLOCK_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SequenceState {
    #[default]
    Idle,
    /// Non-empty proper prefix of the target.
    Collecting(Vec<String>),
    Unlocked,
}

impl SequenceState {
    pub fn collected(&self) -> &[String] {
        match self {
            SequenceState::Collecting(tokens) => tokens,
            SequenceState::Idle | SequenceState::Unlocked => &[],
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, SequenceState::Unlocked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEvent {
    TokenSelected(String),
    UnlockExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEffect {
    ArmUnlockTimer(Duration),
}

pub fn transition(
    config: &SequenceConfig,
    state: SequenceState,
    event: SequenceEvent,
) -> (SequenceState, Option<SequenceEffect>) {
    match (state, event) {
        // Clicks are inert while the window is open.
        (SequenceState::Unlocked, SequenceEvent::TokenSelected(_)) => {
            (SequenceState::Unlocked, None)
        }
        (SequenceState::Unlocked, SequenceEvent::UnlockExpired) => (SequenceState::Idle, None),
        (state, SequenceEvent::UnlockExpired) => (state, None),
        (state, SequenceEvent::TokenSelected(token)) => {
            let mut collected = match state {
                SequenceState::Collecting(tokens) => tokens,
                SequenceState::Idle | SequenceState::Unlocked => Vec::new(),
            };
            if config.target.get(collected.len()) != Some(&token) {
                return (SequenceState::Idle, None);
            }
            collected.push(token);
            if collected.len() == config.target.len() {
                (
                    SequenceState::Unlocked,
                    Some(SequenceEffect::ArmUnlockTimer(config.unlock_window)),
                )
            } else {
                (SequenceState::Collecting(collected), None)
            }
        }
    }
}

/// Cancellable one-shot countdown. At most one countdown is pending.
pub trait UnlockTimer {
    fn arm(&mut self, delay: Duration);
    fn cancel(&mut self);
}

pub struct SequenceMatcher<T: UnlockTimer> {
    config: SequenceConfig,
    state: SequenceState,
    timer: T,
}

impl<T: UnlockTimer> SequenceMatcher<T> {
    pub fn new(timer: T) -> Self {
        Self::with_config(SequenceConfig::default(), timer)
    }

    pub fn with_config(config: SequenceConfig, timer: T) -> Self {
        Self {
            config,
            state: SequenceState::Idle,
            timer,
        }
    }

    pub fn select(&mut self, token: impl Into<String>) -> &SequenceState {
        self.apply(SequenceEvent::TokenSelected(token.into()))
    }

    /// Called when the armed countdown elapses.
    pub fn expire(&mut self) -> &SequenceState {
        self.apply(SequenceEvent::UnlockExpired)
    }

    pub fn apply(&mut self, event: SequenceEvent) -> &SequenceState {
        let previous = std::mem::take(&mut self.state);
        let was_collecting = matches!(previous, SequenceState::Collecting(_));
        let is_token = matches!(event, SequenceEvent::TokenSelected(_));
        let (next, effect) = transition(&self.config, previous, event);

        match &next {
            SequenceState::Idle if is_token => {
                debug!(was_collecting, "sequence mismatch; buffer cleared")
            }
            SequenceState::Collecting(tokens) => {
                debug!(matched = tokens.len(), "sequence prefix matched")
            }
            _ => {}
        }
        self.state = next;

        if let Some(SequenceEffect::ArmUnlockTimer(delay)) = effect {
            info!(window_secs = delay.as_secs_f64(), "sequence completed; unlocked");
            self.timer.arm(delay);
        }
        &self.state
    }

    pub fn state(&self) -> &SequenceState {
        &self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state.is_unlocked()
    }

    pub fn collected(&self) -> &[String] {
        self.state.collected()
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }
}

impl<T: UnlockTimer> Drop for SequenceMatcher<T> {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

/// Countdown backed by a tokio task that posts [`SequenceEvent::UnlockExpired`]
/// to the returned receiver. Must be armed from inside a tokio runtime.
pub struct TokioUnlockTimer {
    events: mpsc::UnboundedSender<SequenceEvent>,
    pending: Option<JoinHandle<()>>,
}

impl TokioUnlockTimer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SequenceEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                events,
                pending: None,
            },
            rx,
        )
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl UnlockTimer for TokioUnlockTimer {
    fn arm(&mut self, delay: Duration) {
        self.cancel();
        let events = self.events.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SequenceEvent::UnlockExpired);
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod tests;
