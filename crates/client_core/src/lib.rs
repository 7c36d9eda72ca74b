pub mod contact;
pub mod error;
pub mod sequence;

pub use contact::{
    ContactEndpoint, ContactForm, HttpContactEndpoint, Notification, Notifier, TracingNotifier,
    DEFAULT_REQUEST_TIMEOUT, GENERIC_FAILURE_MESSAGE,
};
pub use error::SubmitError;
pub use sequence::{
    transition, SequenceConfig, SequenceEffect, SequenceEvent, SequenceMatcher, SequenceState,
    TokioUnlockTimer, UnlockTimer, DEFAULT_TARGET, UNLOCK_WINDOW,
};
