//! States are the units of a conversation.
//!
//! A user is always in exactly one [`State`]. Feeding it a line consumes it and produces a
//! [`Transition`] holding the state the user is in afterwards, which may be the very same one.
//! States are replaced rather than mutated from outside, so whatever the old state owned (its
//! processor and any partial input) is dropped with it when the user moves on.

use std::borrow::Cow;
use std::fmt;

pub mod processor;

pub use self::processor::ProcessorState;

/// Where a single user currently is in the conversation.
pub trait State: Send {
    /// The prompt shown when the user enters this state.
    fn default_response(&self) -> String;

    /// Accept one line of input.
    fn process_message(self: Box<Self>, line: &str) -> Transition;

    /// A short name used in logs.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("state")
    }
}

/// How a state reacted to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Still collecting input, the user stays in the same state.
    Collecting,
    /// Done, the user moves on to the next state.
    Completed,
    /// The user backed out to the exit state.
    Back,
}

/// A state to move to, with an optional message shown before that state's prompt.
pub struct Target {
    pub state: Box<dyn State>,
    pub message: Option<String>,
}

impl Target {
    pub fn new(state: impl State + 'static) -> Self {
        Self::boxed(Box::new(state))
    }

    pub fn boxed(state: Box<dyn State>) -> Self {
        Self {
            state,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("state", &self.state.name())
            .field("message", &self.message)
            .finish()
    }
}

/// The result of a state processing one line.
#[must_use]
pub struct Transition {
    pub outcome: Outcome,
    /// The user's state from now on.
    pub state: Box<dyn State>,
    /// Text to show the user. For a state change this never includes the new state's prompt.
    pub message: Option<String>,
}

impl Transition {
    /// Remain in `state`, showing `message`.
    pub fn stay(state: Box<dyn State>, message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Collecting,
            state,
            message: Some(message.into()),
        }
    }

    /// Move on to the target of a completed state.
    pub fn completed(target: Target) -> Self {
        Self::to(Outcome::Completed, target)
    }

    /// Move to the exit target of an interrupted state.
    pub fn back(target: Target) -> Self {
        Self::to(Outcome::Back, target)
    }

    fn to(outcome: Outcome, Target { state, message }: Target) -> Self {
        Self {
            outcome,
            state,
            message,
        }
    }

    /// Whether the user left the state that produced this transition.
    pub fn changed_state(&self) -> bool {
        self.outcome != Outcome::Collecting
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("outcome", &self.outcome)
            .field("state", &self.state.name())
            .field("message", &self.message)
            .finish()
    }
}

/// A state that never completes, answering every line with the same text.
///
/// Suitable for terminal states such as "your account was removed".
#[derive(Debug, Clone)]
pub struct StaticState {
    name: Cow<'static, str>,
    response: String,
}

impl StaticState {
    pub fn new(name: impl Into<Cow<'static, str>>, response: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: response.into(),
        }
    }
}

impl State for StaticState {
    fn default_response(&self) -> String {
        self.response.clone()
    }

    fn process_message(self: Box<Self>, _line: &str) -> Transition {
        let response = self.response.clone();
        Transition::stay(self, response)
    }

    fn name(&self) -> Cow<'static, str> {
        self.name.clone()
    }
}
