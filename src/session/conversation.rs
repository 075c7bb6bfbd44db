use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::state::{State, Transition};
use crate::state_machine::StateMachine;

/// One user's side of the conversation: the current state plus the responses not yet delivered.
pub struct Conversation {
    state: Option<Box<dyn State>>,
    pending_responses: VecDeque<String>,
    closed: bool,
}

impl Conversation {
    pub fn new(state: Box<dyn State>) -> Self {
        Self {
            state: Some(state),
            pending_responses: VecDeque::new(),
            closed: false,
        }
    }

    /// The current state.
    pub fn state(&self) -> &dyn State {
        self.state
            .as_deref()
            .expect("conversation always holds a state between inputs")
    }

    /// Swap in `state` without feeding it any input, returning the previous state.
    pub fn replace_state(&mut self, state: Box<dyn State>) -> Box<dyn State> {
        self.state
            .replace(state)
            .expect("conversation always holds a state between inputs")
    }

    pub fn pending_count(&self) -> usize {
        self.pending_responses.len()
    }

    /// Mark the conversation as ended. A closed conversation is no longer reachable through
    /// its registry and must not receive more lines.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn handle_line(&mut self, line: &str) {
        let state = self
            .state
            .take()
            .expect("conversation always holds a state between inputs");
        let from = state.name();

        let transition = state.process_message(line);
        let changed = transition.changed_state();
        let Transition {
            outcome,
            state,
            message,
        } = transition;

        debug!(from = %from, to = %state.name(), ?outcome, "Processed line");

        self.pending_responses.extend(message);
        if changed {
            self.pending_responses.push_back(state.default_response());
        }
        self.state = Some(state);
    }
}

impl fmt::Debug for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversation")
            .field("state", &self.state.as_ref().map(|state| state.name()))
            .field("pending_responses", &self.pending_responses)
            .field("closed", &self.closed)
            .finish()
    }
}

pub enum ConversationInput {
    Line(String),
}

pub enum ConversationOutput {
    Response(String),
}

impl StateMachine for Conversation {
    type Input = ConversationInput;
    type Output = ConversationOutput;

    fn process_input(&mut self, input: Self::Input) {
        match input {
            ConversationInput::Line(line) => self.handle_line(&line),
        }
    }

    fn poll_output(&mut self) -> Option<Self::Output> {
        self.pending_responses
            .pop_front()
            .map(ConversationOutput::Response)
    }
}
