use std::borrow::Cow;

use super::{State, Target, Transition};
use crate::handler::InputHandler;
use crate::tokens::Tokens;
use crate::value::Require;

/// A state that collects one value through an [`InputHandler`].
///
/// * The cancel token leaves immediately through the `exit` target, without touching the
///   handler. Any partially entered data is dropped with the state.
/// * A rejected line keeps the user here and shows the rejection.
/// * A line that leaves the handler still collecting keeps the user here and shows the
///   handler's next prompt.
/// * Once the handler is satisfied, `next` receives the value. This is the only way out other
///   than cancelling.
pub struct ProcessorState<H, X, N> {
    name: Cow<'static, str>,
    handler: H,
    exit: X,
    next: N,
    cancel_token: String,
}

impl<H, X, N> ProcessorState<H, X, N>
where
    H: InputHandler,
    X: FnOnce() -> Target,
    N: FnOnce(H::Output) -> Target,
{
    pub fn new(handler: H, exit: X, next: N) -> Self {
        Self {
            name: Cow::Borrowed("processor"),
            handler,
            exit,
            next,
            cancel_token: Tokens::default().cancel,
        }
    }

    /// Name the state in logs.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tokens(mut self, tokens: &Tokens) -> Self {
        self.cancel_token = tokens.cancel.clone();
        self
    }
}

impl<H, X, N> State for ProcessorState<H, X, N>
where
    H: InputHandler + Send + 'static,
    X: FnOnce() -> Target + Send + 'static,
    N: FnOnce(H::Output) -> Target + Send + 'static,
{
    fn default_response(&self) -> String {
        self.handler.default_response()
    }

    fn process_message(mut self: Box<Self>, line: &str) -> Transition {
        if line.trim() == self.cancel_token {
            let this = *self;
            return Transition::back((this.exit)());
        }

        match self.handler.process_input(line) {
            Err(message) => Transition::stay(self, message),
            Ok(false) => {
                let prompt = self.handler.default_response();
                Transition::stay(self, prompt)
            }
            Ok(true) => {
                let mut this = *self;
                let value = this.handler.take_output().require();
                Transition::completed((this.next)(value))
            }
        }
    }

    fn name(&self) -> Cow<'static, str> {
        self.name.clone()
    }
}
