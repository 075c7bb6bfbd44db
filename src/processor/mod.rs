//! Input processors turn a sequence of text lines into one typed value.
//!
//! A processor is a stateful accumulator owned by exactly one state. Each line either completes
//! it, advances it, or gets rejected with a message for the user:
//!
//! | `process` returns | meaning                                                            |
//! |-------------------|--------------------------------------------------------------------|
//! | `Ok(Some(value))` | complete, `value` is the result                                    |
//! | `Ok(None)`        | internal state advanced, show [`default_response`] for the next line |
//! | `Err(message)`    | line rejected, collected values untouched                          |
//!
//! [`default_response`]: InputProcessor::default_response

use std::fmt;
use std::sync::Arc;

pub mod form;
pub mod list;
pub mod optional;
pub mod primitive;

#[cfg(test)]
mod proptests;

pub use self::form::{Field, FormField, FormFields, FormProcessor};
pub use self::list::ListProcessor;
pub use self::optional::OptionalProcessor;
pub use self::primitive::{ChoiceProcessor, ParseProcessor, StringProcessor};

/// The result of feeding one line to an [`InputProcessor`].
pub type ProcessResult<T> = Result<Option<T>, String>;

/// A stateful accumulator that consumes one line at a time and eventually yields a value.
pub trait InputProcessor {
    /// The value produced once the processor is complete.
    type Output;

    /// The prompt shown before any input, and again after a reset or rejection.
    fn default_response(&self) -> String;

    /// Feed one line to the processor.
    ///
    /// On `Err` no value collected so far may change. A processor waiting on the second line of
    /// a command may drop that command and return to its command prompt, which the next
    /// [`default_response`](Self::default_response) then shows.
    fn process(&mut self, line: &str) -> ProcessResult<Self::Output>;

    /// Discard any accumulated partial state.
    fn reset(&mut self);
}

impl<P: InputProcessor + ?Sized> InputProcessor for Box<P> {
    type Output = P::Output;

    fn default_response(&self) -> String {
        (**self).default_response()
    }

    fn process(&mut self, line: &str) -> ProcessResult<Self::Output> {
        (**self).process(line)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Combinators available on every [`InputProcessor`].
pub trait InputProcessorExt: InputProcessor + Sized {
    /// Transform the completed value.
    fn map<F, U>(self, map_fn: F) -> Map<Self, F>
    where
        F: FnMut(Self::Output) -> U,
    {
        Map {
            inner: self,
            map_fn,
        }
    }

    /// Validate or transform the completed value, rejecting it with a message on failure.
    ///
    /// A rejection resets the inner processor so the user starts that value over.
    fn and_then<F, U>(self, then_fn: F) -> AndThen<Self, F>
    where
        F: FnMut(Self::Output) -> Result<U, String>,
    {
        AndThen {
            inner: self,
            then_fn,
        }
    }
}

impl<P: InputProcessor> InputProcessorExt for P {}

/// See [`InputProcessorExt::map`].
pub struct Map<P, F> {
    inner: P,
    map_fn: F,
}

impl<P, F, U> InputProcessor for Map<P, F>
where
    P: InputProcessor,
    F: FnMut(P::Output) -> U,
{
    type Output = U;

    fn default_response(&self) -> String {
        self.inner.default_response()
    }

    fn process(&mut self, line: &str) -> ProcessResult<U> {
        Ok(self.inner.process(line)?.map(&mut self.map_fn))
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

/// See [`InputProcessorExt::and_then`].
pub struct AndThen<P, F> {
    inner: P,
    then_fn: F,
}

impl<P, F, U> InputProcessor for AndThen<P, F>
where
    P: InputProcessor,
    F: FnMut(P::Output) -> Result<U, String>,
{
    type Output = U;

    fn default_response(&self) -> String {
        self.inner.default_response()
    }

    fn process(&mut self, line: &str) -> ProcessResult<U> {
        let Some(value) = self.inner.process(line)? else {
            return Ok(None);
        };

        match (self.then_fn)(value) {
            Ok(value) => Ok(Some(value)),
            Err(message) => {
                self.inner.reset();
                Err(message)
            }
        }
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

/// The text shown to ask for a value.
///
/// Either fixed text or a getter evaluated every time the prompt is displayed, so collaborators
/// can localise or personalise it lazily.
#[derive(Clone)]
pub struct Prompt(PromptKind);

#[derive(Clone)]
enum PromptKind {
    Text(Arc<str>),
    Getter(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Prompt {
    /// A prompt produced by `getter` each time it is rendered.
    pub fn getter(getter: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(PromptKind::Getter(Arc::new(getter)))
    }

    /// Produce the prompt text.
    pub fn render(&self) -> String {
        match &self.0 {
            PromptKind::Text(text) => text.to_string(),
            PromptKind::Getter(getter) => getter(),
        }
    }
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            PromptKind::Text(text) => f.debug_tuple("Prompt").field(text).finish(),
            PromptKind::Getter(_) => f.debug_tuple("Prompt").field(&"<getter>").finish(),
        }
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self(PromptKind::Text(text.into()))
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self(PromptKind::Text(text.into()))
    }
}
