//! Adapting processors into the uniform handler contract consumed by states.
//!
//! A state only ever talks to an [`InputHandler`]: it does not care whether the value behind it
//! is a single scalar, a form or a list. [`ProcessorHandler`] is the bridge, pairing an
//! [`InputProcessor`] with an [`OnComplete`] contract run on every completed value.

use crate::processor::InputProcessor;

/// The uniform contract between a state and the logic collecting its input.
pub trait InputHandler {
    /// The value handed over once the handler is satisfied.
    type Output;

    fn default_response(&self) -> String;

    /// Feed one line to the handler.
    ///
    /// Returns `Ok(true)` once the handler is fully satisfied, at which point
    /// [`take_output`](Self::take_output) yields the value. `Ok(false)` means it is still
    /// collecting. `Err` carries the complete text to show the user, prompt included.
    fn process_input(&mut self, line: &str) -> Result<bool, String>;

    fn reset(&mut self);

    /// Move out the value produced by the last `Ok(true)`.
    fn take_output(&mut self) -> Option<Self::Output>;
}

/// The completion contract run on every value a [`ProcessorHandler`]'s processor yields.
///
/// Returning `Err(message)` refuses the value: the processor is reset and `message` is shown to
/// the user as if the input had been rejected.
pub trait OnComplete<T> {
    fn on_complete(&mut self, value: &T) -> Result<(), String>;
}

/// A completion that may refuse the value, returning the reason.
pub struct Fallible<F>(pub F);

impl<T, F> OnComplete<T> for Fallible<F>
where
    F: FnMut(&T) -> Option<String>,
{
    fn on_complete(&mut self, value: &T) -> Result<(), String> {
        match (self.0)(value) {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }
}

/// A completion that always accepts the value after running.
pub struct Infallible<F>(pub F);

impl<T, F> OnComplete<T> for Infallible<F>
where
    F: FnMut(&T),
{
    fn on_complete(&mut self, value: &T) -> Result<(), String> {
        (self.0)(value);
        Ok(())
    }
}

/// Accepts every value without doing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accept;

impl<T> OnComplete<T> for Accept {
    fn on_complete(&mut self, _value: &T) -> Result<(), String> {
        Ok(())
    }
}

/// Wraps an [`InputProcessor`] and its [`OnComplete`] contract into an [`InputHandler`].
pub struct ProcessorHandler<P: InputProcessor, C> {
    processor: P,
    on_complete: C,
    output: Option<P::Output>,
}

impl<P: InputProcessor, C: OnComplete<P::Output>> ProcessorHandler<P, C> {
    pub fn new(processor: P, on_complete: C) -> Self {
        Self {
            processor,
            on_complete,
            output: None,
        }
    }

    fn rejection(&self, message: &str) -> String {
        format!("{message}\n{}", self.processor.default_response())
    }
}

impl<P: InputProcessor> ProcessorHandler<P, Accept> {
    /// A handler that is satisfied by any completed value.
    pub fn accepting(processor: P) -> Self {
        Self::new(processor, Accept)
    }
}

impl<P, F> ProcessorHandler<P, Fallible<F>>
where
    P: InputProcessor,
    F: FnMut(&P::Output) -> Option<String>,
{
    pub fn fallible(processor: P, on_complete: F) -> Self {
        Self::new(processor, Fallible(on_complete))
    }
}

impl<P, F> ProcessorHandler<P, Infallible<F>>
where
    P: InputProcessor,
    F: FnMut(&P::Output),
{
    pub fn infallible(processor: P, on_complete: F) -> Self {
        Self::new(processor, Infallible(on_complete))
    }
}

impl<P: InputProcessor, C: OnComplete<P::Output>> InputHandler for ProcessorHandler<P, C> {
    type Output = P::Output;

    fn default_response(&self) -> String {
        self.processor.default_response()
    }

    fn process_input(&mut self, line: &str) -> Result<bool, String> {
        let value = match self.processor.process(line) {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(false),
            Err(message) => return Err(self.rejection(&message)),
        };

        if let Err(message) = self.on_complete.on_complete(&value) {
            self.processor.reset();
            return Err(self.rejection(&message));
        }

        self.output = Some(value);
        Ok(true)
    }

    fn reset(&mut self) {
        self.processor.reset();
        self.output = None;
    }

    fn take_output(&mut self) -> Option<P::Output> {
        self.output.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::ListProcessor;
    use crate::processor::primitive::unsigned_int;

    #[test]
    fn test_completion() {
        let mut handler = ProcessorHandler::accepting(unsigned_int("Insert a number."));

        assert_eq!(handler.default_response(), "Insert a number.");
        assert_eq!(handler.process_input("5"), Ok(true));
        assert_eq!(handler.take_output(), Some(5));
        assert_eq!(handler.take_output(), None);
    }

    #[test]
    fn test_processor_rejection_appends_prompt() {
        let mut handler = ProcessorHandler::accepting(unsigned_int("Insert a number."));

        assert_eq!(
            handler.process_input("x"),
            Err("'x' is not a valid non-negative integer.\nInsert a number.".to_string())
        );
    }

    #[test]
    fn test_still_collecting() {
        let mut handler = ProcessorHandler::accepting(ListProcessor::new(
            "Insert the numbers.",
            unsigned_int("Insert a number."),
        ));

        assert_eq!(handler.process_input("/add"), Ok(false));
        assert_eq!(handler.default_response(), "Insert a number.");
        assert_eq!(handler.process_input("1"), Ok(false));
        assert_eq!(handler.process_input("/finish"), Ok(true));
        assert_eq!(handler.take_output(), Some(vec![1]));
    }

    #[test]
    fn test_fallible_refusal_resets() {
        let mut handler = ProcessorHandler::fallible(
            ListProcessor::new("Insert the numbers.", unsigned_int("Insert a number.")),
            |numbers: &Vec<u32>| {
                numbers
                    .is_empty()
                    .then(|| "Insert at least one number.".to_string())
            },
        );

        assert_eq!(
            handler.process_input("/finish"),
            Err("Insert at least one number.\nInsert the numbers.".to_string())
        );
        assert_eq!(handler.take_output(), None);

        handler.process_input("/add").unwrap();
        handler.process_input("8").unwrap();
        assert_eq!(handler.process_input("/finish"), Ok(true));
        assert_eq!(handler.take_output(), Some(vec![8]));
    }

    #[test]
    fn test_infallible_runs_callback() {
        let mut seen = Vec::new();
        {
            let mut handler =
                ProcessorHandler::infallible(unsigned_int("Insert a number."), |n: &u32| {
                    seen.push(*n)
                });
            assert_eq!(handler.process_input("3"), Ok(true));
            assert_eq!(handler.process_input("4"), Ok(true));
        }
        assert_eq!(seen, vec![3, 4]);
    }

    #[test]
    fn test_reset() {
        let mut handler = ProcessorHandler::accepting(ListProcessor::new(
            "Insert the numbers.",
            unsigned_int("Insert a number."),
        ));

        handler.process_input("/add").unwrap();
        handler.reset();
        assert_eq!(handler.default_response(), "Insert the numbers.");
    }
}
