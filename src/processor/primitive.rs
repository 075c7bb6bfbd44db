//! Single-line processors.
//!
//! Each of these parses one line straight into its value, so they never hold partial state and
//! `reset` is a no-op.

use std::marker::PhantomData;

use super::{InputProcessor, ProcessResult, Prompt};
use crate::value::Fold;

/// A function pointer parser, the parser type of the ready-made numeric processors.
pub type LineParser<T> = fn(&str) -> Result<T, String>;

/// Parses a line with any supplied parser.
pub struct ParseProcessor<T, F> {
    prompt: Prompt,
    parser: F,
    _output: PhantomData<fn() -> T>,
}

impl<T, F> ParseProcessor<T, F>
where
    F: Fn(&str) -> Result<T, String>,
{
    /// Build a processor that shows `prompt` and parses the trimmed line with `parser`.
    pub fn new(prompt: impl Into<Prompt>, parser: F) -> Self {
        Self {
            prompt: prompt.into(),
            parser,
            _output: PhantomData,
        }
    }
}

impl<T, F> InputProcessor for ParseProcessor<T, F>
where
    F: Fn(&str) -> Result<T, String>,
{
    type Output = T;

    fn default_response(&self) -> String {
        self.prompt.render()
    }

    fn process(&mut self, line: &str) -> ProcessResult<T> {
        (self.parser)(line.trim()).map(Some)
    }

    fn reset(&mut self) {}
}

/// Accepts a non-negative 32-bit integer.
pub fn unsigned_int(prompt: impl Into<Prompt>) -> ParseProcessor<u32, LineParser<u32>> {
    ParseProcessor::new(prompt, parse_unsigned_int as LineParser<u32>)
}

/// Accepts a signed 64-bit integer.
pub fn integer(prompt: impl Into<Prompt>) -> ParseProcessor<i64, LineParser<i64>> {
    ParseProcessor::new(prompt, parse_integer as LineParser<i64>)
}

/// Accepts a finite decimal number.
pub fn decimal(prompt: impl Into<Prompt>) -> ParseProcessor<f64, LineParser<f64>> {
    ParseProcessor::new(prompt, parse_decimal as LineParser<f64>)
}

fn parse_unsigned_int(text: &str) -> Result<u32, String> {
    text.parse::<u32>()
        .fold(Ok, |_| Err(format!("'{text}' is not a valid non-negative integer.")))
}

fn parse_integer(text: &str) -> Result<i64, String> {
    text.parse::<i64>()
        .fold(Ok, |_| Err(format!("'{text}' is not a valid integer.")))
}

fn parse_decimal(text: &str) -> Result<f64, String> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("'{text}' is not a valid number.")),
    }
}

/// Accepts a non-empty line, optionally bounded in length (counted in characters).
#[derive(Debug, Clone)]
pub struct StringProcessor {
    prompt: Prompt,
    min_len: usize,
    max_len: Option<usize>,
}

impl StringProcessor {
    pub fn new(prompt: impl Into<Prompt>) -> Self {
        Self {
            prompt: prompt.into(),
            min_len: 1,
            max_len: None,
        }
    }

    /// Require at least `min_len` characters. Values below one are treated as one.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }

    /// Allow at most `max_len` characters.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}

impl InputProcessor for StringProcessor {
    type Output = String;

    fn default_response(&self) -> String {
        self.prompt.render()
    }

    fn process(&mut self, line: &str) -> ProcessResult<String> {
        let text = line.trim();
        let len = text.chars().count();

        if len == 0 {
            return Err("The text can't be empty.".to_string());
        }
        if len < self.min_len {
            return Err(format!(
                "The text must have at least {} characters.",
                self.min_len
            ));
        }
        if let Some(max_len) = self.max_len.filter(|max_len| len > *max_len) {
            return Err(format!("The text must have at most {max_len} characters."));
        }

        Ok(Some(text.to_string()))
    }

    fn reset(&mut self) {}
}

/// Accepts one of a fixed set of labelled options.
///
/// A line matches an option by its label (case-insensitive) or by its 1-based position in the
/// listing shown in the prompt.
#[derive(Debug, Clone)]
pub struct ChoiceProcessor<T> {
    prompt: Prompt,
    options: Vec<(String, T)>,
}

impl<T: Clone> ChoiceProcessor<T> {
    pub fn new(prompt: impl Into<Prompt>) -> Self {
        Self {
            prompt: prompt.into(),
            options: Vec::new(),
        }
    }

    /// Add an option selected by `label`, yielding `value`.
    pub fn option(mut self, label: impl Into<String>, value: T) -> Self {
        self.options.push((label.into(), value));
        self
    }

    fn find(&self, text: &str) -> Option<&T> {
        if let Some((_, value)) = self
            .options
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(text))
        {
            return Some(value);
        }

        text.parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| self.options.get(index))
            .map(|(_, value)| value)
    }
}

impl<T: Clone> InputProcessor for ChoiceProcessor<T> {
    type Output = T;

    fn default_response(&self) -> String {
        let mut response = self.prompt.render();
        for (position, (label, _)) in self.options.iter().enumerate() {
            response.push_str(&format!("\n{}. {label}", position + 1));
        }
        response
    }

    fn process(&mut self, line: &str) -> ProcessResult<T> {
        let text = line.trim();
        self.find(text).cloned().fold(
            |value| Ok(Some(value)),
            |()| Err(format!("'{text}' is not one of the available options.")),
        )
    }

    fn reset(&mut self) {}
}
