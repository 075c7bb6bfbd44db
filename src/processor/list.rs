use super::{InputProcessor, ProcessResult, Prompt};
use crate::tokens::Tokens;

type ItemFormatter<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Waiting for a command.
    Idle,
    /// Forwarding lines to the element processor.
    Collecting,
    /// Waiting for the index of a bare remove command.
    Removing,
}

/// Collects an open-ended list of values, edited by the user through commands.
///
/// While idle the processor understands the add, remove and finish [`Tokens`]:
///
/// * `add` forwards the following lines to the element processor until it yields a value,
///   which is appended to the list.
/// * `remove <index>` removes the element at the 0-based `index`. A bare `remove` asks for the
///   index on the next line.
/// * `finish` completes the processor with the list exactly as it stands, empty included.
///
/// The list is only ever changed by a completed element or a valid remove.
pub struct ListProcessor<P: InputProcessor> {
    prompt: Prompt,
    element: P,
    items: Vec<P::Output>,
    mode: Mode,
    tokens: Tokens,
    formatter: Option<ItemFormatter<P::Output>>,
}

impl<P: InputProcessor> ListProcessor<P> {
    pub fn new(prompt: impl Into<Prompt>, element: P) -> Self {
        Self {
            prompt: prompt.into(),
            element,
            items: Vec::new(),
            mode: Mode::Idle,
            tokens: Tokens::default(),
            formatter: None,
        }
    }

    pub fn with_tokens(mut self, tokens: &Tokens) -> Self {
        self.tokens = tokens.clone();
        self
    }

    /// List the collected elements under the idle prompt, each rendered by `formatter`.
    pub fn with_item_formatter(
        mut self,
        formatter: impl Fn(&P::Output) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// The elements collected so far.
    pub fn items(&self) -> &[P::Output] {
        &self.items
    }

    fn process_command(&mut self, command: &str) -> ProcessResult<Vec<P::Output>> {
        if command == self.tokens.add {
            self.mode = Mode::Collecting;
            return Ok(None);
        }

        if command == self.tokens.finish {
            let items = std::mem::take(&mut self.items);
            self.reset();
            return Ok(Some(items));
        }

        if let Some(argument) = command.strip_prefix(self.tokens.remove.as_str()) {
            if argument.is_empty() {
                if self.items.is_empty() {
                    return Err("The list is empty, there is nothing to remove.".to_string());
                }
                self.mode = Mode::Removing;
                return Ok(None);
            }
            // `/remove1` is not `/remove 1`.
            if argument.starts_with(char::is_whitespace) {
                return self.remove_at(argument.trim());
            }
        }

        Err(format!(
            "'{command}' is not a valid command. Use {}, {} <index> or {}.",
            self.tokens.add, self.tokens.remove, self.tokens.finish
        ))
    }

    fn remove_at(&mut self, text: &str) -> ProcessResult<Vec<P::Output>> {
        let index = text
            .parse::<usize>()
            .map_err(|_| format!("'{text}' is not a valid index."))?;

        if index >= self.items.len() {
            return Err(format!(
                "The index {index} is out of range, the list has {} elements.",
                self.items.len()
            ));
        }

        self.items.remove(index);
        Ok(None)
    }

    fn idle_response(&self) -> String {
        let mut response = self.prompt.render();
        if let Some(formatter) = &self.formatter {
            for (index, item) in self.items.iter().enumerate() {
                response.push_str(&format!("\n{index}. {}", formatter(item)));
            }
        }
        response
    }
}

impl<P: InputProcessor> InputProcessor for ListProcessor<P> {
    type Output = Vec<P::Output>;

    fn default_response(&self) -> String {
        match self.mode {
            Mode::Idle => self.idle_response(),
            Mode::Collecting => self.element.default_response(),
            Mode::Removing => format!(
                "Send the index of the element to remove, from 0 to {}.",
                self.items.len().saturating_sub(1)
            ),
        }
    }

    fn process(&mut self, line: &str) -> ProcessResult<Self::Output> {
        match self.mode {
            Mode::Idle => self.process_command(line.trim()),

            Mode::Collecting => {
                if let Some(item) = self.element.process(line)? {
                    self.items.push(item);
                    self.element.reset();
                    self.mode = Mode::Idle;
                }
                Ok(None)
            }

            Mode::Removing => {
                // Either way the user is back at the command prompt.
                self.mode = Mode::Idle;
                self.remove_at(line.trim())
            }
        }
    }

    fn reset(&mut self) {
        self.items.clear();
        self.element.reset();
        self.mode = Mode::Idle;
    }
}
