use super::{InputProcessor, ProcessResult};
use crate::tokens::Tokens;

/// Makes a value skippable: the skip token completes the processor with `None`.
pub struct OptionalProcessor<P> {
    inner: P,
    skip_token: String,
}

impl<P: InputProcessor> OptionalProcessor<P> {
    pub fn new(inner: P) -> Self {
        Self::with_tokens(inner, &Tokens::default())
    }

    pub fn with_tokens(inner: P, tokens: &Tokens) -> Self {
        Self {
            inner,
            skip_token: tokens.skip.clone(),
        }
    }
}

impl<P: InputProcessor> InputProcessor for OptionalProcessor<P> {
    type Output = Option<P::Output>;

    fn default_response(&self) -> String {
        format!(
            "{}\n(send {} to skip)",
            self.inner.default_response(),
            self.skip_token
        )
    }

    fn process(&mut self, line: &str) -> ProcessResult<Self::Output> {
        if line.trim() == self.skip_token {
            self.inner.reset();
            return Ok(Some(None));
        }

        Ok(self.inner.process(line)?.map(Some))
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::StringProcessor;

    #[test]
    fn test_skip() {
        let mut processor = OptionalProcessor::new(StringProcessor::new("E-mail?"));

        assert_eq!(
            processor.default_response(),
            "E-mail?\n(send /esc to skip)"
        );
        assert_eq!(processor.process("/esc"), Ok(Some(None)));
    }

    #[test]
    fn test_value_passes_through() {
        let mut processor = OptionalProcessor::new(StringProcessor::new("E-mail?"));

        assert_eq!(
            processor.process("jose@gmail.com"),
            Ok(Some(Some("jose@gmail.com".to_string())))
        );
        assert!(processor.process("").is_err());
    }

    #[test]
    fn test_custom_skip_token() {
        let tokens = Tokens::builder().skip("-").build();
        let mut processor = OptionalProcessor::with_tokens(StringProcessor::new("Phone?"), &tokens);

        assert_eq!(processor.process("-"), Ok(Some(None)));
        assert_eq!(
            processor.process("/esc"),
            Ok(Some(Some("/esc".to_string())))
        );
    }
}
