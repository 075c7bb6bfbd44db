//! Fixed, ordered sequences of processors assembled into a tuple.
//!
//! A form is built from a tuple of [`Field`]s. Fields are asked for in tuple order, one line
//! at a time, and the form completes with a tuple holding every field's value in that same
//! order:
//!
//! ```ignore
//! let mut form = FormProcessor::new((
//!     Field::new(StringProcessor::new("What's your name?")),
//!     Field::new(unsigned_int("How old are you?")),
//! ));
//!
//! assert_eq!(form.process("Santiago"), Ok(None));
//! assert_eq!(form.process("19"), Ok(Some(("Santiago".to_string(), 19))));
//! ```
//!
//! Use [`map`](super::InputProcessorExt::map) to turn the tuple into a record.

use impl_trait_for_tuples::impl_for_tuples;

use super::{InputProcessor, ProcessResult};
use crate::value::Require;

/// One position of a form: a processor plus the slot for its completed value.
pub trait FormField {
    /// The value stored once the field is filled.
    type Value;

    fn default_response(&self) -> String;

    /// Feed one line to the field, returning whether the field is now filled.
    fn process(&mut self, line: &str) -> Result<bool, String>;

    fn is_filled(&self) -> bool;

    /// Empty the slot and reset the processor.
    fn reset(&mut self);

    /// Move the value out of the slot.
    fn take(&mut self) -> Option<Self::Value>;
}

/// The standard [`FormField`], wrapping any [`InputProcessor`].
pub struct Field<P: InputProcessor> {
    processor: P,
    value: Option<P::Output>,
}

impl<P: InputProcessor> Field<P> {
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            value: None,
        }
    }
}

impl<P: InputProcessor> FormField for Field<P> {
    type Value = P::Output;

    fn default_response(&self) -> String {
        self.processor.default_response()
    }

    fn process(&mut self, line: &str) -> Result<bool, String> {
        match self.processor.process(line)? {
            Some(value) => {
                self.value = Some(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    fn reset(&mut self) {
        self.processor.reset();
        self.value = None;
    }

    fn take(&mut self) -> Option<P::Output> {
        self.value.take()
    }
}

/// An ordered group of [`FormField`]s, implemented for tuples of one to twelve fields.
pub trait FormFields {
    /// The tuple of every field's value, in field order.
    type Output;

    /// The prompt of the field at `index`, or an empty string past the last field.
    fn default_response_at(&self, index: usize) -> String;

    /// Feed one line to the field at `index`.
    fn process_at(&mut self, index: usize, line: &str) -> Result<bool, String>;

    fn is_complete(&self) -> bool;

    fn reset(&mut self);

    /// Move every value out, or `None` if any field is still empty.
    fn take(&mut self) -> Option<Self::Output>;
}

#[impl_for_tuples(1, 12)]
#[tuple_types_custom_trait_bound(FormField)]
impl FormFields for Tuple {
    // Trailing commas keep the one-field output a tuple.
    for_tuples!( type Output = ( #( Tuple::Value ),* ); );

    #[allow(unused_assignments)]
    fn default_response_at(&self, index: usize) -> String {
        let mut position = 0;
        for_tuples!( #(
            if position == index {
                return Tuple.default_response();
            }
            position += 1;
        )* );
        String::new()
    }

    #[allow(unused_assignments)]
    fn process_at(&mut self, index: usize, line: &str) -> Result<bool, String> {
        let mut position = 0;
        for_tuples!( #(
            if position == index {
                return Tuple.process(line);
            }
            position += 1;
        )* );
        Ok(false)
    }

    fn is_complete(&self) -> bool {
        let mut complete = true;
        for_tuples!( #( complete &= Tuple.is_filled(); )* );
        complete
    }

    fn reset(&mut self) {
        for_tuples!( #( Tuple.reset(); )* );
    }

    fn take(&mut self) -> Option<Self::Output> {
        if !self.is_complete() {
            return None;
        }
        let output = for_tuples!( ( #( Tuple.take()? ),* ) );
        Some(output)
    }
}

/// Collects a fixed tuple of values, one field after another.
///
/// Rejections from the field under the cursor are returned unchanged and leave the cursor where
/// it is, so the user retries that field. Fields already filled are never asked again.
pub struct FormProcessor<F> {
    fields: F,
    cursor: usize,
}

impl<F: FormFields> FormProcessor<F> {
    pub fn new(fields: F) -> Self {
        Self { fields, cursor: 0 }
    }

    /// Index of the field currently receiving input.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<F: FormFields> InputProcessor for FormProcessor<F> {
    type Output = F::Output;

    fn default_response(&self) -> String {
        self.fields.default_response_at(self.cursor)
    }

    fn process(&mut self, line: &str) -> ProcessResult<F::Output> {
        if !self.fields.process_at(self.cursor, line)? {
            return Ok(None);
        }

        self.cursor += 1;
        if !self.fields.is_complete() {
            return Ok(None);
        }

        let output = self.fields.take().require();
        self.reset();
        Ok(Some(output))
    }

    fn reset(&mut self) {
        self.fields.reset();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::primitive::unsigned_int;
    use crate::processor::{InputProcessorExt, ListProcessor, OptionalProcessor, StringProcessor};

    #[derive(Debug, PartialEq)]
    struct Contact {
        name: String,
        age: u32,
        email: Option<String>,
    }

    fn contact_form() -> impl InputProcessor<Output = Contact> {
        FormProcessor::new((
            Field::new(StringProcessor::new("Name?")),
            Field::new(unsigned_int("Age?")),
            Field::new(OptionalProcessor::new(StringProcessor::new("E-mail?"))),
        ))
        .map(|(name, age, email)| Contact { name, age, email })
    }

    #[test]
    fn test_fields_in_order() {
        let mut form = FormProcessor::new((
            Field::new(StringProcessor::new("Name?")),
            Field::new(unsigned_int("Age?")),
        ));

        assert_eq!(form.default_response(), "Name?");
        assert_eq!(form.process("Santiago"), Ok(None));
        assert_eq!(form.default_response(), "Age?");
        assert_eq!(form.process("19"), Ok(Some(("Santiago".to_string(), 19))));
    }

    #[test]
    fn test_rejection_keeps_earlier_fields() {
        let mut form = contact_form();

        assert_eq!(form.process("Roberto"), Ok(None));
        assert!(form.process("nineteen").is_err());
        assert_eq!(form.default_response(), "Age?");
        assert_eq!(form.process("40"), Ok(None));
        assert_eq!(
            form.process("/esc"),
            Ok(Some(Contact {
                name: "Roberto".to_string(),
                age: 40,
                email: None,
            }))
        );
    }

    #[test]
    fn test_reset_rewinds() {
        let mut form = FormProcessor::new((
            Field::new(StringProcessor::new("Name?")),
            Field::new(unsigned_int("Age?")),
        ));

        form.process("Ernesto").unwrap();
        assert_eq!(form.cursor(), 1);
        form.reset();
        assert_eq!(form.cursor(), 0);
        assert_eq!(form.default_response(), "Name?");
        assert_eq!(form.process("Carlos"), Ok(None));
        assert_eq!(form.process("33"), Ok(Some(("Carlos".to_string(), 33))));
    }

    #[test]
    fn test_processor_is_reusable_after_completion() {
        let mut form = FormProcessor::new((
            Field::new(unsigned_int("First?")),
            Field::new(unsigned_int("Second?")),
        ));

        form.process("1").unwrap();
        assert_eq!(form.process("2"), Ok(Some((1, 2))));
        assert_eq!(form.default_response(), "First?");
        form.process("3").unwrap();
        assert_eq!(form.process("4"), Ok(Some((3, 4))));
    }

    #[test]
    fn test_single_field() {
        let mut form = FormProcessor::new((Field::new(unsigned_int("Only?")),));

        assert_eq!(form.default_response(), "Only?");
        assert!(form.process("none").is_err());
        assert_eq!(form.cursor(), 0);
        assert_eq!(form.process("7"), Ok(Some((7,))));
        assert_eq!(form.default_response(), "Only?");
    }

    #[test]
    fn test_multi_line_field() {
        let mut form = FormProcessor::new((
            Field::new(StringProcessor::new("Material?")),
            Field::new(ListProcessor::new("Keywords?", StringProcessor::new("Keyword?"))),
        ));

        assert_eq!(form.process("Bujes de cartón"), Ok(None));
        assert_eq!(form.process("/add"), Ok(None));
        assert_eq!(form.default_response(), "Keyword?");
        assert_eq!(form.process("Bujes"), Ok(None));
        assert_eq!(form.cursor(), 1);
        assert_eq!(form.process("/add"), Ok(None));
        assert_eq!(form.process("Cartón"), Ok(None));
        assert_eq!(
            form.process("/finish"),
            Ok(Some((
                "Bujes de cartón".to_string(),
                vec!["Bujes".to_string(), "Cartón".to_string()]
            )))
        );
    }
}
