//! Property-based tests for the composite processors.

use proptest::prelude::*;

use super::primitive::unsigned_int;
use super::{Field, FormProcessor, InputProcessor, ListProcessor};

#[derive(Debug, Clone)]
enum ListOp {
    Add(u32),
    /// Remove at `index % len` if the list is non-empty.
    Remove(usize),
    /// Remove at `len + offset`, always out of range.
    RemoveOutOfRange(usize),
    Unknown,
}

fn arb_list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        any::<u32>().prop_map(ListOp::Add),
        any::<usize>().prop_map(ListOp::Remove),
        (0usize..5).prop_map(ListOp::RemoveOutOfRange),
        Just(ListOp::Unknown),
    ]
}

proptest! {
    #[test]
    fn list_matches_model(ops in prop::collection::vec(arb_list_op(), 0..40)) {
        let mut list = ListProcessor::new("Insert the numbers.", unsigned_int("Insert a number."));
        let mut model: Vec<u32> = Vec::new();

        for op in ops {
            match op {
                ListOp::Add(value) => {
                    prop_assert_eq!(list.process("/add"), Ok(None));
                    prop_assert_eq!(list.process(&value.to_string()), Ok(None));
                    model.push(value);
                }
                ListOp::Remove(index) => {
                    if model.is_empty() {
                        continue;
                    }
                    let index = index % model.len();
                    let line = format!("/remove {index}");
                    prop_assert_eq!(list.process(&line), Ok(None));
                    model.remove(index);
                }
                ListOp::RemoveOutOfRange(offset) => {
                    let index = model.len() + offset;
                    let line = format!("/remove {index}");
                    prop_assert!(list.process(&line).is_err());
                }
                ListOp::Unknown => {
                    prop_assert!(list.process("/sort").is_err());
                }
            }
            prop_assert_eq!(list.items(), model.as_slice());
        }

        prop_assert_eq!(list.process("/finish"), Ok(Some(model)));
    }

    #[test]
    fn form_collects_in_order(
        values in prop::array::uniform3(any::<u32>()),
        rejected_at in 0usize..3,
    ) {
        let mut form = FormProcessor::new((
            Field::new(unsigned_int("a")),
            Field::new(unsigned_int("b")),
            Field::new(unsigned_int("c")),
        ));
        let prompts = ["a", "b", "c"];

        for (position, value) in values.iter().enumerate() {
            if position == rejected_at {
                prop_assert!(form.process("not a number").is_err());
                prop_assert_eq!(form.cursor(), position);
                prop_assert_eq!(form.default_response(), prompts[position]);
            }

            let result = form.process(&value.to_string());
            if position < 2 {
                prop_assert_eq!(result, Ok(None));
            } else {
                prop_assert_eq!(result, Ok(Some((values[0], values[1], values[2]))));
            }
        }
    }
}
