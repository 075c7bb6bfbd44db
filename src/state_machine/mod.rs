/// The [`StateMachine`] trait provides calling semantics for containers that are driven by
/// discrete input and drained of discrete output.
///
/// # Functionality
/// State machines are expected to operate on defined inputs and outputs. Often there are multiple
/// kinds of input and output a given state machine will operate on and in Rust this can be easily
/// represented with an enum containing the different kinds of input/output.
///
/// The type groupings are provided by the associated types of [`Input`](StateMachine::Input) and
/// [`Output`](StateMachine::Output). These will most often be an enum when there are multiple
/// input/output variants, but can be a struct in the base case of a single variant.
///
/// Method dispatch is then defined by the methods [`process_input`](StateMachine::process_input)
/// and [`poll_output`](StateMachine::poll_output), handling mapping input and output respectively.
///
/// # Invariants
/// Processing one input runs to completion before it returns: there is no suspension point
/// inside [`process_input`](StateMachine::process_input), no IO and no async. Everything the
/// input produced is queued and available from [`poll_output`](StateMachine::poll_output) right
/// after the call.
///
/// A [`StateMachine`] is driven through `&mut` access only, so serializing access to one machine
/// (e.g. behind a [`Mutex`](std::sync::Mutex)) is all a container needs to keep it consistent
/// across threads.
///
/// # Side Effects
/// The states plugged into a conversation carry domain callbacks, which may have side effects
/// in the collaborators that supplied them. The machine itself must not rely on the outcome of
/// those side effects beyond the values they return.
///
/// # Example
/// ```ignore
/// let mut conversation = Conversation::new(initial_state);
/// conversation.process_input(ConversationInput::Line("/add".to_string()));
///
/// while let Some(ConversationOutput::Response(text)) = conversation.poll_output() {
///     println!("{text}");
/// }
/// ```
pub trait StateMachine {
    /// The type of input that is [processed](StateMachine::process_input) by the state machine.
    ///
    /// This is often an enum containing all the possible variants of input, but can also be a
    /// struct when there is only one input variant.
    type Input;
    /// The type of output that is [polled](StateMachine::poll_output) by the state machine.
    ///
    /// This is often an enum containing all the possible variants of output, but can also be a
    /// struct when there is only one output variant.
    type Output;

    /// Process the provided `input` into the state machine.
    fn process_input(&mut self, input: Self::Input);

    /// Poll the state machine for output, returning the first available output if present.
    fn poll_output(&mut self) -> Option<Self::Output>;
}
