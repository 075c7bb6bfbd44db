use bon::Builder;

/// The reserved tokens recognised directly by processors and states.
///
/// Tokens are compared against the trimmed input line, so they must not collide with any value a
/// domain field accepts.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Tokens {
    /// Leaves the current processor state through its exit target.
    #[builder(default = "/back".to_string(), into)]
    pub cancel: String,

    /// Starts collecting a new list element.
    #[builder(default = "/add".to_string(), into)]
    pub add: String,

    /// Removes a list element, either `remove <index>` or `remove` followed by the index.
    #[builder(default = "/remove".to_string(), into)]
    pub remove: String,

    /// Completes a list with the elements collected so far.
    #[builder(default = "/finish".to_string(), into)]
    pub finish: String,

    /// Skips an optional field.
    #[builder(default = "/esc".to_string(), into)]
    pub skip: String,
}

impl Default for Tokens {
    fn default() -> Self {
        Self::builder().build()
    }
}
