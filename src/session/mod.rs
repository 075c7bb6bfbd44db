use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::{DashMap, Entry};
use tracing::{debug, info};

pub use crate::user::UserId;

use self::conversation::{Conversation, ConversationInput, ConversationOutput};
use self::error::{SessionAlreadyActive, SessionNotFound};
use crate::state::State;
use crate::state_machine::StateMachine;

pub mod conversation;
pub mod error;

type InitialState = Box<dyn Fn(&UserId) -> Box<dyn State> + Send + Sync>;

/// A registry of conversations identified by a [`UserId`], each holding that user's current
/// [`State`].
///
/// Users are admitted on their first message with a state produced by the initial state factory,
/// or explicitly through [`insert_session`](Self::insert_session). Sessions only end through
/// [`remove_session`](Self::remove_session), which is up to the collaborator owning the
/// registry (e.g. an admin removing a user or an idle timeout).
///
/// Dispatches for different users proceed in parallel, dispatches for the same user are
/// serialized so that every line sees the state left by the previous one. Removing a session
/// joins that order: it waits for the dispatch in flight, and later lines start a new session.
pub struct SessionRegistry {
    sessions: DashMap<UserId, Arc<Mutex<Conversation>>, ahash::RandomState>,
    initial_state: InitialState,
}

impl SessionRegistry {
    /// Construct a new empty [`SessionRegistry`] admitting unknown users into the state built by
    /// `initial_state`.
    ///
    /// The factory runs while the registry holds the lock for the new user's entry, so it must not
    /// call back into the registry.
    pub fn new(
        initial_state: impl Fn(&UserId) -> Box<dyn State> + Send + Sync + 'static,
    ) -> SessionRegistry {
        Self {
            sessions: DashMap::default(),
            initial_state: Box::new(initial_state),
        }
    }

    /// Feed one inbound `line` from `user_id` to that user's current state.
    ///
    /// Returns the responses to send back, in order: the transition message if any, followed by
    /// the prompt of the new state when the user changed state.
    pub fn dispatch(&self, user_id: &UserId, line: &str) -> Vec<String> {
        loop {
            let entry = self.get_or_admit(user_id);
            let mut conversation = lock(&entry);
            if conversation.is_closed() {
                // Removed while waiting for the lock, the next lookup admits the user afresh.
                continue;
            }

            debug!(user_id = %user_id, state = %conversation.state().name(), "Dispatching line");
            conversation.process_input(ConversationInput::Line(line.to_string()));

            let mut responses = Vec::with_capacity(conversation.pending_count());
            while let Some(ConversationOutput::Response(response)) = conversation.poll_output() {
                responses.push(response);
            }
            return responses;
        }
    }

    /// Admit `user_id` directly into `state`.
    pub fn insert_session(
        &self,
        user_id: UserId,
        state: Box<dyn State>,
    ) -> Result<(), SessionAlreadyActive> {
        match self.sessions.entry(user_id) {
            Entry::Occupied(entry) => Err(SessionAlreadyActive {
                user_id: entry.key().clone(),
            }),

            Entry::Vacant(slot) => {
                info!(user_id = %slot.key(), state = %state.name(), "Session created");
                slot.insert(Arc::new(Mutex::new(Conversation::new(state))));
                Ok(())
            }
        }
    }

    /// Force `user_id` into `state`, returning the state it replaced.
    pub fn replace_session(
        &self,
        user_id: &UserId,
        state: Box<dyn State>,
    ) -> Result<Box<dyn State>, SessionNotFound> {
        let previous = self.with_open(user_id, |conversation| conversation.replace_state(state))?;

        debug!(user_id = %user_id, from = %previous.name(), "Session state replaced");
        Ok(previous)
    }

    /// End the session of `user_id`, returning whether there was one.
    ///
    /// Blocks until a dispatch in flight for `user_id` has stored its transition. A session whose
    /// lock was poisoned by a panicking state is removed all the same.
    pub fn remove_session(&self, user_id: &UserId) -> bool {
        let Ok(entry) = self.get(user_id) else {
            return false;
        };

        let mut conversation = entry.lock().unwrap_or_else(PoisonError::into_inner);
        if conversation.is_closed() {
            return false;
        }
        conversation.close();
        self.sessions.remove_if(user_id, |_, current| Arc::ptr_eq(current, &entry));
        drop(conversation);

        info!(user_id = %user_id, "Session removed");
        true
    }

    /// Scoped access via a `view_fn` to the current state of `user_id`.
    pub fn view<F: FnOnce(&dyn State) -> R, R>(
        &self,
        user_id: &UserId,
        view_fn: F,
    ) -> Result<R, SessionNotFound> {
        self.with_open(user_id, |conversation| view_fn(conversation.state()))
    }

    /// The prompt of the current state of `user_id`.
    pub fn current_prompt(&self, user_id: &UserId) -> Result<String, SessionNotFound> {
        self.view(user_id, |state| state.default_response())
    }

    pub fn has_session(&self, user_id: &UserId) -> bool {
        self.sessions.contains_key(user_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn get(&self, user_id: &UserId) -> Result<Arc<Mutex<Conversation>>, SessionNotFound> {
        self.sessions
            .get(user_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| SessionNotFound {
                user_id: user_id.clone(),
            })
    }

    /// Run `f` on the conversation of `user_id` under its lock, unless it was removed meanwhile.
    fn with_open<R>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&mut Conversation) -> R,
    ) -> Result<R, SessionNotFound> {
        let entry = self.get(user_id)?;
        let mut conversation = lock(&entry);
        if conversation.is_closed() {
            return Err(SessionNotFound {
                user_id: user_id.clone(),
            });
        }
        Ok(f(&mut conversation))
    }

    fn get_or_admit(&self, user_id: &UserId) -> Arc<Mutex<Conversation>> {
        match self.sessions.entry(user_id.clone()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),

            Entry::Vacant(slot) => {
                let state = (self.initial_state)(user_id);
                info!(user_id = %user_id, state = %state.name(), "Session created");

                let conversation = Arc::new(Mutex::new(Conversation::new(state)));
                slot.insert(Arc::clone(&conversation));
                conversation
            }
        }
    }
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

fn lock(conversation: &Mutex<Conversation>) -> MutexGuard<'_, Conversation> {
    conversation.lock().expect("conversation lock poisoned")
}
