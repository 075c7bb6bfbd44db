//! A conversational input-processing engine.
//!
//! Remote users fill in forms, edit lists and walk menus over a line-oriented channel, one text
//! line at a time. The channel knows nothing about what is being collected:
//!
//! * [`processor`] turns lines into typed values (scalars, forms, lists).
//! * [`handler`] binds a processor to a completion contract.
//! * [`state`] wraps handlers into the states a user moves through.
//! * [`session`] routes each inbound line to the right user's current state.

pub mod handler;
pub mod processor;
pub mod session;
pub mod state;
pub mod state_machine;
pub mod tokens;
pub mod user;
pub mod value;

pub use self::session::SessionRegistry;
pub use self::tokens::Tokens;
pub use self::user::UserId;
