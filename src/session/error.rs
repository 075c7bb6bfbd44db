use crate::user::UserId;

/// Indicates that a session could not be created because the user already has one.
#[derive(Debug, thiserror::Error)]
#[error("user {user_id} already has an active session")]
pub struct SessionAlreadyActive {
    pub user_id: UserId,
}

/// Indicates that an operation on a session failed because the user has none.
#[derive(Debug, thiserror::Error)]
#[error("no active session for user {user_id}")]
pub struct SessionNotFound {
    pub user_id: UserId,
}
