//! Trait abstraction for the user creation step to enable mocking in tests

use crate::state::UserDraft;
use anyhow::Result;
use async_trait::async_trait;

/// The asynchronous step that runs while a submission is in flight
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Create a user from validated, trimmed values
    async fn create_user(&self, draft: &UserDraft) -> Result<()>;
}
