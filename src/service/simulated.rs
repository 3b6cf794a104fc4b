//! Local stand-in for a remote "create user" call

use super::traits::UserGateway;
use crate::state::UserDraft;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Default latency of the simulated call
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Sleeps for a fixed delay, then succeeds (or fails when built with `failing`)
#[derive(Debug, Clone)]
pub struct SimulatedUserGateway {
    delay: Duration,
    fail: bool,
}

impl SimulatedUserGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    /// A gateway whose every call fails after the delay
    pub fn failing(delay: Duration) -> Self {
        Self { delay, fail: true }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedUserGateway {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl UserGateway for SimulatedUserGateway {
    async fn create_user(&self, draft: &UserDraft) -> Result<()> {
        tracing::debug!("Simulating create for {} ({:?})", draft.email, self.delay);
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(anyhow!("Simulated create failed for {}", draft.email));
        }
        Ok(())
    }
}
