//! Stale-load guard for the active-order watch
//!
//! Each data load for the customer view runs under a generation
//! token. Starting a new load cancels the previous generation, so a
//! superseded fetch that resolves late can no longer overwrite newer
//! state — the caller checks the token before applying the result.

use tokio_util::sync::CancellationToken;

/// Tracks the current load generation for one view
#[derive(Debug, Default)]
pub struct ActiveOrderGuard {
    current: Option<CancellationToken>,
}

impl ActiveOrderGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new load generation, cancelling any previous one.
    /// The returned token accompanies the in-flight fetch.
    pub fn begin(&mut self) -> CancellationToken {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.current = Some(token.clone());
        token
    }

    /// Whether a fetch started under `token` may still apply its result
    pub fn is_current(&self, token: &CancellationToken) -> bool {
        !token.is_cancelled()
    }

    /// Cancel the in-flight generation (component teardown)
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}
