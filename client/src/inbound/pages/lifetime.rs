//! Page lifetimes and the cancellation they carry.
//!
//! A page owns one [`PageLifetime`]. Unmounting cancels it; any backend call
//! that completes afterwards is discarded before it can touch page state, and
//! background tasks spawned by the page exit.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Cancellation scope of a mounted page.
#[derive(Debug, Clone, Default)]
pub struct PageLifetime {
    token: CancellationToken,
}

impl PageLifetime {
    /// A fresh, active lifetime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the page is still mounted.
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Token for background tasks; cancelled when the page unmounts.
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Tear the page down.
    pub fn unmount(&self) {
        if self.is_active() {
            debug!("page unmounted");
        }
        self.token.cancel();
    }

    /// Await `operation` and hand back its output only if the page is still
    /// mounted once it completes.
    pub async fn settle<F>(&self, operation: F) -> Option<F::Output>
    where
        F: Future,
    {
        let output = operation.await;
        if self.is_active() {
            Some(output)
        } else {
            debug!("discarding result for unmounted page");
            None
        }
    }
}
