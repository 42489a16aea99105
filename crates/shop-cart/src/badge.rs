//! Header cart count badge.

use crate::CartStore;
use std::fmt;
use tokio::sync::watch;

/// Follows the store's item count and renders it as `Cart (n)`.
///
/// The count is refreshed by the store after every successful mutation, so a
/// badge never polls on its own.
#[derive(Debug, Clone)]
pub struct CountBadge {
    count: watch::Receiver<i64>,
}

impl CountBadge {
    pub fn new(store: &CartStore) -> Self {
        Self {
            count: store.watch_count(),
        }
    }

    /// Count currently shown.
    pub fn current(&self) -> i64 {
        *self.count.borrow()
    }

    /// Badge text. Zero is shown rather than hidden.
    pub fn render(&self) -> String {
        format!("Cart ({})", self.current())
    }

    /// Wait for the next count change. Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<i64> {
        self.count.changed().await.ok()?;
        Some(*self.count.borrow_and_update())
    }
}

impl fmt::Display for CountBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cart ({})", self.current())
    }
}
