//! Latest-value handoff from input producers to the frame loop.
//!
//! Producers overwrite; the animator reads whatever is newest at the start
//! of a frame. Nothing is queued, so an update published twice between
//! frames only counts once.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// External inputs as of one moment. Only the keyword count is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Raw producer value; sanitized by the animator when it is read.
    pub sentiment: Option<f64>,
    pub keyword_count: usize,
}

impl InputSnapshot {
    pub fn new<S: AsRef<str>>(sentiment: Option<f64>, keywords: &[S]) -> Self {
        Self {
            sentiment,
            keyword_count: keywords.len(),
        }
    }
}

/// Cloneable, thread-safe handle onto the newest [`InputSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    inner: Arc<Mutex<InputSnapshot>>,
}

impl InputSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored snapshot.
    pub fn publish(&self, snapshot: InputSnapshot) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    pub fn set_sentiment(&self, sentiment: Option<f64>) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).sentiment = sentiment;
    }

    pub fn set_keywords<S: AsRef<str>>(&self, keywords: &[S]) {
        let count = InputSnapshot::new(None, keywords).keyword_count;
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).keyword_count = count;
    }

    /// The newest snapshot. A writer that panicked mid-update leaves its
    /// last complete value readable.
    pub fn latest(&self) -> InputSnapshot {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
