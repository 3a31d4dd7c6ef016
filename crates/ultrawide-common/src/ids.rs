//! ID types for HUD widgets.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for marker IDs.
static MARKER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies one scan-marker widget on the HUD.
///
/// The host keys its marker → point-of-interest mapping by this ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Creates a new unique marker ID.
    #[must_use]
    pub fn new() -> Self {
        Self(MARKER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a marker ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}
