use std::time::Duration;

use crate::list::ExpandMode;

/// Window during which a repeated toggle of the same group is ignored.
pub const DEFAULT_TOGGLE_DEBOUNCE: Duration = Duration::from_millis(400);

/// Configuration knobs for [`ExpandableList`](crate::ExpandableList).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Policy applied when a group is expanded.
    pub mode: ExpandMode,
    /// Minimum delay between two toggles of the same group.
    pub toggle_debounce: Duration,
}

impl ExpandOptions {
    pub fn with_mode(mut self, mode: ExpandMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_toggle_debounce(mut self, debounce: Duration) -> Self {
        self.toggle_debounce = debounce;
        self
    }
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            mode: ExpandMode::Single,
            toggle_debounce: DEFAULT_TOGGLE_DEBOUNCE,
        }
    }
}
