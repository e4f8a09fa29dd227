//! Default value functions for configuration.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Queue Defaults
// =============================================================================

pub fn default_event_queue() -> usize {
    256
}

pub fn default_write_queue() -> usize {
    256
}
