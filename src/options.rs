// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

use serde::Deserialize;
use serde::Serialize;

/// Switches that pick the merge policy.
///
/// Missing fields fall back to the defaults when deserializing, so a partial
/// document such as `{"allow_lower_position": true}` is a valid configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Whether injected entries are visible at all. On by default.
    pub show_overlay: bool,
    /// Show injected entries on their own when the child sequence is empty.
    /// Off by default.
    pub show_on_empty_child: bool,
    /// Append injected entries the child sequence is too short to reach,
    /// instead of dropping them. Off by default.
    pub allow_lower_position: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        return MergeOptions {
            show_overlay: true,
            show_on_empty_child: false,
            allow_lower_position: false,
        };
    }
}
