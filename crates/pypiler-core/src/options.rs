//! Options that steer lowering.

use serde::{Deserialize, Serialize};

/// What to do when a function is lowered under a name that already holds a
/// lowered operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedefinitionPolicy {
    /// Replace the previous graph and log a warning.
    #[default]
    Replace,
    /// Fail the lowering with a redefinition error.
    Reject,
}

/// The `[lowering]` section of the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoweringOptions {
    #[serde(default)]
    pub redefinition: RedefinitionPolicy,
}

impl LoweringOptions {
    #[must_use]
    pub const fn new(redefinition: RedefinitionPolicy) -> Self {
        Self { redefinition }
    }
}
