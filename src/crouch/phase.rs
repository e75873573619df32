//! Crouch domain: stance phase and crouch input mode.

use serde::{Deserialize, Serialize};

/// The single authoritative stance field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrouchPhase {
    #[default]
    Standing,
    /// A lerp toward the crouched or standing target is in progress.
    InTransition,
    Crouching,
}

/// How the crouch key is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum CrouchAction {
    /// Crouch while the key is held, stand on release.
    #[default]
    Hold,
    /// Each press flips between crouching and standing.
    Toggle,
}
