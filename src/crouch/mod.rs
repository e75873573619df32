//! Crouch domain: the Standing / InTransition / Crouching state machine.

mod machine;
mod phase;


pub use machine::{
    CrouchState, StanceBaseline, StanceTarget, TRANSITION_TOLERANCE, block_sweep_distance,
    is_blocked,
};
pub use phase::{CrouchAction, CrouchPhase};
