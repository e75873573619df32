//! Shake domain: per-tick shake selection and oscillator playback.

mod driver;
mod playback;
mod preset;


pub use driver::{
    IDLE_SHAKE_SCALE, JUMP_SHAKE_SCALE, LANDING_SHAKE_SCALE, RUN_SHAKE_SCALE, WALK_SHAKE_SCALE,
    play_jump_shake, update_camera_shake,
};
pub use playback::{ActiveShakes, ControllerShakes, ShakeInstance, ShakeOffset};
pub use preset::{CameraShakePreset, CameraShakes, ShakeKind};
