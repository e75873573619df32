//! Bindings domain: keys, action mappings and axis mappings.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const AXIS_MOVE_FORWARD: &str = "MoveForward";
pub const AXIS_MOVE_RIGHT: &str = "MoveRight";
pub const AXIS_TURN: &str = "Turn";
pub const AXIS_LOOK_UP: &str = "LookUp";

pub const ACTION_JUMP: &str = "Jump";
pub const ACTION_RUN: &str = "Run";
pub const ACTION_CROUCH: &str = "Crouch";
pub const ACTION_INTERACT: &str = "Interact";
pub const ACTION_ESCAPE: &str = "Escape";

/// Keys the character knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum InputKey {
    W,
    A,
    S,
    D,
    SpaceBar,
    LeftShift,
    LeftControl,
    C,
    F,
    Escape,
    MouseX,
    MouseY,
    /// Placeholder for a binding the user is expected to assign.
    Unbound,
}

impl InputKey {
    /// Keyboard key backing this input, if it is a keyboard key.
    pub fn key_code(self) -> Option<KeyCode> {
        match self {
            InputKey::W => Some(KeyCode::KeyW),
            InputKey::A => Some(KeyCode::KeyA),
            InputKey::S => Some(KeyCode::KeyS),
            InputKey::D => Some(KeyCode::KeyD),
            InputKey::SpaceBar => Some(KeyCode::Space),
            InputKey::LeftShift => Some(KeyCode::ShiftLeft),
            InputKey::LeftControl => Some(KeyCode::ControlLeft),
            InputKey::C => Some(KeyCode::KeyC),
            InputKey::F => Some(KeyCode::KeyF),
            InputKey::Escape => Some(KeyCode::Escape),
            InputKey::MouseX | InputKey::MouseY | InputKey::Unbound => None,
        }
    }

    /// Keys whose default axis mapping is reversed.
    pub fn is_negative_by_default(self) -> bool {
        matches!(self, InputKey::S | InputKey::A | InputKey::MouseY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionMapping {
    pub action: String,
    pub key: InputKey,
}

impl ActionMapping {
    pub fn new(action: impl Into<String>, key: InputKey) -> Self {
        Self {
            action: action.into(),
            key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AxisMapping {
    pub axis: String,
    pub key: InputKey,
    pub scale: f32,
}

impl AxisMapping {
    pub fn new(axis: impl Into<String>, key: InputKey, scale: f32) -> Self {
        Self {
            axis: axis.into(),
            key,
            scale,
        }
    }
}
