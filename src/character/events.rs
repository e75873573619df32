//! Character domain: messages written by the character systems.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A footstep sound was played.
#[derive(Debug, Clone)]
pub struct FootstepEvent {
    pub entity: Entity,
    pub location: Vec3,
    pub surface: String,
    pub sound: String,
    pub volume: f32,
}

impl Message for FootstepEvent {}

/// The interact action was pressed.
#[derive(Debug)]
pub struct InteractEvent {
    pub entity: Entity,
}

impl Message for InteractEvent {}

/// A character touched the ground after falling.
#[derive(Debug)]
pub struct CharacterLanded {
    pub entity: Entity,
}

impl Message for CharacterLanded {}
