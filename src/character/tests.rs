//! Character domain: unit tests for the character hooks and input helpers.

use std::sync::Arc;
use std::time::Duration;

use avian3d::prelude::*;
use bevy::asset::{AssetApp, AssetPlugin};
use bevy::audio::AudioSource;
use bevy::ecs::message::MessageReader;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use super::{
    ActionState, CapsuleShape, CharacterLanded, CharacterMotor, CharacterPlugin,
    CharacterRequest, ControlRotation, Feedback, FirstPersonCharacter, FirstPersonSet,
    FootstepEvent, MOUSE_AXIS_SCALE, MovementMode, PlayerController, SurfaceMaterial,
    TICK_PHASES, TickPhase, action_states, axis_value, first_person_character_bundle,
    horizontal_velocity,
};
use crate::bindings::{ACTION_CROUCH, InputKey, InputSettings};
use crate::crouch::{CrouchAction, CrouchPhase};
use crate::footsteps::FootstepCue;
use crate::settings::CharacterSettings;
use crate::shake::ShakeKind;
use crate::testing::{FakeHost, RecordingShakes, RecordingSounds, grass_settings, seeded_rng};

const DT: f32 = 1.0 / 60.0;

fn spawn(settings: CharacterSettings) -> (FirstPersonCharacter, FakeHost) {
    let mut host = FakeHost::default();
    let mut character = FirstPersonCharacter::new(Arc::new(settings));
    character.begin_play(&mut host);
    (character, host)
}

fn crouch_fully(character: &mut FirstPersonCharacter, host: &mut FakeHost) {
    character.start_crouch(&*host);
    for _ in 0..200 {
        character.tick(DT, host, None);
    }
    assert_eq!(character.crouch_phase(), CrouchPhase::Crouching);
}

/// Walks `steps` forward steps of `step` meters through the forward axis.
fn walk_forward(
    character: &mut FirstPersonCharacter,
    host: &mut FakeHost,
    steps: usize,
    step: f32,
) -> (Vec<FootstepCue>, RecordingSounds) {
    let control = ControlRotation::default();
    let mut sounds = RecordingSounds::default();
    let mut rng = seeded_rng();
    let mut cues = Vec::new();

    for _ in 0..steps {
        host.walk(step);
        let mut feedback = Feedback {
            shakes: None,
            sounds: &mut sounds,
            rng: &mut rng,
        };
        cues.extend(character.move_forward(1.0, Some(&control), host, &mut feedback));
    }
    (cues, sounds)
}

#[test]
fn test_tick_phases_run_shake_first() {
    assert_eq!(
        TICK_PHASES,
        [
            TickPhase::CameraShake,
            TickPhase::CrouchTransition,
            TickPhase::WalkSpeed
        ]
    );
}

#[test]
fn test_begin_play_applies_movement_settings() {
    let mut settings = CharacterSettings::default();
    settings.movement.jump_velocity = 4.2;
    settings.movement.air_control = 0.3;

    let (character, host) = spawn(settings);

    assert_eq!(host.max_walk_speed, 3.0);
    assert_eq!(host.jump_velocity, 4.2);
    assert_eq!(host.air_control, 0.3);
    assert_eq!(character.baseline().capsule_half_height, 0.9);
    assert_eq!(character.baseline().camera_offset, Vec3::new(0.0, 0.7, 0.0));
    assert_eq!(character.crouch_phase(), CrouchPhase::Standing);
}

#[test]
fn test_run_and_walk_speed_after_one_tick() {
    let (mut character, mut host) = spawn(CharacterSettings::default());

    character.run();
    character.tick(DT, &mut host, None);
    assert_eq!(host.max_walk_speed, 5.0);

    character.stop_running();
    character.tick(DT, &mut host, None);
    assert_eq!(host.max_walk_speed, 3.0);
}

#[test]
fn test_run_shake_sees_previous_walk_speed() {
    let (mut character, mut host) = spawn(CharacterSettings::default());
    host.walk(0.1);
    let mut shakes = RecordingShakes::default();

    character.run();
    character.tick(DT, &mut host, Some(&mut shakes));
    assert_eq!(shakes.started, vec![(ShakeKind::Walk, 2.0)]);

    shakes.started.clear();
    character.tick(DT, &mut host, Some(&mut shakes));
    assert_eq!(
        shakes.started,
        vec![(ShakeKind::Walk, 2.0), (ShakeKind::Run, 1.0)]
    );
}

#[test]
fn test_crouched_speed_is_not_overridden_by_run() {
    let (mut character, mut host) = spawn(CharacterSettings::default());
    crouch_fully(&mut character, &mut host);

    character.run();
    character.tick(DT, &mut host, None);

    assert_eq!(host.max_walk_speed, 1.5);
    assert_eq!(character.current_walk_speed(), 3.0);
}

#[test]
fn test_stand_up_restores_run_speed_when_running() {
    let (mut character, mut host) = spawn(CharacterSettings::default());
    crouch_fully(&mut character, &mut host);

    character.run();
    character.stop_crouching();
    for _ in 0..200 {
        character.tick(DT, &mut host, None);
    }

    assert_eq!(character.crouch_phase(), CrouchPhase::Standing);
    assert_eq!(host.max_walk_speed, 5.0);
}

#[test]
fn test_jump_only_while_standing() {
    let (mut character, mut host) = spawn(CharacterSettings::default());
    let mut shakes = RecordingShakes::default();

    character.jump(&mut host, Some(&mut shakes));
    assert_eq!(host.jumps, 1);
    assert_eq!(shakes.started, vec![(ShakeKind::Jump, 1.0)]);

    crouch_fully(&mut character, &mut host);
    character.jump(&mut host, Some(&mut shakes));
    assert_eq!(host.jumps, 1);
    assert_eq!(shakes.started.len(), 1);

    character.stop_jumping(&mut host);
    assert_eq!(host.stop_jumps, 1);
}

#[test]
fn test_landing_plays_one_footstep_and_one_shake() {
    let (mut character, mut host) = spawn(grass_settings());
    let mut shakes = RecordingShakes::default();
    let mut sounds = RecordingSounds::default();
    let mut rng = seeded_rng();

    walk_forward(&mut character, &mut host, 3, 0.25);
    assert_eq!(character.footsteps().travel_distance(), 0.75);

    host.location = Vec3::new(3.0, 0.9, 0.0);
    let cue = {
        let mut feedback = Feedback {
            shakes: Some(&mut shakes),
            sounds: &mut sounds,
            rng: &mut rng,
        };
        character.landed(&mut host, &mut feedback)
    };

    assert_eq!(shakes.started, vec![(ShakeKind::Jump, 3.0)]);
    assert_eq!(sounds.played.len(), 1);
    assert_eq!(cue.map(|cue| cue.location), Some(Vec3::new(3.0, 0.0, 0.0)));
    assert_eq!(character.footsteps().travel_distance(), 0.0);
    assert_eq!(character.footsteps().last_footstep_location(), Vec3::new(3.0, 0.0, 0.0));
}

#[test]
fn test_landing_while_crouched_is_silent() {
    let (mut character, mut host) = spawn(grass_settings());
    crouch_fully(&mut character, &mut host);
    let mut shakes = RecordingShakes::default();
    let mut sounds = RecordingSounds::default();
    let mut rng = seeded_rng();

    let cue = {
        let mut feedback = Feedback {
            shakes: Some(&mut shakes),
            sounds: &mut sounds,
            rng: &mut rng,
        };
        character.landed(&mut host, &mut feedback)
    };

    assert!(cue.is_none());
    assert!(shakes.started.is_empty());
    assert!(sounds.played.is_empty());
}

#[test]
fn test_walking_past_stride_fires_one_footstep() {
    let (mut character, mut host) = spawn(grass_settings());

    let (cues, sounds) = walk_forward(&mut character, &mut host, 7, 0.25);

    assert_eq!(cues.len(), 1);
    assert_eq!(sounds.played.len(), 1);
    assert_eq!(cues[0].volume, 1.0);
    assert_eq!(character.footsteps().travel_distance(), 0.0);
    assert_eq!(host.movement_inputs.len(), 7);
    assert_eq!(host.movement_inputs[0], (Vec3::NEG_Z, 1.0));
}

#[test]
fn test_crouched_footsteps_use_crouch_stride() {
    let (mut character, mut host) = spawn(grass_settings());
    crouch_fully(&mut character, &mut host);

    // The first step still uses the initial stride and picks up the crouch
    // stride (1.2 on grass) for the next one.
    let (cues, _) = walk_forward(&mut character, &mut host, 7, 0.25);
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].volume, 0.35);
    assert_eq!(character.footsteps().current_stride(), 1.2);

    let (cues, _) = walk_forward(&mut character, &mut host, 5, 0.25);
    assert_eq!(cues.len(), 1);
}

#[test]
fn test_disabled_footsteps_never_fire() {
    let mut settings = grass_settings();
    settings.footsteps.enabled = false;
    let (mut character, mut host) = spawn(settings);

    let (cues, sounds) = walk_forward(&mut character, &mut host, 20, 0.25);

    assert!(cues.is_empty());
    assert!(sounds.played.is_empty());
    assert_eq!(host.movement_inputs.len(), 20);
}

#[test]
fn test_unmapped_surface_steps_are_silent() {
    let (mut character, mut host) = spawn(grass_settings());
    host.floor_surface = Some("metal".to_string());

    let (cues, sounds) = walk_forward(&mut character, &mut host, 7, 0.25);

    assert!(cues.is_empty());
    assert!(sounds.played.is_empty());
    assert_eq!(character.footsteps().unmapped_footsteps(), 1);
    assert_eq!(character.footsteps().travel_distance(), 0.0);
}

#[test]
fn test_movement_without_controller_is_skipped() {
    let (mut character, mut host) = spawn(grass_settings());
    let mut sounds = RecordingSounds::default();
    let mut rng = seeded_rng();
    let mut feedback = Feedback {
        shakes: None,
        sounds: &mut sounds,
        rng: &mut rng,
    };

    host.walk(5.0);
    let cue = character.move_forward(1.0, None, &mut host, &mut feedback);
    character.move_right(1.0, None, &mut host);

    assert!(cue.is_none());
    assert!(host.movement_inputs.is_empty());
    assert_eq!(character.footsteps().travel_distance(), 0.0);
}

#[test]
fn test_move_right_uses_control_right_vector() {
    let (mut character, mut host) = spawn(CharacterSettings::default());
    let control = ControlRotation::default();

    character.move_right(-1.0, Some(&control), &mut host);

    assert_eq!(host.movement_inputs, vec![(Vec3::X, -1.0)]);
}

#[test]
fn test_look_input_scales_by_sensitivity_and_clamps_pitch() {
    let mut settings = CharacterSettings::default();
    settings.camera.min_pitch = -80.0;
    settings.camera.max_pitch = 80.0;
    let (character, _) = spawn(settings);
    let mut control = ControlRotation::default();

    character.add_yaw_input(1.0, 0.5, &mut control);
    assert_eq!(control.yaw, 335.0);

    character.add_pitch_input(-1.0, 0.5, &mut control);
    assert_eq!(control.pitch, 25.0);

    character.add_pitch_input(-10.0, 1.0, &mut control);
    assert_eq!(control.pitch, 80.0);
}

#[test]
fn test_positive_yaw_turns_right() {
    let mut control = ControlRotation::default();
    assert!(control.flat_forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));

    control.add_yaw(90.0);
    assert!(control.flat_forward().abs_diff_eq(Vec3::X, 1e-6));
}

#[test]
fn test_toggle_character_crouch() {
    let mut settings = CharacterSettings::default();
    settings.movement.crouch_action = CrouchAction::Toggle;
    let (mut character, mut host) = spawn(settings);

    crouch_fully(&mut character, &mut host);
    character.stop_crouching();
    assert_eq!(character.crouch_phase(), CrouchPhase::Crouching);

    character.start_crouch(&host);
    assert_eq!(character.crouch_phase(), CrouchPhase::InTransition);
}

#[test]
fn test_requests() {
    let (character, _) = spawn(CharacterSettings::default());
    assert_eq!(character.interact(), CharacterRequest::Interact);
    assert_eq!(character.quit(), CharacterRequest::Quit);
}

#[test]
fn test_axis_value_sums_pressed_keys_and_mouse() {
    let mut keyboard = ButtonInput::<KeyCode>::default();
    let forward = [(InputKey::W, 1.0), (InputKey::S, -1.0)];

    assert_eq!(axis_value(&forward, &keyboard, Vec2::ZERO), 0.0);

    keyboard.press(KeyCode::KeyS);
    assert_eq!(axis_value(&forward, &keyboard, Vec2::ZERO), -1.0);

    keyboard.press(KeyCode::KeyW);
    assert_eq!(axis_value(&forward, &keyboard, Vec2::ZERO), 0.0);

    let look_up = [(InputKey::MouseY, -1.0)];
    let value = axis_value(&look_up, &keyboard, Vec2::new(0.0, 10.0));
    assert!((value - 10.0 * MOUSE_AXIS_SCALE).abs() < 1e-6);

    let unbound = [(InputKey::Unbound, 1.0)];
    assert_eq!(axis_value(&unbound, &keyboard, Vec2::new(5.0, 5.0)), 0.0);
}

#[test]
fn test_action_states_report_edges() {
    let mut keyboard = ButtonInput::<KeyCode>::default();
    let crouch = [InputKey::LeftControl, InputKey::C];

    assert!(action_states(&crouch, &keyboard).is_empty());

    keyboard.press(KeyCode::KeyC);
    assert_eq!(action_states(&crouch, &keyboard), vec![ActionState::Pressed]);

    keyboard.clear();
    assert!(action_states(&crouch, &keyboard).is_empty());

    keyboard.release(KeyCode::KeyC);
    assert_eq!(action_states(&crouch, &keyboard), vec![ActionState::Released]);
}

#[test]
fn test_grounded_motor_moves_at_walk_speed() {
    let motor = CharacterMotor {
        mode: MovementMode::Walking,
        pending_input: Vec3::new(0.0, 0.0, -2.0),
        ..Default::default()
    };

    let velocity = horizontal_velocity(&motor, Vec3::new(1.0, -3.0, 0.0));

    assert_eq!(velocity, Vec3::new(0.0, 0.0, -3.0));
}

#[test]
fn test_falling_motor_only_steers_by_air_control() {
    let mut motor = CharacterMotor {
        mode: MovementMode::Falling,
        air_control: 0.5,
        ..Default::default()
    };
    let current = Vec3::new(2.0, -1.0, 0.0);

    assert_eq!(horizontal_velocity(&motor, current), Vec3::new(2.0, 0.0, 0.0));

    motor.pending_input = Vec3::NEG_X;
    assert_eq!(horizontal_velocity(&motor, current), Vec3::new(-0.5, 0.0, 0.0));
}

#[test]
fn test_pitch_clamp_accepts_reversed_bounds() {
    let mut control = ControlRotation::default();

    control.add_pitch(-50.0, 30.0, -30.0);
    assert_eq!(control.pitch, 30.0);

    control.add_pitch(100.0, 30.0, -30.0);
    assert_eq!(control.pitch, -30.0);
}

#[test]
fn test_invalid_settings_are_sanitized_on_construction() {
    let mut settings = CharacterSettings::default();
    settings.camera.min_pitch = 45.0;
    settings.camera.max_pitch = 10.0;
    settings.movement.walk_speed = f32::NAN;

    let (character, host) = spawn(settings);
    let mut control = ControlRotation::default();
    character.add_pitch_input(-1.0, 1.0, &mut control);

    let camera = &character.settings().camera;
    assert!(camera.min_pitch <= camera.max_pitch);
    assert_eq!(control.pitch, 45.0);
    assert_eq!(host.max_walk_speed, 3.0);
}

// Full app runs: the character glue on top of avian physics.

#[derive(Resource, Default)]
struct Tally {
    landings: usize,
    footsteps: usize,
}

fn tally_messages(
    mut tally: ResMut<Tally>,
    mut landings: MessageReader<CharacterLanded>,
    mut footsteps: MessageReader<FootstepEvent>,
) {
    tally.landings += landings.read().count();
    tally.footsteps += footsteps.read().count();
}

/// Headless app with physics, the character plugin and a grass floor whose
/// top face is at y = 0.
fn physics_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        AssetPlugin::default(),
        bevy::mesh::MeshPlugin,
        bevy::scene::ScenePlugin,
        PhysicsPlugins::default(),
        CharacterPlugin,
    ))
    .init_asset::<AudioSource>()
    .init_resource::<ButtonInput<KeyCode>>()
    .init_resource::<AccumulatedMouseMotion>()
    .init_resource::<Tally>()
    .insert_resource(InputSettings::default())
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(DT)))
    .add_systems(Update, tally_messages.after(FirstPersonSet::Detection));
    app.finish();
    app.cleanup();

    app.world_mut().spawn((
        SurfaceMaterial::new("grass"),
        RigidBody::Static,
        Collider::cuboid(20.0, 0.2, 20.0),
        Transform::from_xyz(0.0, -0.1, 0.0),
    ));
    app
}

/// Spawns a character with its capsule bottom `gap` above the floor.
fn spawn_character(app: &mut App, gap: f32) -> Entity {
    let settings = grass_settings();
    let at = Vec3::new(0.0, settings.body.capsule_half_height + gap, 0.0);
    app.insert_resource(settings.clone());
    app.world_mut()
        .spawn(first_person_character_bundle(Arc::new(settings), at))
        .id()
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Runs one frame with `key` changing state, as the input plugin would.
fn key_frame(app: &mut App, key: KeyCode, pressed: bool) {
    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    if pressed {
        keyboard.press(key);
    } else {
        keyboard.release(key);
    }
    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
}

fn movement_mode(app: &App, entity: Entity) -> MovementMode {
    app.world()
        .get::<CharacterMotor>(entity)
        .expect("character has a motor")
        .mode
}

fn crouch_phase(app: &App, entity: Entity) -> CrouchPhase {
    app.world()
        .get::<FirstPersonCharacter>(entity)
        .expect("character component")
        .crouch_phase()
}

#[test]
fn test_possession_installs_default_bindings() {
    let mut app = physics_app();
    let character = spawn_character(&mut app, 0.02);

    run_frames(&mut app, 2);

    assert!(app.world().get::<PlayerController>(character).is_some());
    let bindings = app.world().resource::<InputSettings>();
    assert_eq!(
        bindings.action_keys(ACTION_CROUCH),
        &[InputKey::LeftControl, InputKey::C]
    );
}

#[test]
fn test_crouching_on_the_floor_stays_grounded() {
    let mut app = physics_app();
    let character = spawn_character(&mut app, 0.02);
    run_frames(&mut app, 60);
    assert_eq!(movement_mode(&app, character), MovementMode::Walking);
    *app.world_mut().resource_mut::<Tally>() = Tally::default();

    key_frame(&mut app, KeyCode::KeyC, true);
    for _ in 0..60 {
        assert_eq!(movement_mode(&app, character), MovementMode::Walking);
        app.update();
    }

    assert_eq!(crouch_phase(&app, character), CrouchPhase::Crouching);
    assert_eq!(movement_mode(&app, character), MovementMode::Walking);
    let capsule = app.world().get::<CapsuleShape>(character).expect("capsule");
    assert_eq!(capsule.half_height, 0.45);
    let centre = app.world().get::<Transform>(character).expect("transform");
    assert!((centre.translation.y - 0.45).abs() < 0.05);

    key_frame(&mut app, KeyCode::KeyC, false);
    for _ in 0..60 {
        assert_eq!(movement_mode(&app, character), MovementMode::Walking);
        app.update();
    }

    assert_eq!(crouch_phase(&app, character), CrouchPhase::Standing);
    assert_eq!(app.world().resource::<Tally>().landings, 0);
}

#[test]
fn test_real_fall_lands_with_one_footstep() {
    let mut app = physics_app();
    let character = spawn_character(&mut app, 1.0);

    run_frames(&mut app, 5);
    assert_eq!(movement_mode(&app, character), MovementMode::Falling);
    assert_eq!(app.world().resource::<Tally>().landings, 0);

    run_frames(&mut app, 120);

    assert_eq!(movement_mode(&app, character), MovementMode::Walking);
    let tally = app.world().resource::<Tally>();
    assert_eq!(tally.landings, 1);
    assert_eq!(tally.footsteps, 1);
}
