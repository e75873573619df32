use std::sync::Arc;

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};

use first_person_character::FirstPersonPlugin;
use first_person_character::character::{SurfaceMaterial, spawn_first_person_character};
use first_person_character::settings::CharacterSettings;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "First Person".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(FirstPersonPlugin)
        .add_systems(Startup, (spawn_level, spawn_player, lock_cursor).chain())
        .run();
}

fn spawn_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let grass = materials.add(Color::srgb(0.3, 0.55, 0.25));
    let stone = materials.add(Color::srgb(0.55, 0.55, 0.58));
    let wood = materials.add(Color::srgb(0.6, 0.42, 0.25));

    // Floor: grass on one half, stone on the other.
    for (surface, material, x) in [("grass", grass, -10.0), ("stone", stone.clone(), 10.0)] {
        commands.spawn((
            Name::new(format!("Floor ({surface})")),
            SurfaceMaterial::new(surface),
            RigidBody::Static,
            Collider::cuboid(20.0, 0.2, 40.0),
            Mesh3d(meshes.add(Cuboid::new(20.0, 0.2, 40.0))),
            MeshMaterial3d(material),
            Transform::from_xyz(x, -0.1, 0.0),
        ));
    }

    // Low tunnel: crouch under it and try to stand up inside.
    commands.spawn((
        Name::new("Tunnel roof"),
        SurfaceMaterial::new("stone"),
        RigidBody::Static,
        Collider::cuboid(4.0, 0.3, 8.0),
        Mesh3d(meshes.add(Cuboid::new(4.0, 0.3, 8.0))),
        MeshMaterial3d(stone.clone()),
        Transform::from_xyz(6.0, 1.45, -6.0),
    ));
    for x in [4.0, 8.0] {
        commands.spawn((
            Name::new("Tunnel wall"),
            RigidBody::Static,
            Collider::cuboid(0.3, 1.3, 8.0),
            Mesh3d(meshes.add(Cuboid::new(0.3, 1.3, 8.0))),
            MeshMaterial3d(stone.clone()),
            Transform::from_xyz(x, 0.65, -6.0),
        ));
    }

    // A crate resting on top of the character's head never blocks standing.
    commands.spawn((
        Name::new("Crate"),
        SurfaceMaterial::new("wood"),
        RigidBody::Dynamic,
        Collider::cuboid(0.8, 0.8, 0.8),
        Mesh3d(meshes.add(Cuboid::new(0.8, 0.8, 0.8))),
        MeshMaterial3d(wood),
        Transform::from_xyz(-3.0, 0.4, -4.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_player(mut commands: Commands, settings: Res<CharacterSettings>) {
    let settings = Arc::new(settings.clone());
    let at = Vec3::new(0.0, settings.body.capsule_half_height + 0.05, 4.0);
    spawn_first_person_character(&mut commands, settings, at);
}

fn lock_cursor(mut cursor_options: Query<&mut CursorOptions, With<Window>>) {
    if let Ok(mut cursor) = cursor_options.single_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}
