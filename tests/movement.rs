mod common;

use approx::assert_relative_eq;
use arcade_prototype::core::{ContactEvent, PlaySound, SimulationProfile};
use arcade_prototype::input::FrameInput;
use arcade_prototype::physics::{BodyExtents, GroundContact, GroundProbe, Motion};
use arcade_prototype::player::{AvatarSpawn, Facing, Locomotion, MovementTuning};
use arcade_prototype::session::{GameSession, ScorePickup, ScoreValue, PICKUP_SOUND};
use bevy::prelude::*;
use bevy_rapier3d::prelude::{KinematicCharacterController, KinematicCharacterControllerOutput, RapierContext};
use common::*;

fn velocity(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Motion>(entity).expect("motion").velocity
}

#[test]
fn horizontal_input_moves_and_turns_the_avatar() {
    let mut app = simulation_app(SimulationProfile::SimpleRpg);
    let avatar = grounded_avatar(&mut app, AvatarSpawn::default());

    set_input(
        &mut app,
        FrameInput {
            movement: Vec2::new(-1.0, 0.0),
            ..default()
        },
    );
    run_frames(&mut app, 60);

    assert_relative_eq!(translation(&app, avatar).x, -5.0, epsilon = 1e-3);
    assert!(app.world().get::<Facing>(avatar).expect("facing").flip_x);
}

#[test]
fn jump_from_the_ground_uses_the_jump_height() {
    let mut app = simulation_app(SimulationProfile::SimpleRpg);
    let avatar = grounded_avatar(&mut app, AvatarSpawn::default());

    set_input(
        &mut app,
        FrameInput {
            jump_pressed: true,
            ..default()
        },
    );
    app.update();
    assert_relative_eq!(velocity(&app, avatar).y, 15.0);

    set_input(&mut app, FrameInput::default());
    app.world_mut()
        .get_mut::<GroundContact>(avatar)
        .expect("ground")
        .grounded = false;
    app.update();
    assert_relative_eq!(velocity(&app, avatar).y, 15.0 - 30.0 * DT, epsilon = 1e-4);
}

fn controller_step(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<KinematicCharacterController>(entity)
        .expect("controller")
        .translation
        .expect("controller was fed a step")
}

#[test]
fn with_physics_the_avatar_moves_through_its_character_controller() {
    let mut app = simulation_app(SimulationProfile::SimpleRpg);
    app.world_mut().spawn(RapierContext::default());
    let avatar = grounded_avatar(&mut app, AvatarSpawn::default());
    app.world_mut()
        .entity_mut(avatar)
        .insert(KinematicCharacterControllerOutput {
            grounded: true,
            ..default()
        });
    let start = translation(&app, avatar);

    set_input(
        &mut app,
        FrameInput {
            movement: Vec2::new(1.0, 0.0),
            ..default()
        },
    );
    app.update();

    // Rapier owns the transform; the step is only requested
    assert_eq!(translation(&app, avatar), start);
    let step = controller_step(&app, avatar);
    assert_relative_eq!(step.x, 5.0 * DT, epsilon = 1e-5);
    assert_relative_eq!(step.y, 0.0);
}

#[test]
fn controller_grounding_drives_jumps_and_falls() {
    let mut app = simulation_app(SimulationProfile::SimpleRpg);
    app.world_mut().spawn(RapierContext::default());
    let avatar = grounded_avatar(&mut app, AvatarSpawn::default());
    app.world_mut()
        .entity_mut(avatar)
        .insert(KinematicCharacterControllerOutput {
            grounded: true,
            ..default()
        });

    set_input(
        &mut app,
        FrameInput {
            jump_pressed: true,
            ..default()
        },
    );
    app.update();
    assert_relative_eq!(controller_step(&app, avatar).y, 15.0 * DT, epsilon = 1e-5);

    // Left the ground: gravity applies even though the driver said grounded
    set_input(&mut app, FrameInput::default());
    app.world_mut()
        .get_mut::<KinematicCharacterControllerOutput>(avatar)
        .expect("output")
        .grounded = false;
    app.update();
    assert!(!app.world().get::<GroundContact>(avatar).expect("ground").grounded);
    assert_relative_eq!(velocity(&app, avatar).y, 15.0 - 30.0 * DT, epsilon = 1e-4);
}

#[test]
fn drift_off_the_play_plane_is_corrected_every_frame() {
    let mut app = simulation_app(SimulationProfile::SimpleRpg);
    let avatar = grounded_avatar(&mut app, AvatarSpawn::default());

    for drift in [0.3, -1.0, 2.5] {
        app.world_mut()
            .get_mut::<Transform>(avatar)
            .expect("transform")
            .translation
            .z = drift;
        app.update();
        assert_eq!(translation(&app, avatar).z, 0.0);
    }
}

#[test]
fn free_locomotion_moves_on_the_ground_plane() {
    let mut app = simulation_app(SimulationProfile::SimpleRpg);
    let avatar = grounded_avatar(
        &mut app,
        AvatarSpawn {
            tuning: MovementTuning {
                locomotion: Locomotion::Free3d,
                ..default()
            },
            ..default()
        },
    );

    set_input(
        &mut app,
        FrameInput {
            movement: Vec2::new(0.0, 1.0),
            ..default()
        },
    );
    run_frames(&mut app, 30);

    let position = translation(&app, avatar);
    assert_relative_eq!(position.z, -2.5, epsilon = 1e-3);
    assert_relative_eq!(position.x, 0.0, epsilon = 1e-5);
}

#[test]
fn touching_a_pickup_scores_and_requests_a_sound() {
    let mut app = simulation_app(SimulationProfile::SimpleRpg);
    let avatar = grounded_avatar(&mut app, AvatarSpawn::default());
    let pickup = app
        .world_mut()
        .spawn((ScorePickup, ScoreValue(25), Transform::from_xyz(1.0, 1.0, 0.0)))
        .id();
    app.update();
    drain::<PlaySound>(&mut app);

    app.world_mut().send_event(ContactEvent { a: avatar, b: pickup });
    app.world_mut().send_event(ContactEvent { a: pickup, b: avatar });
    app.update();

    assert_eq!(app.world().resource::<GameSession>().score(), 25);
    assert!(app.world().get::<ScorePickup>(pickup).is_none());
    let sounds = drain::<PlaySound>(&mut app);
    assert_eq!(sounds.len(), 1);
    assert_eq!(sounds[0].clip, PICKUP_SOUND);
    assert_eq!(sounds[0].position, Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn missing_probe_anchors_are_synthesized_below_the_body() {
    let mut app = simulation_app(SimulationProfile::SimpleRpg);
    let with_extents = app
        .world_mut()
        .spawn((
            Transform::default(),
            GroundProbe::default(),
            GroundContact::default(),
            BodyExtents { half_height: 0.8 },
        ))
        .id();
    let bare = app
        .world_mut()
        .spawn((Transform::default(), GroundProbe::default(), GroundContact::default()))
        .id();
    app.update();

    let anchor = |entity| app.world().get::<GroundProbe>(entity).expect("probe").anchor;
    assert_eq!(anchor(with_extents), Some(Vec3::new(0.0, -0.8, 0.0)));
    assert_eq!(anchor(bare), Some(Vec3::new(0.0, -1.0, 0.0)));
}
