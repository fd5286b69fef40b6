//! Tests for core types: transforms, templates, ids.

use glam::Vec3;

use crate::commands::PlayerCommand;
use crate::templates::{EntityTemplate, TankStats, TemplateKind};
use crate::types::{yaw_between, EntityId, SimTime, Transform};

const EPS: f32 = 1e-5;

fn assert_vec_close(a: Vec3, b: Vec3) {
    assert!(
        a.distance(b) < 1e-4,
        "expected {b:?}, got {a:?} (distance {})",
        a.distance(b)
    );
}

#[test]
fn test_default_transform_axes() {
    let t = Transform::default();
    assert_vec_close(t.forward(), Vec3::Z);
    assert_vec_close(t.right(), Vec3::X);
    assert_vec_close(t.up(), Vec3::Y);
    assert!(t.yaw().abs() < EPS);
}

#[test]
fn test_rotate_y_turns_forward_toward_right() {
    let mut t = Transform::default();
    t.rotate_y(std::f32::consts::FRAC_PI_2);
    // +90° yaw swings +Z onto +X
    assert_vec_close(t.forward(), Vec3::X);
}

#[test]
fn test_move_local_z_follows_facing() {
    let mut t = Transform::default();
    t.rotate_y(std::f32::consts::FRAC_PI_2);
    t.move_local_z(5.0);
    assert_vec_close(t.translation, Vec3::new(5.0, 0.0, 0.0));
}

#[test]
fn test_face_toward_points_forward_at_target() {
    let mut t = Transform::from_translation(Vec3::new(1.0, 0.0, 1.0));
    let target = Vec3::new(4.0, 0.0, 5.0);
    t.face_toward(target);
    let expected = (target - t.translation).normalize();
    assert_vec_close(t.forward(), expected);
}

#[test]
fn test_face_toward_ignores_height() {
    let mut t = Transform::default();
    t.face_toward(Vec3::new(0.0, 10.0, 3.0));
    assert_vec_close(t.forward(), Vec3::Z);
}

#[test]
fn test_face_toward_own_position_is_noop() {
    let mut t = Transform::from_translation(Vec3::new(2.0, 0.0, 2.0));
    t.rotate_y(1.0);
    let before = t.rotation;
    t.face_toward(t.translation);
    assert_eq!(t.rotation, before);
}

#[test]
fn test_yaw_between_cardinal_directions() {
    let origin = Vec3::ZERO;
    assert!(yaw_between(origin, Vec3::Z).abs() < EPS);
    assert!((yaw_between(origin, Vec3::X) - std::f32::consts::FRAC_PI_2).abs() < EPS);
}

#[test]
fn test_tank_template_stats_round_trip() {
    let stats = TankStats {
        max_speed: 22.5,
        acceleration: 7.25,
        turn_speed: 1.2,
        turret_turn_speed: std::f32::consts::PI / 3.0,
        max_hp: 120,
        shell_damage: 35,
    };
    let template = EntityTemplate::tank("Tank", "Oberon MkII", "oberon.x", stats);

    assert_eq!(template.type_name, "Tank");
    assert_eq!(template.name, "Oberon MkII");
    assert_eq!(template.mesh, "oberon.x");
    let got = template.tank_stats().expect("tank template has stats");
    assert_eq!(*got, stats);
}

#[test]
fn test_generic_template_has_no_tank_stats() {
    let template = EntityTemplate::generic("Tree", "Tree", "tree.x");
    assert!(template.tank_stats().is_none());
    assert_eq!(template.kind, TemplateKind::Generic);
}

#[test]
fn test_player_command_json_round_trip() {
    let cmd = PlayerCommand::SetTankTarget {
        id: EntityId(5),
        target: Vec3::new(1.0, 0.0, 2.0),
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains(r#""type":"SetTankTarget""#));
    let back: PlayerCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cmd);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(0.5);
    time.advance(0.5);
    assert_eq!(time.tick, 2);
    assert!((time.elapsed_secs - 1.0).abs() < EPS);
}

#[test]
fn test_system_id_is_reserved() {
    assert_eq!(EntityId::SYSTEM, EntityId(0));
}
