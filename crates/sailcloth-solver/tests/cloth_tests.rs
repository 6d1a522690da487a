//! Integration tests for the `Cloth` object: construction, locking,
//! stepping and the refreshed render buffers.

use sailcloth_math::Vec3;
use sailcloth_mesh::generators::GridLayout;
use sailcloth_mesh::normals::normals_are_unit;
use sailcloth_mesh::topology::GridTopology;
use sailcloth_solver::{
    Cloth, ClothConfig, SimulationState, SolverStrategy, StepResult,
};
use sailcloth_types::{SailclothError, SailclothResult};

fn one_step_config(g: f32) -> ClothConfig {
    ClothConfig {
        stiffness: 10.0,
        damping: 1.0,
        mass: 1.0,
        drag_coefficient: 0.0,
        gravity: [0.0, -g, 0.0],
        ..Default::default()
    }
}

// ─── Construction Tests ───────────────────────────────────────

#[test]
fn cloth_index_list_length() {
    for (rows, columns) in [(1, 1), (1, 7), (7, 1), (2, 2), (5, 8), (40, 40)] {
        let cloth = Cloth::new(GridLayout::new(rows, columns, 0.25), ClothConfig::default()).unwrap();
        let expected = 6 * rows.saturating_sub(1) * columns.saturating_sub(1);
        assert_eq!(cloth.mesh().indices.len(), expected, "{rows}x{columns}");
        assert_eq!(cloth.state().vertex_count, rows * columns);
    }
}

#[test]
fn cloth_rejects_empty_grid() {
    assert!(Cloth::new(GridLayout::new(0, 3, 1.0), ClothConfig::default()).is_err());
    assert!(Cloth::new(GridLayout::new(3, 0, 1.0), ClothConfig::default()).is_err());
}

#[test]
fn cloth_rejects_invalid_config() {
    let config = ClothConfig {
        mass: -1.0,
        ..Default::default()
    };
    let err = Cloth::new(GridLayout::new(2, 2, 1.0), config).unwrap_err();
    assert!(matches!(err, SailclothError::InvalidConfig(_)));
}

#[test]
fn cloth_initial_normals_point_up() {
    let cloth = Cloth::new(GridLayout::new(2, 2, 1.0), ClothConfig::default()).unwrap();
    for i in 0..4 {
        let n = cloth.mesh().normal_vec3(i);
        assert!((n - Vec3::Y).length() < 1e-6, "Vertex {i}: {n:?}");
    }
}

#[test]
fn cloth_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Cloth>();
}

// ─── Locking Tests ────────────────────────────────────────────

#[test]
fn lock_node_is_idempotent() {
    let mut cloth = Cloth::new(GridLayout::new(3, 3, 1.0), ClothConfig::default()).unwrap();
    cloth.lock_node(1, 2, true).unwrap();
    cloth.lock_node(1, 2, true).unwrap();
    assert!(cloth.is_locked(1, 2).unwrap());
    assert_eq!(cloth.locked_count(), 1);
}

#[test]
fn lock_out_of_range_is_rejected() {
    let mut cloth = Cloth::new(GridLayout::new(2, 2, 1.0), ClothConfig::default()).unwrap();
    let err = cloth.lock_node(2, 0, true).unwrap_err();
    assert!(matches!(
        err,
        SailclothError::GridCoordOutOfRange {
            row: 2,
            col: 0,
            rows: 2,
            columns: 2
        }
    ));
    assert!(cloth.lock_node(0, 2, true).is_err());
    assert!(cloth.is_locked(5, 5).is_err());
    assert_eq!(cloth.locked_count(), 0);
}

#[test]
fn lock_row_and_column() {
    let mut cloth = Cloth::new(GridLayout::new(3, 4, 1.0), ClothConfig::default()).unwrap();
    cloth.lock_row(0, true).unwrap();
    assert_eq!(cloth.locked_count(), 4);
    cloth.lock_column(3, true).unwrap();
    assert_eq!(cloth.locked_count(), 6);
    cloth.lock_row(0, false).unwrap();
    assert_eq!(cloth.locked_count(), 2);
    assert!(cloth.lock_row(3, true).is_err());
    assert!(cloth.lock_column(4, true).is_err());
}

#[test]
fn locked_point_is_frozen() {
    let mut cloth = Cloth::new(GridLayout::new(3, 3, 0.5), ClothConfig::default()).unwrap();
    cloth.lock_node(0, 0, true).unwrap();
    let p0 = cloth.point_position(0, 0).unwrap();
    let v0 = cloth.point_velocity(0, 0).unwrap();

    for _ in 0..200 {
        cloth.step(0.02).unwrap();
    }

    assert_eq!(cloth.point_position(0, 0).unwrap(), p0);
    assert_eq!(cloth.point_velocity(0, 0).unwrap(), v0);
    // Its neighbours were free to fall
    assert!(cloth.point_position(2, 2).unwrap().y < p0.y);
}

#[test]
fn locked_point_still_holds_neighbours() {
    let mut free = Cloth::new(GridLayout::new(1, 2, 1.0), ClothConfig::default()).unwrap();
    let mut held = Cloth::new(GridLayout::new(1, 2, 1.0), ClothConfig::default()).unwrap();
    held.lock_node(0, 0, true).unwrap();

    for _ in 0..500 {
        free.step(0.02).unwrap();
        held.step(0.02).unwrap();
    }
    let fell = free.point_position(0, 1).unwrap().y;
    let hangs = held.point_position(0, 1).unwrap().y;
    assert!(hangs > fell, "held {hangs} vs free {fell}");
}

#[test]
fn unlock_restores_integration() {
    let mut cloth = Cloth::new(GridLayout::new(2, 2, 1.0), ClothConfig::default()).unwrap();
    cloth.lock_node(0, 0, true).unwrap();
    let start = cloth.point_position(0, 0).unwrap();

    cloth.step(0.02).unwrap();
    assert_eq!(cloth.point_position(0, 0).unwrap(), start);

    cloth.lock_node(0, 0, false).unwrap();
    cloth.step(0.02).unwrap();
    assert!(cloth.point_position(0, 0).unwrap().y < start.y);
    assert!(cloth.point_velocity(0, 0).unwrap().y < 0.0);
}

// ─── Stepping Tests ───────────────────────────────────────────

#[test]
fn spring_pair_at_rest_stays_put() {
    let mut cloth = Cloth::new(GridLayout::new(1, 2, 1.0), ClothConfig::springs_only()).unwrap();
    let a = cloth.point_position(0, 0).unwrap();
    let b = cloth.point_position(0, 1).unwrap();

    for _ in 0..1000 {
        cloth.step(0.01).unwrap();
    }

    assert!((cloth.point_position(0, 0).unwrap() - a).length() < 1e-6);
    assert!((cloth.point_position(0, 1).unwrap() - b).length() < 1e-6);
}

#[test]
fn one_step_velocity_matches_closed_form() {
    let g = 9.81;
    let dt = 0.01;
    let mut cloth = Cloth::new(GridLayout::new(2, 2, 1.0), one_step_config(g)).unwrap();
    cloth.step(dt).unwrap();

    for row in 0..2 {
        for col in 0..2 {
            let v = cloth.point_velocity(row, col).unwrap();
            // Two half-kicks, each g * 0.5 * dt / m
            assert!((v.y + g * dt).abs() < 1e-5, "({row}, {col}): {v:?}");
            assert!(v.x.abs() < 1e-6 && v.z.abs() < 1e-6);
        }
    }
}

#[test]
fn step_rejects_bad_dt() {
    let mut cloth = Cloth::new(GridLayout::new(2, 2, 1.0), ClothConfig::default()).unwrap();
    assert!(cloth.step(-0.01).is_err());
    assert!(cloth.step(f32::NAN).is_err());
    assert!(cloth.step(f32::INFINITY).is_err());
    assert_eq!(cloth.steps(), 0);
    assert_eq!(cloth.point_velocity(1, 1).unwrap(), Vec3::ZERO);
}

#[test]
fn step_updates_counters() {
    let mut cloth = Cloth::new(GridLayout::new(2, 2, 1.0), ClothConfig::default()).unwrap();
    for _ in 0..5 {
        cloth.step(0.02).unwrap();
    }
    assert_eq!(cloth.steps(), 5);
    assert!((cloth.sim_time() - 0.1).abs() < 1e-6);
    assert!(cloth.kinetic_energy() > 0.0);
}

#[test]
fn mesh_tracks_state_after_step() {
    let mut cloth = Cloth::new(GridLayout::new(3, 3, 1.0), ClothConfig::default()).unwrap();
    cloth.lock_row(0, true).unwrap();
    for _ in 0..10 {
        cloth.step(0.02).unwrap();
    }
    assert_eq!(cloth.mesh().pos_x, cloth.state().pos_x);
    assert_eq!(cloth.mesh().pos_y, cloth.state().pos_y);
    assert_eq!(cloth.mesh().pos_z, cloth.state().pos_z);
}

#[test]
fn normals_stay_unit_while_hanging() {
    let mut cloth = Cloth::new(GridLayout::new(6, 6, 0.25), ClothConfig::default()).unwrap();
    cloth.lock_row(0, true).unwrap();
    for _ in 0..100 {
        cloth.step(0.02).unwrap();
    }
    assert!(normals_are_unit(cloth.mesh(), 1e-4));
    assert!(cloth.state().is_finite());
}

#[test]
fn collapsed_cloth_stays_finite() {
    let mut cloth = Cloth::new(GridLayout::new(4, 4, 0.0), ClothConfig::default()).unwrap();
    for _ in 0..20 {
        cloth.step(0.02).unwrap();
    }
    assert!(cloth.state().is_finite());
    for i in 0..cloth.mesh().vertex_count() {
        assert_eq!(cloth.mesh().normal_vec3(i), Vec3::ZERO);
        assert_eq!(cloth.mesh().tangent_vec3(i), Vec3::ZERO);
    }
}

#[test]
fn rope_steps_without_triangles() {
    let mut cloth = Cloth::new(GridLayout::new(1, 8, 0.5), ClothConfig::default()).unwrap();
    cloth.lock_node(0, 0, true).unwrap();
    for _ in 0..50 {
        cloth.step(0.02).unwrap();
    }
    assert!(cloth.mesh().indices.is_empty());
    assert!(cloth.state().is_finite());
    assert!(cloth.point_position(0, 7).unwrap().y < 0.0);
}

#[test]
fn stepping_is_deterministic() {
    let build = || {
        let mut cloth = Cloth::new(GridLayout::new(5, 5, 0.25), ClothConfig::windy()).unwrap();
        cloth.lock_column(0, true).unwrap();
        for _ in 0..30 {
            cloth.step(0.02).unwrap();
        }
        cloth
    };
    let a = build();
    let b = build();
    assert_eq!(a.state().pos_x, b.state().pos_x);
    assert_eq!(a.state().vel_y, b.state().vel_y);
}

// ─── Custom Solver Tests ──────────────────────────────────────

/// Integrator that never moves anything.
struct Frozen;

impl SolverStrategy for Frozen {
    fn init(&mut self, _: &GridTopology, _: &ClothConfig, _: f32) -> SailclothResult<()> {
        Ok(())
    }

    fn step(&mut self, _: &mut SimulationState, _: &GridTopology, _: f32) -> SailclothResult<StepResult> {
        Ok(StepResult {
            force_evaluations: 0,
            wall_time: 0.0,
        })
    }

    fn name(&self) -> &str {
        "frozen"
    }
}

#[test]
fn custom_solver_is_used() {
    let mut cloth = Cloth::with_solver(
        GridLayout::new(2, 2, 1.0),
        ClothConfig::default(),
        Box::new(Frozen),
    )
    .unwrap();
    let before = cloth.mesh().pos_y.clone();
    cloth.step(0.02).unwrap();
    assert_eq!(cloth.solver_name(), "frozen");
    assert_eq!(cloth.mesh().pos_y, before);
    assert_eq!(cloth.steps(), 1);
}
