//! Integration tests for sailcloth-io.

use sailcloth_io::contract::{ClothSpec, RunConfig, SceneConfig};
use sailcloth_io::export::{FrameExporter, JsonFrameExporter};
use sailcloth_io::runner::SceneRunner;
use sailcloth_io::validator::validate_scene;
use sailcloth_mesh::generators::GridLayout;
use sailcloth_mesh::TriangleMesh;
use sailcloth_telemetry::{EventBus, EventKind, VecSink};
use sailcloth_types::{GridCoord, SailclothError};

const SCENE: &str = r#"
[run]
dt = 0.01
duration = 0.5

[[cloth]]
name = "flag"
lock_columns = [0]

[cloth.grid]
rows = 6
columns = 10
rest_length = 0.2
origin = [0.0, 5.0]

[cloth.physics]
stiffness = 80.0
air_velocity = [2.0, 0.0, 0.0]

[[cloth]]
name = "patch"
locks = [[0, 0], [0, 3]]

[cloth.grid]
rows = 4
columns = 4
"#;

fn small_scene() -> SceneConfig {
    let mut spec = ClothSpec::new("sheet");
    spec.grid = GridLayout::new(3, 3, 0.5);
    spec.lock_rows = vec![0];
    SceneConfig {
        run: RunConfig {
            dt: 0.02,
            duration: 0.2,
            start_paused: false,
        },
        cloths: vec![spec],
    }
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn default_run_config() {
    let run = RunConfig::default();
    assert!((run.dt - 0.02).abs() < 1e-6);
    assert_eq!(run.step_count(), 500);
    assert!(!run.start_paused);
}

#[test]
fn parse_scene_toml() {
    let scene = SceneConfig::from_toml_str(SCENE).unwrap();
    assert_eq!(scene.cloths.len(), 2);
    assert_eq!(scene.run.step_count(), 50);

    let flag = &scene.cloths[0];
    assert_eq!(flag.name, "flag");
    assert_eq!(flag.grid.columns, 10);
    assert!((flag.physics.stiffness - 80.0).abs() < 1e-6);
    // Unset physics fields fall back to defaults
    assert!((flag.physics.damping - 20.0).abs() < 1e-6);
    assert_eq!(flag.lock_columns, vec![0]);

    let patch = &scene.cloths[1];
    assert_eq!(patch.locks, vec![[0, 0], [0, 3]]);
    assert!((patch.grid.rest_length - 0.25).abs() < 1e-6);
}

#[test]
fn malformed_toml_is_serialization_error() {
    let err = SceneConfig::from_toml_str("[[cloth]\nname =").unwrap_err();
    assert!(matches!(err, SailclothError::Serialization(_)));
}

#[test]
fn demo_scene_round_trip() {
    let scene = SceneConfig::demo();
    let text = scene.to_toml_string().unwrap();
    let recovered = SceneConfig::from_toml_str(&text).unwrap();
    assert_eq!(recovered, scene);
    assert!(recovered.run.start_paused);
}

#[test]
fn locked_coords_expand_rows_and_columns() {
    let mut spec = ClothSpec::new("c");
    spec.grid = GridLayout::new(3, 4, 1.0);
    spec.locks = vec![[2, 2]];
    spec.lock_rows = vec![0];
    spec.lock_columns = vec![3];
    let coords = spec.locked_coords();
    assert_eq!(coords.len(), 1 + 4 + 3);
    assert_eq!(coords[0], GridCoord::new(2, 2));
    assert!(coords.contains(&GridCoord::new(1, 3)));
}

#[test]
fn load_scene_from_file() {
    let path = std::env::temp_dir().join(format!("sailcloth_scene_{}.toml", std::process::id()));
    std::fs::write(&path, SCENE).unwrap();
    let scene = SceneConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(scene.cloths[1].name, "patch");
}

#[test]
fn missing_file_is_io_error() {
    let err = SceneConfig::load("/nonexistent/sailcloth/scene.toml").unwrap_err();
    assert!(matches!(err, SailclothError::Io(_)));
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_scene_passes() {
    assert!(validate_scene(&small_scene()).is_ok());
    assert!(validate_scene(&SceneConfig::demo()).is_ok());
    assert!(validate_scene(&SceneConfig::from_toml_str(SCENE).unwrap()).is_ok());
}

#[test]
fn empty_scene_rejected() {
    let mut scene = small_scene();
    scene.cloths.clear();
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn bad_dt_rejected() {
    for dt in [0.0, -0.01, 2.0, f32::NAN] {
        let mut scene = small_scene();
        scene.run.dt = dt;
        assert!(validate_scene(&scene).is_err(), "dt {dt} accepted");
    }
}

#[test]
fn bad_duration_rejected() {
    let mut scene = small_scene();
    scene.run.duration = 0.0;
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn duplicate_names_rejected() {
    let mut scene = small_scene();
    scene.cloths.push(scene.cloths[0].clone());
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn empty_name_rejected() {
    let mut scene = small_scene();
    scene.cloths[0].name = "  ".into();
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn zero_grid_rejected_with_cloth_name() {
    let mut scene = small_scene();
    scene.cloths[0].grid.rows = 0;
    let err = validate_scene(&scene).unwrap_err();
    assert!(err.to_string().contains("sheet"), "{err}");
}

#[test]
fn oversized_grid_rejected() {
    let text = r#"
[[cloth]]
name = "huge"

[cloth.grid]
rows = 4294967297
columns = 4294967297
"#;
    let scene = SceneConfig::from_toml_str(text).unwrap();
    let err = validate_scene(&scene).unwrap_err();
    assert!(matches!(err, SailclothError::InvalidConfig(_)));
    assert!(err.to_string().contains("huge"), "{err}");
    assert!(SceneRunner::from_config(&scene).is_err());
}

#[test]
fn invalid_physics_rejected() {
    let mut scene = small_scene();
    scene.cloths[0].physics.mass = 0.0;
    assert!(validate_scene(&scene).is_err());
}

#[test]
fn out_of_range_lock_rejected() {
    let mut scene = small_scene();
    scene.cloths[0].locks = vec![[3, 0]];
    let err = validate_scene(&scene).unwrap_err();
    assert!(matches!(err, SailclothError::GridCoordOutOfRange { row: 3, .. }));

    let mut scene = small_scene();
    scene.cloths[0].lock_columns = vec![7];
    assert!(validate_scene(&scene).is_err());
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn runner_applies_locks() {
    let runner = SceneRunner::from_config(&small_scene()).unwrap();
    let cloth = runner.cloth("sheet").unwrap();
    assert_eq!(cloth.locked_count(), 3);
    assert!(cloth.is_locked(0, 2).unwrap());
    assert!(!cloth.is_locked(1, 0).unwrap());
}

#[test]
fn runner_rejects_invalid_scene() {
    let mut scene = small_scene();
    scene.run.dt = -1.0;
    assert!(SceneRunner::from_config(&scene).is_err());
}

#[test]
fn runner_advances_clock() {
    let mut runner = SceneRunner::from_config(&small_scene()).unwrap();
    let taken = runner.run(10, |_| Ok(())).unwrap();
    assert_eq!(taken, 10);
    assert_eq!(runner.steps(), 10);
    assert!((runner.sim_time() - 0.2).abs() < 1e-6);
    assert_eq!(runner.cloth("sheet").unwrap().steps(), 10);
}

#[test]
fn paused_runner_does_nothing() {
    let mut scene = small_scene();
    scene.run.start_paused = true;
    let mut runner = SceneRunner::from_config(&scene).unwrap();
    assert!(runner.is_paused());

    let before = runner.cloth("sheet").unwrap().mesh().pos_y.clone();
    assert!(!runner.advance().unwrap());
    assert_eq!(runner.run(5, |_| Ok(())).unwrap(), 0);
    assert_eq!(runner.steps(), 0);
    assert_eq!(runner.cloth("sheet").unwrap().mesh().pos_y, before);

    assert!(!runner.toggle_pause());
    assert!(runner.advance().unwrap());
    assert_eq!(runner.steps(), 1);
}

#[test]
fn runner_lock_changes_are_reported() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    let mut runner = SceneRunner::with_bus(&small_scene(), bus).unwrap();
    runner.lock("sheet", 2, 2, true).unwrap();
    runner.lock("sheet", 2, 2, true).unwrap(); // No change, no event
    runner.advance().unwrap();

    let events = sink.snapshot();
    let locks = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::LockChanged { .. }))
        .count();
    assert_eq!(locks, 3 + 1);
    assert!(events.iter().any(|e| e.label() == "step_end"));
    assert!(events
        .iter()
        .any(|e| matches!(&e.kind, EventKind::Energy { cloth, .. } if cloth == "sheet")));
}

#[test]
fn runner_lock_unknown_cloth() {
    let mut runner = SceneRunner::from_config(&small_scene()).unwrap();
    assert!(runner.lock("nope", 0, 0, true).is_err());
    assert!(runner.lock("sheet", 9, 9, true).is_err());
}

#[test]
fn runner_summary() {
    let mut runner = SceneRunner::from_config(&SceneConfig::from_toml_str(SCENE).unwrap()).unwrap();
    runner.run(20, |_| Ok(())).unwrap();
    let summary = runner.finish();
    assert_eq!(summary.steps, 20);
    assert_eq!(summary.cloths.len(), 2);
    assert_eq!(summary.cloths[0].name, "flag");
    assert_eq!(summary.cloths[0].locked_count, 6);
    assert!(summary.cloths[1].min_height < 0.0);
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("kinetic_energy"));
}

// ─── Export Tests ─────────────────────────────────────────────

#[test]
fn json_export_captures_frames() {
    let path = std::env::temp_dir().join(format!("sailcloth_capture_{}.json", std::process::id()));
    let mut runner = SceneRunner::from_config(&small_scene()).unwrap();
    let mut exporter = JsonFrameExporter::new(&path);
    for entry in runner.cloths() {
        exporter.add_cloth(&entry.name, entry.cloth.mesh()).unwrap();
    }

    for _ in 0..3 {
        runner.advance().unwrap();
        let meshes: Vec<&TriangleMesh> = runner.cloths().iter().map(|c| c.cloth.mesh()).collect();
        exporter
            .submit_frame(runner.steps(), runner.sim_time(), &meshes)
            .unwrap();
    }
    assert_eq!(exporter.frame_count(), 3);
    exporter.finalize().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(text, exporter.to_json_string().unwrap());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["frames"].as_array().unwrap().len(), 3);
    assert_eq!(value["cloths"][0]["name"], "sheet");
    assert_eq!(value["cloths"][0]["indices"].as_array().unwrap().len(), 24);
    assert_eq!(value["cloths"][0]["uvs"].as_array().unwrap().len(), 18);
    assert_eq!(
        value["frames"][0]["cloths"][0]["normals"].as_array().unwrap().len(),
        27
    );
}

#[test]
fn json_export_rejects_mismatched_frame() {
    let runner = SceneRunner::from_config(&small_scene()).unwrap();
    // Never finalized, so nothing is written.
    let mut exporter = JsonFrameExporter::new(std::env::temp_dir().join("sailcloth_unused.json"));
    let mesh = runner.cloth("sheet").unwrap().mesh();
    exporter.add_cloth("sheet", mesh).unwrap();
    assert!(exporter.submit_frame(0, 0.0, &[]).is_err());
    assert!(exporter.submit_frame(0, 0.0, &[mesh, mesh]).is_err());

    exporter.submit_frame(0, 0.0, &[mesh]).unwrap();
    assert!(exporter.add_cloth("late", mesh).is_err());
}

#[test]
fn json_export_writes_file() {
    let path = std::env::temp_dir().join(format!("sailcloth_frames_{}.json", std::process::id()));
    let runner = SceneRunner::from_config(&small_scene()).unwrap();
    let mesh = runner.cloth("sheet").unwrap().mesh();

    let mut exporter = JsonFrameExporter::new(&path);
    exporter.add_cloth("sheet", mesh).unwrap();
    exporter.submit_frame(0, 0.0, &[mesh]).unwrap();
    exporter.finalize().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(text.contains("\"sheet\""));
}

// ─── Bundled Scene Tests ──────────────────────────────────────

#[test]
fn bundled_scenes_validate() {
    for text in [
        include_str!("../../../scenes/curtain.toml"),
        include_str!("../../../scenes/harbor.toml"),
    ] {
        let scene = SceneConfig::from_toml_str(text).unwrap();
        validate_scene(&scene).unwrap();
    }
}

#[test]
fn bundled_curtain_matches_demo() {
    let scene = SceneConfig::from_toml_str(include_str!("../../../scenes/curtain.toml")).unwrap();
    assert_eq!(scene, SceneConfig::demo());
    assert!(scene.run.start_paused);
}
