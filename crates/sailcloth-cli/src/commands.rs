//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;

use sailcloth_bench::metrics::BenchmarkMetrics;
use sailcloth_bench::runner::BenchmarkRunner;
use sailcloth_bench::scenarios::{Scenario, ScenarioKind};
use sailcloth_io::contract::SceneConfig;
use sailcloth_io::export::{FrameExporter, JsonFrameExporter};
use sailcloth_io::runner::SceneRunner;
use sailcloth_io::validator::validate_scene;
use sailcloth_mesh::TriangleMesh;
use sailcloth_telemetry::{EventBus, EventKind, JsonLinesSink, SimulationEvent, TracingSink};

/// Run a scene from a config file.
pub fn simulate(
    config_path: &str,
    export_path: Option<&str>,
    every: u64,
    events_path: Option<&str>,
    steps: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("sailcloth Simulation");
    println!("────────────────────");
    println!("Config: {config_path}");
    println!();

    let scene = SceneConfig::load(config_path)?;

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::TRACE)));
    if let Some(path) = events_path {
        let file = BufWriter::new(File::create(path)?);
        bus.add_sink(Box::new(JsonLinesSink::new(file)));
    }

    let mut runner = SceneRunner::with_bus(&scene, bus)?;
    if runner.is_paused() {
        tracing::info!("Scene starts paused, resuming for headless run");
        runner.set_paused(false);
    }

    let mut exporter = match export_path {
        Some(path) => {
            let mut exporter = JsonFrameExporter::new(path);
            for entry in runner.cloths() {
                exporter.add_cloth(&entry.name, entry.cloth.mesh())?;
            }
            let meshes: Vec<&TriangleMesh> = runner.cloths().iter().map(|c| c.cloth.mesh()).collect();
            exporter.submit_frame(0, 0.0, &meshes)?;
            Some(exporter)
        }
        None => None,
    };

    let count = steps.unwrap_or_else(|| scene.run.step_count());
    let every = every.max(1);
    for entry in runner.cloths() {
        println!(
            "Cloth '{}': {} points, {} triangles, {} locked",
            entry.name,
            entry.cloth.mesh().vertex_count(),
            entry.cloth.mesh().triangle_count(),
            entry.cloth.locked_count(),
        );
    }
    println!("Steps:  {count} (dt = {})", runner.dt());
    println!();

    runner.run(count, |runner| {
        if let Some(exporter) = exporter.as_mut() {
            if runner.steps() % every == 0 {
                let meshes: Vec<&TriangleMesh> =
                    runner.cloths().iter().map(|c| c.cloth.mesh()).collect();
                exporter.submit_frame(runner.steps(), runner.sim_time(), &meshes)?;
            }
        }
        Ok(())
    })?;

    // Close the event stream with the final state of every cloth.
    let payload = serde_json::to_string(&runner.summary())?;
    let step = runner.steps();
    runner.bus_mut().emit(SimulationEvent::new(
        step,
        EventKind::Custom {
            label: "run_summary".into(),
            payload,
        },
    ));
    let summary = runner.finish();
    if let Some(exporter) = exporter.as_mut() {
        exporter.finalize()?;
        println!("Frames written to: {} ({} frames)", export_path.unwrap_or_default(), exporter.frame_count());
    }

    println!("  Sim time:      {:.3}s", summary.sim_time);
    println!("  Wall time:     {:.3}s", summary.wall_time_seconds);
    for cloth in &summary.cloths {
        println!(
            "  {:<12} KE {:.6e}  lowest y {:.4}",
            cloth.name, cloth.kinetic_energy, cloth.min_height
        );
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    steps: Option<u32>,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("sailcloth Benchmark Suite");
    println!("═════════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_name.parse::<ScenarioKind>()?]
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind);
        if let Some(steps) = steps {
            scenario = scenario.with_timesteps(steps);
        }

        println!(
            "Running: {} ({}x{} grid, {} locked, {} steps)",
            kind.name(),
            scenario.layout.rows,
            scenario.layout.columns,
            scenario.locks.len(),
            scenario.timesteps,
        );

        let metrics = BenchmarkRunner::run(&scenario)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!("  Min normal:    {:.4}", metrics.min_normal_length);
        println!();

        all_metrics.push(metrics);
    }

    // Output CSV
    if let Some(path) = output_path {
        let csv = BenchmarkMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Validate a scene or mesh file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("sailcloth Validator");
    println!("───────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating scene: {path}");
        let scene = SceneConfig::load(path)?;
        validate_scene(&scene)?;
        println!("✅ Scene is valid ({} cloths, {} steps).", scene.cloths.len(), scene.run.step_count());
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: TriangleMesh = serde_json::from_str(&content)?;
        mesh.validate()?;
        println!("✅ Mesh is valid ({} verts, {} tris).", mesh.vertex_count(), mesh.triangle_count());
    } else {
        return Err("Unsupported file format. Use .toml (scene) or .json (mesh).".into());
    }

    Ok(())
}

/// Print or write the demo scene.
pub fn scenes(output_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let text = SceneConfig::demo().to_toml_string()?;
    match output_path {
        Some(path) => {
            std::fs::write(path, &text)?;
            println!("Demo scene written to: {path}");
        }
        None => print!("{text}"),
    }
    Ok(())
}
