//! sailcloth CLI: run scenes, benchmarks and validation.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sailcloth")]
#[command(version, about = "sailcloth: mass-spring cloth simulation")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins if set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene from a config file.
    Simulate {
        /// Path to scene config (TOML).
        #[arg(short, long, default_value = "scene.toml")]
        config: String,

        /// Write captured frames to this JSON file.
        #[arg(short, long)]
        export: Option<String>,

        /// Capture every Nth step when exporting.
        #[arg(long, default_value_t = 1)]
        every: u64,

        /// Append telemetry events to this JSON Lines file.
        #[arg(long)]
        events: Option<String>,

        /// Override the number of steps (default: duration / dt).
        #[arg(long)]
        steps: Option<u64>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (curtain, flag, sail, banner, rope, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Override each scenario's step count.
        #[arg(long)]
        steps: Option<u32>,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a scene (.toml) or mesh (.json) file.
    Validate {
        /// Path to scene or mesh file.
        path: String,
    },

    /// Print the demo scene as TOML.
    Scenes {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Simulate {
            config,
            export,
            every,
            events,
            steps,
        } => commands::simulate(&config, export.as_deref(), every, events.as_deref(), steps),
        Commands::Benchmark {
            scenario,
            steps,
            output,
        } => commands::benchmark(&scenario, steps, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Scenes { output } => commands::scenes(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
