use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use vitals_core::measurement::domain::frame_measurements::FrameMeasurements;
use vitals_core::measurement::infrastructure::jsonl_trace::{write_trace, JsonlTraceReader};
use vitals_core::pipeline::pipeline_logger::LogPipelineLogger;
use vitals_core::pipeline::vitals_monitor::{VitalsEstimate, VitalsMonitor};
use vitals_core::shared::config::MonitorConfig;
use vitals_core::shared::sample_rate::SampleRate;

/// Heart rate and respiration rate from recorded measurement traces.
#[derive(Parser)]
#[command(name = "vitals")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a JSON-lines measurement trace through the monitor.
    Replay {
        /// Trace file, one {"rgb":[r,g,b],"shoulder_y":y} object per line.
        trace: PathBuf,

        /// Frame rate of the trace (overrides the config file).
        #[arg(long)]
        fps: Option<f64>,

        /// Monitor settings as JSON.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a synthetic trace with known pulse and breathing rates.
    Simulate {
        /// Output trace file.
        #[arg(long)]
        output: PathBuf,

        /// Trace duration in seconds.
        #[arg(long, default_value = "30")]
        seconds: f64,

        #[arg(long, default_value = "30")]
        fps: f64,

        /// Pulse frequency in Hz (1.2 Hz = 72 BPM).
        #[arg(long, default_value = "1.2")]
        heart_hz: f64,

        /// Breathing frequency in Hz (0.25 Hz = 15 breaths/min).
        #[arg(long, default_value = "0.25")]
        breath_hz: f64,

        /// Drop every Kth frame as a detection miss (0 = never).
        #[arg(long, default_value = "0")]
        miss_every: usize,
    },
}

/// Synthetic signal parameters for `simulate`.
#[derive(Debug, Clone, Copy)]
struct Simulation {
    seconds: f64,
    fps: f64,
    heart_hz: f64,
    breath_hz: f64,
    miss_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli.command)?;

    match cli.command {
        Command::Replay { trace, fps, config } => {
            let config = load_config(config.as_deref(), fps)?;
            for estimate in replay(&trace, &config)? {
                println!("{}", estimate.label());
            }
        }
        Command::Simulate {
            output,
            seconds,
            fps,
            heart_hz,
            breath_hz,
            miss_every,
        } => {
            let sim = Simulation {
                seconds,
                fps,
                heart_hz,
                breath_hz,
                miss_every,
            };
            let trace = simulate(&sim);
            write_trace(&output, &trace)?;
            log::info!("Wrote {} frames to {}", trace.len(), output.display());
        }
    }
    Ok(())
}

fn validate(command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Replay { trace, fps, config } => {
            if !trace.exists() {
                return Err(format!("Trace file not found: {}", trace.display()).into());
            }
            if let Some(path) = config {
                if !path.exists() {
                    return Err(format!("Config file not found: {}", path.display()).into());
                }
                MonitorConfig::load(path)?;
            }
            if let Some(fps) = fps {
                SampleRate::new(*fps)?;
            }
        }
        Command::Simulate {
            seconds,
            fps,
            heart_hz,
            breath_hz,
            ..
        } => {
            let nyquist = SampleRate::new(*fps)?.fps() / 2.0;
            if !(seconds.is_finite() && *seconds > 0.0) {
                return Err(format!("Duration must be positive, got {seconds}").into());
            }
            for (name, hz) in [("Heart", heart_hz), ("Breath", breath_hz)] {
                if !(*hz > 0.0 && *hz < nyquist) {
                    return Err(format!(
                        "{name} frequency must be between 0 and {nyquist} Hz, got {hz}"
                    )
                    .into());
                }
            }
        }
    }
    Ok(())
}

fn load_config(
    path: Option<&Path>,
    fps: Option<f64>,
) -> Result<MonitorConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(fps) = fps {
        config.fps = fps;
    }
    Ok(config)
}

fn replay(
    trace: &Path,
    config: &MonitorConfig,
) -> Result<Vec<VitalsEstimate>, Box<dyn std::error::Error>> {
    let mut monitor =
        VitalsMonitor::new(config).with_logger(Box::new(LogPipelineLogger::default()));
    log::info!(
        "Replaying {} at {} fps",
        trace.display(),
        monitor.sample_rate().fps()
    );

    let mut estimates = Vec::new();
    for measurements in JsonlTraceReader::open(trace)? {
        estimates.extend(monitor.push_measurements(&measurements?));
    }
    monitor.finish();
    Ok(estimates)
}

/// Forehead colour with a pulse on the red channel and slow chrominance
/// drift on green and blue; shoulders bobbing on a 300 px baseline.
fn simulate(sim: &Simulation) -> Vec<FrameMeasurements> {
    let frames = (sim.seconds * sim.fps).round() as usize;
    (0..frames)
        .map(|i| {
            if sim.miss_every > 0 && (i + 1) % sim.miss_every == 0 {
                return FrameMeasurements::default();
            }
            let t = i as f64 / sim.fps;
            let rgb = [
                150.0 + 5.0 * (2.0 * PI * sim.heart_hz * t).sin(),
                110.0 + 0.5 * (2.0 * PI * 0.13 * t).sin(),
                90.0 + 0.5 * (2.0 * PI * 0.07 * t).cos(),
            ];
            let shoulder_y = 300.0 + 10.0 * (2.0 * PI * sim.breath_hz * t).sin();
            FrameMeasurements::new(Some(rgb), Some(shoulder_y))
        })
        .collect()
}
