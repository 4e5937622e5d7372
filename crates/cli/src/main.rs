#![deny(unsafe_code)]
//! CLI binary for the emotional aura.
//!
//! Subcommands:
//! - `render`: run the aura N frames, write a PNG
//! - `frames`: run the aura N frames, print the last frame's draw output as JSON
//! - `params`: print the parameter bundle for a sentiment and keyword count
//! - `palettes`: print the zone palettes

mod error;

use aura_core::{FrameRecorder, Palette, Renderer, ScheduledInput, Seed};
use aura_field::{map, Animator, FrameReport};
use aura_render::RasterCanvas;
use clap::{Args, Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aura", about = "Sentiment-driven particle aura")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Inputs shared by every subcommand that runs the simulation.
#[derive(Args)]
struct RunArgs {
    /// Canvas width in pixels.
    #[arg(short = 'W', long, default_value_t = 640)]
    width: usize,

    /// Canvas height in pixels.
    #[arg(short = 'H', long, default_value_t = 480)]
    height: usize,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 300)]
    frames: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Sentiment in [-1, 1]; omit for "no reading".
    #[arg(short, long, allow_negative_numbers = true)]
    sentiment: Option<f64>,

    /// Comma-separated keywords (only the count matters).
    #[arg(short, long, value_delimiter = ',')]
    keywords: Vec<String>,

    /// Dynamics overrides as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Replay a saved seed file instead of the flags above.
    #[arg(long)]
    seed_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the aura and write a PNG snapshot of the final frame.
    Render {
        #[command(flatten)]
        run: RunArgs,

        /// Output file path.
        #[arg(short, long, default_value = "aura.png")]
        output: PathBuf,
    },
    /// Run the aura and print the final frame's background and descriptors.
    Frames {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Print the parameter bundle for a sentiment and keyword count.
    Params {
        /// Sentiment in [-1, 1]; omit for "no reading".
        #[arg(short, long, allow_negative_numbers = true)]
        sentiment: Option<f64>,

        /// Number of keywords.
        #[arg(short, long, default_value_t = 0)]
        keywords: usize,
    },
    /// List the zone palettes and their colors.
    Palettes,
}

impl RunArgs {
    /// The run as a replayable seed: either loaded from `--seed-file` or
    /// built from flags with a single input update at frame 0.
    fn to_seed(&self) -> Result<Seed, CliError> {
        if let Some(path) = &self.seed_file {
            return load_seed(path);
        }
        let params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mut seed = Seed::new(self.width, self.height, self.seed);
        seed.frames = self.frames;
        seed.params = params;
        seed.schedule = vec![ScheduledInput {
            frame: 0,
            sentiment: self.sentiment,
            keywords: self.keywords.clone(),
        }];
        Ok(seed)
    }
}

fn load_seed(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

fn simulate(seed: &Seed, renderer: &mut dyn Renderer) -> Result<Option<FrameReport>, CliError> {
    let mut animator = Animator::from_seed(seed)?;
    let reports = animator.run_seed(seed, renderer)?;
    animator.teardown();
    Ok(reports.last().copied())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Palettes => {
            let names = Palette::list_names();
            if cli.json {
                let info: serde_json::Map<String, serde_json::Value> = names
                    .iter()
                    .map(|&name| {
                        let palette = Palette::from_name(name)?;
                        Ok((name.to_string(), serde_json::to_value(palette.colors())?))
                    })
                    .collect::<Result<_, CliError>>()?;
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for &name in names {
                    let palette = Palette::from_name(name)?;
                    let hexes: Vec<String> = palette.colors().iter().map(|c| c.to_hex()).collect();
                    println!("{name}: {}", hexes.join(" "));
                }
            }
        }
        Command::Params {
            sentiment,
            keywords,
        } => {
            let bundle = map(aura_field::sentiment::sanitize(sentiment), keywords);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&bundle)?);
            } else {
                println!("zone:           {:?}", bundle.zone);
                println!("palette:        {}", bundle.palette_name());
                println!("particles:      {}", bundle.particle_count_target);
                println!("trail alpha:    {:.2}", bundle.trail_alpha);
                println!("time speed:     {:.4}", bundle.time_speed);
                println!("flow intensity: {:.3}", bundle.flow_intensity);
                println!("glow intensity: {:.2}", bundle.glow_intensity);
                println!("glow ratio:     {}", bundle.glow_ratio);
                println!("keywords:       x{:.2}", bundle.keyword_complexity);
            }
        }
        Command::Frames { run } => {
            let seed = run.to_seed()?;
            let mut recorder = FrameRecorder::new();
            let report = simulate(&seed, &mut recorder)?;
            if cli.json {
                let info = serde_json::json!({
                    "report": report,
                    "frame": recorder,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let frame = report.map_or(0, |r| r.frame);
                println!("frame {frame}: {} descriptors", recorder.len());
                for d in &recorder.descriptors {
                    println!(
                        "{:?} at ({:.1}, {:.1}) size {:.1} color {}",
                        d.shape,
                        d.x,
                        d.y,
                        d.size,
                        d.color.to_hex()
                    );
                }
            }
        }
        Command::Render { run, output } => {
            let seed = run.to_seed()?;
            let mut canvas = RasterCanvas::new(seed.width, seed.height)?;
            let report = simulate(&seed, &mut canvas)?;
            aura_render::snapshot::write_png(&canvas, &output)?;
            info!(output = %output.display(), "snapshot written");

            if cli.json {
                let info = serde_json::json!({
                    "width": seed.width,
                    "height": seed.height,
                    "frames": seed.frames,
                    "seed": seed.seed,
                    "report": report,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered aura ({}x{}, {} frames, seed {}) -> {}",
                    seed.width,
                    seed.height,
                    seed.frames,
                    seed.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aura=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({
                "error": e.to_string(),
                "kind": e.kind(),
                "exit_code": e.exit_code(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
