use clap::{Parser, Subcommand};
use rep_core::counter::MAX_BAND_MARGIN;
use rep_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "repcount")]
#[command(about = "Exercise repetition counter for recorded pose landmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available exercise profiles
    Profiles,

    /// Count repetitions in a JSONL landmark recording
    Count {
        /// Exercise profile id (see `repcount profiles`)
        #[arg(long, short)]
        exercise: String,

        /// Recording with one JSON array of landmarks per line
        #[arg(long, short)]
        frames: PathBuf,

        /// Treat progress within this many percent of 0/100 as an extreme
        #[arg(long)]
        band: Option<u8>,

        /// Write a per-frame CSV trace to this path
        #[arg(long)]
        trace: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    rep_core::logging::init_with_level(rep_core::logging::level_for_verbosity(cli.verbose));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let registry = ProfileRegistry::with_config(&config)?;

    let errors = registry.validate();
    if !errors.is_empty() {
        eprintln!("Profile validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Profile("Invalid profile registry".into()));
    }

    match cli.command {
        Commands::Profiles => cmd_profiles(&registry),
        Commands::Count {
            exercise,
            frames,
            band,
            trace,
        } => cmd_count(&registry, &config, &exercise, &frames, band, trace.as_deref()),
    }
}

fn cmd_profiles(registry: &ProfileRegistry) -> Result<()> {
    for profile in registry.profiles() {
        println!("{:<14} {}", profile.id, profile.name);
        println!(
            "{:<14} joint {} between {} and {}",
            "",
            landmark_name(profile.joint),
            landmark_name(profile.proximal),
            landmark_name(profile.distal)
        );
        println!(
            "{:<14} {}°–{}° {:?}, min visibility {}",
            "",
            profile.angle_domain.min_deg,
            profile.angle_domain.max_deg,
            profile.percent_direction,
            profile.visibility_threshold
        );
    }
    Ok(())
}

fn cmd_count(
    registry: &ProfileRegistry,
    config: &Config,
    exercise: &str,
    frames_path: &Path,
    band: Option<u8>,
    trace_path: Option<&Path>,
) -> Result<()> {
    let detection = match band {
        Some(margin) if margin > MAX_BAND_MARGIN => {
            return Err(Error::Config(format!(
                "--band {} exceeds {}",
                margin, MAX_BAND_MARGIN
            )));
        }
        Some(margin) => ExtremeDetection::Band { margin },
        None => config.counting.extreme_detection(),
    };

    let tracker = Tracker::for_exercise(registry, exercise, RepCounter::new(detection))?;
    let frames = read_frames(frames_path)?;

    let mut trace = match trace_path {
        Some(path) => Some(TraceSink::create(path)?),
        None => None,
    };

    let mut state = RepCounterState::initial();
    let mut accepted = 0usize;
    let mut rejected = 0usize;

    for (index, frame) in frames.iter().enumerate() {
        let row = match tracker.step(&mut state, frame.landmarks()) {
            Ok(reading) => {
                accepted += 1;
                if reading.boundary {
                    tracing::info!(
                        "Frame {}: {} reps ({}%, {:.1}°)",
                        index,
                        reading.count,
                        reading.percentage,
                        reading.angle
                    );
                }
                TraceRow::accepted(index, &reading)
            }
            Err(reason) => {
                rejected += 1;
                TraceRow::rejected(index, &state, &reason)
            }
        };

        if let Some(sink) = trace.as_mut() {
            sink.write(&row)?;
        }
    }

    if let Some(sink) = trace {
        sink.finish()?;
    }

    println!("Exercise: {}", tracker.profile().name);
    println!("Frames:   {} accepted, {} rejected", accepted, rejected);
    println!("Reps:     {:.1}", state.count());
    if state.direction == Direction::Down {
        println!("          (last repetition not finished)");
    }
    if let Some(path) = trace_path {
        println!("Trace:    {}", path.display());
    }

    Ok(())
}

fn landmark_name(index: usize) -> &'static str {
    PoseLandmark::from_index(index)
        .map(PoseLandmark::name)
        .unwrap_or("unknown")
}
