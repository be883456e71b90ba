use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tka_cli::cmd::{self, config::ConfigSubcommand};
use tka_core::config::DocumentFormat;
use tka_core::types::{MotionType, Orientation, RotationDirection, Turns};

#[derive(Parser)]
#[command(
    name = "tka",
    about = "Orientation continuity for kinetic pictograph sequences: validate, repair, and list next-beat options",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root holding .tka/config.yaml (default: auto-detect from .tka/)
    #[arg(long, global = true, env = "TKA_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the end orientation of a single motion
    Orient {
        /// pro, anti, static, dash, or float
        #[arg(long)]
        motion_type: MotionType,
        /// Number of turns (a multiple of 0.5)
        #[arg(long, default_value = "0")]
        turns: Turns,
        /// Prop rotation (hand path for float): cw, ccw, or no_rot
        #[arg(long, default_value = "no_rot")]
        rotation: RotationDirection,
        /// Start orientation: in, out, clock, or counter
        #[arg(long)]
        start: Orientation,
    },

    /// Report orientation breaks between adjacent beats
    Validate {
        /// Sequence document (typed YAML/JSON or legacy JSON)
        file: PathBuf,
    },

    /// Make every join of a sequence continuous
    Repair {
        /// Sequence document (typed YAML/JSON or legacy JSON)
        file: PathBuf,
        /// Write the repaired document here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Output format (default: documents.format from config)
        #[arg(long)]
        format: Option<DocumentFormat>,
    },

    /// Rewrite a sequence document in another format
    Convert {
        /// Sequence document (typed YAML/JSON or legacy JSON)
        file: PathBuf,
        /// Destination path
        #[arg(long, short = 'o')]
        output: PathBuf,
        /// Output format (default: documents.format from config)
        #[arg(long)]
        format: Option<DocumentFormat>,
    },

    /// List the candidate beats that can follow a sequence
    Options {
        /// Sequence document (typed YAML/JSON or legacy JSON)
        file: PathBuf,
        /// Candidate beats (typed or legacy entries)
        #[arg(long)]
        candidates: PathBuf,
        /// Drop candidates with undefined orientation instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Translate between location pairs and named grid positions
    Position {
        /// A grid name (alpha1) or the blue location (s)
        first: String,
        /// The red location, when the first argument is the blue location
        second: Option<String>,
    },

    /// Inspect and validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = tka_cli::root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Orient {
            motion_type,
            turns,
            rotation,
            start,
        } => cmd::orient::run(motion_type, turns, rotation, start, cli.json),
        Commands::Validate { file } => cmd::validate::run(&file, cli.json),
        Commands::Repair {
            file,
            output,
            format,
        } => cmd::repair::run(&root, &file, output.as_deref(), format, cli.json),
        Commands::Convert {
            file,
            output,
            format,
        } => cmd::repair::convert(&root, &file, &output, format, cli.json),
        Commands::Options {
            file,
            candidates,
            skip_invalid,
        } => cmd::options::run(&root, &file, &candidates, skip_invalid, cli.json),
        Commands::Position { first, second } => {
            cmd::position::run(&first, second.as_deref(), cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
