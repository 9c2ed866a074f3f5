//! CLI argument definitions for the isosprite command-line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use isosprite_cli::commands::plan::Stage;

/// isosprite - Isometric sprite sizing, atlas planning and smoke anchors
#[derive(Parser)]
#[command(name = "isosprite")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Item catalog JSON (default: built-in catalog)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Pipeline configuration JSON (default: built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the sprite size of an item
    Size {
        /// Item identifier
        item: String,

        /// Extra scale on top of the item's base scale
        #[arg(short, long, default_value_t = 1.0)]
        scale: f64,

        /// Use the atlas oversampling factor as the scale
        #[arg(long, conflicts_with = "scale")]
        atlas: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate the item catalog and list its items
    Catalog {
        /// Fail unless these items are present
        #[arg(long, value_delimiter = ',')]
        require: Vec<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Plan the sprite sheet of a render stage
    Plan {
        /// Render stage the sheet belongs to
        #[arg(value_enum)]
        stage: Stage,

        /// Item identifier
        item: String,

        /// Model version or file name
        #[arg(id = "model_version", value_name = "VERSION")]
        version: String,

        /// Render output directory (default: renders/<item>/<version>)
        #[arg(short, long)]
        renders_dir: Option<PathBuf>,

        /// Number of animation frames (default: from configuration)
        #[arg(short, long)]
        frames: Option<u32>,

        /// Variety render directories, one row each (housing stage)
        #[arg(long = "variety")]
        varieties: Vec<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Extract smoke anchor records from scene snapshots
    Smoke {
        #[command(subcommand)]
        command: SmokeCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum SmokeCommands {
    /// Emitter anchors and smoke directions of a moving item
    Moving {
        /// Item identifier
        item: String,

        /// Model version
        #[arg(id = "model_version", value_name = "VERSION")]
        version: String,

        /// Snapshot of each direction sequence, named like <item>_BL-TR.json
        #[arg(required = true)]
        sequences: Vec<PathBuf>,

        /// Number of animation frames (default: from configuration)
        #[arg(short, long)]
        frames: Option<u32>,

        /// Output directory (default: assets/smoke_data/moving)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Emitter anchors of a static building at each rotation
    Static {
        /// Item identifier
        item: String,

        /// Model file name
        #[arg(id = "model_version", value_name = "VERSION")]
        version: String,

        /// Snapshot of the building scene
        snapshot: PathBuf,

        /// Output directory (default: assets/smoke_data/static)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
