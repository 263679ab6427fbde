use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::sound::LoaderConfig;

pub mod batch;
pub mod create;
mod execute;
pub mod extract;
pub mod inspect;
pub mod list;

#[derive(Subcommand)]
pub enum Commands {
    /// List the index table of a CAT file
    List {
        /// Source CAT file
        #[arg(short, long)]
        source: PathBuf,

        /// Show the file name stored in front of each entry
        #[arg(short, long)]
        names: bool,
    },

    /// Load a CAT file and report which entries decode
    Inspect {
        /// Source CAT file
        #[arg(short, long)]
        source: PathBuf,

        /// Entries are complete WAV files (default: raw 8-bit PCM)
        #[arg(short, long)]
        wav: bool,

        /// Loader config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Extract every decodable entry as a .wav file
    Extract {
        /// Source CAT file
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory
        #[arg(short, long)]
        destination: PathBuf,

        /// Entries are complete WAV files (default: raw 8-bit PCM)
        #[arg(short, long)]
        wav: bool,

        /// Loader config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Pack the files of a directory into a CAT file
    Create {
        /// Source directory (files are packed in name order)
        #[arg(short, long)]
        source: PathBuf,

        /// Output CAT file
        #[arg(short, long)]
        destination: PathBuf,

        /// Store each file name in front of its entry
        #[arg(short, long)]
        names: bool,
    },

    /// Load every CAT file under a directory
    Batch {
        /// Directory to search
        #[arg(short, long)]
        source: PathBuf,

        /// Entries are complete WAV files (default: raw 8-bit PCM)
        #[arg(short, long)]
        wav: bool,

        /// Loader config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Load a config file if given, else the defaults
fn load_config(path: Option<&Path>) -> anyhow::Result<LoaderConfig> {
    match path {
        Some(path) => Ok(LoaderConfig::from_json_file(path)?),
        None => Ok(LoaderConfig::default()),
    }
}
