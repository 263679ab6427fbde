//! # `CatSound`
//!
//! A pure-Rust loader for X-Com style CAT sound archives.
//!
//! A CAT file bundles many sound payloads behind an offset/length index
//! table. Payloads are either complete RIFF/WAVE files or raw 8-bit PCM
//! without a header (the DOS release). This crate reads the index, wraps raw
//! payloads in a synthesized WAV header, decodes every entry into an
//! in-memory [`Sound`](sound::Sound), and keeps going when an individual
//! entry is junk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use catsound::sound::SoundSet;
//!
//! let mut set = SoundSet::new();
//! let summary = set.load_archive("SOUND/SAMPLE.CAT", false)?;
//! println!("{} of {} entries decoded", summary.loaded, summary.total);
//!
//! if let Some(sound) = set.get(12) {
//!     println!("sound 12: {} bytes, {} ms", sound.len(), sound.duration_ms());
//! }
//! # Ok::<(), catsound::Error>(())
//! ```
//!
//! ## Using the Prelude
//!
//! ```
//! use catsound::prelude::*;
//!
//! let synth = HeaderSynthesizer::new(PcmFormat::DOS_8BIT_MONO_8KHZ);
//! assert_eq!(synth.synthesize(&[0x80; 4]).len(), 48);
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `catsound` command-line binary

pub mod batch;
pub mod cat;
pub mod error;
pub mod sound;
pub mod wav;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::cat::{ArchiveIndex, CatEntry, CatReader, CatWriter};
    pub use crate::wav::{
        DecodeError, EntryDecoder, HeaderSynthesizer, PcmFormat, WavDecoder, WavHeader,
    };
    pub use crate::sound::{
        LoadPhase, LoadProgress, LoadSummary, LoaderConfig, Sound, SoundCollection, SoundSet,
        SoundSlot,
    };
    pub use crate::batch::{ArchiveLoadResult, batch_load, find_cat_files};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
