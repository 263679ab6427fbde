//! Sound sets loaded from CAT archives
//!
//! [`SoundSet`] drives a load: it walks the archive index, synthesizes WAV
//! headers for raw payloads, decodes every entry, and stores the outcome in
//! a [`SoundCollection`] at the entry's archive index. An entry that fails
//! to decode is kept as a [`SoundSlot::Failed`] placeholder so the indices
//! stay aligned with the archive.

mod collection;
mod config;
mod set;
mod types;

pub use collection::{SoundCollection, SoundSlot};
pub use config::LoaderConfig;
pub use set::SoundSet;
pub use types::{LoadPhase, LoadProgress, LoadSummary, ProgressCallback, Sound};
