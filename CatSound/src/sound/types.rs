//! Types for sound loading

use crate::wav::{PcmFormat, encode_wav};

/// Decoded PCM audio held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    format: PcmFormat,
    data: Vec<u8>,
}

impl Sound {
    #[must_use]
    pub fn new(format: PcmFormat, data: Vec<u8>) -> Self {
        Self { format, data }
    }

    /// Sample layout of [`data`](Self::data)
    pub fn format(&self) -> PcmFormat {
        self.format
    }

    /// Raw sample bytes, interleaved if multi-channel
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length of the sample data in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of whole sample frames
    pub fn frame_count(&self) -> usize {
        match usize::from(self.format.block_align()) {
            0 => 0,
            align => self.data.len() / align,
        }
    }

    /// Get duration in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f32 / self.format.sample_rate as f32
    }

    /// Get duration in milliseconds
    pub fn duration_ms(&self) -> u32 {
        (self.duration_secs() * 1000.0) as u32
    }

    /// Encode as a standalone WAV file
    pub fn to_wav_bytes(&self) -> Vec<u8> {
        encode_wav(self.format, &self.data)
    }
}

/// Outcome of one `load_archive` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Entries in the archive (all appended to the collection)
    pub total: usize,
    /// Entries that decoded into a sound
    pub loaded: usize,
    /// Entries kept as failed placeholders
    pub failed: usize,
}

impl LoadSummary {
    /// Returns true if every entry decoded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Progress callback type
pub type ProgressCallback<'a> = &'a dyn Fn(&LoadProgress);

/// Progress information during a load
#[derive(Debug, Clone)]
pub struct LoadProgress {
    /// Current operation phase
    pub phase: LoadPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
}

impl LoadProgress {
    #[must_use]
    pub fn new(phase: LoadPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Opening the archive and reading its index table
    ReadingIndex,
    /// Reading and decoding individual entries
    DecodingEntries,
    /// Operation complete
    Complete,
}

impl LoadPhase {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPhase::ReadingIndex => "Reading index",
            LoadPhase::DecodingEntries => "Decoding",
            LoadPhase::Complete => "Complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_duration() {
        let sound = Sound::new(PcmFormat::DOS_8BIT_MONO_8KHZ, vec![0x80; 4000]);
        assert_eq!(sound.frame_count(), 4000);
        assert_eq!(sound.duration_ms(), 500);

        let stereo = Sound::new(PcmFormat::new(2, 1000, 16), vec![0; 400]);
        assert_eq!(stereo.frame_count(), 100);
        assert_eq!(stereo.duration_ms(), 100);
    }

    #[test]
    fn test_to_wav_bytes() {
        let sound = Sound::new(PcmFormat::DOS_8BIT_MONO_8KHZ, vec![1, 2, 3]);
        let wav = sound.to_wav_bytes();
        assert_eq!(wav.len(), 47);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[44..], &[1, 2, 3]);
    }

    #[test]
    fn test_progress_percentage() {
        let quarter = LoadProgress::new(LoadPhase::DecodingEntries, 1, 4);
        assert!((quarter.percentage() - 0.25).abs() < f32::EPSILON);

        let empty = LoadProgress::new(LoadPhase::Complete, 0, 0);
        assert!((empty.percentage() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_summary_completeness() {
        let clean = LoadSummary { total: 2, loaded: 2, failed: 0 };
        assert!(clean.is_complete());

        let partial = LoadSummary { total: 2, loaded: 1, failed: 1 };
        assert!(!partial.is_complete());
    }
}
