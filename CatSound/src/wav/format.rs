//! PCM sample format policies

use serde::{Deserialize, Serialize};

/// Sample layout of uncompressed linear PCM audio.
///
/// Raw CAT payloads carry no format information, so the loader applies one
/// of these as a fixed policy when synthesizing headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmFormat {
    /// Number of interleaved channels
    pub channels: u16,
    /// Samples per second, per channel
    pub sample_rate: u32,
    /// Bits per sample (8 = unsigned, 16 = signed little-endian)
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// The DOS release encoding: mono, unsigned 8-bit, 8000 Hz.
    pub const DOS_8BIT_MONO_8KHZ: Self = Self::new(1, 8000, 8);

    #[must_use]
    pub const fn new(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Bytes per sample frame (all channels)
    #[must_use]
    pub fn block_align(&self) -> u16 {
        self.channels.saturating_mul(self.bits_per_sample / 8)
    }

    /// Bytes per second of audio
    #[must_use]
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .saturating_mul(u32::from(self.block_align()))
    }

    /// Check that the format describes playable PCM.
    ///
    /// # Errors
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.channels == 0 {
            return Err("channel count is zero");
        }
        if self.sample_rate == 0 {
            return Err("sample rate is zero");
        }
        if !matches!(self.bits_per_sample, 8 | 16) {
            return Err("bits per sample must be 8 or 16");
        }
        Ok(())
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::DOS_8BIT_MONO_8KHZ
    }
}
