//! RIFF/WAVE support for CAT payloads
//!
//! ## Format Overview
//!
//! CAT sound payloads come in two flavours:
//! - complete RIFF/WAVE files (the CD release)
//! - raw unsigned 8-bit mono PCM at 8000 Hz with no header (the DOS release)
//!
//! Raw payloads are wrapped with a synthesized 44-byte header
//! ([`HeaderSynthesizer`]) so both flavours go through the same
//! [`EntryDecoder`].

mod decoder;
mod format;
mod header;

pub use decoder::{DecodeError, EntryDecoder, WavDecoder, WavHeader, parse_wav_header};
pub use format::PcmFormat;
pub use header::{HeaderSynthesizer, encode_wav};

/// RIFF chunk identifiers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK_ID: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK_ID: &[u8; 4] = b"data";

/// Size of a canonical PCM WAV header
pub const WAV_HEADER_SIZE: usize = 44;

/// Bytes counted by the RIFF size field in front of the payload
/// (everything after the size field itself, up to the sample data)
pub const RIFF_SIZE_OVERHEAD: u32 = 36;

/// Size of the `fmt ` chunk body for plain PCM
pub const FMT_CHUNK_SIZE: u32 = 16;

/// WAVE format tag for uncompressed linear PCM
pub const PCM_FORMAT_TAG: u16 = 0x0001;
