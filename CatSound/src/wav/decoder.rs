//! WAV decoder implementation
//!
//! Decodes RIFF/WAVE PCM buffers into in-memory [`Sound`]s.

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

use super::{
    DATA_CHUNK_ID, FMT_CHUNK_ID, FMT_CHUNK_SIZE, PCM_FORMAT_TAG, PcmFormat, RIFF_MAGIC, WAVE_MAGIC,
};
use crate::sound::Sound;

/// Errors that can occur while decoding a single entry
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid RIFF header")]
    InvalidRiffHeader,
    #[error("Invalid WAVE format")]
    InvalidWaveFormat,
    #[error("Unsupported audio format: {0:#06x}")]
    UnsupportedFormat(u16),
    #[error("Invalid PCM format: {0}")]
    InvalidFormat(String),
    #[error("Missing required chunk: {0}")]
    MissingChunk(&'static str),
    #[error("Data chunk declares {declared} bytes but only {available} are present")]
    TruncatedData { declared: u32, available: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed WAV header information
#[derive(Debug, Clone)]
pub struct WavHeader {
    /// RIFF size field (file size minus 8)
    pub riff_size: u32,
    /// Audio format code (0x0001 = PCM)
    pub format_code: u16,
    /// Number of audio channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Block alignment
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Offset to audio data in the buffer
    pub data_offset: u64,
    /// Size of audio data as declared by the data chunk
    pub data_size: u32,
}

impl WavHeader {
    /// Sample layout described by the `fmt ` chunk
    #[must_use]
    pub fn format(&self) -> PcmFormat {
        PcmFormat::new(self.channels, self.sample_rate, self.bits_per_sample)
    }
}

/// Parse a WAV header from a reader
///
/// Stops at the `data` chunk; a `fmt ` chunk must come before it.
///
/// # Errors
/// Returns an error if the data is not a RIFF/WAVE stream or lacks the
/// `fmt ` or `data` chunk.
pub fn parse_wav_header<R: Read + Seek>(reader: &mut R) -> Result<WavHeader, DecodeError> {
    let mut magic = [0u8; 4];
    reader
        .read_exact(&mut magic)
        .map_err(|_| DecodeError::InvalidRiffHeader)?;
    if &magic != RIFF_MAGIC {
        return Err(DecodeError::InvalidRiffHeader);
    }

    let riff_size = reader.read_u32::<LittleEndian>()?;

    reader.read_exact(&mut magic)?;
    if &magic != WAVE_MAGIC {
        return Err(DecodeError::InvalidWaveFormat);
    }

    let mut header = WavHeader {
        riff_size,
        format_code: 0,
        channels: 0,
        sample_rate: 0,
        byte_rate: 0,
        block_align: 0,
        bits_per_sample: 0,
        data_offset: 0,
        data_size: 0,
    };

    let mut found_fmt = false;
    let mut found_data = false;

    while !found_data {
        let mut chunk_id = [0u8; 4];
        if reader.read_exact(&mut chunk_id).is_err() {
            break;
        }

        let chunk_size = reader.read_u32::<LittleEndian>()?;
        let chunk_start = reader.stream_position()?;

        match &chunk_id {
            id if id == FMT_CHUNK_ID => {
                if chunk_size < FMT_CHUNK_SIZE {
                    return Err(DecodeError::InvalidFormat(format!(
                        "fmt chunk is {chunk_size} bytes, need at least {FMT_CHUNK_SIZE}"
                    )));
                }
                header.format_code = reader.read_u16::<LittleEndian>()?;
                header.channels = reader.read_u16::<LittleEndian>()?;
                header.sample_rate = reader.read_u32::<LittleEndian>()?;
                header.byte_rate = reader.read_u32::<LittleEndian>()?;
                header.block_align = reader.read_u16::<LittleEndian>()?;
                header.bits_per_sample = reader.read_u16::<LittleEndian>()?;
                found_fmt = true;
            }
            id if id == DATA_CHUNK_ID => {
                if !found_fmt {
                    return Err(DecodeError::MissingChunk("fmt "));
                }
                header.data_offset = chunk_start;
                header.data_size = chunk_size;
                found_data = true;
                continue;
            }
            _ => {
                // Skip unknown chunks (LIST, fact, smpl, etc.)
            }
        }

        // Seek to next chunk (align to word boundary)
        let next_pos = chunk_start + u64::from(chunk_size);
        let aligned_pos = (next_pos + 1) & !1;
        reader.seek(SeekFrom::Start(aligned_pos))?;
    }

    if !found_fmt {
        return Err(DecodeError::MissingChunk("fmt "));
    }
    if !found_data {
        return Err(DecodeError::MissingChunk("data"));
    }

    Ok(header)
}

/// Turns a self-describing entry buffer into a [`Sound`].
///
/// Any `Fn(&[u8]) -> Result<Sound, DecodeError>` closure is a decoder too.
pub trait EntryDecoder {
    /// Decode one entry.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] if the buffer is not acceptable audio.
    fn decode(&self, bytes: &[u8]) -> Result<Sound, DecodeError>;
}

impl<F> EntryDecoder for F
where
    F: Fn(&[u8]) -> Result<Sound, DecodeError>,
{
    fn decode(&self, bytes: &[u8]) -> Result<Sound, DecodeError> {
        self(bytes)
    }
}

/// Decoder for uncompressed PCM RIFF/WAVE data
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl EntryDecoder for WavDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Sound, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        let header = parse_wav_header(&mut cursor)?;

        if header.format_code != PCM_FORMAT_TAG {
            return Err(DecodeError::UnsupportedFormat(header.format_code));
        }

        let format = header.format();
        format
            .validate()
            .map_err(|message| DecodeError::InvalidFormat(message.to_string()))?;

        let available = (bytes.len() as u64).saturating_sub(header.data_offset);
        if u64::from(header.data_size) > available {
            return Err(DecodeError::TruncatedData {
                declared: header.data_size,
                available,
            });
        }

        let start = header.data_offset as usize;
        let end = start + header.data_size as usize;
        Ok(Sound::new(format, bytes[start..end].to_vec()))
    }
}
