//! WAV header synthesis for raw PCM payloads

use byteorder::{ByteOrder, LittleEndian};

use super::{
    DATA_CHUNK_ID, FMT_CHUNK_ID, FMT_CHUNK_SIZE, PCM_FORMAT_TAG, PcmFormat, RIFF_MAGIC,
    RIFF_SIZE_OVERHEAD, WAV_HEADER_SIZE, WAVE_MAGIC,
};

/// Builds canonical 44-byte PCM WAV headers for a fixed [`PcmFormat`].
///
/// Only the two size fields depend on the payload; everything else comes
/// from the format policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderSynthesizer {
    format: PcmFormat,
}

impl HeaderSynthesizer {
    #[must_use]
    pub const fn new(format: PcmFormat) -> Self {
        Self { format }
    }

    /// The format policy written into every header
    #[must_use]
    pub fn format(&self) -> PcmFormat {
        self.format
    }

    /// Header for a payload of `payload_len` bytes.
    ///
    /// The RIFF size field saturates at `u32::MAX` for payloads within 36
    /// bytes of 4 GiB.
    #[must_use]
    pub fn header(&self, payload_len: u32) -> [u8; WAV_HEADER_SIZE] {
        let mut header = [0u8; WAV_HEADER_SIZE];

        // RIFF header
        header[0..4].copy_from_slice(RIFF_MAGIC);
        LittleEndian::write_u32(&mut header[4..8], payload_len.saturating_add(RIFF_SIZE_OVERHEAD));
        header[8..12].copy_from_slice(WAVE_MAGIC);

        // fmt chunk
        header[12..16].copy_from_slice(FMT_CHUNK_ID);
        LittleEndian::write_u32(&mut header[16..20], FMT_CHUNK_SIZE);
        LittleEndian::write_u16(&mut header[20..22], PCM_FORMAT_TAG);
        LittleEndian::write_u16(&mut header[22..24], self.format.channels);
        LittleEndian::write_u32(&mut header[24..28], self.format.sample_rate);
        LittleEndian::write_u32(&mut header[28..32], self.format.byte_rate());
        LittleEndian::write_u16(&mut header[32..34], self.format.block_align());
        LittleEndian::write_u16(&mut header[34..36], self.format.bits_per_sample);

        // data chunk
        header[36..40].copy_from_slice(DATA_CHUNK_ID);
        LittleEndian::write_u32(&mut header[40..44], payload_len);

        header
    }

    /// Wrap a raw payload in a header: `44 + payload.len()` bytes, payload
    /// copied verbatim after the header.
    #[must_use]
    pub fn synthesize(&self, payload: &[u8]) -> Vec<u8> {
        let payload_len = u32::try_from(payload.len()).unwrap_or(u32::MAX);

        let mut container = Vec::with_capacity(WAV_HEADER_SIZE + payload.len());
        container.extend_from_slice(&self.header(payload_len));
        container.extend_from_slice(payload);
        container
    }
}

/// Encode PCM samples as a standalone WAV file
#[must_use]
pub fn encode_wav(format: PcmFormat, samples: &[u8]) -> Vec<u8> {
    HeaderSynthesizer::new(format).synthesize(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOS_HEADER_ZERO: [u8; 44] = [
        b'R', b'I', b'F', b'F', 36, 0, 0, 0, b'W', b'A', b'V', b'E', b'f', b'm', b't', b' ', //
        0x10, 0, 0, 0, 0x01, 0, 0x01, 0, 0x40, 0x1f, 0, 0, 0x40, 0x1f, 0, 0, 0x01, 0, 0x08, 0, //
        b'd', b'a', b't', b'a', 0, 0, 0, 0,
    ];

    #[test]
    fn test_dos_header_bytes() {
        let synth = HeaderSynthesizer::default();
        assert_eq!(synth.header(0), DOS_HEADER_ZERO);
    }

    #[test]
    fn test_size_fields_track_payload_length() {
        let synth = HeaderSynthesizer::new(PcmFormat::DOS_8BIT_MONO_8KHZ);
        let header = synth.header(0x0001_0203);

        assert_eq!(LittleEndian::read_u32(&header[4..8]), 0x0001_0203 + 36);
        assert_eq!(LittleEndian::read_u32(&header[40..44]), 0x0001_0203);

        // Everything except the two size fields is fixed by the policy
        for (i, (&a, &b)) in header.iter().zip(DOS_HEADER_ZERO.iter()).enumerate() {
            if !(4..8).contains(&i) && !(40..44).contains(&i) {
                assert_eq!(a, b, "byte {i} differs");
            }
        }
    }

    #[test]
    fn test_synthesize_copies_payload() {
        let payload = [0x80, 0x00, 0xFF, 0x7F, 0x81];
        let container = HeaderSynthesizer::default().synthesize(&payload);

        assert_eq!(container.len(), 44 + payload.len());
        assert_eq!(&container[44..], &payload);
        assert_eq!(container, HeaderSynthesizer::default().synthesize(&payload));
    }

    #[test]
    fn test_size_field_saturates() {
        let header = HeaderSynthesizer::default().header(u32::MAX - 10);
        assert_eq!(LittleEndian::read_u32(&header[4..8]), u32::MAX);
    }

    #[test]
    fn test_other_policy() {
        let header = HeaderSynthesizer::new(PcmFormat::new(2, 11025, 16)).header(8);
        assert_eq!(LittleEndian::read_u16(&header[22..24]), 2);
        assert_eq!(LittleEndian::read_u32(&header[24..28]), 11025);
        assert_eq!(LittleEndian::read_u32(&header[28..32]), 44100);
        assert_eq!(LittleEndian::read_u16(&header[32..34]), 4);
        assert_eq!(LittleEndian::read_u16(&header[34..36]), 16);
    }
}
