//! Loading a set of sounds from a CAT archive

use std::path::Path;

use super::{
    LoadPhase, LoadProgress, LoadSummary, LoaderConfig, ProgressCallback, Sound, SoundCollection,
    SoundSlot,
};
use crate::cat::{ArchiveIndex, CatReader};
use crate::error::Result;
use crate::wav::{DecodeError, EntryDecoder, HeaderSynthesizer, WavDecoder};

/// A set of sounds loaded from one or more CAT archives.
///
/// Sound `i` of the set is entry `i` of the archive, whether or not it
/// decoded. Loading a second archive appends after the first.
///
/// A `SoundSet` does no locking of its own; keep each set (and the archive
/// it is reading) on one thread at a time.
#[derive(Debug)]
pub struct SoundSet<D: EntryDecoder = WavDecoder> {
    sounds: SoundCollection,
    config: LoaderConfig,
    decoder: D,
}

impl SoundSet<WavDecoder> {
    /// Create an empty set using the WAV decoder and the DOS format policy
    #[must_use]
    pub fn new() -> Self {
        Self::with_decoder(WavDecoder)
    }

    /// Create an empty set using the WAV decoder and a custom config
    #[must_use]
    pub fn with_config(config: LoaderConfig) -> Self {
        Self::with_decoder(WavDecoder).with_loader_config(config)
    }
}

impl Default for SoundSet<WavDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: EntryDecoder> SoundSet<D> {
    /// Create an empty set that decodes entries with `decoder`
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            sounds: SoundCollection::new(),
            config: LoaderConfig::default(),
            decoder,
        }
    }

    /// Replace the loader config used by subsequent loads
    #[must_use]
    pub fn with_loader_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every entry of a CAT archive.
    ///
    /// With `already_container` false, entries are raw PCM and get a WAV
    /// header synthesized from the configured format policy before
    /// decoding. With it true, entries are decoded as-is.
    ///
    /// Entries that fail to decode are kept as placeholders and do not fail
    /// the load.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveOpen`](crate::Error::ArchiveOpen) if the file
    /// cannot be opened, [`Error::ArchiveCorrupt`](crate::Error::ArchiveCorrupt)
    /// if its index table is malformed, or an IO error if an entry cannot be
    /// read. On error the set is left unchanged.
    pub fn load_archive(
        &mut self,
        path: impl AsRef<Path>,
        already_container: bool,
    ) -> Result<LoadSummary> {
        self.load_archive_with_progress(path, already_container, None)
    }

    /// [`load_archive`](Self::load_archive) with progress callbacks
    ///
    /// # Errors
    /// See [`load_archive`](Self::load_archive).
    pub fn load_archive_with_progress(
        &mut self,
        path: impl AsRef<Path>,
        already_container: bool,
        progress: Option<ProgressCallback>,
    ) -> Result<LoadSummary> {
        let progress = progress.unwrap_or(&|_| {});
        let path = path.as_ref();

        progress(&LoadProgress::new(LoadPhase::ReadingIndex, 0, 1));
        let mut archive =
            CatReader::open(path)?.with_name_stripping(self.config.strip_name_prefix);

        let summary = self.load_from_index(&mut archive, already_container, Some(progress))?;
        tracing::info!(
            "Loaded {} of {} sounds from {}",
            summary.loaded,
            summary.total,
            path.display()
        );
        Ok(summary)
    }

    /// Load every entry of an already opened archive index.
    ///
    /// # Errors
    /// Returns the first error reported by `archive`; the set is left
    /// unchanged in that case.
    pub fn load_from_index<A: ArchiveIndex>(
        &mut self,
        archive: &mut A,
        already_container: bool,
        progress: Option<ProgressCallback>,
    ) -> Result<LoadSummary> {
        let progress = progress.unwrap_or(&|_| {});
        let count = archive.count();
        let total = count as usize;
        let synthesizer = HeaderSynthesizer::new(self.config.format);

        let mut summary = LoadSummary {
            total,
            ..LoadSummary::default()
        };

        // Staged so a read error part way through leaves the set untouched
        let mut staged = Vec::with_capacity(total);

        for index in 0..count {
            progress(&LoadProgress::new(
                LoadPhase::DecodingEntries,
                index as usize + 1,
                total,
            ));

            let raw = archive.read_entry(index)?;
            let result = self.decode_entry(raw, already_container, &synthesizer);
            match &result {
                Ok(sound) => {
                    tracing::debug!("Decoded sound {index} ({} bytes)", sound.len());
                    summary.loaded += 1;
                }
                Err(err) => {
                    tracing::warn!("Skipping sound {index}: {err}");
                    summary.failed += 1;
                }
            }
            staged.push(SoundSlot::from(result));
        }

        self.sounds.extend(staged);

        progress(&LoadProgress::new(LoadPhase::Complete, total, total));
        Ok(summary)
    }

    /// Decode one entry. Takes the raw buffer by value: it and any
    /// synthesized container are dropped on return, success or not.
    fn decode_entry(
        &self,
        raw: Vec<u8>,
        already_container: bool,
        synthesizer: &HeaderSynthesizer,
    ) -> std::result::Result<Sound, DecodeError> {
        if already_container {
            self.decoder.decode(&raw)
        } else {
            let container = synthesizer.synthesize(&raw);
            drop(raw);
            self.decoder.decode(&container)
        }
    }

    /// Sound at `index`, or `None` if out of range or the entry failed to
    /// decode
    pub fn get(&self, index: usize) -> Option<&Sound> {
        self.sounds.get(index)
    }

    /// Slot at `index`, including failed placeholders
    pub fn slot(&self, index: usize) -> Option<&SoundSlot> {
        self.sounds.slot(index)
    }

    /// Total number of slots in the set, failed placeholders included
    pub fn total_sounds(&self) -> usize {
        self.sounds.len()
    }

    pub fn sounds(&self) -> &SoundCollection {
        &self.sounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::wav::{PcmFormat, WAV_HEADER_SIZE};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// In-memory archive index
    struct MemoryArchive {
        entries: Vec<Vec<u8>>,
        fail_at: Option<u32>,
    }

    impl MemoryArchive {
        fn new(entries: Vec<Vec<u8>>) -> Self {
            Self {
                entries,
                fail_at: None,
            }
        }
    }

    impl ArchiveIndex for MemoryArchive {
        fn count(&self) -> u32 {
            self.entries.len() as u32
        }

        fn read_entry(&mut self, index: u32) -> Result<Vec<u8>> {
            if self.fail_at == Some(index) {
                return Err(Error::corrupt("simulated read failure"));
            }
            self.entries
                .get(index as usize)
                .cloned()
                .ok_or_else(|| Error::corrupt(format!("entry {index} out of range")))
        }
    }

    /// WAV decoder that also rejects payloads starting with 0xDE 0xAD
    fn picky_decoder(bytes: &[u8]) -> std::result::Result<Sound, DecodeError> {
        let sound = WavDecoder.decode(bytes)?;
        if sound.data().starts_with(&[0xDE, 0xAD]) {
            return Err(DecodeError::InvalidFormat("junk entry".to_string()));
        }
        Ok(sound)
    }

    #[test]
    fn test_raw_entries_get_synthesized_headers() {
        let mut archive =
            MemoryArchive::new(vec![vec![0x80; 10], Vec::new(), vec![0x7F; 5]]);
        let mut set = SoundSet::new();

        let summary = set.load_from_index(&mut archive, false, None).unwrap();

        assert_eq!(summary, LoadSummary { total: 3, loaded: 3, failed: 0 });
        assert_eq!(set.total_sounds(), 3);
        assert_eq!(set.get(0).map(Sound::len), Some(10));
        assert_eq!(set.get(1).map(Sound::len), Some(0));
        assert_eq!(set.get(2).map(Sound::len), Some(5));
        assert_eq!(set.get(0).unwrap().format(), PcmFormat::DOS_8BIT_MONO_8KHZ);
        assert!(set.get(3).is_none());
    }

    #[test]
    fn test_decode_failure_is_isolated() {
        let mut archive = MemoryArchive::new(vec![
            vec![0x80; 10],
            vec![0xDE, 0xAD, 0xBE, 0xEF],
            vec![0x7F; 5],
        ]);
        let mut set = SoundSet::with_decoder(picky_decoder);

        let summary = set.load_from_index(&mut archive, false, None).unwrap();

        assert_eq!(summary, LoadSummary { total: 3, loaded: 2, failed: 1 });
        assert_eq!(set.total_sounds(), 3);
        assert!(set.get(0).is_some());
        assert!(set.get(1).is_none());
        assert!(matches!(
            set.slot(1),
            Some(SoundSlot::Failed(DecodeError::InvalidFormat(_)))
        ));
        assert_eq!(set.get(2).map(Sound::len), Some(5));
    }

    #[test]
    fn test_container_entries_decoded_as_is() {
        let synth = HeaderSynthesizer::default();
        let mut archive = MemoryArchive::new(vec![
            synth.synthesize(&[1, 2, 3]),
            b"this is not a wav file".to_vec(),
            synth.synthesize(&[4]),
        ]);
        let mut set = SoundSet::new();

        let summary = set.load_from_index(&mut archive, true, None).unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(set.get(0).map(Sound::data), Some(&[1u8, 2, 3][..]));
        assert!(set.get(1).is_none());
        assert_eq!(set.get(2).map(Sound::data), Some(&[4u8][..]));
    }

    #[test]
    fn test_read_error_leaves_set_unchanged() {
        let mut first = MemoryArchive::new(vec![vec![0x80; 2]]);
        let mut set = SoundSet::new();
        set.load_from_index(&mut first, false, None).unwrap();

        let mut broken = MemoryArchive::new(vec![vec![0x80; 2], vec![0x80; 2], vec![0x80; 2]]);
        broken.fail_at = Some(2);
        assert!(set.load_from_index(&mut broken, false, None).is_err());
        assert_eq!(set.total_sounds(), 1);
    }

    #[test]
    fn test_repeated_loads_append() {
        let mut set = SoundSet::new();
        set.load_from_index(&mut MemoryArchive::new(vec![vec![1; 3]]), false, None)
            .unwrap();
        set.load_from_index(&mut MemoryArchive::new(vec![vec![2; 4], vec![3; 5]]), false, None)
            .unwrap();

        assert_eq!(set.total_sounds(), 3);
        assert_eq!(set.get(2).map(Sound::len), Some(5));
    }

    #[test]
    fn test_format_policy_from_config() {
        let config = LoaderConfig {
            format: PcmFormat::new(1, 11025, 8),
            ..LoaderConfig::default()
        };
        let mut set = SoundSet::with_config(config);
        set.load_from_index(&mut MemoryArchive::new(vec![vec![0x80; 11025]]), false, None)
            .unwrap();

        let sound = set.get(0).unwrap();
        assert_eq!(sound.format().sample_rate, 11025);
        assert_eq!(sound.duration_ms(), 1000);
    }

    #[test]
    fn test_decoder_sees_exact_container() {
        let seen = RefCell::new(Vec::new());
        let recorder = |bytes: &[u8]| -> std::result::Result<Sound, DecodeError> {
            seen.borrow_mut().push(bytes.len());
            WavDecoder.decode(bytes)
        };
        let mut set = SoundSet::with_decoder(recorder);
        set.load_from_index(&mut MemoryArchive::new(vec![vec![0; 10], vec![]]), false, None)
            .unwrap();

        assert_eq!(*seen.borrow(), vec![WAV_HEADER_SIZE + 10, WAV_HEADER_SIZE]);
    }

    #[test]
    fn test_progress_reports_every_entry() {
        let phases = RefCell::new(Vec::new());
        let callback = |p: &LoadProgress| phases.borrow_mut().push((p.phase, p.current));

        let mut set = SoundSet::new();
        set.load_from_index(
            &mut MemoryArchive::new(vec![vec![0; 1], vec![0; 1]]),
            false,
            Some(&callback),
        )
        .unwrap();

        assert_eq!(
            *phases.borrow(),
            vec![
                (LoadPhase::DecodingEntries, 1),
                (LoadPhase::DecodingEntries, 2),
                (LoadPhase::Complete, 2),
            ]
        );
    }
}
