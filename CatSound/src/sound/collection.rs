//! Ordered, index-addressable storage for loaded sounds

use super::Sound;
use crate::wav::DecodeError;

/// One archive slot: a decoded sound, or the reason it could not be decoded
#[derive(Debug)]
pub enum SoundSlot {
    Loaded(Sound),
    Failed(DecodeError),
}

impl SoundSlot {
    /// The decoded sound, if this slot holds one
    pub fn sound(&self) -> Option<&Sound> {
        match self {
            SoundSlot::Loaded(sound) => Some(sound),
            SoundSlot::Failed(_) => None,
        }
    }

    /// The decode failure, if this slot is a placeholder
    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            SoundSlot::Loaded(_) => None,
            SoundSlot::Failed(err) => Some(err),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SoundSlot::Loaded(_))
    }
}

impl From<Result<Sound, DecodeError>> for SoundSlot {
    fn from(result: Result<Sound, DecodeError>) -> Self {
        match result {
            Ok(sound) => SoundSlot::Loaded(sound),
            Err(err) => SoundSlot::Failed(err),
        }
    }
}

/// Sounds in archive order, failed entries included.
///
/// Only the loader appends; everything public is a read-only lookup.
#[derive(Debug, Default)]
pub struct SoundCollection {
    slots: Vec<SoundSlot>,
}

impl SoundCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn extend(&mut self, slots: impl IntoIterator<Item = SoundSlot>) {
        self.slots.extend(slots);
    }

    /// Sound at `index`.
    ///
    /// Returns `None` for an index past the end and for an entry that failed
    /// to decode. Callers addressing sounds by fixed ids can rely on this
    /// instead of checking bounds first.
    pub fn get(&self, index: usize) -> Option<&Sound> {
        self.slots.get(index).and_then(SoundSlot::sound)
    }

    /// Slot at `index`, placeholder or not
    pub fn slot(&self, index: usize) -> Option<&SoundSlot> {
        self.slots.get(index)
    }

    /// Number of slots held, failed placeholders included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Alias for [`len`](Self::len)
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in archive order
    pub fn slots(&self) -> &[SoundSlot] {
        &self.slots
    }

    /// Sounds in archive order, `None` for failed entries
    pub fn iter(&self) -> impl Iterator<Item = Option<&Sound>> + '_ {
        self.slots.iter().map(SoundSlot::sound)
    }

    /// Failed entries with their archive index
    pub fn failures(&self) -> impl Iterator<Item = (usize, &DecodeError)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.error().map(|err| (i, err)))
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_loaded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.loaded_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::PcmFormat;

    fn collection() -> SoundCollection {
        let mut sounds = SoundCollection::new();
        sounds.extend([
            SoundSlot::Loaded(Sound::new(PcmFormat::default(), vec![1, 2])),
            SoundSlot::Failed(DecodeError::InvalidRiffHeader),
            SoundSlot::Loaded(Sound::new(PcmFormat::default(), vec![])),
        ]);
        sounds
    }

    #[test]
    fn test_lookup() {
        let sounds = collection();
        assert_eq!(sounds.len(), 3);
        assert_eq!(sounds.get(0).map(Sound::len), Some(2));
        assert!(sounds.get(1).is_none());
        assert!(sounds.slot(1).is_some_and(|s| !s.is_loaded()));
        assert_eq!(sounds.get(2).map(Sound::len), Some(0));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let sounds = collection();
        for index in [3, 4, 1000, usize::MAX] {
            assert!(sounds.get(index).is_none());
            assert!(sounds.slot(index).is_none());
        }
        assert!(SoundCollection::new().get(0).is_none());
    }

    #[test]
    fn test_failures() {
        let sounds = collection();
        let failed: Vec<usize> = sounds.failures().map(|(i, _)| i).collect();
        assert_eq!(failed, vec![1]);
        assert_eq!(sounds.loaded_count(), 2);
        assert_eq!(sounds.failed_count(), 1);
        assert_eq!(sounds.iter().filter(Option::is_some).count(), 2);
    }
}
