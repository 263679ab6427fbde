//! CAT archive format reader/writer
//!
//! A CAT file starts with a table of `(offset: u32, length: u32)` pairs,
//! little-endian, one per entry, followed by the entry bytes at the
//! recorded offsets. There is no header or entry count: the table ends
//! where the first entry's data begins, so `count = first_offset / 8`.
//!
//! Some CAT files prefix each entry with its file name, stored as a length
//! byte followed by that many name bytes. Name handling is opt-in because a
//! raw PCM payload can start with a byte that looks like a length.
//!
//! See <http://www.ufopaedia.org/index.php?title=SOUND> for the X-Com files.

mod reader;
mod types;
mod writer;

pub use reader::CatReader;
pub use types::*;
pub use writer::CatWriter;

use crate::error::Result;

/// Size of one index table row (offset + length)
pub const TABLE_ENTRY_SIZE: u64 = 8;

/// Longest file name that can precede an entry's payload
pub const MAX_NAME_LENGTH: usize = 56;

/// Read access to an indexed archive.
///
/// The loader only ever talks to an archive through this trait, so tests
/// and hosts with their own storage can feed it without a CAT file.
pub trait ArchiveIndex {
    /// Number of entries in the index table.
    fn count(&self) -> u32;

    /// Read the bytes of entry `index`.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveCorrupt`](crate::Error::ArchiveCorrupt) for
    /// an index past the table or data outside the file, or an IO error if
    /// the bytes cannot be read.
    fn read_entry(&mut self, index: u32) -> Result<Vec<u8>>;
}

/// Split an entry into its name prefix and payload, if it carries one.
///
/// Returns the raw name bytes (trailing NULs trimmed) and the number of
/// bytes the prefix occupies.
#[must_use]
pub fn split_name_prefix(entry: &[u8]) -> Option<(&[u8], usize)> {
    let name_len = usize::from(*entry.first()?);
    if name_len > MAX_NAME_LENGTH || entry.len() < name_len + 1 {
        return None;
    }

    let name = &entry[1..=name_len];
    let trimmed_len = name.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
    Some((&name[..trimmed_len], name_len + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name_prefix() {
        let entry = [4, b'B', b'O', b'O', b'M', 0x80, 0x81];
        let (name, prefix_len) = split_name_prefix(&entry).unwrap();
        assert_eq!(name, b"BOOM");
        assert_eq!(prefix_len, 5);
        assert_eq!(&entry[prefix_len..], &[0x80, 0x81]);
    }

    #[test]
    fn test_split_name_prefix_trims_nul_padding() {
        let entry = [5, b'A', b'B', 0, 0, 0, 0x7F];
        let (name, prefix_len) = split_name_prefix(&entry).unwrap();
        assert_eq!(name, b"AB");
        assert_eq!(prefix_len, 6);
    }

    #[test]
    fn test_split_name_prefix_rejects_long_or_short() {
        // Length byte above the name limit: raw PCM, not a name
        assert!(split_name_prefix(&[0x80, 0x80, 0x80]).is_none());
        // Declared name runs past the entry
        assert!(split_name_prefix(&[10, b'A']).is_none());
        assert!(split_name_prefix(&[]).is_none());
    }
}
