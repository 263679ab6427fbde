//! CAT archive reader
//!
//! The whole index table is read and validated when the reader is created.
//! A table that points outside the file is rejected up front, so
//! reading an entry only fails on IO errors or a bad index.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{split_name_prefix, ArchiveIndex, CatEntry, TABLE_ENTRY_SIZE};
use crate::error::{Error, Result};

/// CAT archive reader
pub struct CatReader<R: Read + Seek> {
    reader: BufReader<R>,
    entries: Vec<CatEntry>,
    file_len: u64,
    /// Strip the file name prefix from entries returned by `read_entry`
    strip_name_prefix: bool,
}

impl CatReader<File> {
    /// Open a CAT archive on disk and read its index table.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveOpen`] if the file cannot be opened and
    /// [`Error::ArchiveCorrupt`] if the index table is malformed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let reader = Self::new(file)?;
        tracing::debug!(
            "Opened CAT archive {} ({} entries, {} bytes)",
            path.display(),
            reader.entries.len(),
            reader.file_len
        );
        Ok(reader)
    }
}

impl<R: Read + Seek> CatReader<R> {
    /// Create a reader from a Read + Seek source and parse its index table.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveCorrupt`] if the index table is malformed.
    pub fn new(reader: R) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        let file_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let entries = Self::read_index(&mut reader, file_len)?;

        Ok(Self {
            reader,
            entries,
            file_len,
            strip_name_prefix: false,
        })
    }

    /// Strip file name prefixes from entries returned through [`ArchiveIndex`]
    #[must_use]
    pub fn with_name_stripping(mut self, strip: bool) -> Self {
        self.strip_name_prefix = strip;
        self
    }

    fn read_index(reader: &mut BufReader<R>, file_len: u64) -> Result<Vec<CatEntry>> {
        if file_len == 0 {
            return Ok(Vec::new());
        }
        if file_len < TABLE_ENTRY_SIZE {
            return Err(Error::corrupt(format!(
                "file is {file_len} bytes, too short for an index table"
            )));
        }

        let first_offset = u64::from(reader.read_u32::<LittleEndian>()?);
        if first_offset == 0 || first_offset % TABLE_ENTRY_SIZE != 0 {
            return Err(Error::corrupt(format!(
                "first entry offset {first_offset} is not a valid table size"
            )));
        }
        if first_offset > file_len {
            return Err(Error::corrupt(format!(
                "index table ends at {first_offset}, past end of file ({file_len} bytes)"
            )));
        }

        let count = first_offset / TABLE_ENTRY_SIZE;
        let mut table = vec![0u8; first_offset as usize];
        reader.seek(SeekFrom::Start(0))?;
        reader.read_exact(&mut table)?;

        let mut cursor = Cursor::new(table);
        let mut entries = Vec::with_capacity(count as usize);
        for index in 0..count {
            let offset = u64::from(cursor.read_u32::<LittleEndian>()?);
            let length = cursor.read_u32::<LittleEndian>()?;
            let entry = CatEntry { offset, length };

            if entry.end() > file_len {
                return Err(Error::corrupt(format!(
                    "entry {index} spans {offset}..{} past end of file ({file_len} bytes)",
                    entry.end()
                )));
            }
            entries.push(entry);
        }

        Ok(entries)
    }

    /// All index table rows, in archive order
    pub fn entries(&self) -> &[CatEntry] {
        &self.entries
    }

    /// Index table row for entry `index`
    pub fn entry(&self, index: u32) -> Option<CatEntry> {
        self.entries.get(index as usize).copied()
    }

    /// Size of the underlying file in bytes
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Read the raw bytes of an entry, name prefix included.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveCorrupt`] for a bad index or an IO error.
    pub fn read_raw(&mut self, index: u32) -> Result<Vec<u8>> {
        let entry = self.entry(index).ok_or_else(|| {
            Error::corrupt(format!(
                "entry {index} out of range (archive has {} entries)",
                self.count()
            ))
        })?;

        self.reader.seek(SeekFrom::Start(entry.offset))?;
        let mut data = vec![0u8; entry.length as usize];
        self.reader.read_exact(&mut data)?;
        Ok(data)
    }

    /// Read an entry's payload, removing the name prefix when `strip_name`
    /// is set and the entry carries one.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveCorrupt`] for a bad index or an IO error.
    pub fn read_entry_payload(&mut self, index: u32, strip_name: bool) -> Result<Vec<u8>> {
        let mut data = self.read_raw(index)?;
        if strip_name {
            if let Some((_, prefix_len)) = split_name_prefix(&data) {
                data.drain(..prefix_len);
            }
        }
        Ok(data)
    }

    /// File name stored in front of an entry's payload, if any.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveCorrupt`] for a bad index or an IO error.
    pub fn entry_name(&mut self, index: u32) -> Result<Option<String>> {
        let data = self.read_raw(index)?;
        Ok(split_name_prefix(&data).map(|(name, _)| String::from_utf8_lossy(name).into_owned()))
    }
}

impl<R: Read + Seek> ArchiveIndex for CatReader<R> {
    fn count(&self) -> u32 {
        // The table size is bounded by a u32 offset, so this never truncates
        self.entries.len() as u32
    }

    fn read_entry(&mut self, index: u32) -> Result<Vec<u8>> {
        self.read_entry_payload(index, self.strip_name_prefix)
    }
}
