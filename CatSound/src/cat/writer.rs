//! CAT archive writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{MAX_NAME_LENGTH, TABLE_ENTRY_SIZE};
use crate::error::{Error, Result};

/// CAT archive writer
///
/// Entries are written in insertion order, directly after the index table.
#[derive(Debug, Default)]
pub struct CatWriter {
    entries: Vec<Vec<u8>>,
}

impl CatWriter {
    /// Create an empty writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry without a name prefix
    pub fn add_entry(&mut self, data: impl Into<Vec<u8>>) {
        self.entries.push(data.into());
    }

    /// Append an entry preceded by a file name prefix.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEntryName`] if the name is longer than
    /// [`MAX_NAME_LENGTH`] bytes or contains a NUL byte.
    pub fn add_named_entry(&mut self, name: &str, data: &[u8]) -> Result<()> {
        if name.len() > MAX_NAME_LENGTH {
            return Err(Error::InvalidEntryName {
                name: name.to_string(),
                reason: "longer than 56 bytes",
            });
        }
        if name.bytes().any(|b| b == 0) {
            return Err(Error::InvalidEntryName {
                name: name.to_string(),
                reason: "contains a NUL byte",
            });
        }

        let mut entry = Vec::with_capacity(1 + name.len() + data.len());
        entry.push(name.len() as u8);
        entry.extend_from_slice(name.as_bytes());
        entry.extend_from_slice(data);
        self.entries.push(entry);
        Ok(())
    }

    /// Write the archive to any byte sink.
    ///
    /// # Errors
    /// Returns [`Error::ArchiveTooLarge`] if an offset would not fit the
    /// 32-bit index table, or an IO error.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let table_len = self.entries.len() as u64 * TABLE_ENTRY_SIZE;

        let mut offset = table_len;
        for entry in &self.entries {
            let length = entry.len() as u64;
            let end = offset + length;
            if end > u64::from(u32::MAX) {
                return Err(Error::ArchiveTooLarge { size: end });
            }
            writer.write_u32::<LittleEndian>(offset as u32)?;
            writer.write_u32::<LittleEndian>(length as u32)?;
            offset = end;
        }

        for entry in &self.entries {
            writer.write_all(entry)?;
        }

        Ok(())
    }

    /// Write the archive to a file, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn write_file(&self, output_path: impl AsRef<Path>) -> Result<()> {
        let output_path = output_path.as_ref();

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut output = BufWriter::new(File::create(output_path)?);
        self.write_to(&mut output)?;
        output.flush()?;

        tracing::debug!(
            "Wrote CAT archive {} ({} entries)",
            output_path.display(),
            self.entries.len()
        );
        Ok(())
    }
}
