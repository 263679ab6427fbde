//! Types for CAT archive handling

/// One row of the CAT index table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatEntry {
    /// Offset of the entry data from the start of the file
    pub offset: u64,
    /// Length of the entry data in bytes (name prefix included)
    pub length: u32,
}

impl CatEntry {
    /// Offset one past the last byte of the entry
    #[must_use]
    pub fn end(&self) -> u64 {
        self.offset + u64::from(self.length)
    }
}
