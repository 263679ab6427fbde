//! CLI command for listing CAT contents

use std::path::Path;

use crate::cat::CatReader;

/// Format byte size for human-readable output
pub(crate) fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1}K", bytes as f64 / 1024.0)
    } else {
        format!("{bytes}")
    }
}

pub fn execute(source: &Path, names: bool) -> anyhow::Result<()> {
    let mut reader = CatReader::open(source)?;
    let entries = reader.entries().to_vec();

    if names {
        println!("{:>5}  {:>10}  {:>8}  NAME", "INDEX", "OFFSET", "SIZE");
    } else {
        println!("{:>5}  {:>10}  {:>8}", "INDEX", "OFFSET", "SIZE");
    }

    for (index, entry) in entries.iter().enumerate() {
        if names {
            let name = reader.entry_name(index as u32)?.unwrap_or_default();
            println!(
                "{:>5}  {:>10}  {:>8}  {}",
                index,
                entry.offset,
                format_size(u64::from(entry.length)),
                name
            );
        } else {
            println!(
                "{:>5}  {:>10}  {:>8}",
                index,
                entry.offset,
                format_size(u64::from(entry.length))
            );
        }
    }

    let total: u64 = entries.iter().map(|e| u64::from(e.length)).sum();
    println!();
    println!(
        "{} entries, {} of data in a {} file",
        entries.len(),
        format_size(total),
        format_size(reader.file_len())
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512");
        assert_eq!(format_size(2048), "2.0K");
        assert_eq!(format_size(3 * 1_048_576), "3.0M");
    }
}
