//! CLI command for packing a directory into a CAT file

use std::path::Path;

use crate::cat::CatWriter;

pub fn execute(source: &Path, destination: &Path, names: bool) -> anyhow::Result<()> {
    let mut files: Vec<_> = std::fs::read_dir(source)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut writer = CatWriter::new();
    for path in &files {
        let data = std::fs::read(path)?;
        if names {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            writer.add_named_entry(&name, &data)?;
        } else {
            writer.add_entry(data);
        }
    }

    writer.write_file(destination)?;
    println!(
        "Packed {} files into {}",
        writer.len(),
        destination.display()
    );

    Ok(())
}
