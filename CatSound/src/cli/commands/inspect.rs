//! CLI command for inspecting how a CAT file decodes

use std::path::Path;

use crate::sound::{LoaderConfig, SoundSet, SoundSlot};

pub fn execute(source: &Path, wav: bool, config: &LoaderConfig) -> anyhow::Result<()> {
    let mut set = SoundSet::with_config(*config);
    let summary = set.load_archive(source, wav)?;

    println!("CAT File: {}", source.display());
    println!("---------------------------------");
    if !wav {
        let format = set.config().format;
        println!(
            "Raw PCM policy:   {} ch, {} Hz, {}-bit",
            format.channels, format.sample_rate, format.bits_per_sample
        );
    }
    println!();

    for (index, slot) in set.sounds().slots().iter().enumerate() {
        match slot {
            SoundSlot::Loaded(sound) => println!(
                "  {:>4}  ok      {:>8} bytes  {:>6} ms  {} Hz",
                index,
                sound.len(),
                sound.duration_ms(),
                sound.format().sample_rate
            ),
            SoundSlot::Failed(err) => println!("  {index:>4}  FAILED  {err}"),
        }
    }

    println!();
    if summary.is_complete() {
        println!("{} entries, all decoded", summary.total);
    } else {
        println!(
            "{} entries: {} decoded, {} failed",
            summary.total, summary.loaded, summary.failed
        );
    }

    Ok(())
}
