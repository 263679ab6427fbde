//! CLI command for extracting CAT entries as WAV files

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{DISK, LOOKING_GLASS, SPEAKER, print_done, print_step, simple_bar};
use crate::sound::{LoadPhase, LoadProgress, LoaderConfig, SoundSet};

pub fn execute(
    source: &Path,
    destination: &Path,
    wav: bool,
    config: &LoaderConfig,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut set = SoundSet::with_config(*config);

    let summary = if quiet {
        set.load_archive(source, wav)?
    } else {
        print_step(1, 2, LOOKING_GLASS, &format!("Reading {}", source.display()));
        let pb = simple_bar(0, &format!("{SPEAKER}{}", LoadPhase::ReadingIndex.as_str()));
        let callback = |p: &LoadProgress| {
            pb.set_message(format!("{SPEAKER}{}", p.phase.as_str()));
            if p.phase == LoadPhase::DecodingEntries {
                pb.set_length(p.total as u64);
                pb.set_position(p.current as u64);
            }
        };
        let summary = set.load_archive_with_progress(source, wav, Some(&callback))?;
        pb.finish_and_clear();
        summary
    };

    if !quiet {
        print_step(2, 2, DISK, &format!("Writing to {}", destination.display()));
    }
    std::fs::create_dir_all(destination)?;

    let mut written = 0usize;
    for (index, sound) in set.sounds().iter().enumerate() {
        let Some(sound) = sound else {
            continue;
        };
        let out_path = destination.join(format!("{index:03}.wav"));
        std::fs::write(&out_path, sound.to_wav_bytes())?;
        written += 1;
    }

    for (index, err) in set.sounds().failures() {
        eprintln!("  skipped {index:03}: {err}");
    }

    if !quiet {
        println!(
            "Extracted {written} of {} sounds ({} failed)",
            summary.total, summary.failed
        );
        print_done(started.elapsed());
    }

    Ok(())
}
