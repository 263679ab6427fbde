//! Batch CAT operations
//!
//! Discovery of CAT files and parallel loading of many archives. Each
//! archive gets its own [`SoundSet`] and is loaded start to finish on a
//! single worker thread.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::Result;
use crate::sound::{LoadPhase, LoadProgress, LoadSummary, LoaderConfig, SoundSet};

/// Outcome of loading one archive in a batch
#[derive(Debug)]
pub struct ArchiveLoadResult {
    /// The archive that was loaded
    pub path: PathBuf,
    /// The loaded set and its summary, or the fatal error
    pub outcome: Result<(SoundSet, LoadSummary)>,
}

/// Find all .cat files in a directory recursively
///
/// # Returns
/// A sorted list of paths to .cat files found in the directory tree.
pub fn find_cat_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut cat_files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("cat"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    cat_files.sort();
    cat_files
}

/// Load many CAT archives in parallel
///
/// Results come back in the order of `cat_files`. A fatal error for one
/// archive does not affect the others.
pub fn batch_load<F>(
    cat_files: &[PathBuf],
    config: LoaderConfig,
    already_container: bool,
    progress: F,
) -> Vec<ArchiveLoadResult>
where
    F: Fn(&LoadProgress) + Send + Sync,
{
    let processed = AtomicUsize::new(0);
    let total = cat_files.len();

    let results: Vec<ArchiveLoadResult> = cat_files
        .par_iter()
        .map(|path| {
            let mut set = SoundSet::with_config(config);
            let outcome = set
                .load_archive(path, already_container)
                .map(|summary| (set, summary));

            if let Err(err) = &outcome {
                tracing::warn!("Failed to load {}: {err}", path.display());
            }

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&LoadProgress::new(LoadPhase::DecodingEntries, current, total));

            ArchiveLoadResult {
                path: path.clone(),
                outcome,
            }
        })
        .collect();

    progress(&LoadProgress::new(LoadPhase::Complete, total, total));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cat::CatWriter;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_find_cat_files_recursive_and_sorted() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("SOUND")).unwrap();
        std::fs::write(dir.path().join("SOUND/SAMPLE.CAT"), b"").unwrap();
        std::fs::write(dir.path().join("a.cat"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let found = find_cat_files(dir.path());
        assert_eq!(
            found,
            vec![dir.path().join("SOUND/SAMPLE.CAT"), dir.path().join("a.cat")]
        );
    }

    #[test]
    fn test_batch_load_isolates_archives() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.cat");
        let mut writer = CatWriter::new();
        writer.add_entry(vec![0x80; 4]);
        writer.add_entry(vec![0x80; 2]);
        writer.write_file(&good).unwrap();

        let bad = dir.path().join("bad.cat");
        std::fs::write(&bad, [1u8, 2, 3]).unwrap();
        let missing = dir.path().join("missing.cat");

        let results = batch_load(
            &[good.clone(), bad, missing],
            LoaderConfig::default(),
            false,
            |_| {},
        );

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].path, good);
        let (set, summary) = results[0].outcome.as_ref().unwrap();
        assert_eq!(summary.loaded, 2);
        assert_eq!(set.total_sounds(), 2);
        assert!(matches!(results[1].outcome, Err(Error::ArchiveCorrupt { .. })));
        assert!(matches!(results[2].outcome, Err(Error::ArchiveOpen { .. })));
    }
}
