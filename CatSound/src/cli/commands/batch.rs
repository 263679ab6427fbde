//! CLI command for loading every CAT file under a directory

use std::path::Path;

use crate::batch::{batch_load, find_cat_files};
use crate::cli::progress::simple_bar;
use crate::sound::LoaderConfig;

pub fn execute(source: &Path, wav: bool, config: &LoaderConfig) -> anyhow::Result<()> {
    let cat_files = find_cat_files(source);

    if cat_files.is_empty() {
        println!("No CAT files found in: {}", source.display());
        return Ok(());
    }

    println!("Found {} CAT files", cat_files.len());

    let pb = simple_bar(cat_files.len() as u64, "Loading");
    let results = batch_load(&cat_files, *config, wav, |p| {
        pb.set_position(p.current as u64);
    });
    pb.finish_and_clear();

    for result in &results {
        let display = result
            .path
            .strip_prefix(source)
            .unwrap_or(result.path.as_path())
            .display();
        match &result.outcome {
            Ok((_, summary)) => println!(
                "  {display}: {} entries, {} decoded, {} failed",
                summary.total, summary.loaded, summary.failed
            ),
            Err(err) => println!("  {display}: ERROR {err}"),
        }
    }

    Ok(())
}
