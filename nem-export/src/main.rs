use anyhow::{bail, Result};
use nem_export::{config::AppConfig, observability, output_as_csv, sources::JsonSnapshotSource};
use std::{env, path::PathBuf};

/// Write one transposed CSV per NMI found in a meter-data snapshot.
///
/// Usage:
///   nem-export <snapshot_json> [output_dir]
fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: nem-export <snapshot_json> [output_dir]");
    }
    let file_path = PathBuf::from(&args[1]);

    // Output dir from the command line wins over NEM_EXPORT_CONFIG.
    let output_dir = match args.get(2) {
        Some(dir) => PathBuf::from(dir),
        None => AppConfig::load()?.export.output_dir,
    };

    let paths = output_as_csv(&JsonSnapshotSource::new(), &file_path, &output_dir)?;
    for path in &paths {
        println!("{}", path.display());
    }
    tracing::info!(files = paths.len(), output_dir = %output_dir.display(), "transposed export complete");

    Ok(())
}
