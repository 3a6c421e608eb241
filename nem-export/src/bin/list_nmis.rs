use anyhow::{bail, Result};
use nem_export::{nmis_in_file, observability, sources::JsonSnapshotSource};
use std::{env, path::Path};

/// Print each NMI in a meter-data snapshot with its channels.
///
/// Usage:
///   list_nmis <snapshot_json>
fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: list_nmis <snapshot_json>");
    }

    for (nmi, channels) in nmis_in_file(&JsonSnapshotSource::new(), Path::new(&args[1]))? {
        println!("{nmi}\t{}", channels.join(","));
    }

    Ok(())
}
