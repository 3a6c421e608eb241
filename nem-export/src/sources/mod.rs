pub mod json_snapshot;

use std::path::Path;

pub use json_snapshot::JsonSnapshotSource;

use crate::pipeline::{ExportError, MeterDataSource};

/// Lists each NMI in `file` with its channel ids, in parser order.
///
/// The file is parsed once, up front; a parse failure is returned before any
/// NMI is yielded. The iterator then walks the parsed data and cannot be
/// restarted.
pub fn nmis_in_file<S>(
    source: &S,
    file: &Path,
) -> Result<impl Iterator<Item = (String, Vec<String>)>, ExportError>
where
    S: MeterDataSource + ?Sized,
{
    let data = source.load(file)?;
    tracing::debug!(file = %file.display(), nmis = data.transactions.len(), "parsed meter data");

    Ok(data
        .transactions
        .into_iter()
        .map(|(nmi, channels)| (nmi, channels.into_keys().collect())))
}
