use std::{fs::File, io::BufReader, path::Path};

use nem_client::domain::MeterData;

use crate::pipeline::{ExportError, MeterDataSource};

/// Reads meter data that was parsed elsewhere and saved as JSON.
///
/// The document mirrors [`MeterData`]: `transactions` and `readings` objects
/// keyed by NMI then channel, with reading timestamps as
/// `YYYY-MM-DDTHH:MM:SS` local meter time. Key order in the document is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotSource;

impl JsonSnapshotSource {
    pub fn new() -> Self {
        Self
    }
}

impl MeterDataSource for JsonSnapshotSource {
    fn load(&self, file: &Path) -> Result<MeterData, ExportError> {
        let f = File::open(file).map_err(|e| {
            ExportError::Source(format!("failed to open snapshot {}: {e}", file.display()))
        })?;
        let data: MeterData = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            metrics::counter!("nem_export_snapshot_parse_errors_total").increment(1);
            ExportError::Source(format!("failed to parse snapshot {}: {e}", file.display()))
        })?;

        tracing::debug!(
            file = %file.display(),
            nmis = data.readings.len(),
            readings = data.reading_count(),
            "loaded meter data snapshot"
        );
        Ok(data)
    }
}
