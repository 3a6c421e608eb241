use std::path::Path;

use nem_client::domain::MeterData;

use crate::transform::FlattenError;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("source error: {0}")]
    Source(String),
    #[error("NMI {nmi}: {source}")]
    Flatten {
        nmi: String,
        #[source]
        source: FlattenError,
    },
    #[error("NMI {0} has readings but no transactions")]
    MissingTransactions(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    TimeFormat(#[from] time::error::Format),
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Parser collaborator: turns a meter-data file into its parsed form.
///
/// Every exporter calls `load` exactly once per export.
pub trait MeterDataSource {
    fn load(&self, file: &Path) -> Result<MeterData, ExportError>;
}

impl<F> MeterDataSource for F
where
    F: Fn(&Path) -> Result<MeterData, ExportError>,
{
    fn load(&self, file: &Path) -> Result<MeterData, ExportError> {
        self(file)
    }
}
