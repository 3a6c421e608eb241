pub mod pipeline;
pub mod config;
pub mod sources;
pub mod sinks;
pub mod transform;
pub mod observability;

#[cfg(test)]
mod fixtures;

pub use pipeline::{ExportError, MeterDataSource};
pub use sinks::{output_as_csv, output_as_tables, to_data_frame};
pub use sources::nmis_in_file;
pub use transform::{flatten_rows, Cell, FlatRow, FlatRows, FlattenError};
