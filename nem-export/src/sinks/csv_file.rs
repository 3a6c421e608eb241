use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

use crate::{
    pipeline::{ExportError, MeterDataSource},
    transform::{flatten_rows, FlatRows},
};

const FILE_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year][month][day]");

/// `{nmi}_{YYYYMMDD}_transposed.csv`, dated by the last interval's end.
pub fn transposed_file_name(nmi: &str, last_period_end: PrimitiveDateTime) -> Result<String, ExportError> {
    let date = last_period_end.date().format(FILE_DATE_FORMAT)?;
    Ok(format!("{nmi}_{date}_transposed.csv"))
}

fn write_transposed(path: &Path, flat: &FlatRows) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(file);

    wtr.write_record(&flat.headers)?;
    for row in &flat.rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one transposed CSV per NMI in `file` into `output_dir`.
///
/// `output_dir` is created if needed. Files already written stay on disk if a
/// later NMI fails. Returns the written paths in parser order.
pub fn output_as_csv<S>(source: &S, file: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, ExportError>
where
    S: MeterDataSource + ?Sized,
{
    fs::create_dir_all(output_dir)?;
    let data = source.load(file)?;

    let mut output_paths = Vec::with_capacity(data.readings.len());
    for (nmi, readings) in &data.readings {
        let transactions = data
            .transactions
            .get(nmi)
            .ok_or_else(|| ExportError::MissingTransactions(nmi.clone()))?;
        let flat = flatten_rows(transactions, readings).map_err(|source| {
            metrics::counter!("nem_export_flatten_errors_total").increment(1);
            ExportError::Flatten { nmi: nmi.clone(), source }
        })?;

        let output_path = output_dir.join(transposed_file_name(nmi, flat.last_period_end())?);
        write_transposed(&output_path, &flat)?;

        tracing::debug!(nmi = %nmi, path = %output_path.display(), rows = flat.rows.len(), "created transposed csv");
        metrics::counter!("nem_export_csv_files_written_total").increment(1);
        output_paths.push(output_path);
    }

    Ok(output_paths)
}
