use std::path::Path;

use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series, TimeUnit};
use time::PrimitiveDateTime;

use crate::{
    pipeline::{ExportError, MeterDataSource},
    transform::{flatten_rows, FlatRows, EVENT, PERIOD_END, PERIOD_START, QUALITY_METHOD},
};

/// Naive wall-clock milliseconds; meter time carries no offset.
fn epoch_millis(ts: PrimitiveDateTime) -> i64 {
    (ts.assume_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

fn datetime_column(name: &str, millis: Vec<i64>) -> Result<Column, ExportError> {
    let series = Series::new(name.into(), millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    Ok(series.into())
}

/// Builds the transposed frame for one NMI.
///
/// Period columns are naive `Datetime[ms]`, channel columns nullable `f64`,
/// quality method and event are strings. Column order matches `flat.headers`.
pub fn to_data_frame(flat: &FlatRows) -> Result<DataFrame, ExportError> {
    let mut columns: Vec<Column> = Vec::with_capacity(flat.headers.len());

    columns.push(datetime_column(
        PERIOD_START,
        flat.rows.iter().map(|r| epoch_millis(r.period_start)).collect(),
    )?);
    columns.push(datetime_column(
        PERIOD_END,
        flat.rows.iter().map(|r| epoch_millis(r.period_end)).collect(),
    )?);

    for (idx, channel) in flat.channels().iter().enumerate() {
        let values: Vec<Option<f64>> = flat.rows.iter().map(|r| r.values[idx]).collect();
        columns.push(Series::new(channel.as_str().into(), values).into());
    }

    let quality: Vec<&str> = flat.rows.iter().map(|r| r.quality_method.as_str()).collect();
    columns.push(Series::new(QUALITY_METHOD.into(), quality).into());
    let events: Vec<&str> = flat.rows.iter().map(|r| r.event.as_str()).collect();
    columns.push(Series::new(EVENT.into(), events).into());

    Ok(DataFrame::new(columns)?)
}

/// Builds one transposed frame per NMI in `file`, in parser order.
pub fn output_as_tables<S>(source: &S, file: &Path) -> Result<Vec<(String, DataFrame)>, ExportError>
where
    S: MeterDataSource + ?Sized,
{
    let data = source.load(file)?;

    let mut tables = Vec::with_capacity(data.readings.len());
    for (nmi, readings) in &data.readings {
        let transactions = data
            .transactions
            .get(nmi)
            .ok_or_else(|| ExportError::MissingTransactions(nmi.clone()))?;
        let flat = flatten_rows(transactions, readings).map_err(|source| {
            metrics::counter!("nem_export_flatten_errors_total").increment(1);
            ExportError::Flatten { nmi: nmi.clone(), source }
        })?;

        let df = to_data_frame(&flat)?;
        tracing::debug!(nmi = %nmi, rows = df.height(), "built transposed table");
        metrics::counter!("nem_export_tables_built_total").increment(1);
        tables.push((nmi.clone(), df));
    }

    Ok(tables)
}
