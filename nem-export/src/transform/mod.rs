use std::fmt;

use nem_client::domain::{NmiReadings, NmiTransactions, Reading};
use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

pub const PERIOD_START: &str = "period_start";
pub const PERIOD_END: &str = "period_end";
pub const QUALITY_METHOD: &str = "quality_method";
pub const EVENT: &str = "event";

const CELL_TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FlattenError {
    #[error("metering point has no channels")]
    NoChannels,
    #[error("reference channel '{0}' has no readings")]
    EmptyReferenceChannel(String),
    #[error("channel '{0}' has no reading series")]
    MissingChannel(String),
}

/// One field of a flattened row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Timestamp(PrimitiveDateTime),
    Value(f64),
    Text(String),
    Null,
}

impl fmt::Display for Cell {
    /// Text written to CSV. `Null` renders as an empty field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Timestamp(ts) => {
                let text = ts.format(CELL_TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
            Cell::Value(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Null => Ok(()),
        }
    }
}

/// One interval across every channel of a metering point.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub period_start: PrimitiveDateTime,
    pub period_end: PrimitiveDateTime,
    /// One entry per channel, in header order. `None` where the channel has
    /// no reading at this index.
    pub values: Vec<Option<f64>>,
    pub quality_method: String,
    pub event: String,
}

impl FlatRow {
    /// Positional view matching the header layout.
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.values.len() + 4);
        cells.push(Cell::Timestamp(self.period_start));
        cells.push(Cell::Timestamp(self.period_end));
        cells.extend(self.values.iter().map(|v| v.map_or(Cell::Null, Cell::Value)));
        cells.push(Cell::Text(self.quality_method.clone()));
        cells.push(Cell::Text(self.event.clone()));
        cells
    }

    pub fn to_record(&self) -> Vec<String> {
        self.cells().iter().map(Cell::to_string).collect()
    }
}

/// Headers and rows for one NMI. Only `flatten_rows` builds these, so there
/// is always at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRows {
    pub headers: Vec<String>,
    pub rows: Vec<FlatRow>,
    last_period_end: PrimitiveDateTime,
}

impl FlatRows {
    pub fn last_period_end(&self) -> PrimitiveDateTime {
        self.last_period_end
    }

    /// Channel ids, in column order.
    pub fn channels(&self) -> &[String] {
        &self.headers[2..self.headers.len() - 2]
    }
}

/// Joins event code and description with one space. Absent or empty parts
/// are dropped along with their separator; present text is kept verbatim.
pub fn format_event(code: Option<&str>, desc: Option<&str>) -> String {
    let parts: Vec<&str> = [code, desc]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    parts.join(" ")
}

/// Transposes one NMI's channel series into one row per interval.
///
/// The first channel in `nmi_transactions` is the reference: it fixes the row
/// count, the period boundaries, the quality method and the event. Other
/// channels are read at the same index and yield `None` once they run out.
pub fn flatten_rows(
    nmi_transactions: &NmiTransactions,
    nmi_readings: &NmiReadings,
) -> Result<FlatRows, FlattenError> {
    let channels: Vec<&str> = nmi_transactions.keys().map(String::as_str).collect();
    let reference_channel = *channels.first().ok_or(FlattenError::NoChannels)?;

    let reference: &[Reading] = nmi_readings
        .get(reference_channel)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let last_period_end = reference
        .last()
        .map(|r| r.t_end)
        .ok_or_else(|| FlattenError::EmptyReferenceChannel(reference_channel.to_string()))?;

    let mut series: Vec<&[Reading]> = Vec::with_capacity(channels.len());
    series.push(reference);
    for ch in &channels[1..] {
        let readings = nmi_readings
            .get(*ch)
            .ok_or_else(|| FlattenError::MissingChannel(ch.to_string()))?;
        series.push(readings.as_slice());
    }

    let mut headers = Vec::with_capacity(channels.len() + 4);
    headers.push(PERIOD_START.to_string());
    headers.push(PERIOD_END.to_string());
    headers.extend(channels.iter().map(|ch| ch.to_string()));
    headers.push(QUALITY_METHOD.to_string());
    headers.push(EVENT.to_string());

    let rows = reference
        .iter()
        .enumerate()
        .map(|(i, r)| FlatRow {
            period_start: r.t_start,
            period_end: r.t_end,
            values: series
                .iter()
                .map(|s| s.get(i).and_then(|reading| reading.read_value))
                .collect(),
            quality_method: r.quality_method.clone(),
            event: format_event(r.event_code.as_deref(), r.event_desc.as_deref()),
        })
        .collect::<Vec<_>>();

    metrics::counter!("nem_export_rows_flattened_total").increment(rows.len() as u64);

    Ok(FlatRows {
        headers,
        rows,
        last_period_end,
    })
}
