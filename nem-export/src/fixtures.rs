//! Parsed meter data shared by the unit tests.

use std::path::Path;

use nem_client::domain::{ChannelDetails, MeterData, NmiReadings, NmiTransactions, Reading};
use time::{Duration, PrimitiveDateTime};
use time::macros::datetime;

use crate::pipeline::ExportError;

pub const SCENARIO_NMI: &str = "6305031142";

/// Half-hourly readings for one channel, starting at `start`.
pub fn half_hourly(start: PrimitiveDateTime, values: &[f64]) -> Vec<Reading> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let t_start = start + Duration::minutes(30 * i as i64);
            Reading {
                t_start,
                t_end: t_start + Duration::minutes(30),
                read_value: Some(*v),
                uom: Some("kWh".to_string()),
                quality_method: "A".to_string(),
                event_code: None,
                event_desc: None,
            }
        })
        .collect()
}

pub fn channel(uom: &str) -> ChannelDetails {
    ChannelDetails {
        register_id: None,
        uom: Some(uom.to_string()),
        interval_length: Some(30),
        meter_serial_number: None,
    }
}

pub fn insert_nmi(data: &mut MeterData, nmi: &str, channels: Vec<(&str, Vec<Reading>)>) {
    let mut transactions = NmiTransactions::new();
    let mut readings = NmiReadings::new();
    for (ch, series) in channels {
        transactions.insert(ch.to_string(), channel("kWh"));
        readings.insert(ch.to_string(), series);
    }
    data.transactions.insert(nmi.to_string(), transactions);
    data.readings.insert(nmi.to_string(), readings);
}

/// E1 with three half-hourly readings, Q1 one interval short.
pub fn scenario() -> MeterData {
    let start = datetime!(2020-01-01 00:00:00);
    let mut data = MeterData::default();
    insert_nmi(
        &mut data,
        SCENARIO_NMI,
        vec![
            ("E1", half_hourly(start, &[1.1, 2.2, 3.3])),
            ("Q1", half_hourly(start, &[0.1, 0.2])),
        ],
    );
    data
}

/// Two NMIs, the second spilling over midnight into the next day.
pub fn two_nmis() -> MeterData {
    let mut data = scenario();
    insert_nmi(
        &mut data,
        "NCDE001111",
        vec![("B1", half_hourly(datetime!(2020-01-31 23:00:00), &[0.0, 4.5, 6.25]))],
    );
    data
}

pub fn source_of(data: MeterData) -> impl Fn(&Path) -> Result<MeterData, ExportError> {
    move |_: &Path| Ok(data.clone())
}
