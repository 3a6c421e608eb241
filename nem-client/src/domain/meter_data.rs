use indexmap::IndexMap;

use crate::domain::Reading;

/// Channel metadata carried on the NEM 200 record for one NMI suffix.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelDetails {
    pub register_id: Option<String>,
    pub uom: Option<String>,
    /// Interval length in minutes.
    pub interval_length: Option<u32>,
    pub meter_serial_number: Option<String>,
}

/// Channel id to channel metadata for one NMI. Iteration order is column order.
pub type NmiTransactions = IndexMap<String, ChannelDetails>;

/// Channel id to its chronological reading series for one NMI.
pub type NmiReadings = IndexMap<String, Vec<Reading>>;

/// Everything a parser extracted from one meter-data file.
///
/// Both maps are keyed by NMI and keep the order in which the parser first
/// saw each NMI and channel.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeterData {
    pub transactions: IndexMap<String, NmiTransactions>,
    pub readings: IndexMap<String, NmiReadings>,
}

impl MeterData {
    /// Total number of readings across all NMIs and channels.
    pub fn reading_count(&self) -> usize {
        self.readings
            .values()
            .flat_map(|channels| channels.values())
            .map(Vec::len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn reading(value: f64) -> Reading {
        Reading {
            t_start: datetime!(2020-01-01 00:00:00),
            t_end: datetime!(2020-01-01 00:30:00),
            read_value: Some(value),
            uom: Some("kWh".to_string()),
            quality_method: "A".to_string(),
            event_code: None,
            event_desc: None,
        }
    }

    #[test]
    fn nmis_follow_insertion_order() {
        let mut data = MeterData::default();
        data.readings.insert("NMI_B".to_string(), NmiReadings::new());
        data.readings.insert("NMI_A".to_string(), NmiReadings::new());

        let nmis: Vec<&str> = data.readings.keys().map(String::as_str).collect();
        assert_eq!(nmis, vec!["NMI_B", "NMI_A"]);
    }

    #[test]
    fn reading_count_sums_every_channel() {
        let mut channels = NmiReadings::new();
        channels.insert("E1".to_string(), vec![reading(1.0), reading(2.0)]);
        channels.insert("B1".to_string(), vec![reading(0.5)]);

        let mut data = MeterData::default();
        data.readings.insert("6305031142".to_string(), channels);

        assert_eq!(data.reading_count(), 3);
    }
}
