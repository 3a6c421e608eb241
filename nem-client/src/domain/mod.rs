pub mod meter_data;
pub mod reading;

pub use meter_data::{ChannelDetails, MeterData, NmiReadings, NmiTransactions};
pub use reading::{Reading, TIMESTAMP_FORMAT};
