use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

/// Wire format for interval boundaries: local meter time, no offset.
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// One interval's measurement for one channel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    #[cfg_attr(feature = "serde", serde(with = "timestamp"))]
    pub t_start: PrimitiveDateTime,
    #[cfg_attr(feature = "serde", serde(with = "timestamp"))]
    pub t_end: PrimitiveDateTime,
    #[cfg_attr(feature = "serde", serde(default))]
    pub read_value: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uom: Option<String>,
    pub quality_method: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub event_code: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub event_desc: Option<String>,
}

#[cfg(feature = "serde")]
mod timestamp {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let text = ts.format(TIMESTAMP_FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PrimitiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&text, TIMESTAMP_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{text}': {e}")))
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn reading_deserializes_with_optional_fields_absent() {
        let json = r#"{
            "t_start": "2020-01-01T00:00:00",
            "t_end": "2020-01-01T00:30:00",
            "read_value": 1.5,
            "quality_method": "A"
        }"#;

        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.t_start, datetime!(2020-01-01 00:00:00));
        assert_eq!(reading.t_end, datetime!(2020-01-01 00:30:00));
        assert_eq!(reading.read_value, Some(1.5));
        assert!(reading.event_code.is_none());
        assert!(reading.event_desc.is_none());
    }

    #[test]
    fn reading_rejects_timestamp_with_offset() {
        let json = r#"{
            "t_start": "2020-01-01T00:00:00+10:00",
            "t_end": "2020-01-01T00:30:00",
            "quality_method": "A"
        }"#;

        assert!(serde_json::from_str::<Reading>(json).is_err());
    }
}
