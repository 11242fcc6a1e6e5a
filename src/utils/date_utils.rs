use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Wire format for every calendar date the remote store sends or receives.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// ===============================
/// Parse a calendar date
/// ===============================
///
/// Accepts `2024-03-10`, RFC 3339 date-times (`2024-03-10T00:00:00.000Z`,
/// `2024-03-10T23:30:00-05:00`) and naive date-times. The date is taken as
/// written; the local timezone is never consulted.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(d) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    None
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// serde adapter: `#[serde(with = "calendar_date")]`
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_calendar_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid calendar date: {raw:?}")))
    }
}
