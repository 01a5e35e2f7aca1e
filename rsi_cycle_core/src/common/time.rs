use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::cycle_error::{CycleError, ErrCode};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Timestamp of a bar, second resolution, no timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time {
    pub timestamp: i64,
    datetime: NaiveDateTime,
}

impl Time {
    pub fn from_timestamp(timestamp: i64) -> Option<Self> {
        let datetime = DateTime::from_timestamp(timestamp, 0)?.naive_utc();
        Some(Self {
            timestamp,
            datetime,
        })
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            timestamp: datetime.and_utc().timestamp(),
            datetime,
        }
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn to_str(&self) -> String {
        self.datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Short form used in tables: minutes only
    pub fn to_minute_str(&self) -> String {
        self.datetime.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn to_date_str(&self) -> String {
        self.datetime.format("%Y%m%d").to_string()
    }
}

impl FromStr for Time {
    type Err = CycleError;

    /// Accepts "YYYY-MM-DD HH:MM[:SS]", "YYYY-MM-DD", "YYYYMMDD",
    /// RFC 3339 (offset dropped) or unix seconds
    fn from_str(time_str: &str) -> Result<Self, Self::Err> {
        let s = time_str.trim();
        let bad = || CycleError::new(format!("unparseable time '{}'", s), ErrCode::SrcDataFormatError);

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_datetime(dt.naive_local()));
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self::from_datetime(dt));
            }
        }
        let date = if s.contains('-') {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
        } else if s.len() == 8 {
            NaiveDate::parse_from_str(s, "%Y%m%d").ok()
        } else {
            None
        };
        if let Some(dt) = date.and_then(|d| d.and_hms_opt(0, 0, 0)) {
            return Ok(Self::from_datetime(dt));
        }
        s.parse::<i64>()
            .ok()
            .and_then(Self::from_timestamp)
            .ok_or_else(bad)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
