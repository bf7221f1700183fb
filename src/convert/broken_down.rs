use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Calendar and clock fields of a single instant under one timezone offset.
///
/// `weekday` counts from Monday (0) to Sunday (6). `yearday` is 1-based.
/// `second` allows 60 and 61 so leap seconds can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrokenDownTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub weekday: u32,
    pub yearday: u32,
    pub is_dst: bool,
}

impl BrokenDownTime {
    /// Break down an already-zoned datetime. The caller decides the DST flag
    /// because chrono offsets do not carry one.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>, is_dst: bool) -> Self {
        // chrono folds a leap second into second 59 with an oversized nanosecond field
        let leap = u32::from(dt.nanosecond() >= 1_000_000_000);

        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second() + leap,
            weekday: dt.weekday().num_days_from_monday(),
            yearday: dt.ordinal(),
            is_dst,
        }
    }

    /// Calendar view used for pattern rendering.
    ///
    /// Returns None when the fields do not name a real date or clock time.
    /// Seconds 60 and 61 are mapped onto chrono's leap-second encoding.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?;
        match self.second {
            0..=59 => date.and_hms_opt(self.hour, self.minute, self.second),
            60 | 61 => date.and_hms_nano_opt(self.hour, self.minute, 59, 1_000_000_000),
            _ => None,
        }
    }

    /// Rebuild whole epoch seconds assuming the fields are at offset zero.
    pub fn to_epoch_utc(&self) -> Option<i64> {
        self.to_naive()
            .map(|naive| Utc.from_utc_datetime(&naive).timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_datetime_fields() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap();
        let tm = BrokenDownTime::from_datetime(&dt, false);

        assert_eq!(tm.year, 2024);
        assert_eq!(tm.month, 12);
        assert_eq!(tm.day, 31);
        assert_eq!(tm.hour, 23);
        assert_eq!(tm.minute, 59);
        assert_eq!(tm.second, 58);
        // Tuesday
        assert_eq!(tm.weekday, 1);
        // 2024 is a leap year
        assert_eq!(tm.yearday, 366);
        assert!(!tm.is_dst);
    }

    #[test]
    fn test_to_epoch_utc_round_trip() {
        let dt = Utc.with_ymd_and_hms(1999, 7, 4, 8, 30, 15).unwrap();
        let tm = BrokenDownTime::from_datetime(&dt, false);

        assert_eq!(tm.to_epoch_utc(), Some(dt.timestamp()));
    }

    #[test]
    fn test_leap_second_maps_to_chrono_encoding() {
        let tm = BrokenDownTime {
            year: 2016,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 60,
            weekday: 5,
            yearday: 366,
            is_dst: false,
        };

        let naive = tm.to_naive().unwrap();
        assert_eq!(naive.second(), 59);
        assert_eq!(naive.nanosecond(), 1_000_000_000);
    }

    #[test]
    fn test_invalid_fields_have_no_calendar_view() {
        let tm = BrokenDownTime {
            year: 2023,
            month: 2,
            day: 30,
            hour: 0,
            minute: 0,
            second: 0,
            weekday: 0,
            yearday: 61,
            is_dst: false,
        };

        assert!(tm.to_naive().is_none());
        assert!(tm.to_epoch_utc().is_none());
    }
}
