use super::BrokenDownTime;
use chrono::{DateTime, Datelike, Local, NaiveDate, Offset, TimeZone, Utc};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConvertError {
    #[error("timestamp {secs} is out of range for platform time")]
    OutOfRange { secs: f64 },
}

/// A strategy turning epoch seconds into broken-down time.
///
/// Formatters hold one of these in a swappable slot. Closures and fn
/// pointers with the matching signature can be installed directly.
pub trait TimeConverter: Send + Sync {
    fn convert(&self, secs: f64) -> Result<BrokenDownTime, ConvertError>;
}

impl<F> TimeConverter for F
where
    F: Fn(f64) -> Result<BrokenDownTime, ConvertError> + Send + Sync,
{
    fn convert(&self, secs: f64) -> Result<BrokenDownTime, ConvertError> {
        self(secs)
    }
}

/// Renders every instant at offset zero, independent of the host timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcConverter;

impl UtcConverter {
    /// Same as [`TimeConverter::convert`]. The second argument exists for
    /// callers wired to a two-argument strategy slot and is ignored.
    pub fn convert_compat(
        &self,
        secs: f64,
        _secs_compat: Option<f64>,
    ) -> Result<BrokenDownTime, ConvertError> {
        self.convert(secs)
    }
}

impl TimeConverter for UtcConverter {
    fn convert(&self, secs: f64) -> Result<BrokenDownTime, ConvertError> {
        let dt = utc_datetime(secs)?;
        Ok(BrokenDownTime::from_datetime(&dt, false))
    }
}

/// Renders instants in the host's configured local timezone.
///
/// This is the ambient-dependent baseline that [`UtcConverter`] replaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalConverter;

impl TimeConverter for LocalConverter {
    fn convert(&self, secs: f64) -> Result<BrokenDownTime, ConvertError> {
        let local = utc_datetime(secs)?.with_timezone(&Local);
        let offset = local.offset().fix().local_minus_utc();
        let is_dst = standard_offset(local.year()).is_some_and(|standard| offset > standard);

        Ok(BrokenDownTime::from_datetime(&local, is_dst))
    }
}

/// The smaller of the January and July local offsets for `year`.
fn standard_offset(year: i32) -> Option<i32> {
    let offset_on = |month: u32| -> Option<i32> {
        let naive = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
        Some(Local.offset_from_utc_datetime(&naive).fix().local_minus_utc())
    };

    Some(offset_on(1)?.min(offset_on(7)?))
}

/// Convert fractional epoch seconds to a UTC datetime.
///
/// The fraction is floored, so -0.5 lands on 1969-12-31T23:59:59.5Z.
/// Non-finite input and instants chrono cannot represent are out of range.
pub fn utc_datetime(secs: f64) -> Result<DateTime<Utc>, ConvertError> {
    let (whole, nanos) = split_epoch(secs)?;

    DateTime::from_timestamp(whole, nanos).ok_or(ConvertError::OutOfRange { secs })
}

/// Floored whole seconds and the nanoseconds past them.
///
/// Nanoseconds never reach 1e9, even when float rounding makes the
/// fraction of a value just below a whole second come out as exactly 1.0.
pub fn split_epoch(secs: f64) -> Result<(i64, u32), ConvertError> {
    let whole = secs.floor();
    if !secs.is_finite() || whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return Err(ConvertError::OutOfRange { secs });
    }

    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);

    Ok((whole as i64, nanos))
}

/// Millisecond part of `secs` on the same floored split as [`utc_datetime`].
/// Values that cannot be split yield 0.
pub fn subsec_millis(secs: f64) -> u32 {
    split_epoch(secs).map_or(0, |(_, nanos)| nanos / 1_000_000)
}

/// Current wall-clock time as fractional epoch seconds.
///
/// A clock set before 1970 yields a negative value instead of failing.
pub fn epoch_now() -> f64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_zero_is_thursday() {
        let tm = UtcConverter.convert(0.0).unwrap();

        assert_eq!((tm.year, tm.month, tm.day), (1970, 1, 1));
        assert_eq!((tm.hour, tm.minute, tm.second), (0, 0, 0));
        assert_eq!(tm.weekday, 3);
        assert_eq!(tm.yearday, 1);
        assert!(!tm.is_dst);
    }

    #[test]
    fn test_fraction_is_floored() {
        let tm = UtcConverter.convert(-0.5).unwrap();

        assert_eq!((tm.year, tm.month, tm.day), (1969, 12, 31));
        assert_eq!((tm.hour, tm.minute, tm.second), (23, 59, 59));
        assert_eq!(tm.weekday, 2);
        assert_eq!(tm.yearday, 365);
    }

    #[test]
    fn test_fraction_does_not_round_up() {
        let tm = UtcConverter.convert(59.9999999999).unwrap();

        assert_eq!((tm.minute, tm.second), (0, 59));
    }

    #[test]
    fn test_utc_datetime_keeps_subseconds() {
        let dt = utc_datetime(1.25).unwrap();

        assert_eq!(dt.timestamp(), 1);
        assert_eq!(dt.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_tiny_negative_stays_below_one_second() {
        let (whole, nanos) = split_epoch(-1e-17).unwrap();

        assert_eq!(whole, -1);
        assert_eq!(nanos, 999_999_999);
        assert_eq!(subsec_millis(-1e-17), 999);
        assert_eq!(utc_datetime(-1e-17).unwrap().timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_subsec_millis_of_unsplittable_value() {
        assert_eq!(subsec_millis(f64::NAN), 0);
        assert_eq!(subsec_millis(1e300), 0);
    }

    #[test]
    fn test_non_finite_is_out_of_range() {
        for secs in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                UtcConverter.convert(secs),
                Err(ConvertError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_beyond_chrono_range_is_out_of_range() {
        let result = UtcConverter.convert(1e17);

        assert_eq!(result, Err(ConvertError::OutOfRange { secs: 1e17 }));
    }

    #[test]
    fn test_beyond_i64_is_out_of_range() {
        assert!(UtcConverter.convert(1e300).is_err());
        assert!(UtcConverter.convert(-1e300).is_err());
    }

    #[test]
    fn test_compat_argument_is_ignored() {
        let plain = UtcConverter.convert(1_700_000_000.0).unwrap();
        let compat = UtcConverter
            .convert_compat(1_700_000_000.0, Some(42.0))
            .unwrap();

        assert_eq!(plain, compat);
    }

    #[test]
    fn test_closure_is_a_converter() {
        let fixed = |_secs: f64| UtcConverter.convert(86_400.0);
        let converter: &dyn TimeConverter = &fixed;

        assert_eq!(converter.convert(0.0).unwrap().day, 2);
    }

    #[test]
    fn test_local_converter_matches_instant() {
        let secs = 1_709_294_400.0;
        let local = LocalConverter.convert(secs).unwrap();
        let expected = utc_datetime(secs).unwrap().with_timezone(&Local);

        assert_eq!(local.hour, chrono::Timelike::hour(&expected));
        assert_eq!(local.day, expected.day());
    }
}
