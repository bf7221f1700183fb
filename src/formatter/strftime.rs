use super::FormatError;
use crate::convert::BrokenDownTime;
use chrono::format::{Fixed, Item, StrftimeItems};
use std::fmt::Write;

/// Reject patterns chrono cannot parse, and zone or offset directives.
///
/// Broken-down time carries no offset, so `%z`, `%Z` and the composite
/// RFC forms that embed an offset have nothing to render.
pub fn validate(datefmt: &str) -> Result<(), FormatError> {
    for item in StrftimeItems::new(datefmt) {
        let reason = match item {
            Item::Error => "unknown or incomplete directive",
            Item::Fixed(
                Fixed::TimezoneName
                | Fixed::TimezoneOffset
                | Fixed::TimezoneOffsetZ
                | Fixed::TimezoneOffsetColon
                | Fixed::TimezoneOffsetColonZ
                | Fixed::TimezoneOffsetDoubleColon
                | Fixed::TimezoneOffsetTripleColon
                | Fixed::RFC2822
                | Fixed::RFC3339,
            ) => "timezone directives are not supported",
            _ => continue,
        };

        return Err(FormatError::InvalidDateFormat {
            datefmt: datefmt.to_string(),
            reason,
        });
    }

    Ok(())
}

/// Render broken-down time through a strftime pattern.
pub fn render(tm: &BrokenDownTime, datefmt: &str) -> Result<String, FormatError> {
    validate(datefmt)?;

    let naive = tm.to_naive().ok_or(FormatError::InvalidTime(*tm))?;

    let mut out = String::new();
    write!(out, "{}", naive.format_with_items(StrftimeItems::new(datefmt))).map_err(|_| {
        FormatError::InvalidDateFormat {
            datefmt: datefmt.to_string(),
            reason: "pattern could not be rendered",
        }
    })?;

    Ok(out)
}
