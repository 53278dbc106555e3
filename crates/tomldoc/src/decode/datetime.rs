//! Date and time literal parsing.
//!
//! The grammar is RFC 3339 with TOML's relaxations: a space may replace the
//! `T` separator, and `t`/`z` are accepted lowercase. Range checking is
//! delegated to chrono's checked constructors.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::ast::Val;
use crate::decode::cursor::Cursor;
use crate::error::Error;

/// Parse a value starting with a full date: local date, local date-time, or
/// offset date-time.
pub(crate) fn parse_date_or_datetime(cur: &mut Cursor<'_>) -> Result<Val, Error> {
    let pos = cur.pos();
    let year = fixed_digits(cur, 4)? as i32;
    expect(cur, '-')?;
    let month = fixed_digits(cur, 2)?;
    expect(cur, '-')?;
    let day = fixed_digits(cur, 2)?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| cur.error_at(pos, "invalid date"))?;

    let has_time = match cur.peek() {
        Some('T') | Some('t') => {
            cur.bump();
            true
        }
        Some(' ') => {
            // A space separator counts only when a time actually follows.
            let rest = cur.rest().as_bytes();
            if rest.len() >= 4
                && rest[1].is_ascii_digit()
                && rest[2].is_ascii_digit()
                && rest[3] == b':'
            {
                cur.bump();
                true
            } else {
                false
            }
        }
        _ => false,
    };
    if !has_time {
        return Ok(Val::LocalDate(date));
    }

    let time = parse_time(cur)?;
    let ndt = NaiveDateTime::new(date, time);

    let offset_secs = match cur.peek() {
        Some('Z') | Some('z') => {
            cur.bump();
            Some(0)
        }
        Some(sign @ ('+' | '-')) => {
            cur.bump();
            let hours = fixed_digits(cur, 2)? as i32;
            expect(cur, ':')?;
            let minutes = fixed_digits(cur, 2)? as i32;
            if hours > 23 || minutes > 59 {
                return Err(cur.error_at(pos, "invalid time offset"));
            }
            let secs = hours * 3600 + minutes * 60;
            Some(if sign == '-' { -secs } else { secs })
        }
        _ => None,
    };

    match offset_secs {
        None => Ok(Val::LocalDateTime(ndt)),
        Some(secs) => {
            let offset = FixedOffset::east_opt(secs)
                .ok_or_else(|| cur.error_at(pos, "invalid time offset"))?;
            let dt = ndt
                .and_local_timezone(offset)
                .single()
                .ok_or_else(|| cur.error_at(pos, "invalid date-time"))?;
            Ok(Val::ZonedTime(dt))
        }
    }
}

/// Parse a `HH:MM:SS[.frac]` time of day.
pub(crate) fn parse_time(cur: &mut Cursor<'_>) -> Result<NaiveTime, Error> {
    let pos = cur.pos();
    let hour = fixed_digits(cur, 2)?;
    expect(cur, ':')?;
    let minute = fixed_digits(cur, 2)?;
    expect(cur, ':')?;
    let second = fixed_digits(cur, 2)?;

    let mut nanos = 0u32;
    if cur.eat('.') {
        let mut scale = 100_000_000u32;
        let mut any = false;
        while let Some(d) = cur.peek().and_then(|c| c.to_digit(10)) {
            cur.bump();
            any = true;
            // Digits beyond nanosecond precision are consumed and dropped.
            nanos += d * scale;
            scale /= 10;
            if scale == 0 {
                break;
            }
        }
        if scale == 0 {
            while cur.peek().is_some_and(|c| c.is_ascii_digit()) {
                cur.bump();
            }
        }
        if !any {
            return Err(cur.error("expected digit"));
        }
    }

    // Leap seconds use chrono's overflow-nanosecond representation.
    let (second, nanos) = if second == 60 {
        (59, nanos + 1_000_000_000)
    } else {
        (second, nanos)
    };
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .ok_or_else(|| cur.error_at(pos, "invalid time"))
}

fn fixed_digits(cur: &mut Cursor<'_>, count: usize) -> Result<u32, Error> {
    let mut out = 0u32;
    for _ in 0..count {
        let d = cur
            .peek()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| cur.error("expected digit"))?;
        cur.bump();
        out = out * 10 + d;
    }
    Ok(out)
}

fn expect(cur: &mut Cursor<'_>, c: char) -> Result<(), Error> {
    if cur.eat(c) {
        Ok(())
    } else {
        Err(cur.error(format!("expected '{c}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn time_of(input: &str) -> NaiveTime {
        parse_time(&mut Cursor::new(input)).unwrap()
    }

    #[test]
    fn plain_time_parses() {
        let t = time_of("07:32:00");
        assert_eq!((t.hour(), t.minute(), t.second()), (7, 32, 0));
    }

    #[test]
    fn fractional_seconds_truncate_past_nanoseconds() {
        let t = time_of("00:00:00.9999999999");
        assert_eq!(t.nanosecond(), 999_999_999);
    }

    #[test]
    fn out_of_range_time_is_rejected() {
        assert!(parse_time(&mut Cursor::new("25:00:00")).is_err());
    }

    #[test]
    fn offset_datetime_parses_with_lowercase_separators() {
        let v = parse_date_or_datetime(&mut Cursor::new("1979-05-27t07:32:00z")).unwrap();
        let Val::ZonedTime(dt) = v else {
            panic!("expected zoned time");
        };
        assert_eq!(dt.to_rfc3339(), "1979-05-27T07:32:00+00:00");
    }

    #[test]
    fn date_followed_by_non_time_stays_a_date() {
        let mut cur = Cursor::new("1979-05-27 # comment");
        let v = parse_date_or_datetime(&mut cur).unwrap();
        assert!(matches!(v, Val::LocalDate(_)));
        assert_eq!(cur.peek(), Some(' '));
    }

    #[test]
    fn impossible_date_is_rejected() {
        assert!(parse_date_or_datetime(&mut Cursor::new("2021-02-30")).is_err());
    }
}
