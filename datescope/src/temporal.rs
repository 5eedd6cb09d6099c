//!
//! Date and time bounds, and their normalization into the ambient time zone.
//!
//! A pure calendar date widens to the whole day: as a lower bound it means
//! the start of the day, as an upper bound the end of it. Anything carrying a
//! time of day is used as-is.
//!

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};
use chrono_tz::Tz;

use crate::{ScopeError, ScopeResult};

/// One bound of a date range filter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateOrTime {
    /// A calendar date without time of day.
    Date(NaiveDate),
    /// A point in time.
    Time(DateTime<FixedOffset>),
    /// A wall-clock time, interpreted in the ambient time zone.
    Local(NaiveDateTime),
}

impl DateOrTime {
    /// Parse a bound from text.
    ///
    /// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS[.f]` wall-clock
    /// times (with either a space or `T` separator) and `YYYY-MM-DD` dates.
    /// Blank input is an absent bound.
    ///
    /// A bare `YYYY-MM-DD` is a calendar date, so it widens to the whole day
    /// like a [NaiveDate] does: `before("2024-06-14")` includes all of the
    /// 14th rather than stopping at its midnight.
    pub fn parse(input: &str) -> ScopeResult<Option<Self>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if let Ok(time) = DateTime::parse_from_rfc3339(input) {
            return Ok(Some(Self::Time(time)));
        }

        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(local) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(Some(Self::Local(local)));
            }
        }

        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map(|date| Some(Self::Date(date)))
            .map_err(|_| {
                ScopeError::InvalidTemporalValue(format!("`{}` is not a date or time", input))
            })
    }

    /// The earliest instant this bound admits: start of day for dates.
    pub fn lower_bound(&self, tz: Tz) -> ScopeResult<DateTime<Tz>> {
        match self {
            Self::Date(date) => Ok(start_of_day(*date, tz)),
            Self::Time(time) => Ok(time.with_timezone(&tz)),
            Self::Local(local) => resolve_local(*local, tz, Edge::Earliest),
        }
    }

    /// The latest instant this bound admits: end of day for dates.
    pub fn upper_bound(&self, tz: Tz) -> ScopeResult<DateTime<Tz>> {
        match self {
            Self::Date(date) => Ok(end_of_day(*date, tz)),
            Self::Time(time) => Ok(time.with_timezone(&tz)),
            Self::Local(local) => resolve_local(*local, tz, Edge::Latest),
        }
    }

    /// The calendar day containing this bound, as seen from `tz`.
    pub fn calendar_day(&self, tz: Tz) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::Time(time) => time.with_timezone(&tz).date_naive(),
            Self::Local(local) => local.date(),
        }
    }
}

impl std::fmt::Display for DateOrTime {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(fmt, "{}", date),
            Self::Time(time) => write!(fmt, "{}", time.to_rfc3339()),
            Self::Local(local) => write!(fmt, "{}", local),
        }
    }
}

impl From<NaiveDate> for DateOrTime {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for DateOrTime {
    fn from(local: NaiveDateTime) -> Self {
        Self::Local(local)
    }
}

impl<Z: TimeZone> From<DateTime<Z>> for DateOrTime {
    fn from(time: DateTime<Z>) -> Self {
        Self::Time(time.fixed_offset())
    }
}

///
/// Conversion of filter arguments into an optional bound.
///
/// `None` (or blank text) is an absent bound, which turns the filter into a
/// pass-through.
///
pub trait IntoBound {
    fn into_bound(self) -> ScopeResult<Option<DateOrTime>>;
}

impl IntoBound for DateOrTime {
    fn into_bound(self) -> ScopeResult<Option<DateOrTime>> {
        Ok(Some(self))
    }
}

impl IntoBound for NaiveDate {
    fn into_bound(self) -> ScopeResult<Option<DateOrTime>> {
        Ok(Some(self.into()))
    }
}

impl IntoBound for NaiveDateTime {
    fn into_bound(self) -> ScopeResult<Option<DateOrTime>> {
        Ok(Some(self.into()))
    }
}

impl<Z: TimeZone> IntoBound for DateTime<Z> {
    fn into_bound(self) -> ScopeResult<Option<DateOrTime>> {
        Ok(Some(self.into()))
    }
}

impl IntoBound for &str {
    fn into_bound(self) -> ScopeResult<Option<DateOrTime>> {
        DateOrTime::parse(self)
    }
}

impl IntoBound for String {
    fn into_bound(self) -> ScopeResult<Option<DateOrTime>> {
        DateOrTime::parse(&self)
    }
}

impl<T: IntoBound> IntoBound for Option<T> {
    fn into_bound(self) -> ScopeResult<Option<DateOrTime>> {
        match self {
            Some(value) => value.into_bound(),
            None => Ok(None),
        }
    }
}

/// First instant of `date` in `tz`.
///
/// When midnight falls into a DST gap, the day starts at the end of the gap.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    resolve_edge(date.and_time(NaiveTime::MIN), tz, Edge::Earliest)
}

/// Last instant (`23:59:59.999999999`) of `date` in `tz`.
pub fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let last_nano = NaiveTime::MIN - Duration::nanoseconds(1);
    resolve_edge(date.and_time(last_nano), tz, Edge::Latest)
}

/// The inclusive window `[start_of_day, end_of_day]` of `date` in `tz`.
pub fn day_span(date: NaiveDate, tz: Tz) -> (DateTime<Tz>, DateTime<Tz>) {
    (start_of_day(date, tz), end_of_day(date, tz))
}

#[derive(Clone, Copy)]
enum Edge {
    Earliest,
    Latest,
}

fn pick(result: LocalResult<DateTime<Tz>>, edge: Edge) -> Option<DateTime<Tz>> {
    match edge {
        Edge::Earliest => result.earliest(),
        Edge::Latest => result.latest(),
    }
}

fn resolve_local(local: NaiveDateTime, tz: Tz, edge: Edge) -> ScopeResult<DateTime<Tz>> {
    pick(tz.from_local_datetime(&local), edge).ok_or_else(|| {
        ScopeError::InvalidTemporalValue(format!("{} does not exist in {}", local, tz.name()))
    })
}

/// Resolve a day boundary, walking out of a DST gap in quarter hours
/// (forward for day starts, backward for day ends).
fn resolve_edge(local: NaiveDateTime, tz: Tz, edge: Edge) -> DateTime<Tz> {
    let step = match edge {
        Edge::Earliest => Duration::minutes(15),
        Edge::Latest => Duration::minutes(-15),
    };

    (0..=96)
        .find_map(|quarters| pick(tz.from_local_datetime(&(local + step * quarters)), edge))
        .unwrap_or_else(|| tz.from_utc_datetime(&local))
}
