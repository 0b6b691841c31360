// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Temporal unit metadata for datetime and timedelta descriptors.
//!
//! A temporal descriptor stores its interval as `num / den` of a base unit.
//! Construction refines any divisor into an integer multiple of a finer unit
//! (`1/1000 s` becomes `1 ms`), so stored intervals never carry a fraction.

use std::fmt;
use std::str::FromStr;

use crate::config::{DATETIME_DEFAULT_EVENTS, DATETIME_DEFAULT_UNIT};
use crate::error::{DescrError, Result};

/// Base granularity of a temporal descriptor, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateTimeUnit {
    Year,
    Month,
    Week,
    /// Business day: a non-SI unit between week and day.
    BusinessDay,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
    Picosecond,
    Femtosecond,
    Attosecond,
}

impl DateTimeUnit {
    /// Every unit, coarsest first.
    pub const ALL: [DateTimeUnit; 14] = [
        DateTimeUnit::Year,
        DateTimeUnit::Month,
        DateTimeUnit::Week,
        DateTimeUnit::BusinessDay,
        DateTimeUnit::Day,
        DateTimeUnit::Hour,
        DateTimeUnit::Minute,
        DateTimeUnit::Second,
        DateTimeUnit::Millisecond,
        DateTimeUnit::Microsecond,
        DateTimeUnit::Nanosecond,
        DateTimeUnit::Picosecond,
        DateTimeUnit::Femtosecond,
        DateTimeUnit::Attosecond,
    ];

    /// Short unit name as used in type strings.
    pub fn as_str(self) -> &'static str {
        match self {
            DateTimeUnit::Year => "Y",
            DateTimeUnit::Month => "M",
            DateTimeUnit::Week => "W",
            DateTimeUnit::BusinessDay => "B",
            DateTimeUnit::Day => "D",
            DateTimeUnit::Hour => "h",
            DateTimeUnit::Minute => "m",
            DateTimeUnit::Second => "s",
            DateTimeUnit::Millisecond => "ms",
            DateTimeUnit::Microsecond => "us",
            DateTimeUnit::Nanosecond => "ns",
            DateTimeUnit::Picosecond => "ps",
            DateTimeUnit::Femtosecond => "fs",
            DateTimeUnit::Attosecond => "as",
        }
    }

    /// Lenient lookup: absent or unrecognized names give the default unit.
    pub fn from_name(name: Option<&str>) -> DateTimeUnit {
        name.and_then(|n| n.parse().ok())
            .unwrap_or(DATETIME_DEFAULT_UNIT)
    }

    /// Candidate divisors of this unit, each paired with the finer unit
    /// that one `1/divisor` step equals, tried in order.
    pub fn finer_multiples(self) -> &'static [(i32, DateTimeUnit)] {
        use DateTimeUnit::*;
        match self {
            Year => &[(12, Month), (52, Week), (365, Day)],
            Month => &[(4, Week), (30, Day), (720, Hour)],
            Week => &[(5, BusinessDay), (7, Day), (168, Hour), (10080, Minute)],
            BusinessDay | Day => &[(24, Hour), (1440, Minute), (86400, Second)],
            Hour => &[(60, Minute), (3600, Second)],
            Minute => &[(60, Second), (60000, Millisecond)],
            Second => &[(1000, Millisecond), (1_000_000, Microsecond)],
            Millisecond => &[(1000, Microsecond), (1_000_000, Nanosecond)],
            Microsecond => &[(1000, Nanosecond), (1_000_000, Picosecond)],
            Nanosecond => &[(1000, Picosecond), (1_000_000, Femtosecond)],
            Picosecond => &[(1000, Femtosecond), (1_000_000, Attosecond)],
            Femtosecond => &[(1000, Attosecond)],
            Attosecond => &[],
        }
    }
}

impl FromStr for DateTimeUnit {
    type Err = DescrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| DescrError::Value(format!("invalid datetime unit {:?}", s)))
    }
}

impl fmt::Display for DateTimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale metadata of a temporal descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeInfo {
    pub base: DateTimeUnit,
    pub num: i32,
    pub den: i32,
    /// Auxiliary repeat count, stored as-is.
    pub events: i32,
}

impl DateTimeInfo {
    /// Build temporal metadata from a unit name and a `num / den` scale.
    ///
    /// A denominator above one is refined into an integer multiple of a
    /// finer unit; fails with a value error when no candidate divisor of
    /// the unit is a multiple of `den`.
    pub fn new(units: Option<&str>, num: i32, den: i32, events: i32) -> Result<Self> {
        if den < 1 {
            return Err(DescrError::Value(format!(
                "denominator ({}) must be positive",
                den
            )));
        }

        let mut info = Self {
            base: DateTimeUnit::from_name(units),
            num,
            den,
            events,
        };
        if info.den > 1 {
            info.convert_divisor_to_multiple()?;
        }
        Ok(info)
    }

    fn convert_divisor_to_multiple(&mut self) -> Result<()> {
        let den = self.den;
        let refined = self
            .base
            .finer_multiples()
            .iter()
            .find(|(candidate, _)| candidate % den == 0);

        let Some(&(candidate, unit)) = refined else {
            log::debug!(
                "[datetime] no refinement of {} by divisor {}",
                self.base,
                den
            );
            return Err(DescrError::Value(format!(
                "divisor ({}) is not a multiple of a lower-unit",
                den
            )));
        };

        self.num = self.num.checked_mul(candidate / den).ok_or_else(|| {
            DescrError::Value(format!(
                "numerator ({}) overflows when refined to {}",
                self.num, unit
            ))
        })?;
        self.base = unit;
        self.den = 1;
        Ok(())
    }
}

impl Default for DateTimeInfo {
    fn default() -> Self {
        Self {
            base: DATETIME_DEFAULT_UNIT,
            num: 1,
            den: 1,
            events: DATETIME_DEFAULT_EVENTS,
        }
    }
}

/// Renders `[<num>]<unit>[/<den>][//<events>]`, omitting parts equal to one.
impl fmt::Display for DateTimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num != 1 {
            write!(f, "{}", self.num)?;
        }
        write!(f, "{}", self.base)?;
        if self.den != 1 {
            write!(f, "/{}", self.den)?;
        }
        if self.events != 1 {
            write!(f, "//{}", self.events)?;
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) form; unit names are strict.
impl FromStr for DateTimeInfo {
    type Err = DescrError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DescrError::Value(format!("invalid datetime metadata {:?}", s));
        let parse_int = |text: &str| text.parse::<i32>().map_err(|_| invalid());

        let (scale, events) = match s.split_once("//") {
            Some((scale, events)) => (scale, parse_int(events)?),
            None => (s, 1),
        };
        let (multiple, den) = match scale.split_once('/') {
            Some((multiple, den)) => (multiple, parse_int(den)?),
            None => (scale, 1),
        };
        let digits = multiple
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let num = if digits == 0 {
            1
        } else {
            parse_int(&multiple[..digits])?
        };
        let unit: DateTimeUnit = multiple[digits..].parse()?;

        Self::new(Some(unit.as_str()), num, den, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refine_seconds_to_milliseconds() {
        let info = DateTimeInfo::new(Some("s"), 1, 1000, 0).expect("refinable");
        assert_eq!(info.base, DateTimeUnit::Millisecond);
        assert_eq!(info.num, 1);
        assert_eq!(info.den, 1);
        assert_eq!(info.events, 0);
    }

    #[test]
    fn test_refine_picks_first_candidate() {
        // 1/4 month: 4 divides the first candidate (weeks)
        let info = DateTimeInfo::new(Some("M"), 1, 4, 1).expect("refinable");
        assert_eq!(info.base, DateTimeUnit::Week);
        assert_eq!(info.num, 1);

        // 3/2 hour: 60 / 2 = 30 minutes per step
        let info = DateTimeInfo::new(Some("h"), 3, 2, 1).expect("refinable");
        assert_eq!(info.base, DateTimeUnit::Minute);
        assert_eq!(info.num, 90);

        // 1/1440 day is one minute
        let info = DateTimeInfo::new(Some("D"), 1, 1440, 1).expect("refinable");
        assert_eq!(info.base, DateTimeUnit::Minute);
        assert_eq!(info.num, 1);
    }

    #[test]
    fn test_irreducible_divisor() {
        let err = DateTimeInfo::new(Some("Y"), 1, 7, 0).unwrap_err();
        assert_eq!(
            err,
            DescrError::Value("divisor (7) is not a multiple of a lower-unit".into())
        );

        // Nothing is finer than attoseconds
        assert!(DateTimeInfo::new(Some("as"), 1, 2, 0).is_err());
        // Femtoseconds only refine by 1000
        assert!(DateTimeInfo::new(Some("fs"), 1, 1_000_000, 0).is_err());
        assert_eq!(
            DateTimeInfo::new(Some("fs"), 1, 1000, 0).map(|i| i.base),
            Ok(DateTimeUnit::Attosecond)
        );
    }

    #[test]
    fn test_default_unit() {
        let info = DateTimeInfo::new(None, 1, 1, 1).expect("valid");
        assert_eq!(info.base, DATETIME_DEFAULT_UNIT);

        let info = DateTimeInfo::new(Some("fortnight"), 2, 1, 1).expect("valid");
        assert_eq!(info.base, DATETIME_DEFAULT_UNIT);
        assert_eq!(info.num, 2);

        assert!(DateTimeInfo::new(Some("s"), 1, 0, 1).is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let info = DateTimeInfo::new(Some("ms"), 5, 1, 1).expect("valid");
        assert_eq!(info.to_string(), "5ms");
        assert_eq!("5ms".parse::<DateTimeInfo>(), Ok(info));

        let info = DateTimeInfo {
            base: DateTimeUnit::Second,
            num: 1,
            den: 1,
            events: 3,
        };
        assert_eq!(info.to_string(), "s//3");

        let refined: DateTimeInfo = "s/1000".parse().expect("refinable");
        assert_eq!(refined.base, DateTimeUnit::Millisecond);
        assert!("5parsecs".parse::<DateTimeInfo>().is_err());
        assert!("".parse::<DateTimeInfo>().is_err());
    }
}
