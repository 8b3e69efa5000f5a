use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Bucket unit for historical bar queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeframeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// A bar timeframe such as `5Min`, `4H` or `1Day`: a positive multiplier
/// paired with a [`TimeframeUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeframe {
    pub amount: u32,
    pub unit: TimeframeUnit,
}

/// Recognized unit suffixes, longest first so that `Month` is matched before
/// `M`, `Hour` before `H` and so on. Order is the grammar; do not sort.
const UNIT_SUFFIXES: [(&str, TimeframeUnit); 9] = [
    ("Month", TimeframeUnit::Month),
    ("Hour", TimeframeUnit::Hour),
    ("Week", TimeframeUnit::Week),
    ("Min", TimeframeUnit::Minute),
    ("Day", TimeframeUnit::Day),
    ("H", TimeframeUnit::Hour),
    ("D", TimeframeUnit::Day),
    ("W", TimeframeUnit::Week),
    ("M", TimeframeUnit::Month),
];

impl Timeframe {
    pub const fn new(amount: u32, unit: TimeframeUnit) -> Self {
        Self { amount, unit }
    }

    /// Parses a short timeframe string like `1Min`, `5Min`, `1H`, `1Hour`,
    /// `1D`, `1W` or `1Month`. Leading and trailing whitespace is ignored.
    ///
    /// The prefix before the unit suffix must be a base-10 integer >= 1;
    /// anything else fails with [`Error::InvalidTimeframe`] carrying the
    /// offending input.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        for (suffix, unit) in UNIT_SUFFIXES {
            if let Some(prefix) = trimmed.strip_suffix(suffix) {
                match prefix.parse::<u32>() {
                    Ok(amount) if amount >= 1 => return Ok(Self::new(amount, unit)),
                    _ => continue,
                }
            }
        }
        Err(Error::InvalidTimeframe(input.to_string()))
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self.unit {
            TimeframeUnit::Minute => "Min",
            TimeframeUnit::Hour => "Hour",
            TimeframeUnit::Day => "Day",
            TimeframeUnit::Week => "Week",
            TimeframeUnit::Month => "Month",
        };
        write!(f, "{}{}", self.amount, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes() {
        assert_eq!(
            Timeframe::parse("1Min").unwrap(),
            Timeframe::new(1, TimeframeUnit::Minute)
        );
        assert_eq!(
            Timeframe::parse("5Min").unwrap(),
            Timeframe::new(5, TimeframeUnit::Minute)
        );
    }

    #[test]
    fn accepts_short_and_long_spellings() {
        for (short, long, unit) in [
            ("1H", "1Hour", TimeframeUnit::Hour),
            ("1D", "1Day", TimeframeUnit::Day),
            ("1W", "1Week", TimeframeUnit::Week),
            ("1M", "1Month", TimeframeUnit::Month),
        ] {
            assert_eq!(Timeframe::parse(short).unwrap(), Timeframe::new(1, unit));
            assert_eq!(Timeframe::parse(long).unwrap(), Timeframe::new(1, unit));
        }
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(
            Timeframe::parse(" 1H ").unwrap(),
            Timeframe::new(1, TimeframeUnit::Hour)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "abc", "Min5", "0Min", "-1D", "1.5H"] {
            let err = Timeframe::parse(bad).expect_err("must fail");
            assert!(matches!(err, Error::InvalidTimeframe(ref s) if s == bad));
        }
    }

    #[test]
    fn display_round_trips() {
        for tf in [
            Timeframe::new(1, TimeframeUnit::Minute),
            Timeframe::new(15, TimeframeUnit::Minute),
            Timeframe::new(4, TimeframeUnit::Hour),
            Timeframe::new(1, TimeframeUnit::Day),
            Timeframe::new(2, TimeframeUnit::Week),
            Timeframe::new(1, TimeframeUnit::Month),
        ] {
            assert_eq!(Timeframe::parse(&tf.to_string()).unwrap(), tf);
        }
    }
}
