//! Request-rate tiers and the delay they imply.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Supported requests-per-minute budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateTier {
    /// 10 requests per minute.
    #[default]
    Rpm10,
    /// 50 requests per minute.
    Rpm50,
    /// 100 requests per minute.
    Rpm100,
    /// 500 requests per minute.
    Rpm500,
    /// 1000 requests per minute.
    Rpm1000,
}

impl RateTier {
    /// All tiers, slowest first.
    pub const ALL: [Self; 5] = [Self::Rpm10, Self::Rpm50, Self::Rpm100, Self::Rpm500, Self::Rpm1000];

    /// Requests per minute for this tier.
    #[must_use]
    pub fn per_minute(self) -> u32 {
        match self {
            Self::Rpm10 => 10,
            Self::Rpm50 => 50,
            Self::Rpm100 => 100,
            Self::Rpm500 => 500,
            Self::Rpm1000 => 1000,
        }
    }

    /// Pause between two consecutive lookups.
    #[must_use]
    pub fn delay(self) -> Duration {
        Duration::from_millis(compute_delay(self.per_minute()))
    }
}

impl TryFrom<u32> for RateTier {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL.into_iter().find(|tier| tier.per_minute() == value).ok_or_else(|| {
            format!("unsupported rate {value}; expected one of 10, 50, 100, 500, 1000")
        })
    }
}

impl FromStr for RateTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s.trim().parse().map_err(|_| format!("invalid rate {s:?}"))?;
        Self::try_from(value)
    }
}

impl fmt::Display for RateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.per_minute())
    }
}

/// Milliseconds to wait between requests: `ceil(60000 / rate_per_minute)`.
///
/// A zero rate is treated as one request per minute.
#[must_use]
pub fn compute_delay(rate_per_minute: u32) -> u64 {
    60_000_u64.div_ceil(u64::from(rate_per_minute.max(1)))
}
