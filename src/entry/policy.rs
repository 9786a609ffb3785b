use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::EntryError;

/// How range violations are handled when a numeric value is stored.
///
/// The policy is a plain value passed to every validating operation, so two
/// decoding sessions with different policies never interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowPolicy {
    /// Reject out-of-range values with [`EntryError::OutOfRange`]
    #[default]
    Strict,

    /// Store out-of-range values as-is, without clamping
    Lenient,
}

impl OverflowPolicy {
    /// Check `value` against the inclusive range `[min, max]`.
    ///
    /// Under `Lenient` a violation is logged and accepted.
    pub fn check(self, value: i64, min: i64, max: i64) -> Result<(), EntryError> {
        if (min..=max).contains(&value) {
            return Ok(());
        }

        match self {
            OverflowPolicy::Strict => Err(EntryError::OutOfRange { value, min, max }),
            OverflowPolicy::Lenient => {
                warn!(value, min, max, "Accepting out-of-range value");
                Ok(())
            }
        }
    }

    /// Get the lowercase name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            OverflowPolicy::Strict => "strict",
            OverflowPolicy::Lenient => "lenient",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(OverflowPolicy::Strict),
            "lenient" => Ok(OverflowPolicy::Lenient),
            other => Err(format!(
                "unknown overflow policy '{}' (expected strict or lenient)",
                other
            )),
        }
    }
}
