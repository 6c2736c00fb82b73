//! Treatment of negative simulated variance.

use std::fmt;
use std::str::FromStr;

/// How the scheme handles variance that the discretisation pushed below zero.
///
/// The continuous-time process stays non-negative, but the Milstein step can
/// undershoot, especially when the Feller condition fails. The choice changes
/// long-run path statistics:
///
/// | Policy | Inside √ | Stored `V[t]` |
/// |---|---|---|
/// | `Truncate` | `max(V, 0)` | unchanged, may be negative and recover |
/// | `Reflect` | `abs(V)` | unchanged |
/// | `Absorb` | `max(V, 0)` | floored at 0 |
///
/// The mean-reversion drift always uses the stored value.
///
/// # Examples
///
/// ```
/// use heston_simulation::simulation::NegativeVariance;
///
/// assert_eq!(NegativeVariance::default(), NegativeVariance::Truncate);
/// assert_eq!("absorb".parse::<NegativeVariance>().unwrap(), NegativeVariance::Absorb);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NegativeVariance {
    /// Clamp at zero under the square root only.
    #[default]
    Truncate,
    /// Use the absolute value under the square root.
    Reflect,
    /// Floor the stored variance at zero after every step.
    Absorb,
}

impl NegativeVariance {
    /// Policy name as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            NegativeVariance::Truncate => "truncate",
            NegativeVariance::Reflect => "reflect",
            NegativeVariance::Absorb => "absorb",
        }
    }

    /// Non-negative variance fed to the square root.
    #[inline]
    pub(crate) fn root_argument(&self, variance: f64) -> f64 {
        match self {
            NegativeVariance::Truncate | NegativeVariance::Absorb => variance.max(0.0),
            NegativeVariance::Reflect => variance.abs(),
        }
    }

    /// Value stored on the grid after a step.
    #[inline]
    pub(crate) fn stored(&self, variance: f64) -> f64 {
        match self {
            NegativeVariance::Absorb => variance.max(0.0),
            NegativeVariance::Truncate | NegativeVariance::Reflect => variance,
        }
    }
}

impl FromStr for NegativeVariance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truncate" => Ok(NegativeVariance::Truncate),
            "reflect" => Ok(NegativeVariance::Reflect),
            "absorb" => Ok(NegativeVariance::Absorb),
            _ => Err(format!(
                "Unknown negative-variance policy: {s} (expected truncate, reflect or absorb)"
            )),
        }
    }
}

impl fmt::Display for NegativeVariance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_argument() {
        assert_eq!(NegativeVariance::Truncate.root_argument(-0.01), 0.0);
        assert_eq!(NegativeVariance::Reflect.root_argument(-0.01), 0.01);
        assert_eq!(NegativeVariance::Absorb.root_argument(-0.01), 0.0);
        for policy in [
            NegativeVariance::Truncate,
            NegativeVariance::Reflect,
            NegativeVariance::Absorb,
        ] {
            assert_eq!(policy.root_argument(0.04), 0.04);
        }
    }

    #[test]
    fn test_stored() {
        assert_eq!(NegativeVariance::Truncate.stored(-0.01), -0.01);
        assert_eq!(NegativeVariance::Reflect.stored(-0.01), -0.01);
        assert_eq!(NegativeVariance::Absorb.stored(-0.01), 0.0);
    }

    #[test]
    fn test_parse_round_trip() {
        for policy in [
            NegativeVariance::Truncate,
            NegativeVariance::Reflect,
            NegativeVariance::Absorb,
        ] {
            assert_eq!(policy.to_string().parse::<NegativeVariance>().unwrap(), policy);
        }
        assert_eq!(" Reflect ".parse::<NegativeVariance>().unwrap(), NegativeVariance::Reflect);
        assert!("clamp".parse::<NegativeVariance>().is_err());
    }
}
