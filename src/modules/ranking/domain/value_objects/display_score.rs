use serde::{Serialize, Serializer};
use std::fmt;

/// Fractional digits shown for every presented score
pub const DISPLAY_DIGITS: u32 = 1;

/// Round half up to `digits` fractional digits.
///
/// Binary floats land just under a decimal half (`1.45 * 10` is
/// `14.499999999999998`), so the half boundary is widened by a tiny relative
/// tolerance before flooring.
pub fn round_half_up(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    let tolerance = scaled.abs().max(1.0) * 1e-12;
    (scaled + 0.5 + tolerance).floor() / factor
}

/// A score as presented to clients: rounded once, at the very end
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DisplayScore(f64);

impl DisplayScore {
    pub fn from_raw(raw: f64) -> Self {
        Self(round_half_up(raw, DISPLAY_DIGITS))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for DisplayScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for DisplayScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(round_half_up(3.6875, 1), 3.7);
        assert_eq!(round_half_up(2.25, 1), 2.3);
        assert_eq!(round_half_up(1.45, 1), 1.5);
        assert_eq!(round_half_up(0.05, 1), 0.1);
        assert_eq!(round_half_up(2.2499, 1), 2.2);
        assert_eq!(round_half_up(4.0, 1), 4.0);
    }

    #[test]
    fn test_display_uses_one_digit() {
        assert_eq!(DisplayScore::from_raw(3.6875).to_string(), "3.7");
        assert_eq!(DisplayScore::from_raw(4.0).to_string(), "4.0");
        assert_eq!(serde_json::to_string(&DisplayScore::from_raw(2.25)).unwrap(), "2.3");
    }
}
