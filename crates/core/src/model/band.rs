use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum BandScoreError {
    #[error("band score must be in [0, 9], got {provided}")]
    OutOfRange { provided: f64 },
    #[error("band score must be a multiple of 0.5, got {provided}")]
    NotHalfStep { provided: f64 },
}

/// An IELTS band score: 0 to 9 in half-point steps.
///
/// Stored internally as half-points so equality and hashing are exact;
/// serialized as the familiar decimal number (6.5, 7.0, ...).
///
/// # Examples
///
/// ```
/// # use prep_core::model::BandScore;
/// let band = BandScore::try_from(6.5)?;
/// assert_eq!(band.value(), 6.5);
/// # Ok::<(), prep_core::model::BandScoreError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BandScore {
    half_points: u8,
}

impl BandScore {
    pub const MIN: BandScore = BandScore { half_points: 0 };
    pub const MAX: BandScore = BandScore { half_points: 18 };

    /// Returns the score as its decimal value (0.0 ..= 9.0).
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.half_points) / 2.0
    }

    /// Convert a raw correct-answer count into an Academic Reading band.
    ///
    /// Uses the published Academic Reading conversion thresholds; a zero
    /// `total` (no questions) maps to the table floor rather than dividing
    /// by zero.
    #[must_use]
    pub fn from_reading_score(correct: u32, total: u32) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(correct) / f64::from(total) * 100.0
        };

        let half_points = if percentage >= 97.5 {
            18
        } else if percentage >= 95.0 {
            17
        } else if percentage >= 90.0 {
            16
        } else if percentage >= 85.0 {
            15
        } else if percentage >= 75.0 {
            14
        } else if percentage >= 65.0 {
            13
        } else if percentage >= 55.0 {
            12
        } else if percentage >= 45.0 {
            11
        } else if percentage >= 35.0 {
            10
        } else if percentage >= 25.0 {
            9
        } else if percentage >= 15.0 {
            8
        } else if percentage >= 10.0 {
            7
        } else if percentage >= 5.0 {
            6
        } else {
            5
        };

        Self { half_points }
    }
}

impl TryFrom<f64> for BandScore {
    type Error = BandScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || !(0.0..=9.0).contains(&value) {
            return Err(BandScoreError::OutOfRange { provided: value });
        }
        let doubled = value * 2.0;
        if (doubled - doubled.round()).abs() > 1e-9 {
            return Err(BandScoreError::NotHalfStep { provided: value });
        }

        // The range check above bounds the doubled value to [0, 18].
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let half_points = doubled.round() as u8;
        Ok(Self { half_points })
    }
}

impl From<BandScore> for f64 {
    fn from(band: BandScore) -> Self {
        band.value()
    }
}

impl fmt::Display for BandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_half_steps() {
        for raw in [0.0, 0.5, 4.0, 6.5, 8.5, 9.0] {
            let band = BandScore::try_from(raw).unwrap();
            assert_eq!(band.value(), raw);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            BandScore::try_from(9.5),
            Err(BandScoreError::OutOfRange { .. })
        ));
        assert!(matches!(
            BandScore::try_from(-0.5),
            Err(BandScoreError::OutOfRange { .. })
        ));
        assert!(matches!(
            BandScore::try_from(f64::NAN),
            Err(BandScoreError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_quarter_steps() {
        assert!(matches!(
            BandScore::try_from(6.25),
            Err(BandScoreError::NotHalfStep { .. })
        ));
    }

    #[test]
    fn display_uses_one_decimal() {
        assert_eq!(BandScore::try_from(7.0).unwrap().to_string(), "7.0");
        assert_eq!(BandScore::try_from(6.5).unwrap().to_string(), "6.5");
    }

    #[test]
    fn reading_conversion_thresholds() {
        assert_eq!(BandScore::from_reading_score(40, 40).value(), 9.0);
        assert_eq!(BandScore::from_reading_score(39, 40).value(), 9.0); // 97.5%
        assert_eq!(BandScore::from_reading_score(38, 40).value(), 8.5); // 95%
        assert_eq!(BandScore::from_reading_score(36, 40).value(), 8.0); // 90%
        assert_eq!(BandScore::from_reading_score(30, 40).value(), 7.0); // 75%
        assert_eq!(BandScore::from_reading_score(26, 40).value(), 6.5); // 65%
        assert_eq!(BandScore::from_reading_score(14, 40).value(), 5.0); // 35%
        assert_eq!(BandScore::from_reading_score(0, 40).value(), 2.5);
    }

    #[test]
    fn reading_conversion_handles_empty_test() {
        assert_eq!(BandScore::from_reading_score(0, 0).value(), 2.5);
    }

    #[test]
    fn serializes_as_number() {
        let band = BandScore::try_from(6.5).unwrap();
        let json = serde_json::to_string(&band).unwrap();
        assert_eq!(json, "6.5");

        let parsed: BandScore = serde_json::from_str("7.5").unwrap();
        assert_eq!(parsed.value(), 7.5);
    }

    #[test]
    fn deserialization_rejects_invalid_values() {
        assert!(serde_json::from_str::<BandScore>("9.7").is_err());
        assert!(serde_json::from_str::<BandScore>("6.3").is_err());
    }

    #[test]
    fn ordering_follows_value() {
        let low = BandScore::try_from(5.5).unwrap();
        let high = BandScore::try_from(8.0).unwrap();
        assert!(low < high);
        assert_eq!(BandScore::MIN.value(), 0.0);
        assert_eq!(BandScore::MAX.value(), 9.0);
    }
}
