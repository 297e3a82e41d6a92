use std::fmt::Display;

use fraction::Fraction;
use serde::{Deserialize, Serialize};

use crate::error::{TranscribeError, TranscribeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeSignatureFields")]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

#[derive(Deserialize)]
struct TimeSignatureFields {
    numerator: u8,
    denominator: u8,
}
impl TryFrom<TimeSignatureFields> for TimeSignature {
    type Error = TranscribeError;
    fn try_from(fields: TimeSignatureFields) -> Result<Self, Self::Error> {
        Self::new(fields.numerator, fields.denominator as u32)
    }
}
impl TimeSignature {
    /// Denominator should be 2, 4 or 8.
    pub fn new(numerator: u8, denominator: u32) -> TranscribeResult<Self> {
        match (numerator, denominator) {
            (1.., 2 | 4 | 8) => Ok(Self {
                numerator,
                denominator: denominator as u8,
            }),
            _ => Err(TranscribeError::InvalidTimeSignature {
                numerator,
                denominator,
            }),
        }
    }
    /// Length of one measure in whole notes.
    pub fn measure_length(&self) -> Fraction {
        Fraction::new(self.numerator as u64, self.denominator as u64)
    }
}
impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}
impl Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use fraction::Fraction;

    use super::TimeSignature;

    #[test]
    fn time_signature() {
        let ts = TimeSignature::new(6, 8).unwrap();
        assert_eq!(ts.measure_length(), Fraction::new(3u64, 4u64));
        assert_eq!(ts.to_string(), "6/8");
        assert_eq!(TimeSignature::default().measure_length(), Fraction::new(1u64, 1u64));
        assert!(TimeSignature::new(3, 16).is_err());
        assert!(TimeSignature::new(0, 4).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ts: TimeSignature =
            serde_json::from_str(r#"{"numerator":3,"denominator":8}"#).unwrap();
        assert_eq!(ts, TimeSignature::new(3, 8).unwrap());
        for json in [
            r#"{"numerator":3,"denominator":16}"#,
            r#"{"numerator":0,"denominator":4}"#,
        ] {
            assert!(serde_json::from_str::<TimeSignature>(json).is_err(), "{json}");
        }
    }
}
