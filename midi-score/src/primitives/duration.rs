//! Note values as exact fractions of a whole note.
//!
//! Every `Duration` in the crate is either canonical (one of the plain or
//! dotted note values) or a sum of canonical values. Imprecise tick
//! measurements are forced onto canonical values only by
//! [`Duration::quantize`].
//!
//! # Example
//!
//! ```
//! use fraction::Fraction;
//! use midi_score::primitives::{Duration, NoteValue};
//!
//! let quarter = Duration::from(NoteValue::Quarter);
//! let half = Duration::from(NoteValue::Half);
//! assert_eq!(quarter + half, Duration::parse("Hd").unwrap());
//! assert_eq!(half.ratio(&quarter), Fraction::new(2u64, 1u64));
//! // 2 quarter notes and a bit more
//! assert_eq!(Duration::quantize(Fraction::new(1013u64, 480u64)), half);
//! ```

use std::{collections::HashMap, fmt::Display, iter::Sum, ops::Add, str::FromStr};

use fraction::Fraction;
use once_cell::sync::Lazy;

use crate::error::{TranscribeError, TranscribeResult};

/// Undotted note values, from the longest to the shortest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteValue {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}
impl NoteValue {
    pub const ALL: [NoteValue; 7] = [
        Self::Whole,
        Self::Half,
        Self::Quarter,
        Self::Eighth,
        Self::Sixteenth,
        Self::ThirtySecond,
        Self::SixtyFourth,
    ];

    pub fn denominator(&self) -> u64 {
        match self {
            Self::Whole => 1,
            Self::Half => 2,
            Self::Quarter => 4,
            Self::Eighth => 8,
            Self::Sixteenth => 16,
            Self::ThirtySecond => 32,
            Self::SixtyFourth => 64,
        }
    }
    pub fn fraction(&self) -> Fraction {
        Fraction::new(1u64, self.denominator())
    }
    pub fn code(&self) -> char {
        match self {
            Self::Whole => 'W',
            Self::Half => 'H',
            Self::Quarter => 'Q',
            Self::Eighth => 'E',
            Self::Sixteenth => 'S',
            Self::ThirtySecond => 'T',
            Self::SixtyFourth => 'X',
        }
    }
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.code() == code)
    }
    pub fn name(&self) -> &'static str {
        match self {
            Self::Whole => "whole",
            Self::Half => "half",
            Self::Quarter => "quarter",
            Self::Eighth => "eighth",
            Self::Sixteenth => "sixteenth",
            Self::ThirtySecond => "thirty-second",
            Self::SixtyFourth => "sixty-fourth",
        }
    }
}

fn canonical_fraction(value: NoteValue, dotted: bool) -> Fraction {
    match dotted {
        false => value.fraction(),
        true => value.fraction() * Fraction::new(3u64, 2u64),
    }
}

/// Reverse lookup of every canonical value.
static CANONICAL: Lazy<HashMap<Fraction, (NoteValue, bool)>> = Lazy::new(|| {
    NoteValue::ALL
        .into_iter()
        .flat_map(|value| [(value, false), (value, true)])
        .filter(|(value, dotted)| !(*dotted && *value == NoteValue::SixtyFourth))
        .map(|(value, dotted)| (canonical_fraction(value, dotted), (value, dotted)))
        .collect()
});

/// Candidates of quantization, largest first.
/// The last one (zero) means "too short to notate".
static QUANTIZE_LADDER: Lazy<Vec<Duration>> = Lazy::new(|| {
    use NoteValue::*;
    let mut ladder = vec![Duration::from(Whole)];
    for value in [Half, Quarter, Eighth, Sixteenth, ThirtySecond] {
        ladder.push(Duration::canonical(value, true));
        ladder.push(Duration::from(value));
    }
    ladder.push(Duration::from(SixtyFourth));
    ladder.push(Duration::zero());
    ladder
});

/// Immutable length of an event in whole notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd)]
pub struct Duration {
    fraction: Fraction,
}
impl Duration {
    /// Build canonical duration.
    ///
    /// Fails with [`TranscribeError::InvalidDuration`] on dotted
    /// sixty-fourth, as nothing finer can be represented.
    pub fn new(value: NoteValue, dotted: bool) -> TranscribeResult<Self> {
        if dotted && value == NoteValue::SixtyFourth {
            return Err(TranscribeError::InvalidDuration(format!(
                "dotted {} is finer than the smallest supported value",
                value.name()
            )));
        }
        Ok(Self::canonical(value, dotted))
    }
    fn canonical(value: NoteValue, dotted: bool) -> Self {
        Self {
            fraction: canonical_fraction(value, dotted),
        }
    }
    pub fn zero() -> Self {
        Self {
            fraction: Fraction::new(0u64, 1u64),
        }
    }

    /// Parse short code: `W`, `H`, `Q`, `E`, `S`, `T` or `X`
    /// with optional trailing `d` for dotted.
    ///
    /// # Example
    /// ```
    /// # use midi_score::primitives::{Duration, NoteValue};
    /// assert_eq!(
    ///     Duration::parse("Qd").unwrap(),
    ///     Duration::new(NoteValue::Quarter, true).unwrap()
    /// );
    /// assert!(Duration::parse("Qdd").is_err());
    /// assert!(Duration::parse("q").is_err());
    /// ```
    pub fn parse(code: &str) -> TranscribeResult<Self> {
        let invalid = || TranscribeError::InvalidFormat(code.to_string());
        let mut chars = code.chars();
        let value = chars
            .next()
            .and_then(NoteValue::from_code)
            .ok_or_else(invalid)?;
        let dotted = match chars.next() {
            None => false,
            Some('d') => true,
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }
        Self::new(value, dotted)
    }

    /// Find canonical value, closest to the given ratio, where ratio is
    /// expressed in quarter notes (1 is a quarter, 4 is a whole).
    ///
    /// Candidates are scanned from the whole note down to "too short to
    /// notate" (zero), so on a tie the larger value wins. Never fails:
    /// everything longer than a whole note is clamped to the whole note.
    pub fn quantize(ratio: Fraction) -> Self {
        let quarters = Fraction::new(4u64, 1u64);
        let mut best = QUANTIZE_LADDER[0];
        let mut best_distance: Option<Fraction> = None;
        for candidate in QUANTIZE_LADDER.iter() {
            let candidate_ratio = candidate.fraction * quarters;
            if candidate_ratio == ratio {
                return *candidate;
            }
            let distance = match ratio > candidate_ratio {
                true => ratio - candidate_ratio,
                false => candidate_ratio - ratio,
            };
            match best_distance {
                Some(best_distance) if distance >= best_distance => (),
                _ => {
                    best = *candidate;
                    best_distance = Some(distance);
                }
            }
        }
        best
    }

    /// Quantize elapsed ticks at given resolution.
    pub fn from_ticks(ticks: u64, ticks_per_quarter: u16) -> Self {
        Self::quantize(Fraction::new(ticks, ticks_per_quarter as u64))
    }

    /// Split arbitrary length (in whole notes) into notatable durations.
    ///
    /// Greedy: one whole note is emitted while more than a whole note
    /// left, then remainder is quantized. Remainder, which is not a
    /// canonical value itself, is rounded, so the sum is not exact then.
    /// Zero remainder produces nothing.
    ///
    /// # Example
    /// ```
    /// # use fraction::Fraction;
    /// # use midi_score::primitives::{Duration, NoteValue};
    /// assert_eq!(
    ///     Duration::decompose(Fraction::new(9u64, 4u64)),
    ///     vec![
    ///         Duration::from(NoteValue::Whole),
    ///         Duration::from(NoteValue::Whole),
    ///         Duration::from(NoteValue::Quarter),
    ///     ]
    /// );
    /// ```
    pub fn decompose(value: Fraction) -> Vec<Self> {
        let one = Fraction::new(1u64, 1u64);
        let mut remainder = value;
        let mut durations = Vec::new();
        while remainder > one {
            durations.push(Self::from(NoteValue::Whole));
            remainder = remainder - one;
        }
        let tail = Self::quantize(remainder * Fraction::new(4u64, 1u64));
        if !tail.is_zero() {
            durations.push(tail);
        }
        durations
    }

    /// Decompose elapsed ticks at given resolution.
    pub fn decompose_ticks(ticks: u64, ticks_per_quarter: u16) -> Vec<Self> {
        Self::decompose(Fraction::new(ticks, ticks_per_quarter as u64 * 4))
    }

    /// How many `other` fit into self.
    pub fn ratio(&self, other: &Self) -> Fraction {
        self.fraction / other.fraction
    }

    /// Value in whole notes.
    pub fn get(&self) -> Fraction {
        self.fraction
    }
    pub fn is_zero(&self) -> bool {
        self.fraction == Fraction::new(0u64, 1u64)
    }

    /// Note value and dot, if the duration is canonical.
    pub fn as_canonical(&self) -> Option<(NoteValue, bool)> {
        CANONICAL.get(&self.fraction).copied()
    }
    pub fn is_canonical(&self) -> bool {
        self.as_canonical().is_some()
    }

    /// Short code (e.g. `Qd`), if the duration is canonical.
    pub fn code(&self) -> Option<String> {
        self.as_canonical().map(|(value, dotted)| match dotted {
            true => format!("{}d", value.code()),
            false => value.code().to_string(),
        })
    }

    /// Human-readable name, like "dotted half".
    pub fn name(&self) -> Option<String> {
        self.as_canonical().map(|(value, dotted)| match dotted {
            true => format!("dotted {}", value.name()),
            false => value.name().to_string(),
        })
    }
}
impl From<NoteValue> for Duration {
    fn from(value: NoteValue) -> Self {
        Self::canonical(value, false)
    }
}
impl FromStr for Duration {
    type Err = TranscribeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
impl Add for Duration {
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            fraction: self.fraction + rhs.fraction,
        }
    }
    type Output = Self;
}
impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, d| acc + d)
    }
}
/// Short code for canonical values, the fraction otherwise.
/// Zero ("too short to notate") prints as `0` and can not be parsed back.
impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{code}"),
            None => write!(f, "{}", self.fraction),
        }
    }
}

#[cfg(test)]
mod tests {
    use fraction::Fraction;

    use super::{Duration, NoteValue};
    use crate::error::TranscribeError;

    fn d(code: &str) -> Duration {
        Duration::parse(code).unwrap()
    }

    #[test]
    fn construct() {
        assert_eq!(d("W").get(), Fraction::new(1u64, 1u64));
        assert_eq!(d("Hd").get(), Fraction::new(3u64, 4u64));
        assert_eq!(d("Td").get(), Fraction::new(3u64, 64u64));
        assert_eq!(d("Wd").get(), Fraction::new(3u64, 2u64));
        assert!(matches!(
            Duration::new(NoteValue::SixtyFourth, true),
            Err(TranscribeError::InvalidDuration(_))
        ));
    }

    #[test]
    fn parse_invalid() {
        for code in ["", "Z", "Qx", "QD", "Hdd", "qd", "4"] {
            assert_eq!(
                Duration::parse(code),
                Err(TranscribeError::InvalidFormat(code.to_string())),
                "code: {code}"
            );
        }
        assert!(matches!(
            Duration::parse("Xd"),
            Err(TranscribeError::InvalidDuration(_))
        ));
    }

    #[test]
    fn quantize_ties_go_to_larger() {
        // between whole (4) and dotted half (3)
        assert_eq!(Duration::quantize(Fraction::new(7u64, 2u64)), d("W"));
        // between dotted half (3) and half (2)
        assert_eq!(Duration::quantize(Fraction::new(5u64, 2u64)), d("Hd"));
        // between quarter and dotted quarter
        assert_eq!(Duration::quantize(Fraction::new(5u64, 4u64)), d("Qd"));
        // between sixty-fourth and nothing
        assert_eq!(Duration::quantize(Fraction::new(1u64, 32u64)), d("X"));
    }

    #[test]
    fn quantize_clamps() {
        assert_eq!(Duration::quantize(Fraction::new(17u64, 1u64)), d("W"));
        assert_eq!(Duration::quantize(Fraction::new(1u64, 100u64)), Duration::zero());
        assert_eq!(Duration::quantize(Fraction::new(0u64, 1u64)), Duration::zero());
    }

    #[test]
    fn quantize_ticks() {
        assert_eq!(Duration::from_ticks(960, 480), d("H"));
        assert_eq!(Duration::from_ticks(470, 480), d("Q"));
        assert_eq!(Duration::from_ticks(700, 480), d("Qd"));
        assert_eq!(Duration::from_ticks(60, 480), d("T"));
    }

    #[test]
    fn decompose() {
        assert_eq!(Duration::decompose(Fraction::new(1u64, 1u64)), vec![d("W")]);
        assert_eq!(
            Duration::decompose(Fraction::new(2u64, 1u64)),
            vec![d("W"), d("W")]
        );
        assert_eq!(Duration::decompose(Fraction::new(0u64, 1u64)), Vec::<Duration>::new());
        assert_eq!(
            Duration::decompose(Fraction::new(11u64, 8u64)),
            vec![d("W"), d("Qd")]
        );
        // not exact: 5/16 is rounded up to dotted quarter
        assert_eq!(Duration::decompose(Fraction::new(5u64, 16u64)), vec![d("Qd")]);
        assert_eq!(Duration::decompose_ticks(480 * 5, 480), vec![d("W"), d("Q")]);
    }

    #[test]
    fn ratio() {
        assert_eq!(d("Q").ratio(&d("H")), Fraction::new(1u64, 2u64));
        assert_eq!(d("H").ratio(&d("Q")), Fraction::new(2u64, 1u64));
        assert_eq!(d("W").ratio(&d("Q")), Fraction::new(4u64, 1u64));
    }

    #[test]
    fn add_durations() {
        assert_eq!(d("Q") + d("H"), d("Hd"));
        assert_eq!([d("E"), d("E"), d("E")].into_iter().sum::<Duration>(), d("Qd"));
        assert_eq!(d("Q") + d("Q") + d("H"), d("W"));
        let odd = d("Q") + d("S");
        assert!(!odd.is_canonical());
        assert_eq!(odd.to_string(), "5/16");
    }

    #[test]
    fn names() {
        assert_eq!(d("W").name().unwrap(), "whole");
        assert_eq!(d("Hd").name().unwrap(), "dotted half");
        assert_eq!(d("Td").code().unwrap(), "Td");
        assert_eq!(Duration::zero().code(), None);
    }
}
