use std::fmt::Display;

use fraction::Fraction;

use super::{Duration, NoteValue};

const MICROSECONDS_PER_MINUTE: u64 = 60_000_000;

fn round_fraction(frac: Fraction) -> Option<u64> {
    let (num, denom) = (*frac.numer()?, *frac.denom()?);
    if denom == 0 {
        return None;
    }
    Some((num + denom / 2) / denom)
}

/// "[beat] = [bpm]" tempo marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tempo {
    pub bpm: u32,
    pub beat: Duration,
}
impl Tempo {
    /// Beat is a quarter note.
    pub fn new(bpm: u32) -> Self {
        Self {
            bpm,
            beat: Duration::from(NoteValue::Quarter),
        }
    }
    pub fn with_beat(bpm: u32, beat: Duration) -> Self {
        Self { bpm, beat }
    }

    /// Decode tempo from microseconds per quarter note, as it is
    /// stored in MIDI. `None` on zero.
    ///
    /// # Example
    /// ```
    /// # use midi_score::primitives::Tempo;
    /// assert_eq!(Tempo::from_microseconds(500_000), Some(Tempo::new(120)));
    /// assert_eq!(Tempo::from_microseconds(545_455), Some(Tempo::new(110)));
    /// assert_eq!(Tempo::from_microseconds(0), None);
    /// ```
    pub fn from_microseconds(microseconds: u32) -> Option<Self> {
        if microseconds == 0 {
            return None;
        }
        let bpm = (MICROSECONDS_PER_MINUTE as f64 / microseconds as f64).round();
        Some(Self::new(bpm as u32))
    }

    /// The same tempo, counted in another beat unit.
    /// `None` if the conversion is meaningless (e.g. zero beat).
    pub fn convert(&self, beat: Duration) -> Option<Self> {
        let bpm = Fraction::new(self.bpm as u64, 1u64) * self.beat.ratio(&beat);
        Some(Self {
            bpm: u32::try_from(round_fraction(bpm)?).ok()?,
            beat,
        })
    }

    pub fn microseconds_per_quarter(&self) -> Option<u32> {
        let quarter_bpm = Fraction::new(self.bpm as u64, 1u64)
            * self.beat.ratio(&Duration::from(NoteValue::Quarter));
        if quarter_bpm == Fraction::new(0u64, 1u64) {
            return None;
        }
        let microseconds = Fraction::new(MICROSECONDS_PER_MINUTE, 1u64) / quarter_bpm;
        u32::try_from(round_fraction(microseconds)?).ok()
    }
}
impl Default for Tempo {
    fn default() -> Self {
        Self::new(120)
    }
}
impl Display for Tempo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.beat, self.bpm)
    }
}
