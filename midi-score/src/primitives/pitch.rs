//! Pitch identity: semitone inside octave and the octave itself.
//!
//! Spelling is not kept: `C#4` and `Db4` are the same pitch, as well
//! as `B#3` and `C4`.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{TranscribeError, TranscribeResult};

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Ordered by height. Field order matters for derived `Ord`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "PitchFields")]
pub struct Pitch {
    octave: i8,
    semitone: u8,
}

#[derive(Deserialize)]
struct PitchFields {
    octave: i8,
    semitone: u8,
}
impl TryFrom<PitchFields> for Pitch {
    type Error = TranscribeError;
    fn try_from(fields: PitchFields) -> Result<Self, Self::Error> {
        match fields.semitone {
            0..=11 => Ok(Self {
                octave: fields.octave,
                semitone: fields.semitone,
            }),
            semitone => Err(TranscribeError::InvalidPitch(format!(
                "semitone {} in octave {}",
                semitone, fields.octave
            ))),
        }
    }
}
impl Pitch {
    /// Middle C (60) is `C4`.
    pub fn from_midi(midi: u8) -> Self {
        Self {
            octave: (midi / 12) as i8 - 1,
            semitone: midi % 12,
        }
    }
    /// MIDI note number. `None` if pitch is out of MIDI range.
    pub fn midi(&self) -> Option<u8> {
        let midi = (self.octave as i16 + 1) * 12 + self.semitone as i16;
        u8::try_from(midi).ok().filter(|midi| *midi < 128)
    }
    pub fn octave(&self) -> i8 {
        self.octave
    }
    /// 0 is C, 11 is B.
    pub fn semitone(&self) -> u8 {
        self.semitone
    }

    /// Parse note name, accidentals (`#` or `b`, repeatable) and octave.
    ///
    /// # Example
    /// ```
    /// # use midi_score::primitives::Pitch;
    /// assert_eq!(Pitch::parse("C4").unwrap(), Pitch::from_midi(60));
    /// assert_eq!(Pitch::parse("Db4").unwrap(), Pitch::parse("C#4").unwrap());
    /// assert_eq!(Pitch::parse("B#3").unwrap(), Pitch::parse("C4").unwrap());
    /// assert_eq!(Pitch::parse("Cb4").unwrap(), Pitch::parse("B3").unwrap());
    /// ```
    pub fn parse(name: &str) -> TranscribeResult<Self> {
        let invalid = || TranscribeError::InvalidPitch(name.to_string());
        let mut chars = name.chars().peekable();
        let base: i16 = match chars.next().ok_or_else(invalid)? {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(invalid()),
        };
        let mut alteration: i16 = 0;
        while let Some(ch) = chars.peek() {
            let step = match ch {
                '#' => 1,
                'b' => -1,
                _ => break,
            };
            alteration = alteration.checked_add(step).ok_or_else(invalid)?;
            chars.next();
        }
        let octave: i8 = chars.collect::<String>().parse().map_err(|_| invalid())?;
        let absolute = ((octave as i16 + 1) * 12 + base)
            .checked_add(alteration)
            .ok_or_else(invalid)?;
        let octave = absolute.div_euclid(12) - 1;
        Ok(Self {
            octave: i8::try_from(octave).map_err(|_| invalid())?,
            semitone: absolute.rem_euclid(12) as u8,
        })
    }
}
impl From<u8> for Pitch {
    fn from(midi: u8) -> Self {
        Self::from_midi(midi)
    }
}
impl FromStr for Pitch {
    type Err = TranscribeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
impl Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", SHARP_NAMES[self.semitone as usize], self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::Pitch;
    use crate::error::TranscribeError;

    #[test]
    fn midi() {
        let a4 = Pitch::from_midi(69);
        assert_eq!(a4.octave(), 4);
        assert_eq!(a4.semitone(), 9);
        assert_eq!(a4.midi(), Some(69));
        assert_eq!(Pitch::from_midi(0).to_string(), "C-1");
        assert_eq!(Pitch::from_midi(127).to_string(), "G9");
        assert_eq!(Pitch::parse("A9").unwrap().midi(), None);
    }

    #[test]
    fn enharmonic() {
        assert_eq!(Pitch::parse("B#4").unwrap(), Pitch::from_midi(72));
        assert_eq!(Pitch::parse("Cb5").unwrap(), Pitch::from_midi(71));
        assert_eq!(Pitch::parse("Fbb3").unwrap(), Pitch::parse("D#3").unwrap());
        assert_eq!(Pitch::parse("Bb-1").unwrap(), Pitch::from_midi(10));
    }

    #[test]
    fn ordering() {
        assert!(Pitch::parse("B3").unwrap() < Pitch::parse("C4").unwrap());
        assert!(Pitch::parse("C#4").unwrap() > Pitch::parse("C4").unwrap());
    }

    #[test]
    fn invalid() {
        for name in ["", "H4", "C", "C#x", "c4", "C3000", "D-200", "G128"] {
            assert_eq!(
                Pitch::parse(name),
                Err(TranscribeError::InvalidPitch(name.to_string())),
                "name: {name}"
            );
        }
        let many_sharps = format!("C{}4", "#".repeat(40_000));
        assert!(Pitch::parse(&many_sharps).is_err());
    }

    #[test]
    fn deserialize_checks_semitone() {
        let pitch: Pitch = serde_json::from_str(r#"{"octave":4,"semitone":9}"#).unwrap();
        assert_eq!(pitch, Pitch::from_midi(69));
        assert_eq!(
            serde_json::to_string(&pitch).unwrap(),
            r#"{"octave":4,"semitone":9}"#
        );
        assert!(serde_json::from_str::<Pitch>(r#"{"octave":4,"semitone":40}"#).is_err());
    }
}
