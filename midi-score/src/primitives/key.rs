//! Key signatures on the circle of fifths.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::TranscribeError;

/// Tonic names of major keys, from 7 flats to 7 sharps.
const MAJOR_TONICS: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];
/// Tonic names of minor keys, from 7 flats to 7 sharps.
const MINOR_TONICS: [&str; 15] = [
    "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#",
];
/// Each next sharp is a fifth above the previous.
const SHARPS_ORDER: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];
/// Each next flat is a fifth below the previous.
const FLATS_ORDER: [char; 7] = ['B', 'E', 'A', 'D', 'G', 'C', 'F'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scale {
    Major,
    Minor,
}

/// Positive `fifths` are sharps, negative are flats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "KeySignatureFields")]
pub struct KeySignature {
    fifths: i8,
    scale: Scale,
}

#[derive(Deserialize)]
struct KeySignatureFields {
    fifths: i8,
    scale: Scale,
}
impl TryFrom<KeySignatureFields> for KeySignature {
    type Error = TranscribeError;
    fn try_from(fields: KeySignatureFields) -> Result<Self, Self::Error> {
        Self::new(fields.fifths, fields.scale)
            .ok_or(TranscribeError::InvalidKeySignature(fields.fifths))
    }
}
impl KeySignature {
    /// `None` if there are more than 7 accidentals.
    pub fn new(fifths: i8, scale: Scale) -> Option<Self> {
        match fifths {
            -7..=7 => Some(Self { fifths, scale }),
            _ => None,
        }
    }
    pub fn fifths(&self) -> i8 {
        self.fifths
    }
    pub fn scale(&self) -> Scale {
        self.scale
    }
    pub fn tonic(&self) -> &'static str {
        let idx = (self.fifths + 7) as usize;
        match self.scale {
            Scale::Major => MAJOR_TONICS[idx],
            Scale::Minor => MINOR_TONICS[idx],
        }
    }
    pub fn is_sharp(&self) -> bool {
        self.fifths > 0
    }

    /// Note letters, altered by the key signature, in notation order.
    ///
    /// # Example
    /// ```
    /// # use midi_score::primitives::{KeySignature, Scale};
    /// let d_major = KeySignature::new(2, Scale::Major).unwrap();
    /// assert_eq!(d_major.accidentals(), vec!['F', 'C']);
    /// let b_flat = KeySignature::new(-2, Scale::Major).unwrap();
    /// assert_eq!(b_flat.accidentals(), vec!['B', 'E']);
    /// ```
    pub fn accidentals(&self) -> Vec<char> {
        let count = self.fifths.unsigned_abs() as usize;
        match self.is_sharp() {
            true => SHARPS_ORDER[..count].to_vec(),
            false => FLATS_ORDER[..count].to_vec(),
        }
    }
}
impl Display for KeySignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scale = match self.scale {
            Scale::Major => "major",
            Scale::Minor => "minor",
        };
        write!(f, "{} {}", self.tonic(), scale)
    }
}
