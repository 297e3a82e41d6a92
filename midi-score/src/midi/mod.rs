//! Input events: flat, chronological stream of note and meta events,
//! already extracted from the file container.

pub mod meta;

use crate::{
    error::{TranscribeError, TranscribeResult},
    primitives::Pitch,
};

pub use meta::{MetaKind, MetaMessage};

pub type Tick = u64;

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;

#[derive(Debug, PartialEq, Clone)]
pub enum MidiEvent {
    NoteOn {
        tick: Tick,
        pitch: Pitch,
        velocity: u8,
    },
    NoteOff {
        tick: Tick,
        pitch: Pitch,
        velocity: u8,
    },
    Meta {
        tick: Tick,
        kind: MetaKind,
        payload: Vec<u8>,
    },
}
impl MidiEvent {
    pub fn note_on(tick: Tick, pitch: Pitch, velocity: u8) -> Self {
        Self::NoteOn {
            tick,
            pitch,
            velocity,
        }
    }
    pub fn note_off(tick: Tick, pitch: Pitch) -> Self {
        Self::NoteOff {
            tick,
            pitch,
            velocity: 0,
        }
    }
    pub fn meta(tick: Tick, kind: MetaKind, payload: impl Into<Vec<u8>>) -> Self {
        Self::Meta {
            tick,
            kind,
            payload: payload.into(),
        }
    }

    /// Decode raw channel message (status byte and two data bytes).
    ///
    /// Only note-on and note-off are of interest, everything else
    /// (controllers, pitch bend, etc.) gives `None`.
    ///
    /// # Example
    /// ```
    /// # use midi_score::{midi::MidiEvent, primitives::Pitch};
    /// assert_eq!(
    ///     MidiEvent::from_channel_message(960, &[0x91, 60, 100]),
    ///     Some(MidiEvent::note_on(960, Pitch::from_midi(60), 100))
    /// );
    /// assert_eq!(MidiEvent::from_channel_message(0, &[0xB0, 7, 100]), None);
    /// ```
    pub fn from_channel_message(tick: Tick, raw: &[u8]) -> Option<Self> {
        let (status, key, velocity) = match raw {
            [status, key, velocity, ..] => (*status, *key, *velocity),
            _ => return None,
        };
        if key > 127 {
            return None;
        }
        match status & 0xF0 {
            NOTE_ON => Some(Self::note_on(tick, key.into(), velocity)),
            NOTE_OFF => Some(Self::NoteOff {
                tick,
                pitch: key.into(),
                velocity,
            }),
            _ => None,
        }
    }

    pub fn tick(&self) -> Tick {
        match self {
            Self::NoteOn { tick, .. } => *tick,
            Self::NoteOff { tick, .. } => *tick,
            Self::Meta { tick, .. } => *tick,
        }
    }
}

/// Division of the source sequence.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Timing {
    /// Pulses (ticks) per quarter note.
    Metrical(u16),
    /// SMPTE frames per second and ticks per frame.
    Timecode { fps: u8, ticks_per_frame: u8 },
}
impl Timing {
    /// The only resolution that can be transcribed into note values.
    pub fn ticks_per_quarter(&self) -> TranscribeResult<u16> {
        match self {
            Self::Metrical(0) => Err(TranscribeError::UnsupportedTiming(
                "zero ticks per quarter note".to_string(),
            )),
            Self::Metrical(ppq) => Ok(*ppq),
            Self::Timecode {
                fps,
                ticks_per_frame,
            } => Err(TranscribeError::UnsupportedTiming(format!(
                "timecode with {fps} fps and {ticks_per_frame} ticks per frame"
            ))),
        }
    }
}
