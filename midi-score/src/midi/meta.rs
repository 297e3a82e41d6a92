//! Meta events and decoding of their payloads.

use crate::primitives::{KeySignature, Scale, Tempo, TimeSignature};

/// Kinds of meta events, by the type byte.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MetaKind {
    SequenceNumber,
    Text,
    Copyright,
    TrackName,
    InstrumentName,
    Lyric,
    Marker,
    CuePoint,
    ChannelPrefix,
    EndOfTrack,
    Tempo,
    SmpteOffset,
    TimeSignature,
    KeySignature,
    SequencerSpecific,
    Unknown(u8),
}
impl MetaKind {
    pub fn from_type_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::SequenceNumber,
            0x01 => Self::Text,
            0x02 => Self::Copyright,
            0x03 => Self::TrackName,
            0x04 => Self::InstrumentName,
            0x05 => Self::Lyric,
            0x06 => Self::Marker,
            0x07 => Self::CuePoint,
            0x20 => Self::ChannelPrefix,
            0x2F => Self::EndOfTrack,
            0x51 => Self::Tempo,
            0x54 => Self::SmpteOffset,
            0x58 => Self::TimeSignature,
            0x59 => Self::KeySignature,
            0x7F => Self::SequencerSpecific,
            x => Self::Unknown(x),
        }
    }
    pub fn type_byte(&self) -> u8 {
        match self {
            Self::SequenceNumber => 0x00,
            Self::Text => 0x01,
            Self::Copyright => 0x02,
            Self::TrackName => 0x03,
            Self::InstrumentName => 0x04,
            Self::Lyric => 0x05,
            Self::Marker => 0x06,
            Self::CuePoint => 0x07,
            Self::ChannelPrefix => 0x20,
            Self::EndOfTrack => 0x2F,
            Self::Tempo => 0x51,
            Self::SmpteOffset => 0x54,
            Self::TimeSignature => 0x58,
            Self::KeySignature => 0x59,
            Self::SequencerSpecific => 0x7F,
            Self::Unknown(x) => *x,
        }
    }
}

/// Meta events, that contribute to the score.
#[derive(Debug, PartialEq, Clone)]
pub enum MetaMessage {
    Tempo(Tempo),
    TimeSignature(TimeSignature),
    KeySignature(KeySignature),
    TrackName(String),
    InstrumentName(String),
    Copyright(String),
    ChannelPrefix(u8),
    EndOfTrack,
}
impl MetaMessage {
    /// Decode payload of the meta event.
    ///
    /// `None` for kinds, that have no effect on the score, and for
    /// malformed or undeterminable payloads (which are logged).
    ///
    /// # Example
    /// ```
    /// # use midi_score::midi::{MetaKind, MetaMessage};
    /// # use midi_score::primitives::{Tempo, TimeSignature};
    /// assert_eq!(
    ///     MetaMessage::decode(MetaKind::Tempo, &[0x07, 0xA1, 0x20]),
    ///     Some(MetaMessage::Tempo(Tempo::new(120)))
    /// );
    /// assert_eq!(
    ///     MetaMessage::decode(MetaKind::TimeSignature, &[6, 3, 24, 8]),
    ///     Some(MetaMessage::TimeSignature(TimeSignature::new(6, 8).unwrap()))
    /// );
    /// assert_eq!(MetaMessage::decode(MetaKind::Lyric, b"la"), None);
    /// ```
    pub fn decode(kind: MetaKind, payload: &[u8]) -> Option<Self> {
        match kind {
            MetaKind::Tempo => decode_tempo(payload),
            MetaKind::TimeSignature => decode_time_signature(payload),
            MetaKind::KeySignature => decode_key_signature(payload),
            MetaKind::TrackName => Some(Self::TrackName(text(payload))),
            MetaKind::InstrumentName => Some(Self::InstrumentName(text(payload))),
            MetaKind::Copyright => Some(Self::Copyright(text(payload))),
            MetaKind::ChannelPrefix => payload.first().map(|ch| Self::ChannelPrefix(*ch)),
            MetaKind::EndOfTrack => Some(Self::EndOfTrack),
            kind => {
                log::debug!("skipping meta event of kind {:?}", kind);
                None
            }
        }
    }
}

fn text(payload: &[u8]) -> String {
    String::from_utf8_lossy(payload).to_string()
}

/// 3 bytes big-endian, microseconds per quarter note.
fn decode_tempo(payload: &[u8]) -> Option<MetaMessage> {
    let microseconds = match payload {
        [a, b, c, ..] => u32::from_be_bytes([0, *a, *b, *c]),
        _ => {
            log::warn!("tempo meta event is too short: {:?}", payload);
            return None;
        }
    };
    match Tempo::from_microseconds(microseconds) {
        Some(tempo) => Some(MetaMessage::Tempo(tempo)),
        None => {
            log::warn!("tempo meta event with zero microseconds per quarter");
            None
        }
    }
}

/// numerator, power of two of denominator, (metronome, 32nd per beat)
fn decode_time_signature(payload: &[u8]) -> Option<MetaMessage> {
    let (numerator, power) = match payload {
        [numerator, power, ..] => (*numerator, *power),
        _ => {
            log::warn!("time signature meta event is too short: {:?}", payload);
            return None;
        }
    };
    let denominator = 1u32.checked_shl(power as u32).unwrap_or(0);
    match TimeSignature::new(numerator, denominator) {
        Ok(ts) => Some(MetaMessage::TimeSignature(ts)),
        Err(err) => {
            log::warn!("skipping time signature: {}", err);
            None
        }
    }
}

/// signed count of accidentals, 0 for major, 1 for minor
fn decode_key_signature(payload: &[u8]) -> Option<MetaMessage> {
    let (fifths, mode) = match payload {
        [fifths, mode, ..] => (*fifths as i8, *mode),
        _ => {
            log::warn!("key signature meta event is too short: {:?}", payload);
            return None;
        }
    };
    let scale = match mode {
        0 => Scale::Major,
        _ => Scale::Minor,
    };
    match KeySignature::new(fifths, scale) {
        Some(key) => Some(MetaMessage::KeySignature(key)),
        None => {
            log::warn!("can not determine key signature with {} accidentals", fifths);
            None
        }
    }
}
