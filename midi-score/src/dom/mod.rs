//! Score, built from the flat event stream.
//!
//! Events go through [`timeline::Timeline`], which closes note
//! intervals, then through [`allocator::VoiceAllocator`], which puts
//! them into voices. Meta events are folded into
//! [`metadata::ScoreMetadata`]. See [`midi_parse::parse_events`].

use std::fmt::Display;

use itertools::Itertools;

use crate::{
    error::{TranscribeError, TranscribeResult},
    primitives::{Duration, EventInfo, KeySignature, Pitch, Tempo, TimeSignature},
};

pub mod allocator;
pub mod metadata;
pub mod midi_parse;
pub mod timeline;

pub use metadata::ScoreMetadata;

/// Monophonic line: notes and rests, one after another.
#[derive(Debug, PartialEq, Clone)]
pub struct Voice {
    index: usize,
    events: Vec<EventInfo>,
}
impl Voice {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            events: Vec::new(),
        }
    }

    /// Parse comma-separated events, like `"D5:H,R:Q,D5:Q"`.
    ///
    /// Only canonical durations are accepted, so output of [`Display`]
    /// is readable back unless the voice holds zero-length notes
    /// (printed as `C4:0`) or non-canonical sums.
    ///
    /// # Example
    /// ```
    /// # use midi_score::dom::Voice;
    /// # use fraction::Fraction;
    /// let voice = Voice::parse(0, "A4:Q, B4:Q, R:Q, C4:W").unwrap();
    /// assert_eq!(voice.events().len(), 4);
    /// assert_eq!(voice.total_duration().get(), Fraction::new(7u64, 4u64));
    /// assert_eq!(voice.to_string(), "A4:Q,B4:Q,R:Q,C4:W");
    /// ```
    pub fn parse(index: usize, events: &str) -> TranscribeResult<Self> {
        let events = events
            .split(',')
            .map(EventInfo::parse)
            .collect::<Result<Vec<_>, TranscribeError>>()?;
        Ok(Self { index, events })
    }

    pub fn index(&self) -> usize {
        self.index
    }
    pub fn events(&self) -> &Vec<EventInfo> {
        &self.events
    }
    pub fn push(&mut self, event: EventInfo) {
        self.events.push(event)
    }
    pub fn push_note(&mut self, pitch: Pitch, duration: Duration) {
        self.push(EventInfo::note(pitch, duration))
    }
    pub fn push_rest(&mut self, duration: Duration) {
        self.push(EventInfo::rest(duration))
    }

    pub fn total_duration(&self) -> Duration {
        self.events.iter().map(|ev| ev.duration).sum()
    }
    pub fn notes_count(&self) -> usize {
        self.events.iter().filter(|ev| !ev.is_rest()).count()
    }
}
impl Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.events.iter().join(","))
    }
}

/// Transcribed piece. Immutable.
#[derive(Debug, PartialEq, Clone)]
pub struct Score {
    metadata: ScoreMetadata,
    voices: Vec<Voice>,
}
impl Score {
    pub fn new(metadata: ScoreMetadata, voices: Vec<Voice>) -> Self {
        Self { metadata, voices }
    }
    pub fn metadata(&self) -> &ScoreMetadata {
        &self.metadata
    }
    pub fn tempo(&self) -> &Tempo {
        &self.metadata.tempo
    }
    pub fn time_signature(&self) -> &TimeSignature {
        &self.metadata.time_signature
    }
    pub fn key_signature(&self) -> Option<&KeySignature> {
        self.metadata.key_signature.as_ref()
    }
    pub fn voices(&self) -> &Vec<Voice> {
        &self.voices
    }
    pub fn notes_count(&self) -> usize {
        self.voices.iter().map(Voice::notes_count).sum()
    }
}
impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "tempo: {}", self.metadata.tempo)?;
        writeln!(f, "time signature: {}", self.metadata.time_signature)?;
        if let Some(key) = &self.metadata.key_signature {
            writeln!(f, "key: {key}")?;
        }
        for voice in self.voices.iter() {
            writeln!(f, "voice {}: {}", voice.index, voice)?;
        }
        Ok(())
    }
}
