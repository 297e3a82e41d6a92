//! A smallest piece of music, that is held by Voice.
use std::fmt::Display;

use super::{Duration, Pitch};
use crate::error::{TranscribeError, TranscribeResult};

/// Can be considered as "Generic" Event.
///
/// EventInfo is about length, while EventType responds for
/// event representation.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct EventInfo {
    pub event: EventType,
    pub duration: Duration,
}
impl EventInfo {
    pub fn new(event: EventType, duration: Duration) -> Self {
        Self { event, duration }
    }
    pub fn note(pitch: Pitch, duration: Duration) -> Self {
        Self::new(EventType::Note(pitch), duration)
    }
    pub fn rest(duration: Duration) -> Self {
        Self::new(EventType::Rest, duration)
    }
    pub fn is_rest(&self) -> bool {
        self.event == EventType::Rest
    }

    /// Parse `<pitch or R>:<duration code>`, e.g. `C#4:Qd` or `R:E`.
    ///
    /// # Example
    /// ```
    /// # use midi_score::primitives::{Duration, EventInfo, Pitch};
    /// let ev = EventInfo::parse("D5:H").unwrap();
    /// assert_eq!(
    ///     ev,
    ///     EventInfo::note(Pitch::from_midi(74), Duration::parse("H").unwrap())
    /// );
    /// assert!(EventInfo::parse("R:Sd").unwrap().is_rest());
    /// ```
    pub fn parse(token: &str) -> TranscribeResult<Self> {
        let (event, duration) = token
            .split_once(':')
            .ok_or_else(|| TranscribeError::InvalidFormat(token.to_string()))?;
        let duration = Duration::parse(duration.trim())?;
        match event.trim() {
            "R" => Ok(Self::rest(duration)),
            pitch => Ok(Self::note(Pitch::parse(pitch)?, duration)),
        }
    }
}
impl Display for EventInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.event, self.duration)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum EventType {
    #[default]
    Rest,
    Note(Pitch),
}
impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rest => write!(f, "R"),
            Self::Note(pitch) => write!(f, "{pitch}"),
        }
    }
}
