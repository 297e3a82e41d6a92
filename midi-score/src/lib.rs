//! Transcription of MIDI note events into a quantized polyphonic score.
//!
//! The stream of [`midi::MidiEvent`] goes to [`parse_events`], which
//! returns [`Score`]: list of monophonic [`Voice`]s and the metadata,
//! folded from meta events.
//!
//! # Example
//! ```
//! use midi_score::{
//!     midi::{MidiEvent, Timing},
//!     parse_events,
//!     primitives::Pitch,
//! };
//! let (c4, e4) = (Pitch::from_midi(60), Pitch::from_midi(64));
//! let events = [
//!     MidiEvent::note_on(0, c4, 90),
//!     MidiEvent::note_on(0, e4, 90),
//!     MidiEvent::note_off(480, e4),
//!     MidiEvent::note_off(960, c4),
//! ];
//! let score = parse_events(events, Timing::Metrical(480), None).unwrap();
//! assert_eq!(score.voices()[0].to_string(), "E4:Q,R:Q");
//! assert_eq!(score.voices()[1].to_string(), "C4:H");
//! ```

pub mod dom;
pub mod error;
pub mod midi;
pub mod primitives;
pub mod settings;

pub use dom::{midi_parse::parse_events, Score, ScoreMetadata, Voice};
pub use error::{TranscribeError, TranscribeResult};
pub use settings::TranscribeSettings;
