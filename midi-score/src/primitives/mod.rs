//! Value types, from which Score is constructed.
//!
//! Durations are exact fractions of a whole note. Pitches, keys,
//! time signatures and tempo are plain values, which are never
//! mutated after construction.

pub mod duration;
pub mod event;
pub mod key;
pub mod pitch;
pub mod tempo;
pub mod time_signature;

pub use duration::{Duration, NoteValue};
pub use event::{EventInfo, EventType};
pub use key::{KeySignature, Scale};
pub use pitch::Pitch;
pub use tempo::Tempo;
pub use time_signature::TimeSignature;
