use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// What to do with voices, that finished earlier than the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrailingRests {
    /// Fill every voice by rests up to the latest release in the piece,
    /// so all voices have the same total duration.
    PadToEnd,
    /// Leave voices of different total duration.
    Leave,
}

/// What to do with notes, that never received note-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HangingNotes {
    Drop,
    /// Release them at the last tick of the stream.
    CloseAtLastTick,
}

/// Settings of transcription.
///
/// # Example
/// ```
/// # use midi_score::settings::{TranscribeSettings, TrailingRests, HangingNotes};
/// let settings = TranscribeSettings::default();
/// assert_eq!(settings.trailing_rests, TrailingRests::PadToEnd);
/// assert_eq!(settings.hanging_notes, HangingNotes::Drop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct TranscribeSettings {
    #[derivative(Default(value = "TrailingRests::PadToEnd"))]
    pub trailing_rests: TrailingRests,
    #[derivative(Default(value = "HangingNotes::Drop"))]
    pub hanging_notes: HangingNotes,
}
impl TranscribeSettings {
    pub fn new(trailing_rests: TrailingRests, hanging_notes: HangingNotes) -> Self {
        Self {
            trailing_rests,
            hanging_notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HangingNotes, TrailingRests, TranscribeSettings};

    #[test]
    fn deserialize_partial() {
        let settings: TranscribeSettings =
            serde_json::from_str(r#"{"trailing_rests": "Leave"}"#).unwrap();
        assert_eq!(
            settings,
            TranscribeSettings::new(TrailingRests::Leave, HangingNotes::Drop)
        );
        let settings: TranscribeSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, TranscribeSettings::default());
    }

    #[test]
    fn serialize() {
        let settings =
            TranscribeSettings::new(TrailingRests::PadToEnd, HangingNotes::CloseAtLastTick);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(
            json,
            r#"{"trailing_rests":"PadToEnd","hanging_notes":"CloseAtLastTick"}"#
        );
        assert_eq!(
            serde_json::from_str::<TranscribeSettings>(&json).unwrap(),
            settings
        );
    }
}
