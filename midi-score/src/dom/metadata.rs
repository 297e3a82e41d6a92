//! Folding of meta events into the score metadata.
//!
//! Policies differ by kind:
//! - tempo: the first marking wins, later ones are ignored;
//! - time signature: the last one wins;
//! - key signature: the last determinable one wins;
//! - track name, instrument name, copyright: the first one wins.

use crate::{
    midi::MetaMessage,
    primitives::{KeySignature, Tempo, TimeSignature},
};

/// Defaults are 120 bpm on quarter and 4/4.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ScoreMetadata {
    pub tempo: Tempo,
    pub time_signature: TimeSignature,
    pub key_signature: Option<KeySignature>,
    pub track_name: Option<String>,
    pub instrument_name: Option<String>,
    pub copyright: Option<String>,
}
impl ScoreMetadata {
    /// Fold messages, in order of the stream.
    ///
    /// # Example
    /// ```
    /// # use midi_score::dom::ScoreMetadata;
    /// # use midi_score::midi::MetaMessage;
    /// # use midi_score::primitives::{Tempo, TimeSignature};
    /// let meta = ScoreMetadata::fold([
    ///     MetaMessage::Tempo(Tempo::new(90)),
    ///     MetaMessage::TimeSignature(TimeSignature::new(3, 4).unwrap()),
    ///     MetaMessage::Tempo(Tempo::new(140)),
    ///     MetaMessage::TimeSignature(TimeSignature::new(6, 8).unwrap()),
    /// ]);
    /// assert_eq!(meta.tempo, Tempo::new(90));
    /// assert_eq!(meta.time_signature, TimeSignature::new(6, 8).unwrap());
    /// ```
    pub fn fold(messages: impl IntoIterator<Item = MetaMessage>) -> Self {
        messages
            .into_iter()
            .fold(MetadataFold::default(), MetadataFold::apply)
            .finish()
    }
}

#[derive(Debug, Default)]
struct MetadataFold {
    tempo: Option<Tempo>,
    time_signature: Option<TimeSignature>,
    key_signature: Option<KeySignature>,
    track_name: Option<String>,
    instrument_name: Option<String>,
    copyright: Option<String>,
}
impl MetadataFold {
    fn apply(mut self, message: MetaMessage) -> Self {
        match message {
            MetaMessage::Tempo(tempo) => match self.tempo {
                None => {
                    log::info!("tempo: {}", tempo);
                    self.tempo = Some(tempo);
                }
                Some(first) => {
                    log::warn!("ignoring tempo change {} after {}", tempo, first)
                }
            },
            MetaMessage::TimeSignature(ts) => {
                log::info!("time signature: {}", ts);
                self.time_signature = Some(ts);
            }
            MetaMessage::KeySignature(key) => {
                log::info!("key signature: {}", key);
                self.key_signature = Some(key);
            }
            MetaMessage::TrackName(name) => {
                log::info!("track name: {}", name);
                self.track_name.get_or_insert(name);
            }
            MetaMessage::InstrumentName(name) => {
                log::info!("instrument name: {}", name);
                self.instrument_name.get_or_insert(name);
            }
            MetaMessage::Copyright(notice) => {
                log::info!("copyright notice: {}", notice);
                self.copyright.get_or_insert(notice);
            }
            MetaMessage::ChannelPrefix(channel) => {
                log::debug!("channel prefix: {}", channel)
            }
            MetaMessage::EndOfTrack => log::debug!("end of track"),
        }
        self
    }

    fn finish(self) -> ScoreMetadata {
        ScoreMetadata {
            tempo: self.tempo.unwrap_or_default(),
            time_signature: self.time_signature.unwrap_or_default(),
            key_signature: self.key_signature,
            track_name: self.track_name,
            instrument_name: self.instrument_name,
            copyright: self.copyright,
        }
    }
}
