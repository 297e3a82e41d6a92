use crate::{
    error::TranscribeResult,
    midi::{MetaMessage, MidiEvent, Timing},
    settings::TranscribeSettings,
};

use super::{allocator::VoiceAllocator, timeline::Timeline, Score, ScoreMetadata};

/// Transcribe chronological event stream into [`Score`].
///
/// Fails only if timing is not in ticks per quarter note. Everything
/// else (unmatched note-offs, unknown meta events, undeterminable keys)
/// is skipped.
///
/// # Example
/// ```
/// use midi_score::{
///     dom::midi_parse::parse_events,
///     midi::{MidiEvent, Timing},
///     primitives::Pitch,
/// };
/// let d4 = Pitch::parse("D4").unwrap();
/// let score = parse_events(
///     [MidiEvent::note_on(0, d4, 100), MidiEvent::note_off(960, d4)],
///     Timing::Metrical(480),
///     None,
/// )
/// .unwrap();
/// assert_eq!(score.voices()[0].to_string(), "D4:H");
/// ```
pub fn parse_events(
    events: impl IntoIterator<Item = MidiEvent>,
    timing: Timing,
    settings: impl Into<Option<TranscribeSettings>>,
) -> TranscribeResult<Score> {
    let ticks_per_quarter = timing.ticks_per_quarter()?;
    let settings = settings.into().unwrap_or_default();
    let mut timeline = Timeline::new(ticks_per_quarter);
    let mut messages = Vec::new();
    for event in events {
        match event {
            MidiEvent::NoteOn {
                tick,
                pitch,
                velocity,
            } => timeline.note_on(tick, pitch, velocity),
            MidiEvent::NoteOff { tick, pitch, .. } => {
                timeline.note_off(tick, pitch);
            }
            MidiEvent::Meta {
                tick,
                kind,
                payload,
            } => {
                timeline.advance(tick);
                messages.extend(MetaMessage::decode(kind, &payload));
            }
        }
    }

    let mut allocator = VoiceAllocator::new(ticks_per_quarter);
    for (tick, notes) in timeline.finish(settings.hanging_notes) {
        allocator.place_attack(tick, notes);
    }
    let voices = allocator.finish(settings.trailing_rests);
    let score = Score::new(ScoreMetadata::fold(messages), voices);
    log::info!(
        "transcribed {} notes into {} voices",
        score.notes_count(),
        score.voices().len()
    );
    Ok(score)
}
