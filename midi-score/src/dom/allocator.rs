//! Distributes overlapping notes by monophonic voices.
//!
//! Every lane remembers the tick, where its last note was released.
//! Note goes to the first lane, that is free at the note attack. If no
//! lane is free, the new one is created. Gaps are filled by rests, so
//! position of every event in a lane is the sum of the previous
//! durations.
//!
//! Single pass and greedy: note, once placed, is never moved, and the
//! count of voices is not guaranteed to be minimal.

use itertools::Itertools;

use super::{timeline::ClosedNote, Voice};
use crate::{midi::Tick, primitives::Duration, settings::TrailingRests};

#[derive(Debug)]
struct Lane {
    voice: Voice,
    /// release tick of the last note
    cursor: Tick,
}
impl Lane {
    fn new(index: usize) -> Self {
        Self {
            voice: Voice::new(index),
            cursor: 0,
        }
    }
}

#[derive(Debug)]
pub struct VoiceAllocator {
    ticks_per_quarter: u16,
    lanes: Vec<Lane>,
}
impl VoiceAllocator {
    pub fn new(ticks_per_quarter: u16) -> Self {
        Self {
            ticks_per_quarter,
            lanes: Vec::new(),
        }
    }

    pub fn lanes_count(&self) -> usize {
        self.lanes.len()
    }

    /// Place notes, attacked at the same tick, highest first.
    /// So, the upper line tends to be in the first voice.
    pub fn place_attack(&mut self, tick: Tick, notes: Vec<ClosedNote>) {
        log::debug!("placing {} notes attacked at {}", notes.len(), tick);
        for note in notes
            .into_iter()
            .sorted_by(|a, b| b.pitch.cmp(&a.pitch))
        {
            self.place(note);
        }
    }

    /// Place note to the first free lane, creating new one if needed.
    ///
    /// # Returns
    /// Index of the lane, that got the note.
    pub fn place(&mut self, note: ClosedNote) -> usize {
        let index = match self
            .lanes
            .iter()
            .position(|lane| lane.cursor <= note.attack)
        {
            Some(index) => index,
            None => {
                let index = self.lanes.len();
                log::debug!("creating voice {} for {} at {}", index, note.pitch, note.attack);
                self.lanes.push(Lane::new(index));
                index
            }
        };
        let ticks_per_quarter = self.ticks_per_quarter;
        let lane = &mut self.lanes[index];
        for rest in Duration::decompose_ticks(note.attack - lane.cursor, ticks_per_quarter) {
            lane.voice.push_rest(rest);
        }
        if note.duration.is_zero() {
            log::debug!("note {} at {} is too short to notate", note.pitch, note.attack);
        }
        lane.voice.push_note(note.pitch, note.duration);
        lane.cursor = note.release;
        log::debug!(
            "voice {}: {}:{} at {}, free from {}",
            index,
            note.pitch,
            note.duration,
            note.attack,
            lane.cursor
        );
        index
    }

    /// Freeze lanes into voices.
    pub fn finish(self, trailing_rests: TrailingRests) -> Vec<Voice> {
        let ticks_per_quarter = self.ticks_per_quarter;
        let end = self.lanes.iter().map(|lane| lane.cursor).max().unwrap_or(0);
        self.lanes
            .into_iter()
            .map(|mut lane| {
                if trailing_rests == TrailingRests::PadToEnd {
                    for rest in Duration::decompose_ticks(end - lane.cursor, ticks_per_quarter) {
                        lane.voice.push_rest(rest);
                    }
                }
                lane.voice
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::VoiceAllocator;
    use crate::{
        dom::{timeline::ClosedNote, Voice},
        primitives::{Duration, Pitch},
        settings::TrailingRests,
    };

    fn note(name: &str, attack: u64, release: u64) -> ClosedNote {
        ClosedNote {
            pitch: Pitch::parse(name).unwrap(),
            attack,
            release,
            duration: Duration::from_ticks(release - attack, 480),
        }
    }
    fn voices(allocator: VoiceAllocator, trailing: TrailingRests) -> Vec<String> {
        allocator
            .finish(trailing)
            .iter()
            .map(Voice::to_string)
            .collect()
    }

    #[test]
    fn reuses_free_lane() {
        let mut alloc = VoiceAllocator::new(480);
        assert_eq!(alloc.place(note("D4", 0, 480)), 0);
        assert_eq!(alloc.place(note("E4", 960, 1440)), 0);
        assert_eq!(alloc.lanes_count(), 1);
        assert_eq!(voices(alloc, TrailingRests::Leave), vec!["D4:Q,R:Q,E4:Q"]);
    }

    #[test]
    fn new_lane_is_padded_from_start() {
        let mut alloc = VoiceAllocator::new(480);
        alloc.place(note("C5", 0, 960));
        assert_eq!(alloc.place(note("E5", 240, 960)), 1);
        assert_eq!(alloc.place(note("G5", 480, 960)), 2);
        assert_eq!(alloc.place(note("C6", 1440, 1680)), 0);
        assert_eq!(
            voices(alloc, TrailingRests::Leave),
            vec!["C5:H,R:Q,C6:E", "R:E,E5:Qd", "R:Q,G5:Q"]
        );
    }

    #[test]
    fn padding_to_end() {
        let mut alloc = VoiceAllocator::new(480);
        alloc.place(note("C5", 0, 960));
        alloc.place(note("E5", 240, 960));
        alloc.place(note("C6", 1440, 1680));
        assert_eq!(
            voices(alloc, TrailingRests::PadToEnd),
            vec!["C5:H,R:Q,C6:E", "R:E,E5:Qd,R:Qd"]
        );
    }

    #[test]
    fn long_gaps_are_split() {
        let mut alloc = VoiceAllocator::new(480);
        alloc.place(note("C4", 2400, 2880));
        alloc.place(note("D4", 2400, 2880));
        assert_eq!(
            voices(alloc, TrailingRests::Leave),
            vec!["R:W,R:Q,C4:Q", "R:W,R:Q,D4:Q"]
        );
    }

    #[test]
    fn chord_goes_highest_first() {
        let mut alloc = VoiceAllocator::new(480);
        alloc.place_attack(
            0,
            vec![note("C4", 0, 480), note("G4", 0, 480), note("E4", 0, 480)],
        );
        assert_eq!(
            voices(alloc, TrailingRests::Leave),
            vec!["G4:Q", "E4:Q", "C4:Q"]
        );
    }

    #[test]
    fn empty() {
        let alloc = VoiceAllocator::new(480);
        assert!(alloc.finish(TrailingRests::PadToEnd).is_empty());
    }
}
