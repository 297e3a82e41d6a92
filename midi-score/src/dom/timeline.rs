//! Accumulates note-on and note-off events into closed note intervals,
//! grouped by the attack tick.

use std::collections::HashMap;

use crate::{
    midi::Tick,
    primitives::{Duration, Pitch},
    settings::HangingNotes,
};

/// Note, that was attacked, and possibly released.
///
/// Release and duration are unknown until note-off arrives.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct NoteInterval {
    pub pitch: Pitch,
    pub attack: Tick,
    release: Option<Tick>,
    duration: Option<Duration>,
}
impl NoteInterval {
    fn open(attack: Tick, pitch: Pitch) -> Self {
        Self {
            pitch,
            attack,
            release: None,
            duration: None,
        }
    }
    fn close(&mut self, release: Tick, ticks_per_quarter: u16) {
        let release = release.max(self.attack);
        self.release = Some(release);
        self.duration = Some(Duration::from_ticks(
            release - self.attack,
            ticks_per_quarter,
        ));
    }
    pub fn is_open(&self) -> bool {
        self.release.is_none()
    }
    pub fn release(&self) -> Option<Tick> {
        self.release
    }
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
    pub fn closed(&self) -> Option<ClosedNote> {
        Some(ClosedNote {
            pitch: self.pitch,
            attack: self.attack,
            release: self.release?,
            duration: self.duration?,
        })
    }
}

/// Note with known release, ready to be placed into voice.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ClosedNote {
    pub pitch: Pitch,
    pub attack: Tick,
    pub release: Tick,
    pub duration: Duration,
}

/// Notes, attacked at the same tick.
pub type Attack = (Tick, Vec<ClosedNote>);

#[derive(Debug)]
pub struct Timeline {
    ticks_per_quarter: u16,
    /// notes by attack tick, in order of arrival
    attacks: HashMap<Tick, Vec<NoteInterval>>,
    /// distinct attack ticks in chronological order
    order: Vec<Tick>,
    last_tick: Tick,
}
impl Timeline {
    pub fn new(ticks_per_quarter: u16) -> Self {
        Self {
            ticks_per_quarter,
            attacks: HashMap::new(),
            order: Vec::new(),
            last_tick: 0,
        }
    }

    /// Mark that the stream reached the tick.
    pub fn advance(&mut self, tick: Tick) {
        self.last_tick = self.last_tick.max(tick);
    }

    /// Note-on with zero velocity is treated as note-off.
    pub fn note_on(&mut self, tick: Tick, pitch: Pitch, velocity: u8) {
        if velocity == 0 {
            self.note_off(tick, pitch);
            return;
        }
        self.advance(tick);
        log::debug!("note on: {} at {}", pitch, tick);
        let notes = self.attacks.entry(tick).or_insert_with(|| {
            self.order.push(tick);
            Vec::new()
        });
        notes.push(NoteInterval::open(tick, pitch));
    }

    /// Close the most recently attacked open note of the pitch.
    ///
    /// # Returns
    /// `false` if no open note matched: such note-off is dropped.
    pub fn note_off(&mut self, tick: Tick, pitch: Pitch) -> bool {
        self.advance(tick);
        for attack in self.order.iter().rev() {
            let interval = self.attacks.get_mut(attack).and_then(|notes| {
                notes
                    .iter_mut()
                    .find(|note| note.is_open() && note.pitch == pitch)
            });
            if let Some(interval) = interval {
                interval.close(tick, self.ticks_per_quarter);
                log::debug!(
                    "note off: {} at {}, attacked at {}, duration: {:?}",
                    pitch,
                    tick,
                    attack,
                    interval.duration()
                );
                return true;
            }
        }
        log::warn!("note off {} at {} has no sounding note. Dropped.", pitch, tick);
        false
    }

    /// Number of notes, still waiting for note-off.
    pub fn open_notes(&self) -> usize {
        self.attacks
            .values()
            .flatten()
            .filter(|note| note.is_open())
            .count()
    }

    /// Hand off closed notes, grouped by attack tick in chronological
    /// order.
    pub fn finish(mut self, hanging_notes: HangingNotes) -> Vec<Attack> {
        self.order.sort_unstable();
        let last_tick = self.last_tick;
        let ticks_per_quarter = self.ticks_per_quarter;
        let mut attacks = self.attacks;
        self.order
            .into_iter()
            .filter_map(|tick| {
                let notes = attacks
                    .remove(&tick)?
                    .into_iter()
                    .filter_map(|mut note| {
                        if note.is_open() {
                            match hanging_notes {
                                HangingNotes::Drop => {
                                    log::warn!(
                                        "note {} at {} has never been released. Dropped.",
                                        note.pitch,
                                        note.attack
                                    );
                                    return None;
                                }
                                HangingNotes::CloseAtLastTick => {
                                    note.close(last_tick, ticks_per_quarter)
                                }
                            }
                        }
                        note.closed()
                    })
                    .collect::<Vec<_>>();
                match notes.is_empty() {
                    true => None,
                    false => Some((tick, notes)),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Timeline;
    use crate::{
        primitives::{Duration, Pitch},
        settings::HangingNotes,
    };

    fn p(name: &str) -> Pitch {
        Pitch::parse(name).unwrap()
    }
    fn d(code: &str) -> Duration {
        Duration::parse(code).unwrap()
    }

    #[test]
    fn groups_by_attack() {
        let mut tl = Timeline::new(480);
        tl.note_on(0, p("C4"), 64);
        tl.note_on(0, p("E4"), 64);
        tl.note_on(240, p("G4"), 64);
        tl.note_off(480, p("E4"));
        tl.note_off(480, p("G4"));
        tl.note_off(960, p("C4"));
        let attacks = tl.finish(HangingNotes::Drop);
        assert_eq!(attacks.len(), 2);
        let (tick, notes) = &attacks[0];
        assert_eq!(*tick, 0);
        assert_eq!(
            notes.iter().map(|n| (n.pitch, n.duration)).collect::<Vec<_>>(),
            vec![(p("C4"), d("H")), (p("E4"), d("Q"))]
        );
        let (tick, notes) = &attacks[1];
        assert_eq!(*tick, 240);
        assert_eq!(notes[0].duration, d("E"));
        assert_eq!(notes[0].release, 480);
    }

    #[test]
    fn retrigger_closes_most_recent() {
        let mut tl = Timeline::new(480);
        tl.note_on(0, p("A4"), 64);
        tl.note_on(480, p("A4"), 64);
        tl.note_off(960, p("A4"));
        tl.note_off(1920, p("A4"));
        let attacks = tl.finish(HangingNotes::Drop);
        assert_eq!(attacks[0].1[0].duration, d("W"));
        assert_eq!(attacks[1].1[0].duration, d("Q"));
    }

    #[test]
    fn zero_velocity_is_note_off() {
        let mut tl = Timeline::new(480);
        tl.note_on(0, p("C4"), 64);
        tl.note_on(480, p("C4"), 0);
        assert_eq!(tl.open_notes(), 0);
        let attacks = tl.finish(HangingNotes::Drop);
        assert_eq!(attacks.len(), 1);
        assert_eq!(attacks[0].1[0].duration, d("Q"));
        assert_eq!(attacks[0].1[0].release, 480);
    }

    #[test]
    fn unmatched_note_off_is_dropped() {
        let mut tl = Timeline::new(480);
        assert!(!tl.note_off(100, p("C4")));
        tl.note_on(200, p("C4"), 64);
        assert!(!tl.note_off(300, p("D4")));
        assert!(tl.note_off(680, p("C4")));
        assert!(!tl.note_off(700, p("C4")));
        assert_eq!(tl.finish(HangingNotes::Drop).len(), 1);
    }

    #[test]
    fn hanging_notes() {
        let build = || {
            let mut tl = Timeline::new(480);
            tl.note_on(0, p("C4"), 64);
            tl.note_on(0, p("G4"), 64);
            tl.note_off(480, p("C4"));
            tl.advance(960);
            tl
        };
        let tl = build();
        assert_eq!(tl.open_notes(), 1);
        let attacks = tl.finish(HangingNotes::Drop);
        assert_eq!(attacks[0].1.len(), 1);

        let attacks = build().finish(HangingNotes::CloseAtLastTick);
        assert_eq!(attacks[0].1.len(), 2);
        assert_eq!(attacks[0].1[1].pitch, p("G4"));
        assert_eq!(attacks[0].1[1].release, 960);
        assert_eq!(attacks[0].1[1].duration, d("H"));
    }

    #[test]
    fn open_interval_has_no_duration() {
        let mut tl = Timeline::new(480);
        tl.note_on(0, p("C4"), 64);
        let interval = tl.attacks[&0][0];
        assert!(interval.is_open());
        assert_eq!(interval.duration(), None);
        assert_eq!(interval.closed(), None);
    }
}
