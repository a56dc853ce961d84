use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use spinny_core::entries::{Entry, EntryList, EntryPolicy};
use spinny_core::wheel::{IgnoredReason, SpinRequest, Wheel, WheelOptions};
use spinny_core::{Celebration, WinnerHistory};

use crate::animation::{advance_animation_counter, AnimationMode};

pub const HISTORY_CAPACITY: usize = 12;

/// Shape of the optional `entries.json` served next to the app.
#[derive(serde::Deserialize, Debug)]
pub struct EntriesFile {
    pub entries: Vec<String>,
}

#[derive(Debug)]
struct Sparkle {
    until: Duration,
    celebration: Celebration,
}

/// Browser session state, shared between the key handler and the frame
/// callback.
#[derive(Debug)]
pub struct WebWheel {
    pub entries: EntryList,
    pub wheel: Wheel,
    pub history: WinnerHistory,
    pub status: String,
    pub phase: f64,
    last_tick: Option<f64>,
    started_ms: Option<f64>,
    pending_entries: Option<Vec<Entry>>,
    winner_segment: Option<usize>,
    sparkle: Option<Sparkle>,
    rng: StdRng,
}

impl WebWheel {
    pub fn new(rng: StdRng) -> Self {
        Self {
            entries: EntryList::roulette(EntryPolicy::default()),
            wheel: Wheel::new(WheelOptions::default()),
            history: WinnerHistory::with_capacity(HISTORY_CAPACITY),
            status: "Loading entries.json...".to_string(),
            phase: 0.0,
            last_tick: None,
            started_ms: None,
            pending_entries: None,
            winner_segment: None,
            sparkle: None,
            rng,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Session clock from a `Date.now()` reading. The first reading is zero.
    pub fn session_time(&mut self, now_ms: f64) -> Duration {
        let start = *self.started_ms.get_or_insert(now_ms);
        Duration::from_secs_f64(((now_ms - start) / 1000.0).max(0.0))
    }

    /// Swaps in fetched entries, waiting for the current spin to finish.
    pub fn load_entries(&mut self, file: EntriesFile) {
        let entries: Vec<Entry> = file
            .entries
            .iter()
            .filter_map(|text| Entry::parse(text).ok())
            .collect();
        if entries.is_empty() {
            self.status = "entries.json has no entries, using roulette numbers".to_string();
            return;
        }
        if self.wheel.is_spinning() {
            self.pending_entries = Some(entries);
        } else {
            self.apply_entries(entries);
        }
    }

    pub fn use_fallback(&mut self, reason: &str) {
        self.status = format!("{reason}, using roulette numbers");
    }

    fn apply_entries(&mut self, entries: Vec<Entry>) {
        self.entries.set(entries);
        self.winner_segment = None;
        self.status = format!("Loaded {} entries", self.entries.len());
    }

    pub fn spin(&mut self, now_ms: f64) {
        let now = self.session_time(now_ms);
        match self.wheel.trigger(self.entries.as_slice(), now, &mut self.rng) {
            SpinRequest::Started(_) => {
                self.status = "Spinning...".to_string();
                self.winner_segment = None;
                self.sparkle = None;
            }
            SpinRequest::Ignored(IgnoredReason::NoEntries) => {
                self.status = "No entries to spin".to_string();
            }
            SpinRequest::Ignored(IgnoredReason::AlreadySpinning) => {}
        }
    }

    /// Per-frame update: advances the sparkle phase and reveals finished
    /// spins.
    pub fn tick(&mut self, now_ms: f64) {
        let now = self.session_time(now_ms);
        let mode = if self.sparkle.is_some() {
            AnimationMode::Running
        } else {
            AnimationMode::Paused
        };
        (self.phase, self.last_tick) =
            advance_animation_counter(self.phase, self.last_tick, now.as_secs_f64(), mode);

        if let Some(completion) = self.wheel.poll(now) {
            self.history.record_now(&completion.outcome);
            self.winner_segment = Some(completion.outcome.winning_index);
            self.status = format!("Winner: {}", completion.outcome.winner);
            self.sparkle = completion.celebration.map(|celebration| Sparkle {
                until: now + celebration.lifetime,
                celebration,
            });
            if let Some(entries) = self.pending_entries.take() {
                self.apply_entries(entries);
            }
        }

        if self.sparkle.as_ref().is_some_and(|sparkle| now >= sparkle.until) {
            self.sparkle = None;
        }
    }

    pub fn rotation(&mut self, now_ms: f64) -> f64 {
        let now = self.session_time(now_ms);
        self.wheel.displayed_rotation(now)
    }

    /// Celebration currently playing, if any.
    pub fn celebration(&self) -> Option<&Celebration> {
        self.sparkle.as_ref().map(|sparkle| &sparkle.celebration)
    }

    /// Segment to highlight once the wheel has stopped on a winner.
    pub fn winner_index(&self) -> Option<usize> {
        if self.wheel.is_spinning() {
            return None;
        }
        self.winner_segment
    }
}
