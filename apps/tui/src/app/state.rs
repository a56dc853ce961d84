use crate::config::{split_entries, AppConfig};
use crate::ui::effects::{celebration_fx, ConfettiBurst};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spinny_core::entries::{default_roulette_numbers, EntryError, EntryList};
use spinny_core::wheel::{IgnoredReason, SpinCompletion, SpinRequest, Wheel};
use spinny_core::WinnerHistory;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tachyonfx::Effect;
use throbber_widgets_tui::ThrobberState;

/// Winners kept for the history panel.
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Wheel,
    Entries,
}

/// What the text prompt on the entries screen is collecting.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputState {
    Browsing,
    AddingEntry,
    AddingBulk,
    EditingEntry(usize),
    EnteringRange,
}

impl InputState {
    pub const fn is_text_entry(self) -> bool {
        !matches!(self, Self::Browsing)
    }
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub input_state: InputState,
    pub current_input: String,
    pub status_message: String,
    pub show_help: bool,
    pub config: AppConfig,
    pub entries: EntryList,
    pub wheel: Wheel,
    pub history: WinnerHistory,
    pub selected_entry_index: usize,
    /// Segment of the last revealed winner, dropped once the entries change.
    pub winner_segment: Option<usize>,
    pub started: Instant,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub throbber_state: ThrobberState,
    pub completion_fx: Mutex<Option<Effect>>,
    pub confetti: Option<ConfettiBurst>,
    pub rng: StdRng,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("input_state", &self.input_state)
            .field("entries", &self.entries.len())
            .field("wheel", &self.wheel.state())
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: AppConfig, rng: StdRng) -> Self {
        let now = Instant::now();
        Self {
            running: true,
            screen: AppScreen::Wheel,
            input_state: InputState::Browsing,
            current_input: String::new(),
            status_message: String::new(),
            show_help: false,
            entries: EntryList::with_entries(config.policy, config.initial_entries.clone()),
            wheel: Wheel::new(config.wheel_options()),
            history: WinnerHistory::with_capacity(HISTORY_CAPACITY),
            config,
            selected_entry_index: 0,
            winner_segment: None,
            started: now,
            last_frame: now,
            last_tick: Duration::ZERO,
            throbber_state: ThrobberState::default(),
            completion_fx: Mutex::new(None),
            confetti: None,
            rng,
        }
    }

    /// Monotonic session clock handed to the wheel.
    pub fn session_time(&self) -> Duration {
        self.last_frame.duration_since(self.started)
    }

    pub fn update(&mut self) {
        self.advance_clock(Instant::now());
    }

    pub fn advance_clock(&mut self, now: Instant) {
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.last_tick = delta;

        if self.wheel.is_spinning() {
            self.throbber_state.calc_next();
        }

        if let Some(completion) = self.wheel.poll(self.session_time()) {
            self.finish_spin(&completion);
        }

        let session = self.session_time();
        if self
            .confetti
            .as_ref()
            .is_some_and(|burst| burst.is_finished(session))
        {
            self.confetti = None;
        }

        if let Ok(mut fx) = self.completion_fx.lock() {
            if fx.as_ref().is_some_and(Effect::done) {
                *fx = None;
            }
        }
    }

    pub fn spin(&mut self) {
        let now = self.session_time();
        match self.wheel.trigger(self.entries.as_slice(), now, &mut self.rng) {
            SpinRequest::Started(_) => {
                self.status_message = "Spinning...".to_string();
                self.winner_segment = None;
                self.confetti = None;
            }
            SpinRequest::Ignored(IgnoredReason::NoEntries) => {
                self.status_message = "Add entries to the wheel to begin".to_string();
            }
            // A second press while spinning is dropped
            SpinRequest::Ignored(IgnoredReason::AlreadySpinning) => {}
        }
    }

    fn finish_spin(&mut self, completion: &SpinCompletion) {
        let outcome = &completion.outcome;
        self.history.record_now(outcome);
        self.winner_segment = Some(outcome.winning_index);
        self.status_message = format!("Winner: {}", outcome.winner);

        if let Some(celebration) = &completion.celebration {
            let session = self.session_time();
            self.confetti = Some(ConfettiBurst::new(celebration, session, &mut self.rng));
            if let Ok(mut fx) = self.completion_fx.lock() {
                *fx = Some(celebration_fx(celebration));
            }
        }
    }

    /// Entry edits are refused mid-spin so the drawn wheel and the snapshot
    /// being resolved stay identical.
    fn ensure_editable(&mut self) -> bool {
        if self.wheel.is_spinning() {
            self.status_message = "Error: Wait for the wheel to stop before editing".to_string();
            return false;
        }
        true
    }

    /// Segment to outline, only while the wheel rests on its winner.
    pub fn highlighted_segment(&self) -> Option<usize> {
        if self.wheel.is_spinning() {
            return None;
        }
        self.winner_segment
    }

    fn report(&mut self, result: Result<String, EntryError>) {
        self.status_message = match result {
            Ok(message) => {
                self.winner_segment = None;
                message
            }
            Err(error) => format!("Error: {error}"),
        };
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.selected_entry_index >= self.entries.len() {
            self.selected_entry_index = self.entries.len().saturating_sub(1);
        }
    }

    pub fn begin_input(&mut self, state: InputState) {
        if !self.ensure_editable() {
            return;
        }
        self.current_input = match state {
            InputState::EditingEntry(index) => self
                .entries
                .get(index)
                .map(ToString::to_string)
                .unwrap_or_default(),
            InputState::EnteringRange => format!(
                "{}-{}",
                self.entries.policy().number_min,
                self.entries.policy().number_max.min(spinny_core::entries::ROULETTE_MAX)
            ),
            _ => String::new(),
        };
        self.input_state = state;
        self.status_message.clear();
    }

    pub fn cancel_input(&mut self) {
        self.input_state = InputState::Browsing;
        self.current_input.clear();
    }

    /// Applies the prompt contents according to `input_state`.
    pub fn submit_input(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        let input = std::mem::take(&mut self.current_input);
        let state = std::mem::replace(&mut self.input_state, InputState::Browsing);
        match state {
            InputState::Browsing => {}
            InputState::AddingEntry => {
                let result = self
                    .entries
                    .add(&input)
                    .map(|entry| format!("Added {entry}"));
                if result.is_ok() {
                    self.selected_entry_index = self.entries.len().saturating_sub(1);
                }
                self.report(result);
            }
            InputState::AddingBulk => {
                let lines = split_entries(&input)
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                let result = self
                    .entries
                    .add_bulk(&lines)
                    .map(|added| format!("Added {added} entries"));
                self.report(result);
            }
            InputState::EditingEntry(index) => {
                let result = self
                    .entries
                    .edit(index, &input)
                    .map(|()| "Entry updated".to_string());
                self.report(result);
            }
            InputState::EnteringRange => match parse_range(&input) {
                Some((min, max)) => {
                    let result = self
                        .entries
                        .generate_range(min, max)
                        .map(|count| format!("Generated {count} numbers"));
                    self.selected_entry_index = 0;
                    self.report(result);
                }
                None => {
                    self.status_message = format!("Error: Expected a range like 0-36, got {input:?}");
                }
            },
        }
    }

    pub fn remove_selected(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        let result = self
            .entries
            .remove(self.selected_entry_index)
            .map(|entry| format!("Removed {entry}"));
        self.report(result);
    }

    pub fn clear_entries(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        self.entries.clear();
        self.winner_segment = None;
        self.selected_entry_index = 0;
        self.status_message = "Cleared all entries".to_string();
    }

    pub fn reset_to_roulette(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        self.entries.set(default_roulette_numbers());
        self.winner_segment = None;
        self.selected_entry_index = 0;
        self.status_message = "Loaded roulette numbers 0-36".to_string();
    }

    pub fn is_celebrating(&self) -> bool {
        self.confetti.is_some()
    }
}

/// Parses `min-max`, allowing a leading minus on either bound.
pub fn parse_range(input: &str) -> Option<(i64, i64)> {
    let input = input.trim();
    let split = input
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-' || c == ' ' || c == ',')
        .map(|(index, _)| index)?;
    let (min, rest) = input.split_at(split);
    let rest = rest.trim_start();
    let max = rest.strip_prefix(['-', ',']).unwrap_or(rest).trim();
    Some((min.trim().parse().ok()?, max.parse().ok()?))
}
