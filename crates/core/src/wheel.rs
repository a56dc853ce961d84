//! The spin lifecycle: trigger, animate, reveal.
//!
//! Time is passed in by the caller as a monotonic offset from session start,
//! so the same machine runs under `Instant` in a terminal and under
//! `Date.now()` in a browser.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::entries::Entry;
use crate::palette::{Rgb, CONFETTI_COLORS};
use crate::spin::{spin, SpinOutcome, DEFAULT_MIN_TURNS};

pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(5000);
pub const DEFAULT_CONFETTI_PIECES: usize = 150;
pub const DEFAULT_CELEBRATION_LIFETIME: Duration = Duration::from_millis(5000);

/// Visual effect the UI should play when a winner is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Celebration {
    pub pieces: usize,
    pub lifetime: Duration,
    pub colors: Vec<Rgb>,
}

impl Default for Celebration {
    fn default() -> Self {
        Self {
            pieces: DEFAULT_CONFETTI_PIECES,
            lifetime: DEFAULT_CELEBRATION_LIFETIME,
            colors: CONFETTI_COLORS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelOptions {
    /// How long the wheel animates before the winner is revealed.
    pub spin_duration: Duration,
    /// Full turns every spin completes before the random offset.
    pub min_turns: u32,
    /// `None` disables the reveal effect.
    pub celebration: Option<Celebration>,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            spin_duration: DEFAULT_SPIN_DURATION,
            min_turns: DEFAULT_MIN_TURNS,
            celebration: Some(Celebration::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinState {
    pub is_spinning: bool,
    pub cumulative_rotation: f64,
    pub last_winner: Option<Entry>,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingSpin {
    outcome: SpinOutcome,
    started_at: Duration,
}

/// What a renderer needs to know about a spin that was just started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinStarted {
    pub from_rotation: f64,
    pub to_rotation: f64,
    pub reveal_at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    AlreadySpinning,
    NoEntries,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinRequest {
    Started(SpinStarted),
    Ignored(IgnoredReason),
}

impl SpinRequest {
    pub const fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

/// Emitted once per spin, when the animation has finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinCompletion {
    pub outcome: SpinOutcome,
    pub celebration: Option<Celebration>,
}

#[derive(Debug, Clone)]
pub struct Wheel {
    options: WheelOptions,
    cumulative_rotation: f64,
    last_winner: Option<Entry>,
    pending: Option<PendingSpin>,
}

impl Wheel {
    /// Builds an idle wheel. `min_turns` below `DEFAULT_MIN_TURNS` is raised.
    pub fn new(mut options: WheelOptions) -> Self {
        options.min_turns = options.min_turns.max(DEFAULT_MIN_TURNS);
        Self {
            options,
            cumulative_rotation: 0.0,
            last_winner: None,
            pending: None,
        }
    }

    pub const fn options(&self) -> &WheelOptions {
        &self.options
    }

    pub const fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    /// Rotation the wheel rests at between spins.
    pub const fn cumulative_rotation(&self) -> f64 {
        self.cumulative_rotation
    }

    pub const fn last_winner(&self) -> Option<&Entry> {
        self.last_winner.as_ref()
    }

    pub fn state(&self) -> SpinState {
        SpinState {
            is_spinning: self.is_spinning(),
            cumulative_rotation: self.cumulative_rotation,
            last_winner: self.last_winner.clone(),
        }
    }

    /// Starts a spin over a snapshot of `entries`. Ignored while another
    /// spin is animating or when there is nothing to spin.
    pub fn trigger<R: Rng + ?Sized>(
        &mut self,
        entries: &[Entry],
        now: Duration,
        rng: &mut R,
    ) -> SpinRequest {
        if self.pending.is_some() {
            tracing::debug!("spin ignored: already spinning");
            return SpinRequest::Ignored(IgnoredReason::AlreadySpinning);
        }
        let Some(outcome) = spin(self.cumulative_rotation, entries, self.options.min_turns, rng)
        else {
            tracing::debug!("spin ignored: no entries");
            return SpinRequest::Ignored(IgnoredReason::NoEntries);
        };

        let started = SpinStarted {
            from_rotation: outcome.prior_rotation,
            to_rotation: outcome.new_rotation,
            reveal_at: now + self.options.spin_duration,
        };
        tracing::info!(
            entries = entries.len(),
            spin_angle = outcome.spin_angle,
            "spin started"
        );
        self.last_winner = None;
        self.pending = Some(PendingSpin {
            outcome,
            started_at: now,
        });
        SpinRequest::Started(started)
    }

    /// Reveals the winner once the spin duration has elapsed. Returns
    /// `Some` exactly once per spin.
    pub fn poll(&mut self, now: Duration) -> Option<SpinCompletion> {
        let pending = self.pending.as_ref()?;
        if now.saturating_sub(pending.started_at) < self.options.spin_duration {
            return None;
        }
        let PendingSpin { outcome, .. } = self.pending.take()?;
        self.cumulative_rotation = outcome.new_rotation;
        self.last_winner = Some(outcome.winner.clone());
        tracing::info!(
            winner = %outcome.winner,
            index = outcome.winning_index,
            rotation = outcome.new_rotation,
            "spin revealed"
        );
        Some(SpinCompletion {
            outcome,
            celebration: self.options.celebration.clone(),
        })
    }

    /// Fraction of the current spin animation completed, `None` when idle.
    pub fn progress(&self, now: Duration) -> Option<f64> {
        let pending = self.pending.as_ref()?;
        let total = self.options.spin_duration.as_secs_f64();
        if total <= 0.0 {
            return Some(1.0);
        }
        let elapsed = now.saturating_sub(pending.started_at).as_secs_f64();
        Some((elapsed / total).clamp(0.0, 1.0))
    }

    /// Rotation to draw at `now`. Never decreases during a spin and reaches
    /// the resolved rotation exactly when the spin completes.
    pub fn displayed_rotation(&self, now: Duration) -> f64 {
        match (&self.pending, self.progress(now)) {
            (Some(pending), Some(progress)) => {
                let outcome = &pending.outcome;
                if progress >= 1.0 {
                    outcome.new_rotation
                } else {
                    ease_out_cubic(progress).mul_add(outcome.spin_angle, outcome.prior_rotation)
                }
            }
            _ => self.cumulative_rotation,
        }
    }
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(WheelOptions::default())
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
