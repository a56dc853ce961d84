use rand::Rng;
use ratatui::style::Color;
use spinny_core::{Celebration, Rgb};
use std::time::Duration;
use tachyonfx::{fx, Effect, Interpolation};

/// Banner fade played alongside the confetti.
pub fn celebration_fx(celebration: &Celebration) -> Effect {
    let color = celebration
        .colors
        .first()
        .copied()
        .map_or(Color::Yellow, to_color);
    let fade_ms = u32::try_from(celebration.lifetime.as_millis() / 4).unwrap_or(1250);
    fx::parallel(&[
        fx::coalesce((600, Interpolation::QuadOut)),
        fx::fade_from_fg(color, (fade_ms, Interpolation::SineOut)),
    ])
}

pub const fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub x: f64,
    pub fall_speed: f64,
    pub sway: f64,
    pub phase: f64,
    pub delay: f64,
    pub color: Rgb,
}

/// Pieces falling across the wheel canvas in `[-1, 1]` coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiBurst {
    pub pieces: Vec<ConfettiPiece>,
    pub started_at: Duration,
    pub lifetime: Duration,
}

const TOP: f64 = 1.1;
const BOTTOM: f64 = -1.1;

impl ConfettiBurst {
    pub fn new<R: Rng + ?Sized>(celebration: &Celebration, now: Duration, rng: &mut R) -> Self {
        let lifetime = celebration.lifetime.as_secs_f64().max(0.1);
        let pieces = if celebration.colors.is_empty() {
            Vec::new()
        } else {
            (0..celebration.pieces)
                .map(|_| ConfettiPiece {
                    x: rng.gen_range(-1.0..=1.0),
                    // Slowest pieces still clear the canvas before the burst ends
                    fall_speed: rng.gen_range(1.0..1.6) * (TOP - BOTTOM) / (lifetime * 0.7),
                    sway: rng.gen_range(0.02..0.08),
                    phase: rng.gen_range(0.0..std::f64::consts::TAU),
                    delay: rng.gen_range(0.0..lifetime * 0.3),
                    color: celebration.colors[rng.gen_range(0..celebration.colors.len())],
                })
                .collect()
        };
        Self {
            pieces,
            started_at: now,
            lifetime: celebration.lifetime,
        }
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.lifetime
    }

    /// Visible piece positions at `now`, paired with their color.
    pub fn positions(&self, now: Duration) -> Vec<(f64, f64, Rgb)> {
        let elapsed = now.saturating_sub(self.started_at).as_secs_f64();
        self.pieces
            .iter()
            .filter_map(|piece| {
                let t = elapsed - piece.delay;
                if t < 0.0 {
                    return None;
                }
                let y = piece.fall_speed.mul_add(-t, TOP);
                if y < BOTTOM {
                    return None;
                }
                let x = piece.sway.mul_add((t * 4.0 + piece.phase).sin(), piece.x);
                Some((x, y, piece.color))
            })
            .collect()
    }
}
