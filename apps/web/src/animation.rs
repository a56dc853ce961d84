use spinny_core::Rgb;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnimationMode {
    Running,
    Paused,
}

const SPARKLE_SPEED: f64 = 3.0;
const ANIMATION_MAX_FRAME_DELTA: f64 = 0.25;
const ANIMATION_FULL_ROTATION: f64 = 2.0 * std::f64::consts::PI;
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;
/// Browsers can't afford a full confetti burst per frame on the canvas.
pub const MAX_SPARKLES: usize = 48;

/// Advances the sparkle phase by the time since the last frame. A tab left
/// in the background comes back with one clamped step, not a jump.
pub fn advance_animation_counter(
    counter: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: AnimationMode,
) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).max(0.0).min(ANIMATION_MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let next_counter = match mode {
        AnimationMode::Running => {
            (counter + delta * SPARKLE_SPEED).rem_euclid(ANIMATION_FULL_ROTATION)
        }
        AnimationMode::Paused => counter.rem_euclid(ANIMATION_FULL_ROTATION),
    };

    (next_counter, Some(now_seconds))
}

/// Twinkling points around the rim, in `[-1, 1]` canvas coordinates.
pub fn sparkle_points(phase: f64, pieces: usize, colors: &[Rgb]) -> Vec<(f64, f64, Rgb)> {
    if colors.is_empty() {
        return Vec::new();
    }
    (0..pieces.min(MAX_SPARKLES))
        .filter_map(|i| {
            let seed = i as f64;
            let twinkle = (phase * 2.0 + seed).sin();
            if twinkle < 0.0 {
                return None;
            }
            let angle = seed.mul_add(GOLDEN_ANGLE, phase * 0.5);
            let radius = 0.06f64.mul_add(twinkle, 0.9);
            Some((
                angle.sin() * radius,
                angle.cos() * radius,
                colors[i % colors.len()],
            ))
        })
        .collect()
}
