//! Turning a random draw into a rotation and a winner.

use std::num::NonZeroUsize;

use rand::Rng;
use serde::Serialize;

use crate::entries::Entry;
use crate::geometry::{pointer_angle, segment_index_at, FULL_TURN};

/// Fewest full turns a spin may make. Lower requests are raised to this.
pub const DEFAULT_MIN_TURNS: u32 = 5;

/// Whole degrees in `[0, 360)` added on top of the full turns.
const OFFSET_STEPS: u32 = 360;

/// Everything decided by one spin, computed the instant it is triggered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinOutcome {
    pub prior_rotation: f64,
    pub spin_angle: f64,
    pub new_rotation: f64,
    pub winning_index: usize,
    pub winner: Entry,
}

/// Draws the random part of a spin, uniform over `0..360`.
pub fn draw_offset<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..OFFSET_STEPS)
}

/// `min_turns` full rotations plus `offset` degrees, never fewer than
/// `DEFAULT_MIN_TURNS` turns.
pub fn spin_angle(min_turns: u32, offset: u32) -> f64 {
    let turns = min_turns.max(DEFAULT_MIN_TURNS);
    f64::from(turns).mul_add(FULL_TURN, f64::from(offset % OFFSET_STEPS))
}

/// Index of the winning segment once the wheel rests at `new_rotation`.
pub fn resolve_index(new_rotation: f64, count: NonZeroUsize) -> usize {
    segment_index_at(pointer_angle(new_rotation), count)
}

/// Spins from `prior_rotation` by a known offset. Returns `None` for an
/// empty entry list.
pub fn spin_with_offset(
    prior_rotation: f64,
    entries: &[Entry],
    min_turns: u32,
    offset: u32,
) -> Option<SpinOutcome> {
    let count = NonZeroUsize::new(entries.len())?;
    let spin_angle = spin_angle(min_turns, offset);
    let new_rotation = prior_rotation + spin_angle;
    let winning_index = resolve_index(new_rotation, count);
    let winner = entries.get(winning_index)?.clone();

    tracing::debug!(
        prior_rotation,
        spin_angle,
        new_rotation,
        resting = new_rotation % FULL_TURN,
        winning_index,
        entries = count.get(),
        "resolved spin"
    );

    Some(SpinOutcome {
        prior_rotation,
        spin_angle,
        new_rotation,
        winning_index,
        winner,
    })
}

pub fn spin<R: Rng + ?Sized>(
    prior_rotation: f64,
    entries: &[Entry],
    min_turns: u32,
    rng: &mut R,
) -> Option<SpinOutcome> {
    if entries.is_empty() {
        return None;
    }
    spin_with_offset(prior_rotation, entries, min_turns, draw_offset(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::parse_entries;
    use crate::geometry::{segment_at_screen_angle, Segment, POINTER_SCREEN_ANGLE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abcd() -> Vec<Entry> {
        parse_entries("A\nB\nC\nD")
    }

    #[test]
    fn zero_offset_lands_on_first_entry() {
        let outcome = spin_with_offset(0.0, &abcd(), DEFAULT_MIN_TURNS, 0).unwrap();
        assert!((outcome.spin_angle - 1800.0).abs() < f64::EPSILON);
        assert!((outcome.new_rotation - 1800.0).abs() < f64::EPSILON);
        assert_eq!(outcome.winning_index, 0);
        assert_eq!(outcome.winner.as_str(), "A");
    }

    #[test]
    fn offset_one_hundred_lands_on_third_entry() {
        let outcome = spin_with_offset(0.0, &abcd(), DEFAULT_MIN_TURNS, 100).unwrap();
        assert!((outcome.new_rotation - 1900.0).abs() < f64::EPSILON);
        assert_eq!(outcome.winning_index, 2);
        assert_eq!(outcome.winner.as_str(), "C");
    }

    #[test]
    fn resolution_uses_accumulated_rotation() {
        // second spin from 1900: 1900 + 1890 = 3790, rests at 190, pointer on 170 -> B
        let outcome = spin_with_offset(1900.0, &abcd(), DEFAULT_MIN_TURNS, 90).unwrap();
        assert!((outcome.new_rotation - 3790.0).abs() < f64::EPSILON);
        assert_eq!(outcome.winner.as_str(), "B");
    }

    #[test]
    fn single_entry_always_wins() {
        let entries = parse_entries("only");
        for offset in 0..360 {
            let outcome = spin_with_offset(f64::from(offset) * 7.0, &entries, 5, offset).unwrap();
            assert_eq!(outcome.winning_index, 0);
        }
    }

    #[test]
    fn empty_list_does_not_spin() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(spin(0.0, &[], DEFAULT_MIN_TURNS, &mut rng).is_none());
        assert!(spin_with_offset(0.0, &[], DEFAULT_MIN_TURNS, 12).is_none());
    }

    #[test]
    fn resolution_is_deterministic_for_a_rotation() {
        for n in 1..=50 {
            let count = NonZeroUsize::new(n).unwrap();
            for degrees in 0..1080 {
                let rotation = f64::from(degrees) * 1.5;
                assert_eq!(resolve_index(rotation, count), resolve_index(rotation, count));
            }
        }
    }

    #[test]
    fn winner_is_the_segment_painted_under_the_pointer() {
        for n in 1..=100_usize {
            let entries: Vec<Entry> = (0..n)
                .map(|i| Entry::parse(&format!("e{i}")).unwrap())
                .collect();
            let count = NonZeroUsize::new(n).unwrap();
            let mut prior = 0.0;
            for offset in (0..360).step_by(7) {
                let outcome = spin_with_offset(prior, &entries, DEFAULT_MIN_TURNS, offset).unwrap();
                let painted =
                    segment_at_screen_angle(POINTER_SCREEN_ANGLE, outcome.new_rotation, count);
                assert_eq!(painted, outcome.winning_index, "n={n} offset={offset}");
                assert_eq!(outcome.winner, entries[painted]);

                let segment = Segment::new(painted, count);
                let pointer = crate::geometry::pointer_angle(outcome.new_rotation);
                assert!(pointer >= segment.start_angle - 1e-9);
                assert!(pointer < segment.end_angle() + 1e-9);
                prior = outcome.new_rotation;
            }
        }
    }

    #[test]
    fn every_spin_adds_at_least_five_turns() {
        let mut rng = StdRng::seed_from_u64(42);
        let entries = abcd();
        let mut prior = 0.0;
        for _ in 0..500 {
            let outcome = spin(prior, &entries, DEFAULT_MIN_TURNS, &mut rng).unwrap();
            assert!(outcome.new_rotation - prior >= 1800.0);
            assert!(outcome.new_rotation - prior < 2160.0);
            prior = outcome.new_rotation;
        }
    }

    #[test]
    fn offsets_are_whole_degrees_below_a_turn() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(draw_offset(&mut rng) < 360);
        }
        assert!((spin_angle(5, 725) - 1805.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fewer_than_five_turns_are_raised() {
        for turns in 0..DEFAULT_MIN_TURNS {
            assert!((spin_angle(turns, 0) - 1800.0).abs() < f64::EPSILON);
        }
        assert!((spin_angle(7, 10) - 2530.0).abs() < f64::EPSILON);
        let outcome = spin_with_offset(0.0, &abcd(), 1, 0).unwrap();
        assert!(outcome.spin_angle >= 1800.0);
    }

    #[test]
    fn edge_landing_picks_segment_starting_there() {
        // n = 4, resting at 270: pointer on 90, the start of B
        let outcome = spin_with_offset(0.0, &abcd(), DEFAULT_MIN_TURNS, 270).unwrap();
        assert_eq!(outcome.winner.as_str(), "B");
        // resting at 180: pointer on 180, the start of C
        let outcome = spin_with_offset(0.0, &abcd(), DEFAULT_MIN_TURNS, 180).unwrap();
        assert_eq!(outcome.winner.as_str(), "C");
    }
}
