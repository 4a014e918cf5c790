use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Candidates sampled per shell before giving up on a layout.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// How close two shells may get before a candidate position is rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapPolicy {
    /// Rejects anything within one shell size on both axes, touching included.
    /// Stricter than real overlap, keeps visible gaps between shells.
    Proximity,
    /// Rejects only squares that actually intersect.
    Exact,
}

impl OverlapPolicy {
    pub const fn overlaps(self, a: Position, b: Position, shell_size: Coord) -> bool {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        match self {
            Self::Proximity => dx <= shell_size && dy <= shell_size,
            Self::Exact => dx < shell_size && dy < shell_size,
        }
    }
}

impl Default for OverlapPolicy {
    fn default() -> Self {
        Self::Proximity
    }
}

/// Uniform candidate with `x` in `[0, width - size)` and `y` in `[0, height - size)`.
/// `None` when the board leaves no room for a shell on either axis.
pub fn sample_position<R: Rng + ?Sized>(rng: &mut R, board: &BoardConfig) -> Option<Position> {
    if board.x_span() == 0 || board.y_span() == 0 {
        return None;
    }
    Some(Position::new(
        rng.random_range(0..board.x_span()),
        rng.random_range(0..board.y_span()),
    ))
}

/// Places `count` shells one after another, each avoiding those placed before it.
pub fn place_positions<R: Rng + ?Sized>(
    rng: &mut R,
    board: &BoardConfig,
    overlap: OverlapPolicy,
    count: usize,
) -> Result<Vec<Position>> {
    if board.x_span() == 0 || board.y_span() == 0 {
        return Err(GameError::BoardTooSmall);
    }

    let mut placed: Vec<Position> = Vec::with_capacity(count);
    for index in 0..count {
        let pos = (0..MAX_PLACEMENT_ATTEMPTS)
            .filter_map(|_| sample_position(rng, board))
            .find(|&candidate| {
                placed
                    .iter()
                    .all(|&other| !overlap.overlaps(candidate, other, board.shell_size))
            })
            .ok_or_else(|| {
                log::warn!(
                    "Gave up placing shell {} of {} after {} attempts on {:?}",
                    index + 1,
                    count,
                    MAX_PLACEMENT_ATTEMPTS,
                    board
                );
                GameError::PlacementUnsatisfiable
            })?;
        placed.push(pos);
    }

    Ok(placed)
}

/// Regular shuffle step: every shell jumps to a fresh random spot.
pub fn scatter_layout<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    current: &Layout,
) -> Result<Layout> {
    let positions = place_positions(rng, &config.board, config.overlap, current.len())?;
    Ok(current
        .iter()
        .zip(positions)
        .map(|(&shell, pos)| shell.moved_to(pos))
        .collect())
}

/// Last shuffle step: shells go back to the starting row, trading x slots among themselves.
///
/// Only x is permuted, every shell keeps its starting y. This way the ball always ends up in one of the slots the
/// player saw at the start.
pub fn settle_layout<R: Rng + ?Sized>(rng: &mut R, initial: &Layout) -> Layout {
    let mut xs: Vec<Coord> = initial.iter().map(|shell| shell.x).collect();
    xs.shuffle(rng);
    initial
        .iter()
        .zip(xs)
        .map(|(shell, x)| Shell::new(x, shell.y, shell.has_ball))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn proximity_overlap_is_inclusive() {
        let size = 100;
        let origin = Position::new(200, 200);

        assert!(OverlapPolicy::Proximity.overlaps(origin, Position::new(300, 300), size));
        assert!(OverlapPolicy::Proximity.overlaps(origin, Position::new(100, 250), size));
        assert!(!OverlapPolicy::Proximity.overlaps(origin, Position::new(301, 200), size));
        assert!(!OverlapPolicy::Proximity.overlaps(origin, Position::new(200, 99), size));
    }

    #[test]
    fn exact_overlap_allows_touching_squares() {
        let size = 100;
        let origin = Position::new(200, 200);

        assert!(!OverlapPolicy::Exact.overlaps(origin, Position::new(300, 200), size));
        assert!(OverlapPolicy::Exact.overlaps(origin, Position::new(299, 200), size));
        assert!(OverlapPolicy::Exact.overlaps(origin, origin, size));
    }

    #[test]
    fn placed_positions_stay_on_board_and_apart() {
        let board = BoardConfig::default();
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let positions = place_positions(&mut rng, &board, OverlapPolicy::Proximity, 3).unwrap();

            assert_eq!(positions.len(), 3);
            for (i, &a) in positions.iter().enumerate() {
                assert!(a.x < board.x_span() && a.y < board.y_span());
                for &b in &positions[i + 1..] {
                    assert!(!OverlapPolicy::Proximity.overlaps(a, b, board.shell_size));
                }
            }
        }
    }

    #[test]
    fn crowded_board_fails_instead_of_spinning() {
        // every candidate lands within 50px of every other one
        let board = BoardConfig::new(150, 150, 100);
        let mut rng = SmallRng::seed_from_u64(7);

        assert_eq!(
            place_positions(&mut rng, &board, OverlapPolicy::Exact, 2),
            Err(GameError::PlacementUnsatisfiable)
        );
        // a single shell always fits
        assert!(place_positions(&mut rng, &board, OverlapPolicy::Exact, 1).is_ok());
    }

    #[test]
    fn degenerate_board_is_rejected() {
        let board = BoardConfig::new(100, 600, 100);
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            place_positions(&mut rng, &board, OverlapPolicy::Proximity, 3),
            Err(GameError::BoardTooSmall)
        );
    }

    #[test]
    fn sampling_needs_room_on_both_axes() {
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(sample_position(&mut rng, &BoardConfig::new(100, 600, 100)), None);
        assert_eq!(sample_position(&mut rng, &BoardConfig::new(800, 100, 100)), None);
        assert!(sample_position(&mut rng, &BoardConfig::new(800, 600, 0)).is_some());

        let board = BoardConfig::default();
        for _ in 0..100 {
            let pos = sample_position(&mut rng, &board).unwrap();
            assert!(pos.x < board.x_span() && pos.y < board.y_span());
        }
    }

    #[test]
    fn scatter_keeps_ball_with_its_shell() {
        let config = GameConfig::default();
        let initial = config.preset_layout().with_ball_at(2);
        let mut rng = SmallRng::seed_from_u64(3);

        let scattered = scatter_layout(&mut rng, &config, &initial).unwrap();

        assert_eq!(scattered.len(), 3);
        assert_eq!(scattered.ball_index(), Some(2));
    }

    #[test]
    fn settle_permutes_starting_x_slots_only() {
        let initial = GameConfig::default().preset_layout().with_ball_at(1);
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let settled = settle_layout(&mut rng, &initial);

            let mut xs: Vec<Coord> = settled.iter().map(|shell| shell.x).collect();
            xs.sort_unstable();
            assert_eq!(xs, [150, 350, 550]);
            for (before, after) in initial.iter().zip(settled.iter()) {
                assert_eq!(before.y, after.y);
                assert_eq!(before.has_ball, after.has_ball);
            }
        }
    }
}
