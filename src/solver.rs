//! Best-first search from a start state to a goal state.
//!
//! The frontier is a min-heap of `(f, g, key)` entries, so ties on the
//! estimate go to the shallower node and then to the smaller packed key.
//! Neither heuristic is admissible, so a found path is not necessarily the
//! shortest.
//!
//! Successors are generated on a scratch cube rebuilt from the popped key.
//! Every move is applied, the result packed, and the move's inverse applied
//! again before the next move is tried.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, info, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::codec::StateKey;
use crate::error::SolveError;
use crate::grid::CubeState;
use crate::heuristic::Heuristic;
use crate::moves::{Move, MoveSet};

/// What the search expands with and how it scores states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub moves: MoveSet,
    pub heuristic: Heuristic,
    /// Stop after this many frontier pops. `None` searches until the goal is
    /// found or the frontier is empty.
    pub max_pops: Option<usize>,
}

impl SearchConfig {
    /// The nine quarter turns scored by the global heuristic.
    pub fn global() -> Self {
        Self {
            moves: MoveSet::Generators,
            heuristic: Heuristic::Global,
            max_pops: None,
        }
    }

    /// The eighteen outer-face forms scored by the Alpha heuristic.
    pub fn alpha() -> Self {
        Self {
            moves: MoveSet::FaceTurns,
            heuristic: Heuristic::Alpha,
            max_pops: None,
        }
    }

    pub fn with_max_pops(mut self, max_pops: usize) -> Self {
        self.max_pops = Some(max_pops);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::global()
    }
}

/// Counters collected over one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier entries removed, including stale ones.
    pub pops: usize,
    /// Frontier entries added, including the start.
    pub pushes: usize,
    /// Distinct states expanded.
    pub closed: usize,
    /// Lowest heuristic value seen on any generated state.
    pub best_estimate: u32,
}

/// A move sequence that takes the start state to the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub stats: SearchStats,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Solution),
    /// The frontier ran dry. The goal is not reachable with the configured
    /// move set.
    Exhausted(SearchStats),
    /// `max_pops` was reached first.
    BudgetSpent(SearchStats),
}

impl SearchOutcome {
    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::Exhausted(stats) | SearchOutcome::BudgetSpent(stats) => stats,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Searches for a move sequence from `start` to `goal`.
///
/// Returns an error only if a found path cannot be turned back into moves,
/// which means the move engine and the packed key disagree.
pub fn solve(
    start: &CubeState,
    goal: &CubeState,
    config: &SearchConfig,
) -> Result<SearchOutcome, SolveError> {
    let moves = config.moves.moves();
    let goal_key = StateKey::from_state(goal);
    let start_key = StateKey::from_state(start);
    let start_estimate = config.heuristic.estimate(start, goal);

    let mut frontier: BinaryHeap<Reverse<(u32, u32, StateKey)>> = BinaryHeap::new();
    let mut best_g: FxHashMap<StateKey, u32> = FxHashMap::default();
    let mut predecessor: FxHashMap<StateKey, StateKey> = FxHashMap::default();
    let mut closed: FxHashSet<StateKey> = FxHashSet::default();

    let mut stats = SearchStats {
        best_estimate: start_estimate,
        ..SearchStats::default()
    };

    frontier.push(Reverse((start_estimate, 0, start_key)));
    best_g.insert(start_key, 0);
    stats.pushes += 1;

    loop {
        if config.max_pops.is_some_and(|limit| stats.pops >= limit) {
            stats.closed = closed.len();
            info!(
                "search budget spent: {} pops, {} pushes, {} closed",
                stats.pops, stats.pushes, stats.closed
            );
            return Ok(SearchOutcome::BudgetSpent(stats));
        }

        let Some(Reverse((f, g, key))) = frontier.pop() else {
            break;
        };
        stats.pops += 1;
        trace!("pop f={f} g={g}");

        if key == goal_key {
            stats.closed = closed.len();
            let path = walk_predecessors(&predecessor, start_key, goal_key);
            let moves = reconstruct_path(&path, moves)?;
            info!(
                "solved in {} moves: {} pops, {} pushes, {} closed",
                moves.len(),
                stats.pops,
                stats.pushes,
                stats.closed
            );
            return Ok(SearchOutcome::Solved(Solution { moves, stats }));
        }

        // entries superseded by a cheaper path are left in the heap
        if !closed.insert(key) {
            continue;
        }

        let parent = key.to_state();
        let mut scratch = parent;
        let successor_g = g + 1;

        for &mv in moves {
            scratch.apply(mv);
            let successor_key = StateKey::from_state(&scratch);
            let estimate = if closed.contains(&successor_key)
                || best_g
                    .get(&successor_key)
                    .is_some_and(|&known| known <= successor_g)
            {
                None
            } else {
                Some(config.heuristic.estimate(&scratch, goal))
            };
            scratch.apply(mv.inverse());
            debug_assert_eq!(scratch, parent, "{mv} and its inverse disagree");

            let Some(estimate) = estimate else {
                continue;
            };

            best_g.insert(successor_key, successor_g);
            predecessor.insert(successor_key, key);
            frontier.push(Reverse((successor_g + estimate, successor_g, successor_key)));
            stats.pushes += 1;

            if estimate < stats.best_estimate {
                stats.best_estimate = estimate;
                debug!(
                    "best estimate {estimate} at depth {successor_g} after {} pops",
                    stats.pops
                );
            }
        }
    }

    stats.closed = closed.len();
    info!(
        "search exhausted: {} pops, {} pushes, {} closed",
        stats.pops, stats.pushes, stats.closed
    );
    Ok(SearchOutcome::Exhausted(stats))
}

/// Follows predecessor links back from `goal` and returns the states from
/// `start` to `goal` inclusive.
fn walk_predecessors(
    predecessor: &FxHashMap<StateKey, StateKey>,
    start: StateKey,
    goal: StateKey,
) -> Vec<StateKey> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(&previous) = predecessor.get(&current) else {
            break;
        };
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Recovers the move between each pair of consecutive states.
///
/// Moves are tried in the order `moves` lists them and the first one that
/// reproduces the next state wins.
pub fn reconstruct_path(path: &[StateKey], moves: &[Move]) -> Result<Vec<Move>, SolveError> {
    path.windows(2)
        .enumerate()
        .map(|(step, pair)| {
            let before = pair[0].to_state();
            let after = pair[1].to_state();
            moves
                .iter()
                .copied()
                .find(|&mv| {
                    let mut candidate = before;
                    candidate.apply(mv);
                    candidate == after
                })
                .ok_or_else(|| SolveError::UnmatchedStep {
                    step,
                    moves: moves.to_vec(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::layouts;
    use crate::moves::scramble;
    use crate::pieces::{Color, Piece};

    const POP_LIMIT: usize = 10_000;

    fn undo(goal: &CubeState, moves: &[&str]) -> CubeState {
        let moves: Vec<Move> = moves.iter().map(|name| name.parse().unwrap()).collect();
        let mut start = *goal;
        start.revert_all(&moves);
        start
    }

    fn expect_solved(start: &CubeState, goal: &CubeState, config: &SearchConfig) -> Solution {
        match solve(start, goal, config).unwrap() {
            SearchOutcome::Solved(solution) => {
                let mut replay = *start;
                replay.apply_all(&solution.moves);
                assert_eq!(replay, *goal);
                solution
            }
            other => panic!("expected a solution, got {other:?}"),
        }
    }

    #[test_log::test]
    fn test_start_is_goal() {
        let solved = layouts::solved();
        let solution = expect_solved(&solved, &solved, &SearchConfig::global());
        assert!(solution.moves.is_empty());
        assert_eq!(solution.stats.pops, 1);
        assert_eq!(solution.stats.closed, 0);
    }

    #[test_log::test]
    fn test_one_generator_away() {
        let goal = layouts::solved();
        for name in ["L", "R", "F", "B", "U", "D", "M_RL", "M_FB", "M_UD"] {
            let start = undo(&goal, &[name]);
            let config = SearchConfig::global().with_max_pops(POP_LIMIT);
            let solution = expect_solved(&start, &goal, &config);
            assert_eq!(solution.moves.len(), 1, "{name}");
            assert_eq!(solution.moves[0].name(), name);
        }
    }

    #[test_log::test]
    fn test_two_generators_away() {
        let goal = layouts::solved();
        let start = undo(&goal, &["F", "R"]);
        let config = SearchConfig::global().with_max_pops(POP_LIMIT);
        let solution = expect_solved(&start, &goal, &config);
        assert!(solution.moves.len() >= 2);
    }

    #[test_log::test]
    fn test_face_turns_with_alpha() {
        let goal = layouts::solved();
        let start = undo(&goal, &["D"]);
        let config = SearchConfig::alpha().with_max_pops(POP_LIMIT);
        expect_solved(&start, &goal, &config);
    }

    #[test_log::test]
    fn test_seeded_scramble_is_solved() {
        let goal = layouts::solved();
        let mut start = goal;
        let mut rng = StdRng::seed_from_u64(7);
        scramble(&mut start, &mut rng, &Move::GENERATORS, 2);

        let config = SearchConfig {
            moves: MoveSet::All,
            ..SearchConfig::global()
        }
        .with_max_pops(POP_LIMIT);
        expect_solved(&start, &goal, &config);
    }

    #[test_log::test]
    fn test_exhausts_when_goal_is_unreachable() {
        // an empty cube can only move its secondary center between the six
        // face centers, and no move creates a piece
        let start = CubeState::new();
        let mut goal = CubeState::new();
        goal.place(0, 0, 0, Piece::corner(Color::Red, 1)).unwrap();

        let outcome = solve(&start, &goal, &SearchConfig::global()).unwrap();
        let SearchOutcome::Exhausted(stats) = outcome else {
            panic!("expected exhaustion, got {outcome:?}");
        };
        assert_eq!(stats.closed, 6);
        assert_eq!(stats.pushes, 6);
    }

    #[test_log::test]
    fn test_budget_is_respected() {
        let goal = layouts::solved();
        let start = undo(&goal, &["F", "R"]);
        let config = SearchConfig::global().with_max_pops(1);

        let outcome = solve(&start, &goal, &config).unwrap();
        assert!(matches!(outcome, SearchOutcome::BudgetSpent(_)));
        assert_eq!(outcome.stats().pops, 1);
        assert_eq!(outcome.stats().closed, 1);
        assert_eq!(outcome.stats().pushes, 1 + Move::GENERATORS.len());
        assert!(outcome.solution().is_none());
    }

    #[test]
    fn test_reconstruct_path_prefers_declared_order() {
        let start = layouts::solved();
        let mut after = start;
        after.apply("L2".parse().unwrap());
        let path = [StateKey::from_state(&start), StateKey::from_state(&after)];

        let moves = reconstruct_path(&path, &Move::ALL).unwrap();
        assert_eq!(moves, vec!["L2".parse::<Move>().unwrap()]);
    }

    #[test]
    fn test_reconstruct_path_reports_unmatched_step() {
        let start = layouts::solved();
        let mut after = start;
        after.apply("R".parse().unwrap());
        after.apply("F".parse().unwrap());
        let path = [StateKey::from_state(&start), StateKey::from_state(&after)];

        let err = reconstruct_path(&path, &Move::GENERATORS).unwrap_err();
        assert!(matches!(err, SolveError::UnmatchedStep { step: 0, .. }));
    }
}
