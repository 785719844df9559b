//! Best-first search over partial packings.
//!
//! The solver repeatedly expands the currently selected state: it asks the
//! move generator for one-ply successors, ranks them with the caller's
//! scoring capability, and merges them into an accumulating candidate
//! pool. The highest-ranked pooled candidate becomes the next current
//! state. A dead-ended branch simply contributes no candidates, and the
//! search continues from the best remaining one; the pool only runs dry
//! once every reachable state has been expanded.
//!
//! Visited states are deduplicated by occupancy plus remaining-piece
//! bitmask, so two placement orders reaching the same packing are only
//! expanded once.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;
use rustc_hash::FxHashSet;

use crate::movegen::legal_moves;
use crate::puzzle::{Placement, Puzzle, PuzzleState};
use crate::scoring::{ScoreContext, ScoreMethod};

/// Where the search currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Candidates remain to explore.
    Searching,
    /// A gap-free packing was found.
    Solved,
    /// The candidate pool ran dry with the board incomplete.
    Exhausted,
}

/// Final result of a solve run. `Exhausted` is a normal outcome, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The ordered placements that cover the board.
    Solved(Vec<Placement>),
    Exhausted,
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    pub fn placements(&self) -> Option<&[Placement]> {
        match self {
            Self::Solved(placements) => Some(placements),
            Self::Exhausted => None,
        }
    }
}

/// A pooled candidate state awaiting expansion.
struct Candidate {
    score: f64,
    /// Insertion sequence number; ties on score expand oldest first.
    seq: u64,
    state: PuzzleState,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

type StateKey = (Vec<u8>, u32);

fn state_key(state: &PuzzleState) -> StateKey {
    (state.occupancy().cells().to_vec(), state.remaining().bits())
}

/// Drives a solve run. Construct with a starting state and a scoring
/// capability, then call [`step`](Self::step) until terminal, or
/// [`run`](Self::run) to completion. The solver itself never stops early;
/// callers wanting a ceiling check [`steps`](Self::steps) between
/// iterations.
pub struct Solver<'p, S> {
    puzzle: &'p Puzzle,
    scorer: S,
    current: PuzzleState,
    pool: BinaryHeap<Candidate>,
    visited: FxHashSet<StateKey>,
    seq: u64,
    steps: u64,
    status: SearchState,
    solution: Option<Vec<Placement>>,
}

impl<'p, S: ScoreMethod> Solver<'p, S> {
    /// Starts a run from `start`, invoking the scorer's `begin` hook.
    pub fn new(puzzle: &'p Puzzle, start: PuzzleState, mut scorer: S) -> Self {
        scorer.begin();
        let mut visited = FxHashSet::default();
        visited.insert(state_key(&start));
        let (status, solution) = if start.is_complete() {
            (SearchState::Solved, Some(start.placements().to_vec()))
        } else {
            (SearchState::Searching, None)
        };
        Self {
            puzzle,
            scorer,
            current: start,
            pool: BinaryHeap::new(),
            visited,
            seq: 0,
            steps: 0,
            status,
            solution,
        }
    }

    pub fn status(&self) -> SearchState {
        self.status
    }

    /// Expansion steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The solution placements once solved.
    pub fn solution(&self) -> Option<&[Placement]> {
        self.solution.as_deref()
    }

    /// The state the search is currently positioned on.
    pub fn current(&self) -> &PuzzleState {
        &self.current
    }

    /// Expands the current state by one ply and advances to the best
    /// pooled candidate. Returns the status after the step.
    pub fn step(&mut self) -> SearchState {
        if self.status != SearchState::Searching {
            return self.status;
        }
        self.steps += 1;

        let moves = legal_moves(self.puzzle, &self.current);
        if let Some(done) = moves.iter().find(|candidate| candidate.state.is_complete()) {
            debug!("solved after {} steps", self.steps);
            self.solution = Some(done.state.placements().to_vec());
            self.status = SearchState::Solved;
            return self.status;
        }

        for candidate in moves {
            if !self.visited.insert(state_key(&candidate.state)) {
                continue;
            }
            let piece_grid = self.puzzle.oriented_grid(&candidate.placement);
            let score = self.scorer.score(&ScoreContext {
                placement: &candidate.placement,
                piece_grid: &piece_grid,
                occupancy: candidate.state.occupancy(),
                remaining: candidate.state.remaining(),
                placements: candidate.state.placements(),
            });
            self.seq += 1;
            self.pool.push(Candidate {
                score,
                seq: self.seq,
                state: candidate.state,
            });
        }

        match self.pool.pop() {
            Some(next) => {
                debug!(
                    "step {}: advancing with score {} ({} pooled)",
                    self.steps,
                    next.score,
                    self.pool.len()
                );
                self.current = next.state;
            }
            None => {
                debug!("exhausted after {} steps", self.steps);
                self.status = SearchState::Exhausted;
            }
        }
        self.status
    }

    /// Runs until solved or exhausted.
    pub fn run(mut self) -> Outcome {
        loop {
            match self.step() {
                SearchState::Searching => {}
                SearchState::Solved => {
                    return Outcome::Solved(self.solution.take().unwrap_or_default());
                }
                SearchState::Exhausted => return Outcome::Exhausted,
            }
        }
    }
}
