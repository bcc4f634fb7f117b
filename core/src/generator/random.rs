use std::collections::BTreeSet;

use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// How mine positions get drawn for a given density.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Draw random cells and retry on collisions, only used while at most half the free cells
    /// are needed.
    Rejection,
    /// Shuffle the explicit candidate list and keep a prefix, bounded time at any density.
    PartialShuffle,
}

impl Placement {
    pub fn for_density(mines: usize, free_cells: usize) -> Self {
        if mines.saturating_mul(2) <= free_cells {
            Self::Rejection
        } else {
            Self::PartialShuffle
        }
    }
}

/// Uniform placement outside the safe block, seeded for reproducible boards.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn rejection_sample(&mut self, size: Coord2, safe: Coord2, wanted: usize) -> Vec<Coord2> {
        let mut chosen = BTreeSet::new();
        let mut order = Vec::with_capacity(wanted);
        while order.len() < wanted {
            let pos = (
                self.rng.random_range(0..size.0),
                self.rng.random_range(0..size.1),
            );
            if within_one(pos, safe) || !chosen.insert(pos) {
                continue;
            }
            order.push(pos);
        }
        order
    }

    fn shuffle_sample(&mut self, mut candidates: Vec<Coord2>, wanted: usize) -> Vec<Coord2> {
        let (picked, _) = candidates.partial_shuffle(&mut self.rng, wanted);
        picked.to_vec()
    }
}

impl MineGenerator for RandomMineGenerator {
    fn pick_mines(&mut self, size: Coord2, safe: Coord2, mines: CellCount) -> Vec<Coord2> {
        let candidates = candidate_cells(size, safe);
        let free_cells = candidates.len();
        let mut wanted = usize::from(mines);

        if wanted > free_cells {
            log::warn!(
                "Minefield too dense, requested {} mines but only {} cells are free",
                wanted,
                free_cells
            );
            wanted = free_cells;
        }

        let placement = Placement::for_density(wanted, free_cells);
        log::debug!(
            "Placing {} mines on {:?} around safe cell {:?} using {:?}",
            wanted,
            size,
            safe,
            placement
        );

        match placement {
            Placement::Rejection => self.rejection_sample(size, safe, wanted),
            Placement::PartialShuffle => self.shuffle_sample(candidates, wanted),
        }
    }
}
