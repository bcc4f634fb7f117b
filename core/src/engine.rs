use std::collections::{BTreeSet, VecDeque};

use crate::*;

/// Raised when an opened cell turns out to be a mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MineHit(pub Coord2);

/// Result of a reveal or chord before the session applies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// Safe cells opened by the call, possibly none.
    Opened(BTreeSet<Coord2>),
    /// A mine was opened; `opened` holds the safe cells revealed before it.
    Mine {
        mine: Coord2,
        opened: BTreeSet<Coord2>,
    },
}

impl Reveal {
    fn from_step(step: core::result::Result<(), MineHit>, opened: BTreeSet<Coord2>) -> Self {
        match step {
            Ok(()) => Self::Opened(opened),
            Err(MineHit(mine)) => Self::Mine { mine, opened },
        }
    }
}

/// Opens cells on a grid with mines already laid.
#[derive(Debug)]
pub struct RevealEngine<'g> {
    grid: &'g mut Grid,
}

impl<'g> RevealEngine<'g> {
    pub fn new(grid: &'g mut Grid) -> Self {
        Self { grid }
    }

    /// Opens a hidden cell, flooding outwards from it when it has no adjacent mines.
    ///
    /// Revealed, flagged and out-of-bounds targets open nothing.
    pub fn reveal(&mut self, coords: Coord2) -> Reveal {
        let mut opened = BTreeSet::new();
        let step = self.open_cell(coords, &mut opened);
        Reveal::from_step(step, opened)
    }

    /// Opens every hidden neighbor of a revealed number once enough flags surround it.
    ///
    /// Stops at the first mine; cells opened before it stay open.
    pub fn chord(&mut self, coords: Coord2) -> Reveal {
        let mut opened = BTreeSet::new();

        let Some(cell) = self.grid.get(coords) else {
            return Reveal::Opened(opened);
        };
        let count = cell.adjacent_mines();
        if !cell.is_revealed() || count == 0 {
            return Reveal::Opened(opened);
        }

        let flagged = self.grid.count_neighbors(coords, Cell::is_flagged);
        if flagged != count {
            log::trace!("Chord at {:?} ignored, {} flags around {}", coords, flagged, count);
            return Reveal::Opened(opened);
        }

        let step = self
            .grid
            .neighbors(coords)
            .try_for_each(|pos| self.open_cell(pos, &mut opened));
        Reveal::from_step(step, opened)
    }

    fn open_cell(
        &mut self,
        coords: Coord2,
        opened: &mut BTreeSet<Coord2>,
    ) -> core::result::Result<(), MineHit> {
        let Some(cell) = self.grid.get_mut(coords) else {
            return Ok(());
        };
        if !cell.reveal() {
            return Ok(());
        }
        if cell.is_mine() {
            return Err(MineHit(coords));
        }

        let count = cell.adjacent_mines();
        opened.insert(coords);
        log::debug!("Open cell at {:?}, mine count: {}", coords, count);

        if count == 0 {
            self.flood_from(coords, opened);
        }
        Ok(())
    }

    /// Breadth-first expansion over zero cells; a cell is opened when first discovered so it
    /// never enters the queue twice.
    fn flood_from(&mut self, origin: Coord2, opened: &mut BTreeSet<Coord2>) {
        let mut pending = VecDeque::from([origin]);

        while let Some(center) = pending.pop_front() {
            for pos in self.grid.neighbors(center) {
                let cell = &mut self.grid[pos];
                if !cell.reveal() {
                    continue;
                }
                opened.insert(pos);
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    pos,
                    cell.adjacent_mines()
                );

                if cell.adjacent_mines() == 0 {
                    pending.push_back(pos);
                }
            }
        }
    }
}
