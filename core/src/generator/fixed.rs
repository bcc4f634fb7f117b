use std::collections::BTreeSet;

use super::*;

/// Hands out a predetermined layout, for replays and tests.
///
/// Positions that fall off the board, land in the safe block, or repeat are dropped with a
/// warning, and the layout is cut down to the requested count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn pick_mines(&mut self, size: Coord2, safe: Coord2, mines: CellCount) -> Vec<Coord2> {
        let mut seen = BTreeSet::new();
        let mut picked = Vec::with_capacity(self.mines.len());

        for &pos in &self.mines {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                log::warn!("Fixed mine {:?} is outside a {:?} board", pos, size);
            } else if within_one(pos, safe) {
                log::warn!("Fixed mine {:?} is inside the safe zone of {:?}", pos, safe);
            } else if seen.insert(pos) {
                picked.push(pos);
            }
        }

        if picked.len() != usize::from(mines) {
            log::warn!(
                "Fixed layout count mismatch, usable: {}, requested: {}",
                picked.len(),
                mines
            );
        }
        picked.truncate(mines.into());
        picked
    }
}
