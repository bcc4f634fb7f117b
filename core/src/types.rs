/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `a` and `b` are at most one step apart on both axes (the center counts).
pub const fn within_one(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

/// Walks the 3×3 block around a center in row-major order, skipping positions that fall off
/// the board.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    step: u8,
    include_center: bool,
}

impl Neighbors {
    /// The up-to-8 cells at Chebyshev distance 1.
    pub fn around(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            step: 0,
            include_center: false,
        }
    }

    /// The whole clipped 3×3 block, center included.
    pub fn block(center: Coord2, bounds: Coord2) -> Self {
        Self {
            include_center: true,
            ..Self::around(center, bounds)
        }
    }

    fn offset(axis: Coord, delta: u8, limit: Coord) -> Option<Coord> {
        let moved = axis.checked_add(delta)?.checked_sub(1)?;
        (moved < limit).then_some(moved)
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let (dx, dy) = (self.step % 3, self.step / 3);
            self.step += 1;

            if dx == 1 && dy == 1 && !self.include_center {
                continue;
            }

            let x = Self::offset(self.center.0, dx, self.bounds.0);
            let y = Self::offset(self.center.1, dy, self.bounds.1);
            if let (Some(x), Some(y)) = (x, y) {
                return Some((x, y));
            }
        }
        None
    }
}
