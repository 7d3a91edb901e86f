/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type wide enough for `width * height` on the largest board.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// `width * height` without overflow on the widest `Coord` range.
pub const fn area(width: Coord, height: Coord) -> CellCount {
    (width as CellCount).saturating_mul(height as CellCount)
}

/// ndarray shape for a board of the given size.
pub(crate) const fn grid_dim((width, height): Coord2) -> (usize, usize) {
    (width as usize, height as usize)
}

/// ndarray index for a board coordinate.
pub(crate) const fn ix((x, y): Coord2) -> [usize; 2] {
    [x as usize, y as usize]
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the up-to-8 Moore neighbors of `center`, clipped at the board
/// edges (never wrapped).
pub fn neighbors(center: Coord2, bounds: Coord2) -> Neighbors {
    Neighbors {
        center,
        bounds,
        step: 0,
    }
}

#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    step: u8,
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Coord2> {
        while (self.step as usize) < OFFSETS.len() {
            let (dx, dy) = OFFSETS[self.step as usize];
            self.step += 1;

            let next = self
                .center
                .0
                .checked_add_signed(dx)
                .zip(self.center.1.checked_add_signed(dy));
            if let Some((x, y)) = next {
                if x < self.bounds.0 && y < self.bounds.1 {
                    return Some((x, y));
                }
            }
        }
        None
    }
}
