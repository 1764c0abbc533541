use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer pixel position `(row, col)` as emitted by the RHT table.
///
/// `row` is the first stored index (`ipoints`) and `col` the second
/// (`jpoints`). Backprojection writes this pixel transposed, see
/// `rht-backproject`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PixelCoord {
    pub row: usize,
    pub col: usize,
}

impl PixelCoord {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Swap the two components.
    #[inline]
    pub const fn transposed(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }
}

impl From<(usize, usize)> for PixelCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for PixelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equal_coords_hash_to_one_key() {
        let mut set = HashSet::new();
        set.insert(PixelCoord::new(3, 4));
        set.insert(PixelCoord::from((3, 4)));
        set.insert(PixelCoord::new(4, 3));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn transposed_swaps_components() {
        assert_eq!(PixelCoord::new(2, 5).transposed(), PixelCoord::new(5, 2));
        assert_eq!(PixelCoord::new(2, 5).to_string(), "(2, 5)");
    }
}
