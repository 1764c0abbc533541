use rht_core::{PixelAngleStore, PixelCoord};
use std::collections::HashSet;

/// Pixels present in both stores, sorted.
pub fn shared_pixels(a: &PixelAngleStore, b: &PixelAngleStore) -> Vec<PixelCoord> {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut out: Vec<PixelCoord> = small
        .pixels()
        .iter()
        .copied()
        .filter(|&p| large.contains(p))
        .collect();
    out.sort_unstable();
    out
}

/// Sorted, de-duplicated intersection of two pixel sets.
pub fn intersect_pixels(
    a: impl IntoIterator<Item = PixelCoord>,
    b: impl IntoIterator<Item = PixelCoord>,
) -> Vec<PixelCoord> {
    let a: HashSet<PixelCoord> = a.into_iter().collect();
    let mut out: Vec<PixelCoord> = b
        .into_iter()
        .filter(|p| a.contains(p))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    out.sort_unstable();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pixels: &[(usize, usize)]) -> PixelAngleStore {
        let rows: Vec<usize> = pixels.iter().map(|p| p.0).collect();
        let cols: Vec<usize> = pixels.iter().map(|p| p.1).collect();
        let dists = vec![[1.0]; pixels.len()];
        PixelAngleStore::build(&rows, &cols, &dists).unwrap()
    }

    #[test]
    fn shared_is_sorted_intersection() {
        let a = store(&[(3, 3), (0, 1), (2, 2), (9, 9)]);
        let b = store(&[(2, 2), (0, 1), (5, 5)]);
        let expected = vec![PixelCoord::new(0, 1), PixelCoord::new(2, 2)];
        assert_eq!(shared_pixels(&a, &b), expected);
        assert_eq!(shared_pixels(&b, &a), expected);
    }

    #[test]
    fn disjoint_or_empty_gives_nothing() {
        let a = store(&[(1, 1)]);
        let b = store(&[(2, 2)]);
        assert!(shared_pixels(&a, &b).is_empty());
        assert!(shared_pixels(&a, &store(&[])).is_empty());
    }

    #[test]
    fn intersect_dedups() {
        let a = [PixelCoord::new(1, 0), PixelCoord::new(0, 0)];
        let b = [
            PixelCoord::new(0, 0),
            PixelCoord::new(0, 0),
            PixelCoord::new(4, 4),
            PixelCoord::new(1, 0),
        ];
        assert_eq!(
            intersect_pixels(a, b),
            vec![PixelCoord::new(0, 0), PixelCoord::new(1, 0)]
        );
    }
}
