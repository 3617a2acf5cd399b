use crate::ranktree::RankTree;
use crate::Symbol;

/// Number of occurrences of `symbol` in positions `start..=end` of the tree's sequence.
///
/// An empty interval (`end < start`) counts 0. Indices past the end of the sequence
/// fall back to the rank sentinel, so callers should validate `end < tree.size()`.
pub fn count_symbol_in_interval(tree: &RankTree, symbol: Symbol, start: usize, end: usize) -> usize {
    if end < start {
        return 0;
    }
    let r = tree.rank(symbol, end);
    let l = if start == 0 {
        0
    } else {
        tree.rank(symbol, start - 1)
    };
    r.saturating_sub(l)
}

/// Number of positions in `start..=end` whose symbol lies in the band `[band_low, band_high]`.
///
/// The band is normalized (swapped if given in reverse) and clamped to
/// `[global_min, global_max]`, then counted one symbol value at a time, issuing a
/// full rank descent for every integer in the clamped band. The cost is therefore
/// proportional to the band width rather than to the depth of the tree.
pub fn count_region_in_interval(
    tree: &RankTree,
    band_low: Symbol,
    band_high: Symbol,
    global_min: Symbol,
    global_max: Symbol,
    start: usize,
    end: usize,
) -> usize {
    if end < start {
        return 0;
    }
    let (band_low, band_high) = if band_low > band_high {
        (band_high, band_low)
    } else {
        (band_low, band_high)
    };
    let band_low = band_low.max(global_min);
    let band_high = band_high.min(global_max);

    (band_low..=band_high)
        .map(|symbol| count_symbol_in_interval(tree, symbol, start, end))
        .sum()
}

/// Fraction of the positions in `start..=end` accounted for by `count`.
/// Zero for an empty interval.
pub fn occupancy_fraction(count: usize, start: usize, end: usize) -> f64 {
    if end < start {
        return 0.0;
    }
    count as f64 / ((end - start) as f64 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_test() {
        //   index:   0  1  2  3  4  5  6
        //   values:  1  3  2  3  1  2  2
        let data = vec![1, 3, 2, 3, 1, 2, 2];
        let tree = RankTree::new(&data);

        {
            // count_symbol_in_interval
            assert_eq!(count_symbol_in_interval(&tree, 2, 2, 5), 2);
            assert_eq!(count_symbol_in_interval(&tree, 2, 2, 6), 3);
            assert_eq!(count_symbol_in_interval(&tree, 2, 0, 6), 3);
            assert_eq!(count_symbol_in_interval(&tree, 1, 1, 3), 0);
            assert_eq!(count_symbol_in_interval(&tree, 3, 1, 1), 1);
            assert_eq!(count_symbol_in_interval(&tree, 3, 3, 3), 1);
            assert_eq!(count_symbol_in_interval(&tree, 3, 4, 6), 0);

            // empty interval
            assert_eq!(count_symbol_in_interval(&tree, 2, 5, 2), 0);

            // symbol outside the value range
            assert_eq!(count_symbol_in_interval(&tree, 9, 0, 6), 0);
        }

        {
            // conservation over the whole sequence
            let total: usize = (1..=3)
                .map(|symbol| count_symbol_in_interval(&tree, symbol, 0, 6))
                .sum();
            assert_eq!(total, data.len());
        }

        {
            // count_region_in_interval
            assert_eq!(count_region_in_interval(&tree, 1, 3, 1, 3, 0, 6), 7);
            assert_eq!(count_region_in_interval(&tree, 2, 3, 1, 3, 0, 6), 5);
            assert_eq!(count_region_in_interval(&tree, 1, 2, 1, 3, 2, 5), 3);
            assert_eq!(count_region_in_interval(&tree, 3, 3, 1, 3, 0, 2), 1);

            // reversed band is normalized
            assert_eq!(count_region_in_interval(&tree, 3, 2, 1, 3, 0, 6), 5);

            // band is clamped to the global range
            assert_eq!(count_region_in_interval(&tree, -100, 100, 1, 3, 0, 6), 7);
            assert_eq!(count_region_in_interval(&tree, Symbol::MIN, Symbol::MAX, 1, 3, 0, 6), 7);

            // band entirely outside the global range
            assert_eq!(count_region_in_interval(&tree, 5, 10, 1, 3, 0, 6), 0);
            assert_eq!(count_region_in_interval(&tree, -5, 0, 1, 3, 0, 6), 0);

            // empty interval
            assert_eq!(count_region_in_interval(&tree, 1, 3, 1, 3, 4, 3), 0);
        }
    }

    #[test]
    fn band_monotonicity() {
        let data: Vec<Symbol> = (0..60).map(|i| ((i * 13) % 11) as Symbol - 4).collect();
        let tree = RankTree::new(&data);
        let (min, max) = (-4, 6);
        let (start, end) = (7, 45);
        for low in min - 2..=max + 2 {
            let mut prev = 0;
            for high in low..=max + 2 {
                let count = count_region_in_interval(&tree, low, high, min, max, start, end);
                let expected = data[start..=end]
                    .iter()
                    .filter(|&&x| low <= x && x <= high)
                    .count();
                assert_eq!(count, expected, "band [{}, {}]", low, high);
                assert!(count >= prev);
                prev = count;
            }
        }
    }

    #[test]
    fn empty_tree() {
        let tree = RankTree::new(&[]);
        assert_eq!(count_symbol_in_interval(&tree, 0, 0, 0), 0);
        assert_eq!(count_region_in_interval(&tree, 0, 10, 0, 10, 0, 5), 0);
    }

    #[test]
    fn test_occupancy_fraction() {
        assert_eq!(occupancy_fraction(3, 0, 5), 0.5);
        assert_eq!(occupancy_fraction(1, 4, 4), 1.0);
        assert_eq!(occupancy_fraction(0, 0, 9), 0.0);
        assert_eq!(occupancy_fraction(7, 5, 4), 0.0);
        assert_eq!(occupancy_fraction(0, 0, usize::MAX), 0.0);
    }
}
