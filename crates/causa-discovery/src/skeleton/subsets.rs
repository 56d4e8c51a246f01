//! Conditioning-set enumeration.
//!
//! Both iterators yield one set at a time; nothing is materialised up front,
//! so a pair with many neighbours only ever holds the current set.

/// `r`-element combinations of `items`, in lexicographic order of position.
pub struct Combinations<'a, T> {
    items: &'a [T],
    idx: Vec<usize>,
    done: bool,
}

pub fn combinations<T: Clone>(items: &[T], r: usize) -> Combinations<'_, T> {
    Combinations {
        items,
        idx: (0..r).collect(),
        done: r > items.len(),
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let current: Vec<T> = self.idx.iter().map(|&i| self.items[i].clone()).collect();

        // Advance the rightmost index that can still move.
        let n = self.items.len();
        let r = self.idx.len();
        match (0..r).rev().find(|&i| self.idx[i] != i + n - r) {
            Some(i) => {
                self.idx[i] += 1;
                for j in (i + 1)..r {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}

/// Every subset of `items` with at most `max_size` elements, ordered by
/// size and then lexicographically. The empty set comes first.
pub fn subsets_up_to<T: Clone>(
    items: &[T],
    max_size: Option<usize>,
) -> impl Iterator<Item = Vec<T>> + '_ {
    let limit = max_size.unwrap_or(items.len()).min(items.len());
    (0..=limit).flat_map(move |r| combinations(items, r))
}

/// Number of sets `subsets_up_to` yields for `n` items. Saturates instead
/// of overflowing, so very large values are approximate.
pub fn subset_count(n: usize, max_size: Option<usize>) -> u64 {
    let limit = max_size.unwrap_or(n).min(n);
    let mut total: u64 = 0;
    let mut binom: u64 = 1;
    for r in 0..=limit {
        total = total.saturating_add(binom);
        // C(n, r+1) = C(n, r) * (n - r) / (r + 1)
        binom = binom.saturating_mul((n - r) as u64) / (r as u64 + 1);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_in_order() {
        let c: Vec<Vec<char>> = combinations(&['a', 'b', 'c', 'd'], 2).collect();
        let expected: Vec<Vec<char>> = vec![
            vec!['a', 'b'],
            vec!['a', 'c'],
            vec!['a', 'd'],
            vec!['b', 'c'],
            vec!['b', 'd'],
            vec!['c', 'd'],
        ];
        assert_eq!(c, expected);
    }

    #[test]
    fn edge_sizes() {
        let all = |items: &[i32], r| combinations(items, r).collect::<Vec<_>>();
        assert_eq!(all(&[1, 2, 3], 0), vec![Vec::<i32>::new()]);
        assert_eq!(all(&[1, 2, 3], 3), vec![vec![1, 2, 3]]);
        assert!(all(&[1, 2], 3).is_empty());
        assert_eq!(all(&[], 0), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn subsets_are_size_ordered() {
        let s: Vec<Vec<i32>> = subsets_up_to(&[1, 2, 3], None).collect();
        assert_eq!(s.len(), 8);
        assert!(s[0].is_empty());
        assert_eq!(s[1], vec![1]);
        assert_eq!(s[4], vec![1, 2]);
        assert_eq!(s[7], vec![1, 2, 3]);
        assert_eq!(subsets_up_to(&[1, 2, 3], Some(1)).count(), 4);
    }

    #[test]
    fn subsets_are_lazy() {
        let items: Vec<usize> = (0..40).collect();
        let first: Vec<Vec<usize>> = subsets_up_to(&items, None).take(3).collect();
        assert_eq!(first, vec![vec![], vec![0], vec![1]]);
    }

    #[test]
    fn counts_match_enumeration() {
        for n in 0..7 {
            for max in [None, Some(0), Some(2)] {
                let items: Vec<usize> = (0..n).collect();
                assert_eq!(
                    subset_count(n, max),
                    subsets_up_to(&items, max).count() as u64,
                    "n = {n}, max = {max:?}"
                );
            }
        }
        assert_eq!(subset_count(23, None), 1 << 23);
    }
}
