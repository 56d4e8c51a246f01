//! Exhaustive skeleton search.
//!
//! Every candidate pair is tested against every subset of the remaining
//! variables, smallest subsets first, with no early exit. A single
//! `p > alpha` removes the pair. The table is therefore complete, which is
//! what the collider rule reads.

use std::collections::HashSet;

use causa_core::errors::DiscoveryError;
use rayon::prelude::*;

use super::subsets::{subset_count, subsets_up_to};
use super::{ordered, SearchOutcome, SeparationSets, SkeletonOptions, SkeletonRow};
use crate::independence::IndependenceTest;

/// Tables larger than this many rows get a warning before the search starts.
const LARGE_TABLE_ROWS: u64 = 1 << 20;

pub(super) fn run(
    variables: &[String],
    test: &dyn IndependenceTest,
    candidates: &[(usize, usize)],
    options: &SkeletonOptions,
) -> Result<SearchOutcome, DiscoveryError> {
    let expected_rows = expected_rows(variables.len(), candidates.len(), options.max_conditioning);
    if expected_rows > LARGE_TABLE_ROWS {
        tracing::warn!(
            variables = variables.len(),
            pairs = candidates.len(),
            expected_rows,
            "exhaustive table is very large; consider max_conditioning or the pc-stable strategy"
        );
    }

    let test_pair = |&(x, y): &(usize, usize)| -> Result<Vec<SkeletonRow>, DiscoveryError> {
        let others: Vec<usize> = (0..variables.len()).filter(|&v| v != x && v != y).collect();
        let mut rows = Vec::new();
        for s in subsets_up_to(&others, options.max_conditioning) {
            let outcome = test.test(x, y, &s)?;
            tracing::debug!(
                x = %variables[x],
                y = %variables[y],
                conditioning = s.len(),
                p_value = outcome.p_value,
                "ci test"
            );
            rows.push(SkeletonRow::new(
                &variables[x],
                &variables[y],
                s.iter().map(|&i| variables[i].clone()).collect(),
                outcome.statistic,
                outcome.p_value,
            ));
        }
        Ok(rows)
    };

    let per_pair: Vec<Vec<SkeletonRow>> = if options.parallel {
        candidates
            .par_iter()
            .map(test_pair)
            .collect::<Result<_, _>>()?
    } else {
        candidates
            .iter()
            .map(test_pair)
            .collect::<Result<_, _>>()?
    };

    let mut removed = HashSet::new();
    let mut sepsets = SeparationSets::new();
    for (&(x, y), rows) in candidates.iter().zip(&per_pair) {
        if let Some(separating) = rows.iter().find(|r| r.p_value > options.alpha) {
            removed.insert(ordered(x, y));
            sepsets.insert(
                &variables[x],
                &variables[y],
                separating.conditioning_set.clone(),
            );
        }
    }

    Ok(SearchOutcome {
        rows: per_pair.into_iter().flatten().collect(),
        removed,
        sepsets,
    })
}

/// Rows the exhaustive table will hold: one per pair and conditioning set.
pub(super) fn expected_rows(n_variables: usize, n_pairs: usize, max_conditioning: Option<usize>) -> u64 {
    let per_pair = subset_count(n_variables.saturating_sub(2), max_conditioning);
    per_pair.saturating_mul(n_pairs as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_rows_follow_subset_counts() {
        // 4 variables, 6 pairs, 2 others per pair.
        assert_eq!(expected_rows(4, 6, None), 24);
        assert_eq!(expected_rows(4, 6, Some(1)), 18);
        assert_eq!(expected_rows(2, 1, None), 1);
        // 25 variables without a limit crosses the warning threshold.
        assert!(expected_rows(25, 300, None) > LARGE_TABLE_ROWS);
        assert!(expected_rows(25, 300, Some(1)) < LARGE_TABLE_ROWS);
    }
}
