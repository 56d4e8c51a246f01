//! PC-stable adjacency search.
//!
//! At level `l`, each still-adjacent candidate pair is tested against the
//! size-`l` subsets of the neighbours each endpoint had at the start of the
//! level. Decisions within a level only read that snapshot, so the result
//! does not depend on pair order and pairs can be tested in parallel.

use std::collections::{BTreeSet, HashSet};

use causa_core::errors::DiscoveryError;
use rayon::prelude::*;

use super::subsets::combinations;
use super::{ordered, SearchOutcome, SeparationSets, SkeletonOptions, SkeletonRow};
use crate::independence::IndependenceTest;

struct PairVerdict {
    rows: Vec<SkeletonRow>,
    separating: Option<Vec<usize>>,
}

pub(super) fn run(
    variables: &[String],
    test: &dyn IndependenceTest,
    candidates: &[(usize, usize)],
    options: &SkeletonOptions,
) -> Result<SearchOutcome, DiscoveryError> {
    let k = variables.len();
    let mut adjacency: Vec<BTreeSet<usize>> = (0..k)
        .map(|i| (0..k).filter(|&j| j != i).collect())
        .collect();

    let mut rows = Vec::new();
    let mut removed = HashSet::new();
    let mut sepsets = SeparationSets::new();
    let mut level = 0usize;

    loop {
        if options.max_conditioning.is_some_and(|max| level > max) {
            break;
        }
        let snapshot = adjacency.clone();
        if !snapshot.iter().any(|adj| adj.len() > level) {
            break;
        }

        let active: Vec<(usize, usize)> = candidates
            .iter()
            .copied()
            .filter(|&(x, y)| !removed.contains(&ordered(x, y)))
            .collect();

        let test_pair = |&(x, y): &(usize, usize)| -> Result<PairVerdict, DiscoveryError> {
            test_at_level(variables, test, &snapshot, x, y, level, options.alpha)
        };
        let verdicts: Vec<PairVerdict> = if options.parallel {
            active.par_iter().map(test_pair).collect::<Result<_, _>>()?
        } else {
            active.iter().map(test_pair).collect::<Result<_, _>>()?
        };

        for (&(x, y), verdict) in active.iter().zip(verdicts) {
            rows.extend(verdict.rows);
            if let Some(set) = verdict.separating {
                adjacency[x].remove(&y);
                adjacency[y].remove(&x);
                removed.insert(ordered(x, y));
                sepsets.insert(
                    &variables[x],
                    &variables[y],
                    set.iter().map(|&i| variables[i].clone()).collect(),
                );
            }
        }

        tracing::debug!(level, remaining = k * (k - 1) / 2 - removed.len(), "pc-stable level done");
        level += 1;
    }

    Ok(SearchOutcome {
        rows,
        removed,
        sepsets,
    })
}

fn test_at_level(
    variables: &[String],
    test: &dyn IndependenceTest,
    snapshot: &[BTreeSet<usize>],
    x: usize,
    y: usize,
    level: usize,
    alpha: f64,
) -> Result<PairVerdict, DiscoveryError> {
    let mut rows = Vec::new();
    let mut tried: HashSet<Vec<usize>> = HashSet::new();

    for (from, to) in [(x, y), (y, x)] {
        let pool: Vec<usize> = snapshot[from].iter().copied().filter(|&v| v != to).collect();
        for s in combinations(&pool, level) {
            if !tried.insert(s.clone()) {
                continue;
            }
            let outcome = test.test(x, y, &s)?;
            rows.push(SkeletonRow::new(
                &variables[x],
                &variables[y],
                s.iter().map(|&i| variables[i].clone()).collect(),
                outcome.statistic,
                outcome.p_value,
            ));
            if outcome.is_independent(alpha) {
                return Ok(PairVerdict {
                    rows,
                    separating: Some(s),
                });
            }
        }
    }

    Ok(PairVerdict {
        rows,
        separating: None,
    })
}
