//! Parallel processing utilities using Rayon.
//!
//! An [`IntervalIndex`] has no query-time mutable state, so one index can be
//! shared by every worker in the pool.

use rayon::prelude::*;

use crate::error::{QueryError, ValidationError};
use crate::index::{validate_all, IntervalIndex};
use crate::interval::Interval;

/// Minimum number of intervals before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Sort records by (reference name, start, end), keeping the input order
/// of equal keys.
pub fn sort_records<T: Interval + Send>(records: &mut [T]) {
    if records.len() >= PARALLEL_THRESHOLD {
        records.par_sort_by(|a, b| a.coordinate_cmp(b));
    } else {
        records.sort_by(|a, b| a.coordinate_cmp(b));
    }
}

impl<T: Interval + Send> IntervalIndex<T> {
    /// Like [`IntervalIndex::build`], sorting large inputs on the rayon pool.
    pub fn par_build<I>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut records: Vec<T> = records.into_iter().collect();
        validate_all(&records)?;
        sort_records(&mut records);
        Ok(Self::from_sorted(records))
    }
}

impl<T: Interval + Sync> IntervalIndex<T> {
    /// Answer many overlap queries concurrently.
    ///
    /// Results line up with `queries`. The first invalid query fails the
    /// whole batch.
    pub fn overlapping_batch<Q>(&self, queries: &[Q]) -> Result<Vec<Vec<&T>>, QueryError>
    where
        Q: Interval + Sync,
    {
        if queries.len() < PARALLEL_THRESHOLD {
            return queries.iter().map(|q| self.overlapping(q)).collect();
        }
        queries.par_iter().map(|q| self.overlapping(q)).collect()
    }

    /// Count overlaps for many queries concurrently.
    pub fn count_overlaps_batch<Q>(&self, queries: &[Q]) -> Result<Vec<usize>, QueryError>
    where
        Q: Interval + Sync,
    {
        if queries.len() < PARALLEL_THRESHOLD {
            return queries.iter().map(|q| self.count_overlaps(q)).collect();
        }
        queries.par_iter().map(|q| self.count_overlaps(q)).collect()
    }
}
