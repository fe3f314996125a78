//! Interval indexing for fast overlap queries.
//!
//! Records are sorted by (reference name, start, end) into one contiguous
//! block per reference sequence. Each block is laid out as an implicit
//! balanced binary tree over its sorted positions: the node at index `i`
//! sits on level `k` where `k` is the number of trailing one bits of `i`,
//! and `max_ends[i]` holds the largest end in the subtree rooted at `i`.
//! Queries descend from the root, pruning subtrees whose maximum end falls
//! at or before the query start, and emit hits in ascending start order.
//!
//! Build is O(n log n) and queries are O(log n + hits).

use rustc_hash::FxHashMap;

use crate::error::{QueryError, ValidationError};
use crate::interval::{check_interval, check_query, Interval};

/// Subtrees at or below this level are scanned linearly.
const SCAN_LEVEL: u32 = 3;

/// One reference sequence's records inside the index.
#[derive(Debug, Clone)]
struct Block {
    name: String,
    offset: usize,
    len: usize,
    root_level: u32,
}

/// An immutable overlap index over records of one kind.
///
/// # Example
///
/// ```
/// use bedspec::index::IntervalIndex;
/// use bedspec::record::Bed3;
///
/// let index = IntervalIndex::build(vec![
///     Bed3::new("chr1", 1, 4).unwrap(),
///     Bed3::new("chr1", 5, 9).unwrap(),
/// ])
/// .unwrap();
///
/// let query = Bed3::new("chr1", 2, 3).unwrap();
/// assert!(index.overlaps(&query).unwrap());
/// assert_eq!(index.overlapping(&query).unwrap(), vec![&Bed3::new("chr1", 1, 4).unwrap()]);
/// ```
#[derive(Debug, Clone)]
pub struct IntervalIndex<T> {
    records: Vec<T>,
    max_ends: Vec<u64>,
    blocks: Vec<Block>,
    by_name: FxHashMap<String, usize>,
}

impl<T: Interval> IntervalIndex<T> {
    /// Build an index from any collection of records.
    ///
    /// Fails without producing an index if any record has an empty
    /// reference name or an end before its start.
    pub fn build<I>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut records: Vec<T> = records.into_iter().collect();
        validate_all(&records)?;
        records.sort_by(|a, b| a.coordinate_cmp(b));
        Ok(Self::from_sorted(records))
    }

    /// Lay out records already sorted by (reference name, start, end).
    pub(crate) fn from_sorted(records: Vec<T>) -> Self {
        let mut blocks: Vec<Block> = Vec::new();
        let mut by_name = FxHashMap::default();

        let mut offset = 0;
        while offset < records.len() {
            let name = records[offset].reference_name();
            let len = records[offset..]
                .iter()
                .take_while(|r| r.reference_name() == name)
                .count();
            by_name.insert(name.to_string(), blocks.len());
            blocks.push(Block {
                name: name.to_string(),
                offset,
                len,
                root_level: 0,
            });
            offset += len;
        }

        let mut max_ends = vec![0; records.len()];
        for block in &mut blocks {
            let range = block.offset..block.offset + block.len;
            block.root_level = augment(&records[range.clone()], &mut max_ends[range]);
        }

        log::debug!(
            "Indexed {} records on {} reference sequences",
            records.len(),
            blocks.len()
        );

        Self {
            records,
            max_ends,
            blocks,
            by_name,
        }
    }

    /// Iterate lazily over stored records overlapping `query`, in ascending
    /// start order. Touching endpoints do not overlap.
    pub fn overlapping_iter<Q>(&self, query: &Q) -> Result<Overlapping<'_, T>, QueryError>
    where
        Q: Interval + ?Sized,
    {
        check_query(query)?;
        let window = Window {
            lo: Some(query.start()),
            hi: Some(query.end()),
        };
        Ok(self.search(query.reference_name(), window))
    }

    /// All stored records overlapping `query`, in ascending start order.
    pub fn overlapping<Q>(&self, query: &Q) -> Result<Vec<&T>, QueryError>
    where
        Q: Interval + ?Sized,
    {
        Ok(self.overlapping_iter(query)?.collect())
    }

    /// True if any stored record overlaps `query`. Stops at the first hit.
    pub fn overlaps<Q>(&self, query: &Q) -> Result<bool, QueryError>
    where
        Q: Interval + ?Sized,
    {
        Ok(self.overlapping_iter(query)?.next().is_some())
    }

    /// Number of stored records overlapping `query`.
    pub fn count_overlaps<Q>(&self, query: &Q) -> Result<usize, QueryError>
    where
        Q: Interval + ?Sized,
    {
        Ok(self.overlapping_iter(query)?.count())
    }

    /// Overlapping records that lie entirely within `query`.
    pub fn enclosed_by<Q>(&self, query: &Q) -> Result<Vec<&T>, QueryError>
    where
        Q: Interval + ?Sized,
    {
        let (start, end) = (query.start(), query.end());
        Ok(self
            .overlapping_iter(query)?
            .filter(|r| start <= r.start() && r.end() <= end)
            .collect())
    }

    /// Stored records that entirely contain `query`.
    pub fn enclosing<Q>(&self, query: &Q) -> Result<Vec<&T>, QueryError>
    where
        Q: Interval + ?Sized,
    {
        check_query(query)?;
        // start <= query.start and end >= query.end, as strict bounds
        let window = Window {
            lo: query.end().checked_sub(1),
            hi: query.start().checked_add(1),
        };
        Ok(self.search(query.reference_name(), window).collect())
    }

    /// Total number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All stored records in (reference name, start, end) order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Reference sequence names with at least one record, sorted.
    pub fn reference_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.name.as_str())
    }

    /// Records on one reference sequence in start order. Empty if absent.
    pub fn records_on(&self, reference_name: &str) -> &[T] {
        match self.by_name.get(reference_name) {
            Some(&i) => {
                let block = &self.blocks[i];
                &self.records[block.offset..block.offset + block.len]
            }
            None => &[],
        }
    }

    fn search(&self, reference_name: &str, window: Window) -> Overlapping<'_, T> {
        match self.by_name.get(reference_name) {
            Some(&i) => {
                let block = &self.blocks[i];
                let range = block.offset..block.offset + block.len;
                Overlapping::new(
                    &self.records[range.clone()],
                    &self.max_ends[range],
                    block.root_level,
                    window,
                )
            }
            None => Overlapping::empty(window),
        }
    }
}

impl<'a, T> IntoIterator for &'a IntervalIndex<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

pub(crate) fn validate_all<T: Interval>(records: &[T]) -> Result<(), ValidationError> {
    records.iter().try_for_each(check_interval)
}

/// Fill `max_ends` for one sorted block and return the root level.
fn augment<T: Interval>(records: &[T], max_ends: &mut [u64]) -> u32 {
    let n = records.len();
    if n == 0 {
        return 0;
    }

    // leaves: even positions
    let mut last_i = 0;
    let mut last = 0;
    for i in (0..n).step_by(2) {
        max_ends[i] = records[i].end();
        last_i = i;
        last = max_ends[i];
    }

    let mut level = 1u32;
    while (1usize << level) <= n {
        let half = 1usize << (level - 1);
        let first = (half << 1) - 1;
        let step = half << 2;
        for i in (first..n).step_by(step) {
            let left = max_ends[i - half];
            let right = if i + half < n { max_ends[i + half] } else { last };
            max_ends[i] = records[i].end().max(left).max(right);
        }
        // track the max end of the rightmost subtree that is cut off by n
        last_i = if (last_i >> level) & 1 == 1 {
            last_i - half
        } else {
            last_i + half
        };
        if last_i < n && max_ends[last_i] > last {
            last = max_ends[last_i];
        }
        level += 1;
    }
    level - 1
}

/// Bounds on a qualifying record: `start < hi` and `lo < end`.
/// `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy)]
struct Window {
    lo: Option<u64>,
    hi: Option<u64>,
}

impl Window {
    #[inline]
    fn starts_before_hi(&self, start: u64) -> bool {
        self.hi.map_or(true, |hi| start < hi)
    }

    #[inline]
    fn ends_after_lo(&self, end: u64) -> bool {
        self.lo.map_or(true, |lo| lo < end)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    level: u32,
    left_done: bool,
}

/// Lazy iterator over matching records of one reference sequence.
#[derive(Debug, Clone)]
pub struct Overlapping<'a, T> {
    records: &'a [T],
    max_ends: &'a [u64],
    window: Window,
    stack: Vec<Frame>,
    scan: std::ops::Range<usize>,
}

impl<'a, T: Interval> Overlapping<'a, T> {
    fn new(records: &'a [T], max_ends: &'a [u64], root_level: u32, window: Window) -> Self {
        let mut stack = Vec::with_capacity(64);
        if !records.is_empty() {
            stack.push(Frame {
                node: (1usize << root_level) - 1,
                level: root_level,
                left_done: false,
            });
        }
        Self {
            records,
            max_ends,
            window,
            stack,
            scan: 0..0,
        }
    }

    fn empty(window: Window) -> Self {
        Self {
            records: &[],
            max_ends: &[],
            window,
            stack: Vec::new(),
            scan: 0..0,
        }
    }
}

impl<'a, T: Interval> Iterator for Overlapping<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let records = self.records;
        let n = records.len();
        loop {
            while let Some(i) = self.scan.next() {
                let record = &records[i];
                if !self.window.starts_before_hi(record.start()) {
                    self.scan = 0..0;
                    break;
                }
                if self.window.ends_after_lo(record.end()) {
                    return Some(record);
                }
            }

            let frame = self.stack.pop()?;
            if frame.level <= SCAN_LEVEL {
                let first = frame.node >> frame.level << frame.level;
                let last = (first + (1usize << (frame.level + 1)) - 1).min(n);
                self.scan = first..last.max(first);
            } else if !frame.left_done {
                let half = 1usize << (frame.level - 1);
                let left = frame.node - half;
                self.stack.push(Frame {
                    left_done: true,
                    ..frame
                });
                // a left child past the end may still have children in range
                if left >= n || self.window.ends_after_lo(self.max_ends[left]) {
                    self.stack.push(Frame {
                        node: left,
                        level: frame.level - 1,
                        left_done: false,
                    });
                }
            } else if frame.node < n && self.window.starts_before_hi(records[frame.node].start()) {
                let half = 1usize << (frame.level - 1);
                self.stack.push(Frame {
                    node: frame.node + half,
                    level: frame.level - 1,
                    left_done: false,
                });
                let record = &records[frame.node];
                if self.window.ends_after_lo(record.end()) {
                    return Some(record);
                }
            }
        }
    }
}
