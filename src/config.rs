//! Global configuration for bedspec runtime behavior.
//!
//! This module provides thread-safe global configuration that affects
//! record validation without threading options through every constructor.

use std::sync::atomic::{AtomicBool, Ordering};

/// The score range declared by the BED format.
pub const SCORE_RANGE: std::ops::RangeInclusive<i64> = 0..=1000;

/// Global flag for strict BED score validation.
///
/// When disabled (the default), scores outside [`SCORE_RANGE`] are accepted
/// and a warning is logged, matching permissive real-world files. When
/// enabled, such scores are rejected at construction.
static STRICT_SCORES: AtomicBool = AtomicBool::new(false);

/// Enable or disable strict score validation.
///
/// # Example
///
/// ```
/// use bedspec::config;
/// use bedspec::record::Bed5;
///
/// config::set_strict_scores(true);
/// assert!(Bed5::new("chr1", 1, 2, None, Some(5000)).is_err());
/// config::set_strict_scores(false);
/// ```
#[inline]
pub fn set_strict_scores(enabled: bool) {
    STRICT_SCORES.store(enabled, Ordering::Release);
}

/// Check if strict score validation is enabled.
#[inline]
pub fn is_strict_scores() -> bool {
    STRICT_SCORES.load(Ordering::Acquire)
}
