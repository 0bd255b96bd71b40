//! Nearest-living-fighter queries.
//!
//! A linear scan is all a ten-fighter roster needs. Iteration follows roster
//! order, which makes tie-breaking deterministic: the first candidate at the
//! minimum distance wins.

use crate::fighter::Fighter;
use crate::geometry::{self, Point};

/// Returns the index of the living candidate closest to `reference`.
///
/// Dead candidates are skipped. Ties go to the earliest index. Returns `None`
/// when no candidate is alive, which tells the caller that the pool is
/// exhausted.
///
/// # Example
///
/// ```
/// use skirmish_core::fighter::Fighter;
/// use skirmish_core::geometry::Point;
/// use skirmish_core::targeting::find_closest;
///
/// let pool = vec![
///     Fighter::ranged("far", Point::new(10.0, 0.0)?)?,
///     Fighter::ranged("near", Point::new(2.0, 0.0)?)?,
/// ];
/// assert_eq!(find_closest(Point::ORIGIN, &pool), Some(1));
/// assert_eq!(find_closest(Point::ORIGIN, &[]), None);
/// # Ok::<(), skirmish_core::error::SkirmishError>(())
/// ```
#[must_use]
pub fn find_closest(reference: Point, candidates: &[Fighter]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        if !candidate.is_alive() {
            continue;
        }
        let dist = geometry::distance(reference, candidate.location());
        // Strict comparison keeps the first of equally distant candidates.
        let closer = match best {
            Some((_, best_dist)) => dist < best_dist,
            None => true,
        };
        if closer {
            best = Some((index, dist));
        }
    }
    best.map(|(index, _)| index)
}
