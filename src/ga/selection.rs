//! Parent selection and extinction draws.
//!
//! Both work on a population sorted by ascending cost.
//!
//! Parent selection samples from a small window of the best-ranked tours.
//! The weight of rank `i` is the cost found at the mirrored rank
//! `window - 1 - i`, so the best-ranked tour carries the largest weight and
//! the window's worst tour the smallest. This is rank-driven, not
//! fitness-proportional: a tour's own cost never sets its own weight.
//!
//! Extinction draws a threshold over the cumulative cost of the whole
//! population and keeps the shortest prefix reaching it; everything behind
//! the prefix is culled.

use rand::Rng;

use crate::models::Tour;

/// Size of the parent candidate window: `len / min_size + 2`, clamped to `len`.
pub fn candidate_window(len: usize, min_size: usize) -> usize {
    (len / min_size.max(1) + 2).min(len)
}

/// Picks a parent rank from the first [`candidate_window`] members.
///
/// # Panics
///
/// Panics if `members` is empty.
pub fn select_parent<R: Rng>(members: &[Tour], min_size: usize, rng: &mut R) -> usize {
    assert!(!members.is_empty(), "cannot select from empty population");

    let window = candidate_window(members.len(), min_size);
    let weights: Vec<f64> = (0..window)
        .map(|i| members[window - 1 - i].cost())
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }

    let threshold = total - rng.random_range(0.0..total);
    cumulative_index(&weights, threshold)
}

/// Number of members surviving an extinction, before the `min_size` floor.
///
/// The threshold is drawn uniformly over a range of the cumulative cost whose
/// midpoint is `(1 - kill) * total`: `[0, 2 * (1 - kill) * total]` when
/// `kill >= 0.5`, `[(1 - 2 * kill) * total, total]` below. With `kill = 0.5`
/// the cut point is uniform over the whole cost mass. About a `kill` share of
/// the cost mass dies on average, and at least one member survives.
pub fn extinction_survivors<R: Rng>(members: &[Tour], kill: f64, rng: &mut R) -> usize {
    if members.is_empty() {
        return 0;
    }
    let costs: Vec<f64> = members.iter().map(Tour::cost).collect();
    let total: f64 = costs.iter().sum();
    let kill = kill.clamp(0.0, 1.0);
    let (low, high) = if kill >= 0.5 {
        (0.0, 2.0 * (1.0 - kill) * total)
    } else {
        ((1.0 - 2.0 * kill) * total, total)
    };
    if high <= 0.0 {
        return 1;
    }

    let threshold = rng.random_range(low..=high);
    cumulative_index(&costs, threshold) + 1
}

/// First index whose inclusive prefix sum reaches `threshold` (last index if none does).
fn cumulative_index(weights: &[f64], threshold: f64) -> usize {
    let mut sum = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        sum += w;
        if sum >= threshold {
            return i;
        }
    }
    weights.len() - 1
}
