//! Permutation operators for the memetic engine.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): Davis (1985) — copies a slice from one parent
//!   and fills the rest in the other parent's relative order
//!
//! # Perturbation
//!
//! - [`swap_mutation`]: exchange two random positions — O(1)
//! - [`invert`]: reverse the interior of a random cut, or swap its two
//!   boundary nodes, see [`Inversion`]
//!
//! Every operator maps a permutation to a permutation. Cuts are drawn by
//! [`random_cut`], which never yields an empty slice.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

pub use u_metaheur::ga::operators::swap_mutation;

/// How [`invert`] perturbs the selected cut `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Inversion {
    /// Reverse the nodes inside the cut.
    #[default]
    Reverse,
    /// Swap the first and last node of the cut, leaving the interior untouched.
    SwapEnds,
}

/// Draws a cut `(start, end)` with `start < end < n`.
///
/// `start` and `end` are the min and max of draws from `[0, n-2]` and
/// `[0, n-1]`; equal draws are widened to `end = start + 1`.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn random_cut<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n - 1);
    let b = rng.random_range(0..n);
    let start = a.min(b);
    let mut end = a.max(b);
    if start == end {
        end += 1;
    }
    (start, end)
}

/// Order Crossover (OX) producing two children.
///
/// Child 1 copies `parent1[start..=end]` verbatim, then fills the remaining
/// positions, walking circularly from `end + 1`, with the nodes of `parent2`
/// not yet placed, in `parent2`'s circular order from `end + 1`. Child 2 is
/// built the same way with the parents swapped.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_tsp_memetic::ga::order_crossover;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let (c1, c2) = order_crossover(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], &mut rng)
///     .expect("equal lengths");
/// let mut sorted = c1.clone();
/// sorted.sort();
/// assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
/// assert_eq!(c2.len(), 5);
/// ```
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let n = parent1.len();
    if n != parent2.len() {
        return Err(TspError::SizeMismatch {
            expected: n,
            found: parent2.len(),
        });
    }
    if n < 2 {
        return Err(TspError::TooFewNodes {
            required: 2,
            found: n,
        });
    }

    let (start, end) = random_cut(n, rng);
    Ok(order_crossover_at(parent1, parent2, start, end))
}

/// OX with a fixed cut `[start, end]`, both inclusive.
pub(crate) fn order_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> (Vec<usize>, Vec<usize>) {
    (
        ox_build_child(parent1, parent2, start, end),
        ox_build_child(parent2, parent1, start, end),
    )
}

/// Copy the slice from `template`, fill the rest from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut placed = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let node = donor[(end + 1 + offset) % n];
        if !placed[node] {
            child[pos] = node;
            placed[node] = true;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Applies an [`Inversion`] over a random cut. No-op for fewer than 2 nodes.
pub fn invert<R: Rng>(perm: &mut [usize], kind: Inversion, rng: &mut R) {
    if perm.len() < 2 {
        return;
    }
    let (start, end) = random_cut(perm.len(), rng);
    invert_at(perm, kind, start, end);
}

/// Inversion over the fixed cut `[start, end)`.
pub(crate) fn invert_at(perm: &mut [usize], kind: Inversion, start: usize, end: usize) {
    match kind {
        Inversion::Reverse => perm[start..end].reverse(),
        Inversion::SwapEnds => perm.swap(start, end - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate_permutation;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        validate_permutation(perm, n).is_ok()
    }

    #[test]
    fn test_random_cut_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 2..12 {
            for _ in 0..200 {
                let (start, end) = random_cut(n, &mut rng);
                assert!(start < end, "start {start} end {end}");
                assert!(end < n);
                assert!(start <= n - 2);
            }
        }
    }

    #[test]
    fn test_ox_copies_slice_and_fills_in_order() {
        let p1 = [0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = [7, 6, 5, 4, 3, 2, 1, 0];
        let (c1, c2) = order_crossover_at(&p1, &p2, 2, 4);
        // Slice 2,3,4 from p1; p2 from position 5 onward: 2,1,0,7,6,5,4,3
        // minus {2,3,4} gives 1,0,7,6,5 placed at positions 5,6,7,0,1
        assert_eq!(c1, vec![6, 5, 2, 3, 4, 1, 0, 7]);
        // Slice 5,4,3 from p2; p1 from position 5: 5,6,7,0,1,2,3,4 minus {3,4,5}
        assert_eq!(c2, vec![1, 2, 5, 4, 3, 6, 7, 0]);
    }

    #[test]
    fn test_ox_minimal_cut() {
        let p1 = [3, 0, 4, 1, 2];
        let p2 = [1, 2, 3, 4, 0];
        for start in 0..4 {
            let (c1, c2) = order_crossover_at(&p1, &p2, start, start + 1);
            assert!(is_valid_permutation(&c1, 5), "{c1:?}");
            assert!(is_valid_permutation(&c2, 5), "{c2:?}");
            assert_eq!(c1[start..=start + 1], p1[start..=start + 1]);
            assert_eq!(c2[start..=start + 1], p2[start..=start + 1]);
        }
    }

    #[test]
    fn test_ox_two_nodes() {
        let mut rng = StdRng::seed_from_u64(1);
        let (c1, c2) = order_crossover(&[0, 1], &[1, 0], &mut rng).expect("valid");
        // The only cut is [0, 1], so children copy their template
        assert_eq!(c1, vec![0, 1]);
        assert_eq!(c2, vec![1, 0]);
    }

    #[test]
    fn test_ox_rejects_bad_parents() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            order_crossover(&[0, 1, 2], &[0, 1], &mut rng).unwrap_err(),
            TspError::SizeMismatch {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            order_crossover(&[0], &[0], &mut rng).unwrap_err(),
            TspError::TooFewNodes {
                required: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_invert_reverse_interior() {
        let mut perm = vec![0, 1, 2, 3, 4, 5];
        invert_at(&mut perm, Inversion::Reverse, 1, 5);
        assert_eq!(perm, vec![0, 4, 3, 2, 1, 5]);
    }

    #[test]
    fn test_invert_swap_ends() {
        let mut perm = vec![0, 1, 2, 3, 4, 5];
        invert_at(&mut perm, Inversion::SwapEnds, 1, 5);
        assert_eq!(perm, vec![0, 4, 2, 3, 1, 5]);
    }

    #[test]
    fn test_invert_tiny() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut single = vec![0];
        invert(&mut single, Inversion::Reverse, &mut rng);
        assert_eq!(single, vec![0]);
    }

    #[test]
    fn test_swap_mutation_preserves_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let mut perm: Vec<usize> = (0..10).collect();
            swap_mutation(&mut perm, &mut rng);
            assert!(is_valid_permutation(&perm, 10));
        }
    }

    fn shuffled(n: usize, seed: u64) -> Vec<usize> {
        use rand::seq::SliceRandom;
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(&mut StdRng::seed_from_u64(seed));
        perm
    }

    proptest! {
        #[test]
        fn prop_ox_children_are_permutations(
            n in 2usize..40,
            s1 in any::<u64>(),
            s2 in any::<u64>(),
            s3 in any::<u64>(),
        ) {
            let p1 = shuffled(n, s1);
            let p2 = shuffled(n, s2);
            let mut rng = StdRng::seed_from_u64(s3);
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng).expect("equal lengths");
            prop_assert!(is_valid_permutation(&c1, n));
            prop_assert!(is_valid_permutation(&c2, n));
        }

        #[test]
        fn prop_perturbations_are_permutations(n in 2usize..40, s1 in any::<u64>(), s2 in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(s2);
            for kind in [Inversion::Reverse, Inversion::SwapEnds] {
                let mut perm = shuffled(n, s1);
                invert(&mut perm, kind, &mut rng);
                prop_assert!(is_valid_permutation(&perm, n));
            }
            let mut perm = shuffled(n, s1);
            swap_mutation(&mut perm, &mut rng);
            prop_assert!(is_valid_permutation(&perm, n));
        }
    }
}
