//! Cost-ordered population of tours.

use crate::error::{Result, TspError};

use super::Tour;

/// Upper population bound for an instance of `num_nodes` nodes.
///
/// `max(min_size, round(185 - 0.175 * num_nodes))`, so larger instances keep
/// fewer (and more expensive) individuals.
///
/// ```
/// use u_tsp_memetic::models::max_population;
///
/// assert_eq!(max_population(52, 5), 176);
/// assert_eq!(max_population(2000, 5), 5);
/// ```
pub fn max_population(num_nodes: usize, min_size: usize) -> usize {
    let bound = (185.0 - 0.175 * num_nodes as f64).round().max(0.0) as usize;
    bound.max(min_size)
}

/// Result of a fill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    /// Candidates accepted into the population.
    pub inserted: usize,
    /// Candidates generated (accepted or rejected).
    pub attempts: usize,
    /// `true` if attempts ran out before reaching the target size.
    pub exhausted: bool,
}

/// Tours ordered by ascending cost, bounded by `[min_size, max_size]`.
///
/// No two members share the same cost. Cost equality stands in for tour
/// equality, so distinct tours with equal length are treated as duplicates.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Tour>,
    min_size: usize,
    max_size: usize,
}

impl Population {
    /// Creates an empty population with the given bounds.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self> {
        if min_size == 0 {
            return Err(TspError::InvalidConfig(
                "min_population must be at least 1".into(),
            ));
        }
        if max_size < min_size {
            return Err(TspError::InvalidConfig(format!(
                "max population {max_size} is below min population {min_size}"
            )));
        }
        Ok(Self {
            members: Vec::with_capacity(max_size + 2),
            min_size,
            max_size,
        })
    }

    /// Lower size bound.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Upper size bound.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Current number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in rank order (best first once sorted).
    pub fn members(&self) -> &[Tour] {
        &self.members
    }

    /// Member at rank `index`.
    pub fn get(&self, index: usize) -> Option<&Tour> {
        self.members.get(index)
    }

    /// Best member, if any.
    pub fn best(&self) -> Option<&Tour> {
        self.members.first()
    }

    /// Returns `true` if some member has exactly this cost.
    pub fn contains_cost(&self, cost: f64) -> bool {
        self.members.iter().any(|m| m.cost() == cost)
    }

    /// Appends a tour unconditionally. The caller re-sorts afterwards.
    pub fn push(&mut self, tour: Tour) {
        self.members.push(tour);
    }

    /// Appends `tour` unless its cost duplicates a member; returns it back on collision.
    pub fn try_insert(&mut self, tour: Tour) -> std::result::Result<(), Tour> {
        if self.contains_cost(tour.cost()) {
            return Err(tour);
        }
        self.members.push(tour);
        Ok(())
    }

    /// Sorts members by ascending cost. Stable, so equal costs keep insertion order.
    pub fn sort(&mut self) {
        self.members.sort_by(Tour::cmp_cost);
    }

    /// Drops the worst members beyond `max_size`.
    pub fn trim(&mut self) {
        self.members.truncate(self.max_size);
    }

    /// Keeps the `survivors` best members, never going below `min_size`.
    ///
    /// Returns the number of members removed.
    pub fn cull_to(&mut self, survivors: usize) -> usize {
        let keep = survivors.max(self.min_size);
        let before = self.members.len();
        self.members.truncate(keep);
        before - self.members.len()
    }

    /// Fills toward `max_size` with candidates from `make`, skipping cost duplicates.
    ///
    /// The attempt budget is `len * (max_size / min_size + 1)`. Members are
    /// sorted afterwards.
    pub fn fill<F>(&mut self, mut make: F) -> FillOutcome
    where
        F: FnMut() -> Tour,
    {
        let budget = self.members.len() * (self.max_size / self.min_size + 1);
        let mut attempts = 0;
        let mut inserted = 0;

        while attempts < budget && self.members.len() < self.max_size {
            attempts += 1;
            if self.try_insert(make()).is_ok() {
                inserted += 1;
            }
        }

        self.sort();
        FillOutcome {
            inserted,
            attempts,
            exhausted: self.members.len() < self.max_size,
        }
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Verifies ordering and cost uniqueness.
    pub fn check_invariants(&self) -> Result<()> {
        for pair in self.members.windows(2) {
            if pair[0].cost() >= pair[1].cost() {
                return Err(TspError::InvariantViolation(format!(
                    "population not strictly ordered by cost: {} before {}",
                    pair[0].cost(),
                    pair[1].cost()
                )));
            }
        }
        if self.members.len() > self.max_size {
            return Err(TspError::InvariantViolation(format!(
                "population size {} exceeds max {}",
                self.members.len(),
                self.max_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn line(n: usize) -> DistanceMatrix {
        let coords: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 0.0)).collect();
        DistanceMatrix::from_coordinates(&coords).expect("valid")
    }

    fn tour_with_cost(cost: f64) -> Tour {
        let mut tour = Tour::placeholder(1);
        u_metaheur::ga::Individual::set_fitness(&mut tour, cost);
        tour
    }

    #[test]
    fn test_max_population() {
        assert_eq!(max_population(0, 5), 185);
        assert_eq!(max_population(100, 5), 168); // 185 - 17.5 = 167.5 -> 168
        assert_eq!(max_population(1040, 5), 5); // 3 < 5
        assert_eq!(max_population(1100, 5), 5); // negative clamps
        assert_eq!(max_population(10, 200), 200);
    }

    #[test]
    fn test_new_validates_bounds() {
        assert!(Population::new(0, 10).is_err());
        assert!(Population::new(5, 4).is_err());
        let pop = Population::new(5, 5).expect("valid");
        assert!(pop.is_empty());
        assert_eq!(pop.min_size(), 5);
        assert_eq!(pop.max_size(), 5);
    }

    #[test]
    fn test_try_insert_rejects_equal_cost() {
        let mut pop = Population::new(1, 10).expect("valid");
        assert!(pop.try_insert(tour_with_cost(10.0)).is_ok());
        let rejected = pop.try_insert(tour_with_cost(10.0)).unwrap_err();
        assert_eq!(rejected.cost(), 10.0);
        assert!(pop.try_insert(tour_with_cost(11.0)).is_ok());
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_sort_and_best() {
        let mut pop = Population::new(1, 10).expect("valid");
        for c in [30.0, 10.0, 20.0] {
            pop.push(tour_with_cost(c));
        }
        pop.sort();
        let costs: Vec<f64> = pop.members().iter().map(Tour::cost).collect();
        assert_eq!(costs, vec![10.0, 20.0, 30.0]);
        assert_eq!(pop.best().map(Tour::cost), Some(10.0));
        assert!(pop.check_invariants().is_ok());
    }

    #[test]
    fn test_trim_and_cull() {
        let mut pop = Population::new(2, 3).expect("valid");
        for c in 1..=5 {
            pop.push(tour_with_cost(c as f64));
        }
        pop.trim();
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.cull_to(1), 1);
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.get(1).map(Tour::cost), Some(2.0));
    }

    #[test]
    fn test_fill_respects_budget() {
        let mut pop = Population::new(5, 50).expect("valid");
        pop.push(tour_with_cost(1.0));
        let mut next = 1.0;
        let outcome = pop.fill(|| {
            next += 1.0;
            tour_with_cost(next)
        });
        // budget = 1 * (50 / 5 + 1) = 11
        assert_eq!(outcome.attempts, 11);
        assert_eq!(outcome.inserted, 11);
        assert!(outcome.exhausted);
        assert_eq!(pop.len(), 12);
    }

    #[test]
    fn test_fill_stops_at_max() {
        let mut pop = Population::new(1, 4).expect("valid");
        pop.push(tour_with_cost(100.0));
        let mut next = 0.0;
        let outcome = pop.fill(|| {
            next += 1.0;
            tour_with_cost(next)
        });
        assert_eq!(pop.len(), 4);
        assert!(!outcome.exhausted);
        assert_eq!(pop.best().map(Tour::cost), Some(1.0));
        assert!(pop.check_invariants().is_ok());
    }

    #[test]
    fn test_fill_skips_duplicates() {
        let dm = line(4);
        let mut pop = Population::new(1, 10).expect("valid");
        pop.push(Tour::from_permutation(vec![0, 1, 2, 3], &dm).expect("valid"));
        // Every refined tour on a line has the same length
        let outcome = pop.fill(|| Tour::from_permutation(vec![3, 1, 0, 2], &dm).expect("valid"));
        assert_eq!(outcome.inserted, 0);
        assert_eq!(pop.len(), 1);
        assert!(outcome.exhausted);
    }

    #[test]
    fn test_invariant_detects_duplicates() {
        let mut pop = Population::new(1, 10).expect("valid");
        pop.push(tour_with_cost(5.0));
        pop.push(tour_with_cost(5.0));
        assert!(matches!(
            pop.check_invariants(),
            Err(TspError::InvariantViolation(_))
        ));
    }
}
