//! Memetic evolutionary loop.
//!
//! [`Evolver`] orchestrates one solve:
//! seeding → (selection → crossover → mutation → 2-opt → insertion →
//! extinction → trim) per generation → best tour.
//!
//! # Seeding
//!
//! The population starts from the 2-opt-refined nearest-neighbor tour and is
//! filled with refined random tours, skipping cost duplicates, within an
//! attempt budget of `len * (max_size / min_size + 1)`.
//!
//! # Extinction
//!
//! After `max_not_improving` generations without a new best, a random
//! prefix of the population survives (see
//! [`extinction_survivors`](super::selection::extinction_survivors)), never
//! fewer than `min_size` members, and the population is refilled.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::EvolverConfig;
use super::operators::{invert, order_crossover, swap_mutation};
use super::selection::{extinction_survivors, select_parent};
use crate::constructive::nearest_neighbor;
use crate::distance::{DistanceMatrix, NeighborIndex};
use crate::error::{Result, TspError};
use crate::models::{max_population, validate_permutation, FillOutcome, Population, Tour};

/// Lifecycle of an [`Evolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolverState {
    /// Built, never solved.
    Uninitialized,
    /// Building the initial population.
    Seeding,
    /// Running generations.
    Evolving,
    /// The last solve has returned.
    Terminated,
}

/// Best tour found by a solve, with run statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTour {
    /// Node visiting order.
    pub permutation: Vec<usize>,
    /// Total tour length, closing edge included.
    pub cost: f64,
    /// Generations executed.
    pub generations: usize,
    /// Extinctions triggered by stagnation.
    pub extinctions: usize,
    /// Seed that reproduces this run.
    pub seed: u64,
}

/// What happened to one offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Inserted,
    InsertedAfterInversion,
    Discarded,
}

/// Memetic GA engine for one TSP instance.
///
/// # Examples
///
/// ```
/// use u_tsp_memetic::ga::{Evolver, EvolverConfig};
///
/// let coords = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (5.0, -3.0)];
/// let mut evolver = Evolver::new(&coords, EvolverConfig::default().with_seed(42))
///     .expect("valid instance");
///
/// let mut generations = 0;
/// let best = evolver
///     .solve(|| { generations += 1; generations >= 10 }, 0.0)
///     .expect("solve");
/// assert_eq!(best.permutation.len(), 5);
/// assert_eq!(best.seed, 42);
/// ```
#[derive(Debug)]
pub struct Evolver {
    distances: Arc<DistanceMatrix>,
    nearest: Arc<NeighborIndex>,
    config: EvolverConfig,
    population: Population,
    rng: StdRng,
    seed: u64,
    state: EvolverState,
    best_cost: f64,
    not_improving: usize,
    generations: usize,
    extinctions: usize,
}

impl Evolver {
    /// Builds the distance matrix and neighbor index for `coordinates`.
    ///
    /// Fails with [`TspError::EmptyInstance`] for no coordinates and with
    /// [`TspError::InvalidConfig`] for an invalid configuration.
    pub fn new(coordinates: &[(f64, f64)], config: EvolverConfig) -> Result<Self> {
        config.validate()?;
        let distances = DistanceMatrix::from_coordinates(coordinates)?;
        let nearest = NeighborIndex::new(&distances)?;
        Self::with_shared(Arc::new(distances), Arc::new(nearest), config)
    }

    /// Builds an evolver over precomputed, shareable instance data.
    pub fn with_shared(
        distances: Arc<DistanceMatrix>,
        nearest: Arc<NeighborIndex>,
        config: EvolverConfig,
    ) -> Result<Self> {
        config.validate()?;
        if nearest.len() != distances.size() {
            return Err(TspError::SizeMismatch {
                expected: distances.size(),
                found: nearest.len(),
            });
        }

        let min_size = config.min_population;
        let max_size = max_population(distances.size(), min_size);
        let population = Population::new(min_size, max_size)?;
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            distances,
            nearest,
            config,
            population,
            rng: StdRng::seed_from_u64(seed),
            seed,
            state: EvolverState::Uninitialized,
            best_cost: f64::INFINITY,
            not_improving: 0,
            generations: 0,
            extinctions: 0,
        })
    }

    /// Runs the memetic loop and returns the best tour.
    ///
    /// `stop` is polled once after every generation; the loop also ends as
    /// soon as the best cost reaches `known_optimum` (checked before each
    /// generation, `0.0` disables the check). Every call reseeds the
    /// generator from [`seed`](Self::seed), so repeated solves are identical.
    pub fn solve<F>(&mut self, mut stop: F, known_optimum: f64) -> Result<BestTour>
    where
        F: FnMut() -> bool,
    {
        self.reset();
        info!(
            nodes = self.distances.size(),
            seed = self.seed,
            max_population = self.population.max_size(),
            "starting memetic solve"
        );

        self.state = EvolverState::Seeding;
        self.seed_population()?;

        self.state = EvolverState::Evolving;
        if self.distances.size() >= 2 {
            loop {
                if known_optimum > 0.0 && self.best_cost <= known_optimum {
                    debug!(best = self.best_cost, known_optimum, "known optimum reached");
                    break;
                }
                self.generation()?;
                if stop() {
                    break;
                }
            }
        }
        self.state = EvolverState::Terminated;

        let best = self
            .population
            .best()
            .ok_or_else(|| TspError::InvariantViolation("population is empty".into()))?;
        info!(
            cost = best.cost(),
            generations = self.generations,
            extinctions = self.extinctions,
            "memetic solve finished"
        );

        Ok(BestTour {
            permutation: best.nodes().to_vec(),
            cost: best.cost(),
            generations: self.generations,
            extinctions: self.extinctions,
            seed: self.seed,
        })
    }

    /// Seed that drives every solve of this evolver.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EvolverState {
        self.state
    }

    /// Population left by the last solve.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Lower population bound.
    pub fn min_size(&self) -> usize {
        self.population.min_size()
    }

    /// Upper population bound for this instance.
    pub fn max_size(&self) -> usize {
        self.population.max_size()
    }

    /// Shared distance matrix.
    pub fn distances(&self) -> &Arc<DistanceMatrix> {
        &self.distances
    }

    /// Active configuration.
    pub fn config(&self) -> &EvolverConfig {
        &self.config
    }

    fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.population.clear();
        self.best_cost = f64::INFINITY;
        self.not_improving = 0;
        self.generations = 0;
        self.extinctions = 0;
    }

    fn seed_population(&mut self) -> Result<()> {
        let seed_tour = Tour::refined(nearest_neighbor(&self.nearest)?, &self.distances);
        debug!(cost = seed_tour.cost(), "nearest-neighbor seed refined");
        self.population.push(seed_tour);
        let outcome = self.fill_population();
        debug!(
            size = self.population.len(),
            inserted = outcome.inserted,
            attempts = outcome.attempts,
            "initial population seeded"
        );
        Ok(())
    }

    /// Refills toward `max_size`; an exhausted budget is only logged.
    fn fill_population(&mut self) -> FillOutcome {
        let distances = &self.distances;
        let rng = &mut self.rng;
        let outcome = self.population.fill(|| Tour::random(distances, &mut *rng));

        if outcome.exhausted {
            warn!(
                size = self.population.len(),
                min_size = self.population.min_size(),
                max_size = self.population.max_size(),
                attempts = outcome.attempts,
                "fill attempts exhausted before reaching max population"
            );
        }
        if let Some(best) = self.population.best() {
            self.best_cost = best.cost();
        }
        outcome
    }

    /// Runs one full generation.
    fn generation(&mut self) -> Result<()> {
        let min_size = self.population.min_size();
        let members = self.population.members();
        let father = select_parent(members, min_size, &mut self.rng);
        let mother = select_parent(members, min_size, &mut self.rng);
        let (child1, child2) =
            order_crossover(members[father].nodes(), members[mother].nodes(), &mut self.rng)?;

        for child in [child1, child2] {
            let placement = self.place_child(child)?;
            if placement == Placement::Discarded {
                debug!(generation = self.generations, "offspring discarded as duplicate");
            }
        }

        let previous = self.best_cost;
        self.population.sort();
        if let Some(best) = self.population.best() {
            self.best_cost = best.cost();
        }

        if self.best_cost < previous {
            self.not_improving = 0;
        } else {
            self.not_improving += 1;
            if self.not_improving >= self.config.max_not_improving {
                self.extinction();
                self.not_improving = 0;
            }
        }

        self.population.trim();
        self.generations += 1;
        self.population.check_invariants()
    }

    /// Mutates, refines, and inserts one child, inverting it once on a cost collision.
    fn place_child(&mut self, mut nodes: Vec<usize>) -> Result<Placement> {
        if self.rng.random_bool(self.config.mutation_rate) {
            swap_mutation(&mut nodes, &mut self.rng);
        }
        validate_permutation(&nodes, self.distances.size())
            .map_err(|e| TspError::InvariantViolation(format!("offspring is invalid: {e}")))?;

        let child = Tour::refined(nodes, &self.distances);
        let collided = match self.population.try_insert(child) {
            Ok(()) => return Ok(Placement::Inserted),
            Err(child) => child,
        };

        let mut nodes = collided.into_nodes();
        invert(&mut nodes, self.config.inversion, &mut self.rng);
        let child = Tour::refined(nodes, &self.distances);
        Ok(match self.population.try_insert(child) {
            Ok(()) => Placement::InsertedAfterInversion,
            Err(_) => Placement::Discarded,
        })
    }

    /// Culls a random tail of the sorted population and refills it.
    fn extinction(&mut self) {
        let survivors = extinction_survivors(
            self.population.members(),
            self.config.massacre_percentage,
            &mut self.rng,
        );
        let culled = self.population.cull_to(survivors);
        self.extinctions += 1;
        debug!(
            generation = self.generations,
            culled,
            survivors = self.population.len(),
            "extinction"
        );
        self.fill_population();
    }
}
