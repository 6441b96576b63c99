use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use rand_pcg::Pcg64Mcg;
use tracing::debug;

use super::*;

/// Seed of the edge-presence stream in reproducible mode
pub const PRESENCE_SEED: u64 = 24718;

/// Seed of the edge-cost stream in reproducible mode
pub const COST_SEED: u64 = 13607;

/// Edge presence is decided by comparing a uniform draw from `[0, PRESENCE_SCALE)` against
/// `density * PRESENCE_SCALE`
pub const PRESENCE_SCALE: u32 = 1 << 20;

/// Two independent random streams: one decides which edges exist, the other draws their costs.
///
/// Keeping them apart makes the edge set independent of the cost range.
#[derive(Debug, Clone)]
pub struct RandomSource {
    presence: Pcg64Mcg,
    cost: Pcg64Mcg,
}

impl RandomSource {
    /// Reproducible source seeded with [`PRESENCE_SEED`] and [`COST_SEED`]
    pub fn fixed() -> Self {
        Self::from_seeds(PRESENCE_SEED, COST_SEED)
    }

    /// Source seeded from the thread-local OS-backed generator
    pub fn from_entropy() -> Self {
        let rng = &mut rand::rng();
        Self {
            presence: Pcg64Mcg::from_rng(rng),
            cost: Pcg64Mcg::from_rng(rng),
        }
    }

    /// Creates reproducible streams from explicit seeds
    pub fn from_seeds(presence_seed: u64, cost_seed: u64) -> Self {
        Self {
            presence: Pcg64Mcg::seed_from_u64(presence_seed),
            cost: Pcg64Mcg::seed_from_u64(cost_seed),
        }
    }

    /// [`RandomSource::fixed`] if `reproducible`, otherwise [`RandomSource::from_entropy`]
    pub fn new(reproducible: bool) -> Self {
        if reproducible {
            Self::fixed()
        } else {
            Self::from_entropy()
        }
    }
}

/// Random graphs in which every candidate edge exists independently with probability `density`
/// and carries a cost drawn uniformly from `[min_cost, max_cost]`.
///
/// Undirected graphs consider every pair `u < v`, directed graphs every ordered pair `u != v`.
/// Candidates are visited row by row; a cost is only drawn for edges that are kept.
#[derive(Debug, Copy, Clone)]
pub struct DensityGraph {
    n: NumNodes,
    density: f64,
    min_cost: Cost,
    max_cost: Cost,
    edge_type: EdgeType,
}

impl Default for DensityGraph {
    fn default() -> Self {
        Self {
            n: Self::DEFAULT_NUM_NODES,
            density: Self::DEFAULT_DENSITY,
            min_cost: Self::DEFAULT_MIN_COST,
            max_cost: Self::DEFAULT_MAX_COST,
            edge_type: EdgeType::Undirected,
        }
    }
}

impl DensityGraph {
    pub const DEFAULT_NUM_NODES: NumNodes = 50;
    pub const DEFAULT_DENSITY: f64 = 0.5;
    pub const DEFAULT_MIN_COST: Cost = 1;
    pub const DEFAULT_MAX_COST: Cost = 10;

    /// Creates a generator with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the probability of every candidate edge
    pub fn density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Updates the inclusive cost range
    pub fn costs(mut self, min_cost: Cost, max_cost: Cost) -> Self {
        self.min_cost = min_cost;
        self.max_cost = max_cost;
        self
    }

    /// Updates the edge type of the generated graph
    pub fn edge_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = edge_type;
        self
    }

    /// Checks all parameters
    pub fn validate(&self) -> Result<(), GraphError> {
        check_num_nodes(self.n)?;

        if !self.density.is_valid_probility() {
            return Err(GraphError::InvalidDensity(self.density));
        }

        if self.min_cost < MIN_COST || self.min_cost > self.max_cost || self.max_cost >= INFINITY_COST
        {
            return Err(GraphError::InvalidCostRange {
                min: self.min_cost,
                max: self.max_cost,
            });
        }

        Ok(())
    }
}

impl NumNodesGen for DensityGraph {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl GraphGenerator for DensityGraph {
    fn stream<'a>(
        &self,
        src: &'a mut RandomSource,
    ) -> Result<impl Iterator<Item = WeightedEdge> + 'a, GraphError> {
        self.validate()?;

        let costs = Uniform::new_inclusive(self.min_cost, self.max_cost).map_err(|_| {
            GraphError::InvalidCostRange {
                min: self.min_cost,
                max: self.max_cost,
            }
        })?;
        let threshold = (self.density * PRESENCE_SCALE as f64) as u32;
        let n = self.n;
        let directed = self.edge_type.is_directed();

        let candidates = (0..n).flat_map(move |u| {
            let first = if directed { 0 } else { u + 1 };
            (first..n).filter(move |&v| v != u).map(move |v| Edge(u, v))
        });

        Ok(candidates.filter_map(move |edge| {
            (src.presence.random_range(0..PRESENCE_SCALE) < threshold)
                .then(|| (edge, costs.sample(&mut src.cost)))
        }))
    }

    fn generate(&self, src: &mut RandomSource) -> Result<Graph, GraphError> {
        let mut graph = Graph::new(self.edge_type, self.n)?;
        graph.add_edges(self.stream(src)?);

        debug!(
            n = self.n,
            m = graph.number_of_edges(),
            density = self.density,
            edge_type = ?self.edge_type,
            "generated random graph"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn fixed_source_is_reproducible() {
        let generator = DensityGraph::new().nodes(30).density(0.4).costs(2, 4);

        let first = generator.generate(&mut RandomSource::fixed()).unwrap();
        let second = generator.generate(&mut RandomSource::fixed()).unwrap();
        assert_eq!(first.edges().collect_vec(), second.edges().collect_vec());

        let other = generator.generate(&mut RandomSource::from_seeds(1, 2)).unwrap();
        assert_ne!(first.edges().collect_vec(), other.edges().collect_vec());
    }

    #[test]
    fn presence_independent_of_costs() {
        let cheap = DensityGraph::new().nodes(20).costs(1, 1);
        let pricey = DensityGraph::new().nodes(20).costs(5, 9);

        let a = cheap.generate(&mut RandomSource::fixed()).unwrap();
        let b = pricey.generate(&mut RandomSource::fixed()).unwrap();
        assert_eq!(
            a.edges().map(|(e, _)| e).collect_vec(),
            b.edges().map(|(e, _)| e).collect_vec()
        );
        assert!(a.edges().all(|(_, c)| c == 1));
        assert!(b.edges().all(|(_, c)| (5..=9).contains(&c)));
    }

    #[test]
    fn extreme_densities() {
        let src = &mut RandomSource::from_seeds(3, 4);
        for (edge_type, full) in [(EdgeType::Undirected, 45), (EdgeType::Directed, 90)] {
            let generator = DensityGraph::new().nodes(10).edge_type(edge_type);

            let empty = generator.density(0.0).generate(src).unwrap();
            assert!(empty.is_singleton());

            let complete = generator.density(1.0).generate(src).unwrap();
            assert_eq!(complete.number_of_edges(), full);
            assert_eq!(complete.edge_type(), edge_type);
            assert!(complete.edges().all(|(e, _)| !e.is_loop()));
        }
    }

    #[test]
    fn density_is_respected() {
        let src = &mut RandomSource::from_seeds(5, 6);
        let graph = DensityGraph::new()
            .nodes(100)
            .density(0.3)
            .generate(src)
            .unwrap();

        let ratio = graph.number_of_edges() as f64 / 4950.0;
        assert!((0.25..0.35).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn stream_is_lazy_and_validated() {
        let src = &mut RandomSource::fixed();
        let first = DensityGraph::new()
            .nodes(MAX_NODES)
            .density(1.0)
            .stream(src)
            .unwrap()
            .take(3)
            .collect_vec();
        assert_eq!(
            first.iter().map(|(e, _)| *e).collect_vec(),
            vec![Edge(0, 1), Edge(0, 2), Edge(0, 3)]
        );

        let src = &mut RandomSource::fixed();
        assert!(matches!(
            DensityGraph::new().density(1.5).stream(src).map(|_| ()),
            Err(GraphError::InvalidDensity(_))
        ));
    }

    #[test]
    fn invalid_parameters() {
        let src = &mut RandomSource::fixed();
        assert!(matches!(
            DensityGraph::new().nodes(0).generate(src),
            Err(GraphError::NoVertices)
        ));
        assert!(matches!(
            DensityGraph::new().nodes(MAX_NODES + 1).generate(src),
            Err(GraphError::TooManyVertices(_))
        ));
        assert!(matches!(
            DensityGraph::new().density(-0.1).generate(src),
            Err(GraphError::InvalidDensity(_))
        ));
        for (min, max) in [(0, 5), (6, 5), (1, INFINITY_COST)] {
            assert!(matches!(
                DensityGraph::new().costs(min, max).generate(src),
                Err(GraphError::InvalidCostRange { .. })
            ));
        }
    }
}
