/*!
Prim's algorithm and the tree-growing loop it shares with Dijkstra.

Both algorithms keep every uncommitted vertex in an augmented [`PrioQ`] together with its best
known `(parent, cost)` candidate. The cheapest candidate is committed to the [`Tree`]; its edges
then relax the candidates of uncommitted neighbors in place. The only difference is the
relaxed cost: Prim uses the edge cost, Dijkstra the path cost through the committed vertex.
*/

use std::{cmp::Ordering, fmt::Display};

use tracing::{debug, trace};

use super::*;

/// Candidate stored in the priority queue while growing a [`Tree`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PqElem {
    pub vertex: Node,
    pub parent: Node,
    pub cost: Cost,
}

impl Keyed for PqElem {
    type Key = Node;

    fn key(&self) -> Node {
        self.vertex
    }
}

impl Display for PqElem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: <{},{}>", self.vertex, self.parent, self.cost)
    }
}

/// Cheapest candidate first; ties are broken by vertex id to keep runs reproducible
fn cheapest_first(a: &PqElem, b: &PqElem) -> Ordering {
    a.cost.cmp(&b.cost).then(a.vertex.cmp(&b.vertex))
}

/// Grows a tree of the given kind from `root`.
///
/// Stops once the cheapest candidate is at [`INFINITY_COST`]; all remaining vertices then stay
/// unreached.
///
/// ** Panics if `root >= n` or if more than `2m` edges are relaxed **
pub(crate) fn grow_tree<G>(graph: &G, root: Node, kind: TreeKind) -> Tree<'_, G>
where
    G: AdjacencyProbe + EdgeCosts + GraphEdgeOrder,
{
    let mut tree = Tree::new(graph, kind, root);

    let mut pq = PrioQ::with_capacity(graph.len(), cheapest_first);
    for u in graph.vertices() {
        pq.insert(PqElem {
            vertex: u,
            parent: root,
            cost: if u == root { 0 } else { INFINITY_COST },
        });
    }

    let max_iter = 2 * graph.number_of_edges() as u64;
    let mut num_iter = 0u64;

    while let Some(top) = pq.pop_top() {
        if top.cost >= INFINITY_COST {
            trace!(remaining = pq.len() + 1, "no finite candidate left");
            break;
        }

        trace!(top = %top, queued = pq.len(), "commit");
        tree.set(
            top.vertex,
            TreeEntry {
                parent: top.parent,
                cost: top.cost,
            },
        );

        for (Edge(_, w), edge_cost) in graph.edges_of(top.vertex) {
            assert!(
                num_iter < max_iter,
                "Relaxed more than {max_iter} edges while growing a tree"
            );
            num_iter += 1;

            if tree.is_reached(w) {
                continue;
            }

            let cost = match kind {
                TreeKind::MinimumSpanning => edge_cost,
                TreeKind::ShortestPath => top.cost.saturating_add(edge_cost),
            };
            let candidate = PqElem {
                vertex: w,
                parent: top.vertex,
                cost,
            };

            match pq.contains(&candidate) {
                None => pq.insert(candidate),
                Some(pos) if cost < pq.get(pos).cost => {
                    trace!(old = %pq.get(pos), new = %candidate, "relax");
                    pq.change_value(pos, candidate);
                }
                Some(_) => {}
            }
        }
    }

    debug!(
        ?kind,
        root,
        reached = tree.number_of_reached(),
        n = graph.number_of_nodes(),
        total_cost = tree.total_cost(),
        relaxed = num_iter,
        "grew tree"
    );

    tree
}

/// Minimum spanning tree computed by Prim's algorithm, seeded at vertex `0`.
///
/// If the graph is not connected, the tree only spans the component of the seed and all other
/// vertices stay unreached.
pub struct MstPrim<'a, G> {
    tree: Tree<'a, G>,
}

impl<'a, G> MstPrim<'a, G>
where
    G: AdjacencyProbe + EdgeCosts + GraphEdgeOrder,
{
    /// Runs Prim's algorithm on `graph`
    pub fn new(graph: &'a G) -> Self {
        Self {
            tree: grow_tree(graph, 0, TreeKind::MinimumSpanning),
        }
    }

    /// The seed vertex of the tree
    pub fn seed(&self) -> Node {
        self.tree.root()
    }

    /// Sum of the edge costs of the tree
    pub fn weight(&self) -> u64 {
        self.tree.total_cost()
    }

    /// Returns *true* if the tree reaches every vertex of the graph
    pub fn is_spanning(&self) -> bool {
        self.tree.number_of_reached() == self.tree.number_of_nodes()
    }

    /// The computed tree
    pub fn tree(&self) -> &Tree<'a, G> {
        &self.tree
    }

    /// Consumes the algorithm and returns the computed tree
    pub fn into_tree(self) -> Tree<'a, G> {
        self.tree
    }
}

/// Prim's algorithm as a method on the graph itself
pub trait MinimumSpanningTree: AdjacencyProbe + EdgeCosts + GraphEdgeOrder + Sized {
    /// Computes a minimum spanning tree seeded at vertex `0`.
    /// Each tree entry holds the cost of the edge to its parent.
    fn mst_prim(&self) -> Tree<'_, Self> {
        MstPrim::new(self).into_tree()
    }
}

impl<G> MinimumSpanningTree for G where G: AdjacencyProbe + EdgeCosts + GraphEdgeOrder {}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn fixture() -> Graph {
        Graph::from_edges(
            EdgeType::Undirected,
            5,
            [
                (Edge(0, 1), 2),
                (Edge(1, 2), 3),
                (Edge(0, 2), 4),
                (Edge(2, 3), 1),
                (Edge(3, 4), 5),
            ],
        )
        .unwrap()
    }

    /// Weight of the cheapest spanning forest of the component containing `0`,
    /// found by trying every edge subset of the right size
    fn brute_force_weight(graph: &Graph) -> u64 {
        let component = graph.bfs(0).collect_vec();
        let edges = graph
            .edges()
            .filter(|(Edge(u, v), _)| component.contains(u) && component.contains(v))
            .collect_vec();

        if component.len() == 1 {
            return 0;
        }

        edges
            .iter()
            .combinations(component.len() - 1)
            .filter(|subset| {
                let mut sets = FindMerge::new(graph.number_of_nodes());
                subset
                    .iter()
                    .all(|(Edge(u, v), _)| sets.find(*u) != sets.find(*v) && {
                        sets.merge(*u, *v);
                        true
                    })
            })
            .map(|subset| subset.iter().map(|(_, c)| *c as u64).sum::<u64>())
            .min()
            .unwrap()
    }

    #[test]
    fn fixture_weight() {
        let graph = fixture();
        let mst = MstPrim::new(&graph);

        assert_eq!(mst.seed(), 0);
        assert_eq!(mst.weight(), 11);
        assert!(mst.is_spanning());
        assert_eq!(brute_force_weight(&graph), 11);

        let tree = mst.tree();
        assert_eq!(tree.entry(0), TreeEntry { parent: 0, cost: 0 });
        assert_eq!(
            tree.edges().collect_vec(),
            vec![
                (Edge(1, 0), 2),
                (Edge(2, 1), 3),
                (Edge(3, 2), 1),
                (Edge(4, 3), 5)
            ]
        );
    }

    #[test]
    fn exactly_one_root() {
        let graph = fixture();
        let tree = graph.mst_prim();
        assert_eq!(tree.iter().filter(|&(u, e)| e.parent == u).count(), 1);
        assert!(tree.iter().all(|(u, e)| e.parent != u || e.cost == 0));
    }

    #[test]
    fn random_against_brute_force() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for _ in 0..100 {
            let n = rng.random_range(1..=6);
            let mut graph = Graph::undirected(n).unwrap();
            for u in 0..n {
                for v in (u + 1)..n {
                    if rng.random_bool(0.6) {
                        graph.add_edge(u, v, rng.random_range(1..10));
                    }
                }
            }

            let tree = graph.mst_prim();
            assert_eq!(tree.total_cost(), brute_force_weight(&graph));

            for u in graph.vertices() {
                assert_eq!(tree.is_reached(u), graph.is_node_reachable(0, u));
            }
            for (Edge(u, p), cost) in tree.edges() {
                assert_eq!(graph.get_edge_value(u, p), cost);
            }
        }
    }

    #[test]
    fn disconnected_graph_is_partial() {
        let graph = Graph::from_edges(
            EdgeType::Undirected,
            5,
            [(Edge(0, 1), 4), (Edge(3, 4), 1)],
        )
        .unwrap();

        let mst = MstPrim::new(&graph);
        assert!(!mst.is_spanning());
        assert_eq!(mst.weight(), 4);

        let tree = mst.tree();
        assert_eq!(tree.number_of_reached(), 2);
        for u in [2, 3, 4] {
            assert!(!tree.is_reached(u));
            assert_eq!(tree.cost_of(u), INFINITY_COST);
        }
    }

    #[test]
    fn singleton() {
        let graph = Graph::undirected(1).unwrap();
        let mst = MstPrim::new(&graph);
        assert!(mst.is_spanning());
        assert_eq!(mst.weight(), 0);
    }

    #[test]
    fn pq_elem_display() {
        let elem = PqElem {
            vertex: 3,
            parent: 1,
            cost: 7,
        };
        assert_eq!(elem.to_string(), "[3]: <1,7>");
    }
}
