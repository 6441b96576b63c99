/// Generates the common tests every graph with a given [`EdgeType`](crate::EdgeType) has to pass.
/// Edits random edges and compares the graph against a plain reference map after each step.
macro_rules! test_graph_ops {
    ($env:ident, $edge_type:expr) => {
        #[cfg(test)]
        mod $env {
            use crate::{ops::*, repr::*};
            use fxhash::FxHashMap;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            /// Draws a random edge without self-loops
            fn random_edge<R: Rng>(rng: &mut R, n: NumNodes) -> Edge {
                loop {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    if u != v {
                        return Edge(u, v);
                    }
                }
            }

            fn assert_matches(graph: &Graph, reference: &FxHashMap<Edge, Cost>) {
                let edge_type = $edge_type;
                let n = graph.number_of_nodes();

                assert_eq!(graph.number_of_edges() as usize, reference.len());
                assert_eq!(
                    graph.edges().collect_vec(),
                    reference.iter().map(|(&e, &c)| (e, c)).sorted().collect_vec()
                );

                for u in 0..n {
                    let expected = (0..n)
                        .filter(|&v| reference.contains_key(&edge_type.canonical(Edge(u, v))))
                        .collect_vec();
                    assert_eq!(graph.neighbors_of(u).collect_vec(), expected);
                    assert_eq!(graph.degree_of(u) as usize, expected.len());

                    for v in 0..n {
                        let expected = reference
                            .get(&edge_type.canonical(Edge(u, v)))
                            .copied()
                            .unwrap_or(INFINITY_COST);
                        assert_eq!(graph.get_edge_value(u, v), expected);
                        assert_eq!(graph.has_edge(u, v), expected < INFINITY_COST);
                    }
                }
            }

            #[test]
            fn graph_new() {
                for n in 1..50 {
                    let graph = Graph::new($edge_type, n).unwrap();

                    assert_eq!(graph.edge_type(), $edge_type);
                    assert_eq!(graph.number_of_edges(), 0);
                    assert_eq!(graph.number_of_nodes(), n);
                    assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                    assert!(graph.vertices().all(|u| graph.neighbors_of(u).next().is_none()));
                }
            }

            #[test]
            fn random_edits() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);
                let edge_type = $edge_type;

                for n in [2 as NumNodes, 7, 20] {
                    let mut graph = Graph::new(edge_type, n).unwrap();
                    let mut reference = FxHashMap::default();

                    for round in 0..(n as usize * 8) {
                        let Edge(u, v) = random_edge(rng, n);
                        let key = edge_type.canonical(Edge(u, v));
                        let cost = rng.random_range(MIN_COST..100);

                        match round % 4 {
                            0 | 1 => {
                                graph.add_edge(u, v, cost);
                                reference.insert(key, cost);
                                assert_eq!(graph.get_edge_value(u, v), cost);
                            }
                            2 => {
                                let existed = reference.remove(&key).is_some();
                                assert_eq!(graph.del_edge(u, v), existed);
                                assert_eq!(graph.get_edge_value(u, v), INFINITY_COST);
                            }
                            _ => {
                                let exists = reference.contains_key(&key);
                                if exists {
                                    reference.insert(key, cost);
                                }
                                assert_eq!(graph.set_edge_value(u, v, cost), exists);
                            }
                        }
                    }

                    assert_matches(&graph, &reference);
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
