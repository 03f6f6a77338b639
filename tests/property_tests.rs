//! Property-based tests for vocabularies, the filter index and graph building.

use std::collections::HashSet;

use proptest::prelude::*;

use kg_dataset::filter_index::FilterIndex;
use kg_dataset::graph_builder::{adjacency_and_degrees, build_graph};
use kg_dataset::types::{IndexedTriple, Triple};
use kg_dataset::vocabulary::{TokenVocabulary, Vocabularies};

/// Data tokens; never collide with the reserved "OOV" / ""
fn arb_token() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_/]{0,12}".prop_map(|s| s)
}

fn arb_triples(max_entity: usize, max_relation: usize) -> impl Strategy<Value = Vec<IndexedTriple>> {
    prop::collection::vec(
        (0..max_entity, 0..max_relation, 0..max_entity)
            .prop_map(|(h, r, t)| IndexedTriple::new(h, r, t)),
        0..40,
    )
}

mod vocabulary_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn size_is_dedup_count(tokens in prop::collection::vec(arb_token(), 0..50)) {
            let vocab = TokenVocabulary::build(tokens.clone());
            let unique: HashSet<&String> = tokens.iter().collect();
            prop_assert_eq!(vocab.size(), unique.len());
            prop_assert_eq!(vocab.token_of(0), "OOV");
            prop_assert_eq!(vocab.token_of(1), "");
        }

        #[test]
        fn lookups_round_trip(tokens in prop::collection::vec(arb_token(), 1..50)) {
            let vocab = TokenVocabulary::build(tokens.clone());
            for i in 0..vocab.index_space() {
                prop_assert_eq!(vocab.index_of(vocab.token_of(i)), i);
            }
            for t in &tokens {
                prop_assert_eq!(vocab.token_of(vocab.index_of(t)), t.as_str());
            }
        }

        #[test]
        fn unseen_lookups_fall_back(tokens in prop::collection::vec(arb_token(), 0..20)) {
            let vocab = TokenVocabulary::build(tokens);
            prop_assert_eq!(vocab.index_of("UNSEEN TOKEN"), 0);
            prop_assert_eq!(vocab.token_of(vocab.index_space() + 7), "OOV");
        }

        #[test]
        fn order_of_input_does_not_matter(tokens in prop::collection::vec(arb_token(), 0..30)) {
            let mut reversed = tokens.clone();
            reversed.reverse();
            prop_assert_eq!(TokenVocabulary::build(tokens), TokenVocabulary::build(reversed));
        }

        #[test]
        fn dictionary_blob_round_trip(
            raw in prop::collection::vec((arb_token(), arb_token(), arb_token()), 0..20)
        ) {
            let triples: Vec<Triple> = raw
                .into_iter()
                .map(|(h, r, t)| Triple::new(h, r, t))
                .collect();
            let vocabs = Vocabularies::from_triples(&triples);

            let json = serde_json::to_string(&vocabs.to_blob()).unwrap();
            let restored = Vocabularies::from_blob(serde_json::from_str(&json).unwrap()).unwrap();
            prop_assert_eq!(restored, vocabs);
        }
    }
}

mod filter_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn links_are_symmetric(triples in arb_triples(8, 3)) {
            let index = FilterIndex::from_indexed(&triples);
            for t in &triples {
                prop_assert!(index.lookup(t.head, t.relation).unwrap().contains(&t.tail));
                prop_assert!(index.lookup(t.tail, t.relation).unwrap().contains(&t.head));
            }
        }

        #[test]
        fn no_duplicate_targets(triples in arb_triples(5, 2)) {
            let mut doubled = triples.clone();
            doubled.extend(triples.iter().copied());
            let index = FilterIndex::from_indexed(&doubled);

            for t in &triples {
                let targets = index.lookup(t.head, t.relation).unwrap();
                let unique: HashSet<&usize> = targets.iter().collect();
                prop_assert_eq!(unique.len(), targets.len());
            }
            prop_assert!(index.same_links(&FilterIndex::from_indexed(&triples)));
        }
    }
}

mod graph_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn edges_doubled_and_sorted(triples in arb_triples(10, 4)) {
            let built = build_graph(10, 4, &triples).unwrap();
            prop_assert_eq!(built.graph.num_edges(), triples.len() * 2);
            prop_assert_eq!(built.edge_relations.len(), triples.len() * 2);

            let keys: Vec<(usize, usize, usize)> = built
                .graph
                .edges()
                .zip(&built.edge_relations)
                .map(|((s, d), &r)| (d, s, r))
                .collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn edge_norm_matches_in_degree(triples in arb_triples(10, 4)) {
            let built = build_graph(10, 4, &triples).unwrap();
            let in_degrees = built.graph.in_degrees();

            for (&d, &norm) in built.graph.dst().iter().zip(&built.edge_norm) {
                prop_assert!((norm - 1.0 / in_degrees[d] as f32).abs() < 1e-6);
            }
            for (node, &norm) in built.node_norm.iter().enumerate() {
                if in_degrees[node] == 0 {
                    prop_assert_eq!(norm, 0.0);
                }
            }
        }

        #[test]
        fn adjacency_degree_counts_endpoints(triples in arb_triples(10, 4)) {
            let index = adjacency_and_degrees(10, &triples).unwrap();
            let total: usize = index.degrees().iter().sum();
            prop_assert_eq!(total, triples.len() * 2);
            for node in 0..10 {
                prop_assert_eq!(index.degree(node), index.neighbors(node).len());
            }
        }
    }
}
