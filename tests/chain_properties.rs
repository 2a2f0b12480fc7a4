/// Property tests for the transition table and tokenizer invariants.

use markov_text::core::chain::Chain;
use markov_text::core::graph::SentenceGraph;
use markov_text::core::tokenizer::tokenize;
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    #[test]
    fn probabilities_sum_to_one(stream in prop::collection::vec(0u8..20, 0..200)) {
        let chain = Chain::build(stream);
        for entry in chain.iter() {
            prop_assert_eq!(entry.targets.len(), entry.probabilities.len());
            if !entry.targets.is_empty() {
                let sum: f64 = entry.probabilities.iter().sum();
                prop_assert!((sum - 1.0).abs() < 1e-5, "sum was {}", sum);
            }
        }
    }

    #[test]
    fn one_entry_per_distinct_state(stream in prop::collection::vec(0u8..20, 0..200)) {
        let distinct: BTreeSet<u8> = stream.iter().copied().collect();
        let chain = Chain::build(stream);
        prop_assert_eq!(chain.len(), distinct.len());
        for state in &distinct {
            prop_assert!(chain.lookup(state).is_some());
        }
    }

    #[test]
    fn iteration_is_strictly_ascending(stream in prop::collection::vec(any::<i16>(), 0..100)) {
        let chain = Chain::build(stream);
        let states: Vec<i16> = chain.iter().map(|e| e.state).collect();
        for pair in states.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for entry in chain.iter() {
            for pair in entry.targets.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn unobserved_states_are_absent(
        stream in prop::collection::vec(0u8..20, 0..100),
        absent in 20u8..=255,
    ) {
        let chain = Chain::build(stream);
        prop_assert!(chain.lookup(&absent).is_none());
    }

    #[test]
    fn targets_are_observed_successors(stream in prop::collection::vec(0u8..8, 2..60)) {
        let observed: BTreeSet<(u8, u8)> = stream.windows(2).map(|w| (w[0], w[1])).collect();
        let chain = Chain::build(stream);
        for entry in chain.iter() {
            for target in &entry.targets {
                prop_assert!(observed.contains(&(entry.state, *target)));
            }
        }
    }

    #[test]
    fn tokenizer_output_is_well_formed(text in "[A-Za-z .,;:!?\"()'-]{0,120}") {
        let mut graph = SentenceGraph::new();
        for sentence in tokenize(&text) {
            prop_assert!(!sentence.clauses.is_empty());
            for clause in &sentence.clauses {
                prop_assert!(!clause.words.is_empty());
                prop_assert!(clause.words.iter().all(|w| !w.text.is_empty()));
            }
            prop_assert!(graph.add_sentence(&sentence).is_ok());
        }
    }
}
