/// Generation integration tests — corpus to sentences end to end.

use markov_text::core::capitalization::CapTracker;
use markov_text::core::config::GeneratorConfig;
use markov_text::core::graph::{NodeKey, SentenceGraph};
use markov_text::core::pipeline::SentenceGenerator;
use markov_text::core::text::TextChain;
use markov_text::core::tokenizer::{tokenize, Capitalization};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn corpus() -> String {
    std::fs::read_to_string("tests/fixtures/sample_corpus.txt").unwrap()
}

#[test]
fn two_sentence_corpus_only_starts_with_the() {
    let mut graph = SentenceGraph::new();
    for sentence in tokenize("The cat sat. The cat ran.") {
        graph.add_sentence(&sentence).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..50 {
        let path = graph.walk(&mut rng).unwrap();
        let sentence = graph.sentence_from_path(&path);
        let first = sentence.words().next().unwrap();
        assert_eq!(first.text, "the");
        assert!(matches!(sentence.to_string().as_str(), "the cat sat." | "the cat ran."));
        for pair in path.windows(2) {
            assert!(graph.edge_weight(pair[0], pair[1]) > 0);
        }
    }
}

#[test]
fn corpus_generation_uses_observed_transitions() {
    let mut graph = SentenceGraph::new();
    for sentence in tokenize(&corpus()) {
        graph.add_sentence(&sentence).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..30 {
        let path = graph.walk(&mut rng).unwrap();
        let opener = graph.node(path[0]).unwrap();
        assert!(opener.key.last_word.is_empty());
        for pair in path.windows(2) {
            assert!(graph.edge_weight(pair[0], pair[1]) > 0);
        }
    }
}

#[test]
fn titles_survive_generation() {
    let mut graph = SentenceGraph::new();
    for sentence in tokenize(&corpus()) {
        graph.add_sentence(&sentence).unwrap();
    }
    assert!(graph.lookup(&NodeKey::new("", "", "mrs.")).is_some());
    assert!(graph.lookup(&NodeKey::new("mrs.", "", "hale")).is_some());
}

#[test]
fn acronyms_and_names_recapitalize() {
    let mut tracker = CapTracker::new();
    for sentence in tokenize(&corpus()) {
        tracker.observe(&sentence);
    }
    assert_eq!(tracker.capitalization_for("noaa"), Capitalization::AllCapital);
    assert_eq!(tracker.capitalization_for("hale"), Capitalization::SomeCapital);
    assert_eq!(tracker.capitalization_for("keeper"), Capitalization::NoCapital);
}

#[test]
fn nasa_example() {
    let mut tracker = CapTracker::new();
    for sentence in tokenize("NASA launched a rocket.") {
        tracker.observe(&sentence);
    }
    assert_eq!(tracker.capitalization_for("nasa"), Capitalization::AllCapital);
    assert_eq!(tracker.capitalization_for("launched"), Capitalization::NoCapital);
}

#[test]
fn generator_from_config_fixture_is_reproducible() {
    let config = GeneratorConfig::load_from_ron(Path::new("tests/fixtures/generator.ron")).unwrap();
    let count = config.sentence_count;

    let mut a = SentenceGenerator::builder()
        .config(config.clone())
        .train_file(Path::new("tests/fixtures/sample_corpus.txt"))
        .unwrap();
    let mut b = SentenceGenerator::builder()
        .config(config)
        .train_file(Path::new("tests/fixtures/sample_corpus.txt"))
        .unwrap();

    let first = a.generate_batch(count).unwrap();
    assert_eq!(first.len(), 5);
    assert_eq!(first, b.generate_batch(count).unwrap());
    for line in &first {
        assert!(line.split_whitespace().count() >= 5, "too short: {line}");
    }
}

#[test]
fn large_minimum_terminates_on_small_corpus() {
    let mut generator = SentenceGenerator::builder()
        .seed(5)
        .min_words(100)
        .max_attempts(50)
        .train("The cat sat. The cat ran.")
        .unwrap();
    let sentence = generator.generate().unwrap();
    assert!(sentence == "The cat sat." || sentence == "The cat ran.");
}

#[test]
fn missing_corpus_file_is_an_error() {
    let result = SentenceGenerator::builder().train_file(Path::new("tests/fixtures/absent.txt"));
    assert!(result.is_err());
}

#[test]
fn text_chain_over_corpus() {
    let words: Vec<String> = corpus().split_whitespace().map(str::to_string).collect();
    let chain = TextChain::build_streaming(words.clone(), 2, 10).unwrap();
    assert_eq!(chain.history(), 2);

    let mut rng = StdRng::seed_from_u64(8);
    let out = chain.generate(&mut rng, 60, 10).unwrap();
    assert_eq!(out.len(), 60);
    for word in &out {
        assert!(words.contains(word));
    }
}
