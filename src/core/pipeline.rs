/// The generation pipeline: Text → Sentences orchestration.
///
/// Wires together the tokenizer, sentence graph, and capitalization
/// tracker behind a seeded generator.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::capitalization::CapTracker;
use crate::core::config::{ConfigError, GeneratorConfig};
use crate::core::graph::{GraphError, SentenceGraph};
use crate::core::tokenizer::{tokenize, Sentence};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Training statistics for a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GeneratorStats {
    pub sentences: usize,
    pub nodes: usize,
    pub starts: usize,
    pub words: usize,
}

/// A trained sentence generator. Built via `SentenceGenerator::builder()`.
pub struct SentenceGenerator {
    graph: SentenceGraph,
    caps: CapTracker,
    config: GeneratorConfig,
    rng: StdRng,
    sentences: usize,
}

/// Builder for constructing a `SentenceGenerator`.
pub struct SentenceGeneratorBuilder {
    config: GeneratorConfig,
}

impl SentenceGenerator {
    pub fn builder() -> SentenceGeneratorBuilder {
        SentenceGeneratorBuilder {
            config: GeneratorConfig::default(),
        }
    }

    /// Generate one sentence, re-cased and rendered.
    pub fn generate(&mut self) -> Result<String, GeneratorError> {
        Ok(self.generate_sentence()?.to_string())
    }

    /// Generate one structured sentence with learned capitalization applied.
    pub fn generate_sentence(&mut self) -> Result<Sentence, GeneratorError> {
        let raw = self.graph.generate_sentence(
            &mut self.rng,
            self.config.min_words,
            self.config.max_attempts,
        )?;
        Ok(self.caps.recapitalize(&raw))
    }

    /// Generate `count` rendered sentences.
    pub fn generate_batch(&mut self, count: usize) -> Result<Vec<String>, GeneratorError> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Reseed the generator, keeping the trained model.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn stats(&self) -> GeneratorStats {
        GeneratorStats {
            sentences: self.sentences,
            nodes: self.graph.len(),
            starts: self.graph.starts().len(),
            words: self.caps.len(),
        }
    }

    pub fn graph(&self) -> &SentenceGraph {
        &self.graph
    }

    pub fn capitalization(&self) -> &CapTracker {
        &self.caps
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl SentenceGeneratorBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn min_words(mut self, min_words: usize) -> Self {
        self.config.min_words = min_words;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    /// Replace every setting with a loaded configuration.
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config_file(self, path: &Path) -> Result<Self, GeneratorError> {
        Ok(self.config(GeneratorConfig::load_from_ron(path)?))
    }

    /// Tokenize `text` and fold every sentence into the graph and tracker.
    pub fn train(self, text: &str) -> Result<SentenceGenerator, GeneratorError> {
        self.config.validate()?;

        let mut graph = SentenceGraph::new();
        let mut caps = CapTracker::new();
        let sentences = tokenize(text);
        for sentence in &sentences {
            graph.add_sentence(sentence)?;
            caps.observe(sentence);
        }
        graph.log_stats();

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(sentences = sentences.len(), "training complete");
        debug!(words = caps.len(), "capitalization tracked");

        Ok(SentenceGenerator {
            graph,
            caps,
            config: self.config,
            rng,
            sentences: sentences.len(),
        })
    }

    pub fn train_file(self, path: &Path) -> Result<SentenceGenerator, GeneratorError> {
        let text = std::fs::read_to_string(path)?;
        self.train(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::Capitalization;

    const CORPUS: &str = "The cat sat on the mat. The dog sat on the log, \
        and the cat watched. NASA saw the dog. Alice fed the cat.";

    #[test]
    fn trains_and_reports_stats() {
        let generator = SentenceGenerator::builder().seed(1).train(CORPUS).unwrap();
        let stats = generator.stats();
        assert_eq!(stats.sentences, 4);
        assert_eq!(stats.starts, 3);
        assert!(stats.nodes > 0);
    }

    #[test]
    fn trained_parts_are_exposed() {
        let generator = SentenceGenerator::builder().seed(1).train(CORPUS).unwrap();
        assert_eq!(generator.graph().starts().len(), generator.stats().starts);
        assert_eq!(
            generator.capitalization().capitalization_for("nasa"),
            Capitalization::AllCapital
        );
        assert_eq!(generator.stats().words, generator.capitalization().len());
    }

    #[test]
    fn same_seed_same_output() {
        let mut a = SentenceGenerator::builder().seed(42).min_words(3).train(CORPUS).unwrap();
        let mut b = SentenceGenerator::builder().seed(42).min_words(3).train(CORPUS).unwrap();
        assert_eq!(a.generate_batch(5).unwrap(), b.generate_batch(5).unwrap());
    }

    #[test]
    fn output_is_title_cased_and_terminated() {
        let mut generator = SentenceGenerator::builder().seed(3).min_words(3).train(CORPUS).unwrap();
        for line in generator.generate_batch(10).unwrap() {
            let first = line.chars().next().unwrap();
            assert!(first.is_uppercase(), "not capitalized: {line}");
            assert!(line.ends_with('.'), "not terminated: {line}");
        }
    }

    #[test]
    fn empty_corpus_cannot_generate() {
        let mut generator = SentenceGenerator::builder().seed(0).train("").unwrap();
        assert!(matches!(
            generator.generate(),
            Err(GeneratorError::Graph(GraphError::NoStartNodes))
        ));
    }

    #[test]
    fn invalid_config_rejected_at_train() {
        let result = SentenceGenerator::builder().max_attempts(0).train(CORPUS);
        assert!(matches!(result, Err(GeneratorError::Config(_))));
    }

    #[test]
    fn reseed_replays_sequence() {
        let mut generator = SentenceGenerator::builder().seed(9).min_words(2).train(CORPUS).unwrap();
        let first = generator.generate_batch(3).unwrap();
        generator.reseed(9);
        assert_eq!(generator.generate_batch(3).unwrap(), first);
    }
}
