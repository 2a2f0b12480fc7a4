//! WASM bindings for markov-text — powers the interactive web demo.

use wasm_bindgen::prelude::*;

use markov_text::core::pipeline::{GeneratorStats, SentenceGenerator};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct StatsInfo {
    #[serde(flatten)]
    stats: GeneratorStats,
    min_words: usize,
}

/// A sentence generator trained on a corpus supplied by the page.
#[wasm_bindgen]
pub struct SentenceDemo {
    generator: SentenceGenerator,
}

#[wasm_bindgen]
impl SentenceDemo {
    /// Train on `corpus` with a fixed seed.
    #[wasm_bindgen(constructor)]
    pub fn new(corpus: &str, seed: u64, min_words: usize) -> Result<SentenceDemo, JsError> {
        let generator = SentenceGenerator::builder()
            .seed(seed)
            .min_words(min_words)
            .train(corpus)
            .map_err(|e| JsError::new(&format!("Training error: {e}")))?;
        Ok(SentenceDemo { generator })
    }

    /// Generate one sentence.
    pub fn generate(&mut self) -> Result<String, JsError> {
        self.generator
            .generate()
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))
    }

    /// Generate several sentences. Returns a JSON array of strings.
    pub fn generate_batch(&mut self, count: usize) -> Result<String, JsError> {
        let sentences = self
            .generator
            .generate_batch(count)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        serde_json::to_string(&sentences)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON description of the trained model.
    pub fn stats(&self) -> Result<String, JsError> {
        let info = StatsInfo {
            stats: self.generator.stats(),
            min_words: self.generator.config().min_words,
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Restart the random sequence without retraining.
    pub fn reset(&mut self, seed: u64) {
        self.generator.reseed(seed);
    }
}
