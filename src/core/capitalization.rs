/// Capitalization tracker — learns each word's usual casing.

use rustc_hash::FxHashMap;

use crate::core::tokenizer::{Capitalization, Clause, Sentence, Word};

/// How often a word was seen in each casing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapCounts {
    pub all_caps: u32,
    pub some_caps: u32,
    pub no_caps: u32,
}

impl CapCounts {
    fn record(&mut self, capitalization: Capitalization) {
        match capitalization {
            Capitalization::AllCapital => self.all_caps += 1,
            Capitalization::SomeCapital => self.some_caps += 1,
            Capitalization::NoCapital => self.no_caps += 1,
        }
    }

    /// The strict-majority casing; ties fall back to `NoCapital`.
    pub fn dominant(&self) -> Capitalization {
        if self.all_caps > self.some_caps && self.all_caps > self.no_caps {
            Capitalization::AllCapital
        } else if self.some_caps > self.all_caps && self.some_caps > self.no_caps {
            Capitalization::SomeCapital
        } else {
            Capitalization::NoCapital
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CapTracker {
    counts: FxHashMap<String, CapCounts>,
}

impl CapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the casing of every word in a sentence.
    ///
    /// A title-cased first word is skipped: it says more about the sentence
    /// start than about the word.
    pub fn observe(&mut self, sentence: &Sentence) {
        for (i, clause) in sentence.clauses.iter().enumerate() {
            for (j, word) in clause.words.iter().enumerate() {
                if i == 0 && j == 0 && word.capitalization == Capitalization::SomeCapital {
                    continue;
                }
                self.counts
                    .entry(word.text.clone())
                    .or_default()
                    .record(word.capitalization);
            }
        }
    }

    pub fn counts(&self, word: &str) -> Option<&CapCounts> {
        self.counts.get(word)
    }

    /// Learned casing for a normalized word; unseen words are lower-case.
    pub fn capitalization_for(&self, word: &str) -> Capitalization {
        self.counts
            .get(word)
            .map(CapCounts::dominant)
            .unwrap_or_default()
    }

    /// Re-case every word by its learned style, title-casing a lower-case
    /// sentence opener.
    pub fn recapitalize(&self, sentence: &Sentence) -> Sentence {
        let clauses = sentence
            .clauses
            .iter()
            .enumerate()
            .map(|(i, clause)| {
                let words = clause
                    .words
                    .iter()
                    .enumerate()
                    .map(|(j, word)| {
                        let mut caps = self.capitalization_for(&word.text);
                        if caps == Capitalization::NoCapital && i == 0 && j == 0 {
                            caps = Capitalization::SomeCapital;
                        }
                        Word::new(word.text.clone(), caps)
                    })
                    .collect();
                Clause::new(words, clause.terminator.clone())
            })
            .collect();
        Sentence::new(clauses)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
