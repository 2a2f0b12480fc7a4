/// Sentence graph — clause-aware node chain for whole-sentence generation.
///
/// Nodes are keyed by (previous word, separating punctuation, current word)
/// and live in an arena addressed by `NodeId`. Edges carry raw occurrence
/// counts; sampling is weight-proportional at draw time.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::core::tokenizer::{Capitalization, Clause, Sentence, Word};

/// Upper bound on nodes visited in a single walk.
const MAX_WALK_STEPS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("sentence has no clauses")]
    EmptySentence,
    #[error("clause {index} has no words")]
    EmptyClause { index: usize },
    #[error("word {word} of clause {clause} is empty")]
    EmptyWord { clause: usize, word: usize },
    #[error("graph has no sentence start nodes (no training data)")]
    NoStartNodes,
}

/// Index of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Identity of a node.
///
/// An empty `last_word` marks a sentence opener; an empty `current_word`
/// marks the end of a sentence, with `separator` holding its terminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub last_word: String,
    pub separator: String,
    pub current_word: String,
}

impl NodeKey {
    pub fn new(
        last_word: impl Into<String>,
        separator: impl Into<String>,
        current_word: impl Into<String>,
    ) -> Self {
        Self {
            last_word: last_word.into(),
            separator: separator.into(),
            current_word: current_word.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: u32,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub key: NodeKey,
    pub edges: Vec<Edge>,
    pub total_weight: u32,
}

impl Node {
    fn new(key: NodeKey) -> Self {
        Self {
            key,
            edges: Vec::new(),
            total_weight: 0,
        }
    }

    fn add_transition(&mut self, target: NodeId) {
        self.total_weight += 1;
        if let Some(edge) = self.edges.iter_mut().find(|e| e.target == target) {
            edge.weight += 1;
        } else {
            self.edges.push(Edge { target, weight: 1 });
        }
    }

    /// True for the synthetic end-of-sentence node.
    pub fn is_end(&self) -> bool {
        self.key.current_word.is_empty()
    }

    /// Weighted successor, or `None` when nothing leaves this node.
    pub fn random_transition<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NodeId> {
        if self.total_weight == 0 {
            return None;
        }
        let dist = WeightedIndex::<u32>::new(self.edges.iter().map(|e| e.weight)).ok()?;
        Some(self.edges[dist.sample(rng)].target)
    }
}

/// A trained sentence graph. Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct SentenceGraph {
    nodes: Vec<Node>,
    index: FxHashMap<NodeKey, NodeId>,
    starts: Vec<NodeId>,
    start_set: FxHashSet<NodeId>,
}

impl SentenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node_id(&mut self, key: NodeKey) -> NodeId {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(key.clone()));
        self.index.insert(key, id);
        id
    }

    fn add_start(&mut self, id: NodeId) {
        if self.start_set.insert(id) {
            self.starts.push(id);
        }
    }

    /// Fold one tokenized sentence into the graph.
    ///
    /// Rejects sentences without clauses, clauses without words, and empty
    /// words before touching the graph. An empty word would be taken for
    /// the end marker.
    pub fn add_sentence(&mut self, sentence: &Sentence) -> Result<(), GraphError> {
        if sentence.clauses.is_empty() {
            return Err(GraphError::EmptySentence);
        }
        if let Some(index) = sentence.clauses.iter().position(Clause::is_empty) {
            return Err(GraphError::EmptyClause { index });
        }
        for (clause, c) in sentence.clauses.iter().enumerate() {
            if let Some(word) = c.words.iter().position(|w| w.text.is_empty()) {
                return Err(GraphError::EmptyWord { clause, word });
            }
        }

        let mut prev: Option<NodeId> = None;
        let mut last_word = String::new();
        let mut separator = String::new();

        for clause in &sentence.clauses {
            for word in &clause.words {
                let key = NodeKey {
                    last_word: std::mem::take(&mut last_word),
                    separator: std::mem::take(&mut separator),
                    current_word: word.text.clone(),
                };
                let id = self.node_id(key);
                match prev {
                    Some(p) => self.nodes[p.0].add_transition(id),
                    None => self.add_start(id),
                }
                prev = Some(id);
                last_word = word.text.clone();
            }
            separator = clause.terminator.clone();
        }

        if let Some(p) = prev {
            let end = self.node_id(NodeKey {
                last_word,
                separator,
                current_word: String::new(),
            });
            self.nodes[p.0].add_transition(end);
        }
        Ok(())
    }

    /// Random walk from a uniformly chosen start node. Returns the visited
    /// node ids in order.
    pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<NodeId>, GraphError> {
        let mut current = *self.starts.choose(rng).ok_or(GraphError::NoStartNodes)?;
        let mut path = vec![current];

        loop {
            let node = &self.nodes[current.0];
            if node.is_end() {
                break;
            }
            if path.len() >= MAX_WALK_STEPS {
                warn!(steps = path.len(), "walk hit the step limit; sentence truncated");
                break;
            }
            match node.random_transition(rng) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }

        trace!(steps = path.len(), "walk finished");
        Ok(path)
    }

    /// Reassemble a walk into clauses. Separators close the running clause;
    /// words come out lower-case.
    pub fn sentence_from_path(&self, path: &[NodeId]) -> Sentence {
        let mut clauses = Vec::new();
        let mut words = Vec::new();

        for node in path.iter().filter_map(|id| self.nodes.get(id.0)) {
            if !node.key.separator.is_empty() && !words.is_empty() {
                clauses.push(Clause::new(std::mem::take(&mut words), node.key.separator.clone()));
            }
            if !node.key.current_word.is_empty() {
                words.push(Word::new(node.key.current_word.clone(), Capitalization::NoCapital));
            }
        }
        if !words.is_empty() {
            clauses.push(Clause::new(words, ""));
        }
        Sentence::new(clauses)
    }

    /// Walk until a sentence of at least `min_words` comes out, trying at
    /// most `max_attempts` times. On exhaustion the longest walk is used.
    pub fn generate_sentence<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min_words: usize,
        max_attempts: u32,
    ) -> Result<Sentence, GraphError> {
        let mut longest: Option<Sentence> = None;

        for _ in 0..max_attempts.max(1) {
            let sentence = self.sentence_from_path(&self.walk(rng)?);
            if sentence.word_count() >= min_words {
                return Ok(sentence);
            }
            if longest
                .as_ref()
                .map_or(true, |best| sentence.word_count() > best.word_count())
            {
                longest = Some(sentence);
            }
        }

        warn!(
            min_words,
            max_attempts, "no walk reached the minimum length; using the longest"
        );
        longest.ok_or(GraphError::NoStartNodes)
    }

    pub fn lookup(&self, key: &NodeKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn starts(&self) -> &[NodeId] {
        &self.starts
    }

    /// Occurrence count of the edge `from -> to`, zero if never observed.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> u32 {
        self.node(from)
            .and_then(|n| n.edges.iter().find(|e| e.target == to))
            .map_or(0, |e| e.weight)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn log_stats(&self) {
        debug!(
            nodes = self.nodes.len(),
            starts = self.starts.len(),
            "sentence graph trained"
        );
    }
}
