/// Ordered transition table — construction, lookup, and sampling.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use tracing::debug;

use crate::core::state::State;

/// Outgoing edges of a single state.
///
/// `targets` is kept in ascending order and `probabilities` runs parallel
/// to it. Both are empty when the state was never followed by anything.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTransitions<S> {
    pub state: S,
    pub targets: Vec<S>,
    pub probabilities: Vec<f64>,
}

impl<S: State> StateTransitions<S> {
    fn new(state: S) -> Self {
        Self {
            state,
            targets: Vec::new(),
            probabilities: Vec::new(),
        }
    }

    /// True when no transition was ever observed out of this state.
    pub fn is_terminal(&self) -> bool {
        self.targets.is_empty()
    }

    /// Draw a successor in proportion to its probability.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&S> {
        if self.is_terminal() {
            return None;
        }
        self.pick(rng.gen::<f64>())
    }

    /// Walk the cumulative distribution for a draw in `[0, 1)`.
    ///
    /// Rounding can leave the cumulative sum just short of 1.0; the last
    /// target absorbs whatever mass is missing.
    pub fn pick(&self, draw: f64) -> Option<&S> {
        let mut cumulative = 0.0;
        for (target, probability) in self.targets.iter().zip(&self.probabilities) {
            cumulative += probability;
            if cumulative >= draw {
                return Some(target);
            }
        }
        self.targets.last()
    }
}

/// Accumulates raw transition counts before normalization.
#[derive(Debug)]
pub struct ChainBuilder<S> {
    counts: BTreeMap<S, BTreeMap<S, u32>>,
    last: Option<S>,
}

impl<S: State> Default for ChainBuilder<S> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            last: None,
        }
    }
}

impl<S: State> ChainBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the next state in the stream.
    ///
    /// Every pushed state gets an entry, even if nothing ever follows it.
    pub fn push(&mut self, state: S) {
        if let Some(prev) = self.last.take() {
            if let Some(targets) = self.counts.get_mut(&prev) {
                *targets.entry(state.clone()).or_insert(0) += 1;
            }
        }
        self.counts.entry(state.clone()).or_default();
        self.last = Some(state);
    }

    /// Normalize counts into probabilities and freeze the table.
    pub fn finish(self) -> Chain<S> {
        let entries: Vec<StateTransitions<S>> = self
            .counts
            .into_iter()
            .map(|(state, targets)| {
                let total: u32 = targets.values().sum();
                let mut entry = StateTransitions::new(state);
                if total > 0 {
                    let (targets, probabilities) = targets
                        .into_iter()
                        .map(|(target, count)| (target, f64::from(count) / f64::from(total)))
                        .unzip();
                    entry.targets = targets;
                    entry.probabilities = probabilities;
                }
                entry
            })
            .collect();

        debug!(entries = entries.len(), "chain built");
        Chain { entries }
    }
}

/// A trained Markov chain over arbitrary ordered states.
///
/// Entries are stored sorted by state, one per distinct state, so lookup is
/// a binary search and iteration order is stable across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<S> {
    entries: Vec<StateTransitions<S>>,
}

impl<S: State> Chain<S> {
    /// Build a chain from a sequential stream of states. Each adjacent pair
    /// in the stream counts as one observed transition.
    pub fn build<I>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut builder = ChainBuilder::new();
        for state in states {
            builder.push(state);
        }
        builder.finish()
    }

    /// Drain a channel until every sender has hung up.
    pub fn from_receiver(states: Receiver<S>) -> Self {
        Self::build(states)
    }

    /// Build on the calling thread while a producer thread feeds states
    /// through a bounded channel of `capacity` slots.
    pub fn build_streaming<I>(states: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = S> + Send,
        S: Send,
    {
        let (tx, rx) = mpsc::sync_channel(capacity);
        thread::scope(|scope| {
            scope.spawn(move || {
                for state in states {
                    if tx.send(state).is_err() {
                        break;
                    }
                }
            });
            Self::from_receiver(rx)
        })
    }

    /// Exact lookup. Unobserved states are simply absent.
    pub fn lookup(&self, state: &S) -> Option<&StateTransitions<S>> {
        self.entries
            .binary_search_by(|entry| entry.state.cmp(state))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Sample a successor of `state`, or `None` for an unknown or terminal state.
    pub fn next_state<R: Rng + ?Sized>(&self, state: &S, rng: &mut R) -> Option<&S> {
        self.lookup(state)?.sample(rng)
    }

    /// A uniformly random observed state.
    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&S> {
        self.entries.choose(rng).map(|entry| &entry.state)
    }

    /// Visit entries in ascending state order until `f` breaks.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(&StateTransitions<S>) -> ControlFlow<()>,
    {
        for entry in &self.entries {
            if f(entry).is_break() {
                return;
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateTransitions<S>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State> FromIterator<S> for Chain<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::build(iter)
    }
}
