/// Word-window text chain — predicts the next word from the previous N.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::chain::Chain;
use crate::core::state::{text_states, TextState};

#[derive(Debug, Error)]
pub enum TextChainError {
    #[error("history size must be at least 1, got {0}")]
    InvalidHistory(usize),
    #[error("corpus has fewer words than the history size")]
    NoStates,
}

/// A `Chain` over sliding windows of `history` words.
#[derive(Debug, Clone)]
pub struct TextChain {
    history: usize,
    chain: Chain<TextState>,
}

impl TextChain {
    /// Build from an in-memory word stream.
    pub fn build<I>(words: I, history: usize) -> Result<Self, TextChainError>
    where
        I: IntoIterator<Item = String>,
    {
        if history == 0 {
            return Err(TextChainError::InvalidHistory(history));
        }
        Self::from_chain(Chain::build(text_states(words, history)), history)
    }

    /// Build while a producer thread slides the window and hands states
    /// over a bounded channel.
    pub fn build_streaming<I>(words: I, history: usize, capacity: usize) -> Result<Self, TextChainError>
    where
        I: IntoIterator<Item = String> + Send,
        I::IntoIter: Send,
    {
        if history == 0 {
            return Err(TextChainError::InvalidHistory(history));
        }
        let states = text_states(words, history);
        Self::from_chain(Chain::build_streaming(states, capacity), history)
    }

    fn from_chain(chain: Chain<TextState>, history: usize) -> Result<Self, TextChainError> {
        if chain.is_empty() {
            return Err(TextChainError::NoStates);
        }
        debug!(history, states = chain.len(), "text chain built");
        Ok(Self { history, chain })
    }

    pub fn history(&self) -> usize {
        self.history
    }

    pub fn chain(&self) -> &Chain<TextState> {
        &self.chain
    }

    /// Pick a uniformly random state, then take up to `burn_in` transitions
    /// so the walk settles somewhere more likely.
    pub fn random_start<R: Rng + ?Sized>(&self, rng: &mut R, burn_in: usize) -> Option<TextState> {
        let mut state = self.chain.random_state(rng)?.clone();
        for _ in 0..burn_in {
            match self.chain.next_state(&state, rng) {
                Some(next) => state = next.clone(),
                None => break,
            }
        }
        Some(state)
    }

    pub fn next_state<R: Rng + ?Sized>(&self, state: &TextState, rng: &mut R) -> Option<TextState> {
        self.chain.next_state(state, rng).cloned()
    }

    /// Emit `count` words by walking the chain, restarting from a fresh
    /// random start whenever the walk dead-ends.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        burn_in: usize,
    ) -> Result<Vec<String>, TextChainError> {
        let mut words = Vec::with_capacity(count);
        let mut state = self.random_start(rng, burn_in).ok_or(TextChainError::NoStates)?;

        while words.len() < count {
            if let Some(word) = state.last_word() {
                words.push(word.to_string());
            }
            state = match self.next_state(&state, rng) {
                Some(next) => next,
                None => {
                    trace!(at = %state, "dead end, restarting");
                    self.random_start(rng, burn_in).ok_or(TextChainError::NoStates)?
                }
            };
        }

        Ok(words)
    }
}
