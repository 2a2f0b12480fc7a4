/// Comparable states — the keys a transition table is built over.

use std::fmt;

/// Any value that can act as a vertex in a Markov chain.
///
/// States only need a total order and cheap-enough cloning. Two states
/// that compare `Equal` are the same vertex.
pub trait State: Ord + Clone {}

impl<T: Ord + Clone> State for T {}

/// A fixed-length window of words, ordered token by token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextState(Vec<String>);

impl TextState {
    pub fn new(words: Vec<String>) -> Self {
        Self(words)
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most recent word in the window.
    pub fn last_word(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Slide the window forward by one word, dropping the oldest.
    pub fn shifted(&self, word: String) -> Self {
        let mut words = Vec::with_capacity(self.0.len());
        words.extend(self.0.iter().skip(1).cloned());
        words.push(word);
        Self(words)
    }
}

impl fmt::Display for TextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Iterator adapter turning a word stream into overlapping `TextState`s.
///
/// Nothing is emitted until `history` words have been seen; after that
/// every word yields one state.
pub struct TextStates<I> {
    words: I,
    history: usize,
    current: Option<TextState>,
}

impl<I: Iterator<Item = String>> Iterator for TextStates<I> {
    type Item = TextState;

    fn next(&mut self) -> Option<TextState> {
        if self.history == 0 {
            return None;
        }
        match &self.current {
            Some(state) => {
                let next = state.shifted(self.words.next()?);
                self.current = Some(next.clone());
                Some(next)
            }
            None => {
                let mut window = Vec::with_capacity(self.history);
                while window.len() < self.history {
                    window.push(self.words.next()?);
                }
                let state = TextState::new(window);
                self.current = Some(state.clone());
                Some(state)
            }
        }
    }
}

/// Build the state stream for a word-window chain of the given history.
pub fn text_states<I>(words: I, history: usize) -> TextStates<I::IntoIter>
where
    I: IntoIterator<Item = String>,
{
    TextStates {
        words: words.into_iter(),
        history,
        current: None,
    }
}
