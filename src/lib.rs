//! Markov Text — learns word-transition models from a corpus and generates
//! new, structurally plausible text.
//!
//! Provides a generic ordered transition table, a clause-aware tokenizer,
//! and a sentence graph that regenerates whole sentences with their clause
//! breaks, terminators, and learned capitalization.

pub mod core;
