pub mod capitalization;
pub mod chain;
pub mod config;
pub mod graph;
pub mod pipeline;
pub mod state;
pub mod text;
pub mod tokenizer;
