/// Sentence tokenizer — splits raw text into sentences, clauses, and words.

use std::fmt;

/// Marks that end a sentence.
pub const SENTENCE_TERMINATORS: &[&str] = &[".", "?", "!"];
/// Marks that end a clause without ending the sentence.
pub const CLAUSE_TERMINATORS: &[&str] = &["--", ",", ";", ":", ")", "\""];
/// Marks that open a new clause.
pub const CLAUSE_INTRODUCERS: &[&str] = &["\"", "("];
/// Abbreviations whose trailing period is part of the word.
pub const TITLES: &[&str] = &["Mr.", "Mrs.", "Dr.", "Ms.", "M."];

/// Unicode punctuation folded into the ASCII alphabet above.
const UNICODE_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{2010}', "--"),
    ('\u{2011}', "--"),
    ('\u{2012}', "--"),
    ('\u{2013}', "--"),
    ('\u{2014}', "--"),
    ('\u{2015}', "--"),
];

/// Casing pattern of a word, independent of its normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capitalization {
    #[default]
    NoCapital,
    SomeCapital,
    AllCapital,
}

impl Capitalization {
    /// Classify the casing of a raw token.
    pub fn of(token: &str) -> Self {
        let has_letter = token.chars().any(char::is_alphabetic);
        if has_letter && token.to_uppercase() == token {
            Self::AllCapital
        } else if token.to_lowercase() == token {
            Self::NoCapital
        } else {
            Self::SomeCapital
        }
    }

    /// Render normalized text in this casing.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::NoCapital => text.to_string(),
            Self::AllCapital => text.to_uppercase(),
            Self::SomeCapital => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// A lower-cased, punctuation-stripped token and its original casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    pub text: String,
    pub capitalization: Capitalization,
}

impl Word {
    pub fn new(text: impl Into<String>, capitalization: Capitalization) -> Self {
        Self {
            text: text.into(),
            capitalization,
        }
    }

    /// Normalize a stripped token, remembering how it was cased.
    pub fn from_token(token: &str) -> Self {
        Self::new(token.to_lowercase(), Capitalization::of(token))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.capitalization.apply(&self.text))
    }
}

/// A run of words ending in a terminator.
///
/// The terminator is only empty for a clause cut short by a clause
/// introducer, or for trailing text at the end of input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause {
    pub words: Vec<Word>,
    pub terminator: String,
}

impl Clause {
    pub fn new(words: Vec<Word>, terminator: impl Into<String>) -> Self {
        Self {
            words,
            terminator: terminator.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{word}")?;
        }
        f.write_str(&self.terminator)
    }
}

/// One sentence: a non-empty list of clauses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    pub clauses: Vec<Clause>,
}

impl Sentence {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.clauses.iter().map(|c| c.words.len()).sum()
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.clauses.iter().flat_map(|c| c.words.iter())
    }

    /// The terminator of the last clause.
    pub fn terminator(&self) -> Option<&str> {
        self.clauses.last().map(|c| c.terminator.as_str())
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for clause in self.clauses.iter().filter(|c| !c.is_empty()) {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{clause}")?;
            first = false;
        }
        Ok(())
    }
}

fn is_title(token: &str) -> bool {
    TITLES.contains(&token)
}

pub fn is_sentence_terminator(mark: &str) -> bool {
    SENTENCE_TERMINATORS.contains(&mark)
}

/// Fold curly quotes and dash variants into their ASCII forms.
pub fn normalize_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match UNICODE_REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// A raw whitespace token split into its punctuation and its word.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token<'a> {
    introducer: Option<&'static str>,
    bare: &'a str,
    terminator: Option<&'static str>,
}

fn split_trailing(token: &str) -> Option<(&str, &'static str)> {
    SENTENCE_TERMINATORS
        .iter()
        .chain(CLAUSE_TERMINATORS)
        .find_map(|mark| token.strip_suffix(mark).map(|rest| (rest, *mark)))
}

/// Strip one leading introducer and the trailing terminator cluster.
///
/// A cluster such as `."` or `,)` resolves to its sentence terminator if
/// it has one, otherwise to the mark closest to the word. Stripping stops
/// as soon as what is left is a title, as in `Mr.,`.
fn split_token(raw: &str) -> Token<'_> {
    let (introducer, rest) = CLAUSE_INTRODUCERS
        .iter()
        .find_map(|mark| raw.strip_prefix(mark).map(|rest| (Some(*mark), rest)))
        .unwrap_or((None, raw));

    if is_title(rest) {
        return Token {
            introducer,
            bare: rest,
            terminator: None,
        };
    }

    let mut bare = rest;
    let mut cluster = Vec::new();
    let mut titled = false;
    while let Some((stripped, mark)) = split_trailing(bare) {
        bare = stripped;
        cluster.push(mark);
        if is_title(bare) {
            titled = true;
            break;
        }
    }

    let terminator = if titled {
        // A title keeps its period, so only clause marks can follow it.
        cluster
            .iter()
            .copied()
            .rev()
            .find(|mark| !is_sentence_terminator(mark))
    } else {
        cluster
            .iter()
            .copied()
            .find(|mark| is_sentence_terminator(mark))
            .or_else(|| cluster.last().copied())
    };

    Token {
        introducer,
        bare,
        terminator,
    }
}

#[derive(Default)]
struct SentenceAccumulator {
    sentences: Vec<Sentence>,
    clauses: Vec<Clause>,
    words: Vec<Word>,
}

impl SentenceAccumulator {
    fn close_clause(&mut self, terminator: &str) {
        if self.words.is_empty() {
            return;
        }
        let words = std::mem::take(&mut self.words);
        self.clauses.push(Clause::new(words, terminator));
    }

    fn close_sentence(&mut self) {
        if !self.clauses.is_empty() {
            let clauses = std::mem::take(&mut self.clauses);
            self.sentences.push(Sentence::new(clauses));
        }
    }

    fn push(&mut self, token: Token<'_>) {
        if token.introducer.is_some() {
            self.close_clause("");
        }
        if !token.bare.is_empty() {
            self.words.push(Word::from_token(token.bare));
        }
        match token.terminator {
            Some(mark) if is_sentence_terminator(mark) => {
                self.close_clause(mark);
                self.close_sentence();
            }
            Some(mark) => self.close_clause(mark),
            None => {}
        }
    }

    fn finish(mut self) -> Vec<Sentence> {
        self.close_clause("");
        self.close_sentence();
        self.sentences
    }
}

/// Tokenize raw text into sentences of clauses of words.
pub fn tokenize(text: &str) -> Vec<Sentence> {
    let text = normalize_punctuation(text).replace("--", " -- ");
    let mut acc = SentenceAccumulator::default();
    for raw in text.split_whitespace() {
        acc.push(split_token(raw));
    }
    acc.finish()
}
