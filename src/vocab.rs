use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A single character or a previously merged run of characters.
pub type Symbol = Arc<str>;

/// Two adjacent symbols inside a word.
pub type Pair = (Symbol, Symbol);

/// The symbol sequence spelling one distinct corpus word.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Word(Vec<Symbol>);

impl Word {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// One symbol per non-whitespace character of the trimmed text.
    pub fn from_text(text: &str) -> Self {
        Self(
            text.trim()
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| Symbol::from(c.to_string()))
                .collect(),
        )
    }

    pub fn from_symbols(symbols: &[&str]) -> Self {
        Self(symbols.iter().map(|&s| Symbol::from(s)).collect())
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(symbol)?;
        }
        Ok(())
    }
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Word representations mapped to how many corpus lines produced them.
///
/// Entries keep first-insertion order, which is the enumeration order every
/// downstream statistic and tie-break relies on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<(Word, u64)>,
    word_to_index: HashMap<Word, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the initial vocabulary, one character symbol per character of each trimmed line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new();
        for line in lines {
            vocab.add(Word::from_text(line.as_ref()), 1);
        }
        vocab
    }

    /// Adds `count` to `word`, inserting it at the end if it is new.
    pub fn add(&mut self, word: Word, count: u64) {
        if let Some(&ix) = self.word_to_index.get(&word) {
            self.entries[ix].1 += count;
            return;
        }
        self.word_to_index.insert(word.clone(), self.entries.len());
        self.entries.push((word, count));
    }

    pub fn get(&self, word: &Word) -> Option<u64> {
        self.word_to_index.get(word).map(|&ix| self.entries[ix].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Word, u64)> {
        self.entries.iter().map(|(word, count)| (word, *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of words the vocabulary was built from.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Sum of counts over words that have at least one symbol.
    pub fn non_empty_count(&self) -> u64 {
        self.entries
            .iter()
            .filter(|(word, _)| !word.is_empty())
            .map(|(_, count)| count)
            .sum()
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (word, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{word}': {count}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(word, count)| (word.to_string(), count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_trims_and_splits() {
        let vocab = Vocabulary::from_lines(["crazy_", " hazy_", " day_"]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(
            vocab.get(&Word::from_symbols(&["c", "r", "a", "z", "y", "_"])),
            Some(1)
        );
        assert_eq!(vocab.get(&Word::from_symbols(&["h", "a", "z", "y", "_"])), Some(1));
        assert_eq!(vocab.get(&Word::from_symbols(&["d", "a", "y", "_"])), Some(1));
    }

    #[test]
    fn test_repeated_lines_accumulate() {
        let vocab = Vocabulary::from_lines(["low", "low ", "lower", "\tlow"]);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.get(&Word::from_symbols(&["l", "o", "w"])), Some(3));
        assert_eq!(vocab.total_count(), 4);
    }

    #[test]
    fn test_empty_line_is_empty_word() {
        let vocab = Vocabulary::from_lines(["   ", "ab"]);
        assert_eq!(vocab.get(&Word::default()), Some(1));
        assert_eq!(vocab.total_count(), 2);
        assert_eq!(vocab.non_empty_count(), 1);
    }

    #[test]
    fn test_no_normalization() {
        let vocab = Vocabulary::from_lines(["Ab", "ab"]);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_inner_whitespace_is_not_a_symbol() {
        let word = Word::from_text("a b");
        assert_eq!(word, Word::from_symbols(&["a", "b"]));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let vocab = Vocabulary::from_lines(["b", "a", "b", "c"]);
        let words: Vec<String> = vocab.iter().map(|(w, _)| w.to_string()).collect();
        assert_eq!(words, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_display_and_serialize() {
        let vocab = Vocabulary::from_lines(["ab", "c"]);
        assert_eq!(vocab.to_string(), "{'a b': 1, 'c': 1}");
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"{"a b":1,"c":1}"#);
    }
}
