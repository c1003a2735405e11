use crate::vocab::{Pair, Symbol, Vocabulary};
use std::collections::HashMap;
use std::hash::Hash;

/// Counts keyed by first-encountered order.
#[derive(Clone, Debug)]
pub struct OrderedCounts<K> {
    entries: Vec<(K, u64)>,
    key_to_index: HashMap<K, usize>,
}

impl<K> Default for OrderedCounts<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            key_to_index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> OrderedCounts<K> {
    pub fn add(&mut self, key: &K, delta: u64) {
        if let Some(&ix) = self.key_to_index.get(key) {
            self.entries[ix].1 += delta;
            return;
        }
        self.key_to_index.insert(key.clone(), self.entries.len());
        self.entries.push((key.clone(), delta));
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.key_to_index.get(key).map(|&ix| self.entries[ix].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Adjacent pair frequencies weighted by word count.
pub type PairStatistics = OrderedCounts<Pair>;

/// Per-symbol occurrence counts weighted by word count.
pub type TokenFrequencies = OrderedCounts<Symbol>;

/// Frequency of every adjacent symbol pair, enumerated word by word, left to right.
pub fn pair_statistics(vocab: &Vocabulary) -> PairStatistics {
    let mut stats = PairStatistics::default();
    for (word, count) in vocab.iter() {
        for w in word.symbols().windows(2) {
            stats.add(&(w[0].clone(), w[1].clone()), count);
        }
    }
    stats
}

pub fn token_frequencies(vocab: &Vocabulary) -> TokenFrequencies {
    let mut freqs = TokenFrequencies::default();
    for (word, count) in vocab.iter() {
        for symbol in word.symbols() {
            freqs.add(symbol, count);
        }
    }
    freqs
}

/// Both reductions over the same snapshot, computed side by side.
pub fn collect_statistics(vocab: &Vocabulary) -> (PairStatistics, TokenFrequencies) {
    rayon::join(|| pair_statistics(vocab), || token_frequencies(vocab))
}
