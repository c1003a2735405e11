use crate::vocab::{Pair, Symbol, Vocabulary, Word};

pub fn merged_symbol(pair: &Pair) -> Symbol {
    let mut text = String::with_capacity(pair.0.len() + pair.1.len());
    text.push_str(&pair.0);
    text.push_str(&pair.1);
    Symbol::from(text)
}

/// Replaces every non-overlapping `[left, right]` run, scanning left to right.
/// Returns `None` when the word does not contain the pair.
pub fn merge_word(word: &Word, pair: &Pair, merged: &Symbol) -> Option<Word> {
    let symbols = word.symbols();
    let mut out: Vec<Symbol> = Vec::with_capacity(symbols.len());
    let mut changed = false;
    let mut read_pos = 0;
    while read_pos < symbols.len() {
        if read_pos + 1 < symbols.len()
            && symbols[read_pos] == pair.0
            && symbols[read_pos + 1] == pair.1
        {
            out.push(merged.clone());
            read_pos += 2;
            changed = true;
        } else {
            out.push(symbols[read_pos].clone());
            read_pos += 1;
        }
    }
    changed.then(|| Word::new(out))
}

/// A new vocabulary with `pair` fused everywhere it occurs as two adjacent symbols.
///
/// Words that collapse onto the same spelling have their counts summed, at the
/// position of the first of them.
pub fn merge_pair(pair: &Pair, vocab: &Vocabulary) -> Vocabulary {
    let merged = merged_symbol(pair);
    let mut out = Vocabulary::new();
    for (word, count) in vocab.iter() {
        match merge_word(word, pair, &merged) {
            Some(new_word) => out.add(new_word, count),
            None => out.add(word.clone(), count),
        }
    }
    out
}
