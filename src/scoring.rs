use crate::error::TrainError;
use crate::stats::{PairStatistics, TokenFrequencies};
use crate::vocab::{Pair, Symbol};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredPair {
    pub pair: Pair,
    pub frequency: u64,
    pub score: f64,
}

fn frequency_of(freqs: &TokenFrequencies, symbol: &Symbol) -> Result<u64, TrainError> {
    match freqs.get(symbol) {
        Some(freq) if freq > 0 => Ok(freq),
        _ => Err(TrainError::ZeroTokenFrequency {
            symbol: symbol.clone(),
        }),
    }
}

/// `freq(x, y) / (freq(x) * freq(y))` for every pair, in statistics order.
pub fn compute_scores(
    stats: &PairStatistics,
    freqs: &TokenFrequencies,
) -> Result<Vec<ScoredPair>, TrainError> {
    stats
        .iter()
        .map(|(pair, frequency)| {
            let left = frequency_of(freqs, &pair.0)?;
            let right = frequency_of(freqs, &pair.1)?;
            Ok(ScoredPair {
                pair: pair.clone(),
                frequency,
                score: frequency as f64 / (left as f64 * right as f64),
            })
        })
        .collect()
}

/// Highest score wins; on equal scores the earliest pair in enumeration order is kept.
pub fn select_best(scores: &[ScoredPair]) -> Option<&ScoredPair> {
    let mut best: Option<&ScoredPair> = None;
    for candidate in scores {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}
