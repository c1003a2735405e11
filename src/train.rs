use crate::error::TrainError;
use crate::merge::{merge_pair, merged_symbol};
use crate::report::ReportSink;
use crate::scoring::{compute_scores, select_best, ScoredPair};
use crate::stats::{collect_statistics, PairStatistics, TokenFrequencies};
use crate::vocab::{Pair, Symbol, Vocabulary};
use anyhow::Result;
use log::{debug, info, warn};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// All requested iterations ran.
    Completed,
    /// No adjacent pair was left to merge.
    EmptyStatistics,
}

/// What one iteration saw and did.
#[derive(Clone, Debug, Serialize)]
pub struct IterationReport {
    /// 1-based
    pub iteration: usize,
    /// Every scored bigram, in the order used for tie-breaking.
    pub bigrams: Vec<ScoredPair>,
    pub selected: ScoredPair,
    pub merged: Symbol,
    /// Vocabulary after the merge.
    pub vocabulary: Vocabulary,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MergeRecord {
    pub iteration: usize,
    pub pair: Pair,
    pub merged: Symbol,
    pub score: f64,
    pub frequency: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct TrainOutcome {
    pub vocabulary: Vocabulary,
    pub merges: Vec<MergeRecord>,
    pub requested_iterations: usize,
    pub completed_iterations: usize,
    pub stop_reason: StopReason,
}

impl TrainOutcome {
    /// Save the merge list and final vocabulary as pretty-printed json.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

pub enum TrainState {
    Initializing { lines: Vec<String> },
    IterationStart,
    StatsComputed {
        stats: PairStatistics,
        freqs: TokenFrequencies,
    },
    PairSelected {
        scores: Vec<ScoredPair>,
        best: ScoredPair,
    },
    VocabularyUpdated,
    Done(StopReason),
    /// A transition returned an error; the run cannot continue.
    Failed,
}

/// Drives the statistics -> score -> select -> merge loop one transition at a time.
pub struct Trainer {
    state: TrainState,
    vocabulary: Vocabulary,
    iterations: usize,
    iteration: usize,
    merges: Vec<MergeRecord>,
}

impl Trainer {
    pub fn new<I, S>(lines: I, iterations: usize) -> Result<Self, TrainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if iterations == 0 {
            return Err(TrainError::InvalidIterationCount(0));
        }
        let lines = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect();
        Ok(Self {
            state: TrainState::Initializing { lines },
            vocabulary: Vocabulary::new(),
            iterations,
            iteration: 0,
            merges: Vec::new(),
        })
    }

    pub fn state(&self) -> &TrainState {
        &self.state
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn completed_iterations(&self) -> usize {
        self.merges.len()
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, TrainState::Done(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, TrainState::Failed)
    }

    /// Performs one state transition. Reports are handed to `sink` once the merge is applied.
    ///
    /// On error the trainer moves to [`TrainState::Failed`] and stays there.
    pub fn step<R: ReportSink + ?Sized>(&mut self, sink: &mut R) -> Result<(), TrainError> {
        let state = std::mem::replace(&mut self.state, TrainState::Failed);
        self.state = self.transition(state, sink)?;
        Ok(())
    }

    fn transition<R: ReportSink + ?Sized>(
        &mut self,
        state: TrainState,
        sink: &mut R,
    ) -> Result<TrainState, TrainError> {
        let next = match state {
            TrainState::Initializing { lines } => {
                self.vocabulary = Vocabulary::from_lines(&lines);
                debug!(
                    "Built vocabulary of {} distinct words from {} lines",
                    self.vocabulary.len(),
                    lines.len()
                );
                self.iteration = 1;
                TrainState::IterationStart
            }
            TrainState::IterationStart => {
                let (stats, freqs) = collect_statistics(&self.vocabulary);
                debug!(
                    "Iteration {}: {} bigrams over {} symbols",
                    self.iteration,
                    stats.len(),
                    freqs.len()
                );
                TrainState::StatsComputed { stats, freqs }
            }
            TrainState::StatsComputed { stats, freqs } => {
                let scores = compute_scores(&stats, &freqs)?;
                match select_best(&scores).cloned() {
                    Some(best) => TrainState::PairSelected { scores, best },
                    None => {
                        warn!(
                            "No bigrams left at iteration {}. Stopping after {} of {} iterations.",
                            self.iteration,
                            self.merges.len(),
                            self.iterations
                        );
                        TrainState::Done(StopReason::EmptyStatistics)
                    }
                }
            }
            TrainState::PairSelected { scores, best } => {
                self.vocabulary = merge_pair(&best.pair, &self.vocabulary);
                let merged = merged_symbol(&best.pair);
                info!(
                    "Iteration {}: merged `{}` + `{}` -> `{}` (score: {:.4}, frequency: {})",
                    self.iteration, best.pair.0, best.pair.1, merged, best.score, best.frequency
                );
                self.merges.push(MergeRecord {
                    iteration: self.iteration,
                    pair: best.pair.clone(),
                    merged: merged.clone(),
                    score: best.score,
                    frequency: best.frequency,
                });
                sink.report(&IterationReport {
                    iteration: self.iteration,
                    bigrams: scores,
                    selected: best,
                    merged,
                    vocabulary: self.vocabulary.clone(),
                })?;
                TrainState::VocabularyUpdated
            }
            TrainState::VocabularyUpdated => {
                if self.iteration >= self.iterations {
                    TrainState::Done(StopReason::Completed)
                } else {
                    self.iteration += 1;
                    TrainState::IterationStart
                }
            }
            TrainState::Done(reason) => TrainState::Done(reason),
            TrainState::Failed => TrainState::Failed,
        };
        Ok(next)
    }

    pub fn run<R: ReportSink + ?Sized>(mut self, sink: &mut R) -> Result<TrainOutcome, TrainError> {
        while !self.is_done() && !self.is_failed() {
            self.step(sink)?;
        }
        Ok(self.into_outcome())
    }

    fn into_outcome(self) -> TrainOutcome {
        let stop_reason = match self.state {
            TrainState::Done(reason) => reason,
            _ => StopReason::Completed,
        };
        TrainOutcome {
            completed_iterations: self.merges.len(),
            vocabulary: self.vocabulary,
            merges: self.merges,
            requested_iterations: self.iterations,
            stop_reason,
        }
    }
}

/// Train for `iterations` merges, streaming each iteration's report to `sink`.
pub fn train_with_sink<I, S, R>(
    lines: I,
    iterations: usize,
    sink: &mut R,
) -> Result<TrainOutcome, TrainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: ReportSink + ?Sized,
{
    Trainer::new(lines, iterations)?.run(sink)
}

/// Train for `iterations` merges, collecting every iteration report.
pub fn train<I, S>(
    lines: I,
    iterations: usize,
) -> Result<(TrainOutcome, Vec<IterationReport>), TrainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reports = Vec::new();
    let outcome = train_with_sink(lines, iterations, &mut reports)?;
    Ok((outcome, reports))
}
