pub mod config;
pub mod corpus;
pub mod error;
pub mod merge;
pub mod report;
pub mod scoring;
pub mod stats;
pub mod train;
pub mod vocab;

pub use config::{ReportFormat, TrainConfig};
pub use corpus::{load_corpus, read_lines, split_corpus};
pub use error::{validate_iterations, TrainError};
pub use merge::{merge_pair, merge_word, merged_symbol};
pub use report::{display_scores, ConsoleReporter, JsonLinesReporter, ReportSink};
pub use scoring::{compute_scores, select_best, ScoredPair};
pub use stats::{
    collect_statistics, pair_statistics, token_frequencies, OrderedCounts, PairStatistics,
    TokenFrequencies,
};
pub use train::{
    train, train_with_sink, IterationReport, MergeRecord, StopReason, TrainOutcome, TrainState,
    Trainer,
};
pub use vocab::{Pair, Symbol, Vocabulary, Word};
