use anyhow::Error;
use env_logger::Env;
use hillock::StopWatch;
use log::{info, warn};
use pmi_bpe::{
    display_scores, train_with_sink, ConsoleReporter, JsonLinesReporter, ReportFormat,
    StopReason, TrainConfig, TrainOutcome,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "bpe_config.toml";

fn run_training(config: &TrainConfig, lines: &[String]) -> Result<TrainOutcome, Error> {
    let iterations = config.iterations()?;
    let outcome = match (config.report, &config.report_path) {
        (ReportFormat::Console, _) => {
            let mut console = ConsoleReporter::stdout();
            let outcome = train_with_sink(lines, iterations, &mut console)?;
            console.final_vocabulary(&outcome.vocabulary)?;
            outcome
        }
        (ReportFormat::Json, Some(path)) => {
            let mut sink = JsonLinesReporter::new(BufWriter::new(File::create(path)?));
            train_with_sink(lines, iterations, &mut sink)?
        }
        (ReportFormat::Json, None) => {
            let mut sink = JsonLinesReporter::new(std::io::stdout());
            train_with_sink(lines, iterations, &mut sink)?
        }
    };
    Ok(outcome)
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = TrainConfig::load(Path::new(&config_path))?;
    info!("Starting run: {}", config.run_name);

    let mut stopwatch = StopWatch::new(true, false);
    stopwatch.reset();

    let lines = config.load_corpus()?;
    info!("Loaded {} corpus entries", lines.len());
    stopwatch.tick("load");

    let outcome = run_training(&config, &lines)?;
    stopwatch.tick("train");

    if outcome.stop_reason == StopReason::EmptyStatistics {
        warn!(
            "No bigrams left to merge. Training stopped after {} of {} iterations.",
            outcome.completed_iterations, outcome.requested_iterations
        );
    }
    if config.plot_scores {
        display_scores(&outcome.merges);
    }

    if let Some(output_path) = &config.output_path {
        info!("Saving merges to file: {:?}", output_path);
        outcome.save_to_file(Path::new(output_path))?;
    }
    stopwatch.tick("save");
    stopwatch.breakdown(1, "train");

    Ok(())
}
