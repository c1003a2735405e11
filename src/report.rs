use crate::train::{IterationReport, MergeRecord};
use crate::vocab::Vocabulary;
use std::io::{self, Stdout, Write};
use textplots::{Chart, Plot, Shape};

/// Receives one report per completed iteration.
pub trait ReportSink {
    fn report(&mut self, report: &IterationReport) -> io::Result<()>;
}

impl ReportSink for Vec<IterationReport> {
    fn report(&mut self, report: &IterationReport) -> io::Result<()> {
        self.push(report.clone());
        Ok(())
    }
}

/// Human readable bigram tables and per-iteration summaries.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn final_vocabulary(&mut self, vocab: &Vocabulary) -> io::Result<()> {
        writeln!(self.out, "\nFinal Vocabulary: {vocab}")
    }
}

impl<W: Write> ReportSink for ConsoleReporter<W> {
    fn report(&mut self, report: &IterationReport) -> io::Result<()> {
        let i = report.iteration;
        writeln!(self.out, "Iteration {i} Bigram Values and Scores:")?;
        for bigram in &report.bigrams {
            writeln!(
                self.out,
                "  Bigram: ({}, {}) | Frequency: {} | Score: {:.4}",
                bigram.pair.0, bigram.pair.1, bigram.frequency, bigram.score
            )?;
        }
        let (left, right) = &report.selected.pair;
        writeln!(self.out, "\nIteration {i} Summary:")?;
        writeln!(self.out, "  Best Merge: {left}{right} → {}", report.merged)?;
        writeln!(self.out, "  Best Score: {:.4}", report.selected.score)?;
        writeln!(self.out, "  Updated Vocabulary: {}", report.vocabulary)?;
        writeln!(self.out, "{}", "-".repeat(50))
    }
}

/// One json object per line, one line per iteration.
pub struct JsonLinesReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonLinesReporter<W> {
    fn report(&mut self, report: &IterationReport) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Plot the winning score of each iteration in the terminal.
pub fn display_scores(merges: &[MergeRecord]) {
    if merges.len() < 2 {
        return;
    }
    Chart::new(100, 40, 1.0, merges.len() as f32)
        .lineplot(&Shape::Lines(
            &merges
                .iter()
                .map(|m| (m.iteration as f32, m.score as f32))
                .collect::<Vec<_>>(),
        ))
        .display();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::train_with_sink;

    #[test]
    fn test_console_report_layout() {
        let mut console = ConsoleReporter::new(Vec::<u8>::new());
        train_with_sink(["ab", "cd"], 1, &mut console).unwrap();
        let text = String::from_utf8(console.into_inner()).unwrap();
        let expected = "Iteration 1 Bigram Values and Scores:\n\
                        \x20 Bigram: (a, b) | Frequency: 1 | Score: 1.0000\n\
                        \x20 Bigram: (c, d) | Frequency: 1 | Score: 1.0000\n\
                        \n\
                        Iteration 1 Summary:\n\
                        \x20 Best Merge: ab → ab\n\
                        \x20 Best Score: 1.0000\n\
                        \x20 Updated Vocabulary: {'ab': 1, 'c d': 1}\n";
        assert!(text.starts_with(expected), "{text}");
        assert!(text.ends_with(&format!("{}\n", "-".repeat(50))));
    }

    #[test]
    fn test_final_vocabulary_line() {
        let mut console = ConsoleReporter::new(Vec::<u8>::new());
        console
            .final_vocabulary(&Vocabulary::from_lines(["ab"]))
            .unwrap();
        let text = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(text, "\nFinal Vocabulary: {'a b': 1}\n");
    }

    #[test]
    fn test_display_scores() {
        display_scores(&[]);
        let (outcome, _) = crate::train::train(["crazy_", " hazy_", " day_"], 1).unwrap();
        display_scores(&outcome.merges);
        let (outcome, _) = crate::train::train(["crazy_", " hazy_", " day_"], 4).unwrap();
        assert_eq!(outcome.merges.len(), 4);
        display_scores(&outcome.merges);
    }

    #[test]
    fn test_json_lines_one_per_iteration() {
        let mut sink = JsonLinesReporter::new(Vec::<u8>::new());
        let outcome = train_with_sink(["crazy_", " hazy_", " day_"], 3, &mut sink).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), outcome.completed_iterations);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["iteration"], 1);
        assert_eq!(first["merged"], "cr");
        assert_eq!(first["bigrams"].as_array().unwrap().len(), 8);
        assert_eq!(first["vocabulary"]["cr a z y _"], 1);
    }
}
