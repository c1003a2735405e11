use crate::corpus::{load_corpus, split_corpus};
use crate::error::{validate_iterations, TrainError};
use anyhow::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Console,
    Json,
}

/// A training run as described by a toml file.
#[derive(Clone, Debug, Deserialize)]
pub struct TrainConfig {
    pub run_name: String,
    pub iterations: i64,
    /// File holding the corpus.
    pub corpus_path: Option<String>,
    /// Corpus given inline, used instead of `corpus_path`.
    pub corpus: Option<String>,
    /// Split the corpus text on this instead of on newlines.
    pub delimiter: Option<String>,
    #[serde(default)]
    pub report: ReportFormat,
    /// Where json reports go; stdout if unset.
    pub report_path: Option<String>,
    /// Where the final merges and vocabulary are saved.
    pub output_path: Option<String>,
    #[serde(default)]
    pub plot_scores: bool,
}

impl TrainConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn iterations(&self) -> Result<usize, TrainError> {
        validate_iterations(self.iterations)
    }

    pub fn load_corpus(&self) -> Result<Vec<String>> {
        match (&self.corpus, &self.corpus_path) {
            (Some(text), None) => Ok(match &self.delimiter {
                Some(delimiter) => split_corpus(text, delimiter),
                None => text.lines().map(str::to_string).collect(),
            }),
            (None, Some(path)) => load_corpus(Path::new(path), self.delimiter.as_deref()),
            (Some(_), Some(_)) => Err(Error::msg(
                "[corpus] and [corpus_path] cannot both be set in a training config",
            )),
            (None, None) => Err(Error::msg(
                "one of [corpus] or [corpus_path] must be set in a training config",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_corpus() {
        let config = TrainConfig::from_toml_str(
            r#"
            run_name = "reference"
            iterations = 4
            corpus = "crazy_, hazy_, day_"
            delimiter = ","
            "#,
        )
        .unwrap();
        assert_eq!(config.run_name, "reference");
        assert_eq!(config.iterations().unwrap(), 4);
        assert_eq!(config.report, ReportFormat::Console);
        assert!(!config.plot_scores);
        assert_eq!(
            config.load_corpus().unwrap(),
            vec!["crazy_", " hazy_", " day_"]
        );
    }

    #[test]
    fn test_parse_json_report() {
        let config = TrainConfig::from_toml_str(
            r#"
            run_name = "json"
            iterations = 2
            corpus = "low\nlower"
            report = "json"
            plot_scores = true
            "#,
        )
        .unwrap();
        assert_eq!(config.report, ReportFormat::Json);
        assert!(config.plot_scores);
        assert_eq!(config.load_corpus().unwrap(), vec!["low", "lower"]);
    }

    #[test]
    fn test_negative_iterations_rejected() {
        let config = TrainConfig::from_toml_str(
            r#"
            run_name = "bad"
            iterations = -1
            corpus = "a"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.iterations(),
            Err(TrainError::InvalidIterationCount(-1))
        ));
    }

    #[test]
    fn test_corpus_source_must_be_unique() {
        let both = TrainConfig::from_toml_str(
            r#"
            run_name = "both"
            iterations = 1
            corpus = "a"
            corpus_path = "corpus.txt"
            "#,
        )
        .unwrap();
        assert!(both.load_corpus().is_err());

        let neither = TrainConfig::from_toml_str(
            r#"
            run_name = "neither"
            iterations = 1
            "#,
        )
        .unwrap();
        assert!(neither.load_corpus().is_err());
    }

    #[test]
    fn test_unknown_report_format_rejected() {
        let parsed = TrainConfig::from_toml_str(
            r#"
            run_name = "x"
            iterations = 1
            corpus = "a"
            report = "xml"
            "#,
        );
        assert!(parsed.is_err());
    }
}
