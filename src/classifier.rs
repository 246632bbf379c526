//! Classifier boundary: the inference trait seam, score-vector resolution,
//! and a deterministic scripted engine for demos and tests.

use crate::labels::LabelCatalog;
use crate::pipeline::RawPrediction;
use anyhow::{anyhow, Result};
use std::collections::VecDeque;

/// Per-window inference engine.
///
/// `Ok(None)` is the explicit no-detection signal; the pipeline maps it to a
/// zero-confidence admission. Errors are caught at the tick boundary, logged,
/// and the tick is skipped.
pub trait Classifier {
    fn classify(&mut self, window: &[Vec<f32>]) -> Result<Option<RawPrediction>>;
    fn reset(&mut self) {}
    fn name(&self) -> &'static str {
        "unknown_classifier"
    }
}

/// Resolve a model score vector to a labeled prediction via argmax.
///
/// Ties resolve to the lowest index. Indices past the end of the catalog get
/// a deterministic placeholder name. `None` for an empty score vector.
pub fn resolve_scores(scores: &[f32], labels: &LabelCatalog) -> Option<RawPrediction> {
    let mut best_index = 0usize;
    let mut best_score = *scores.first()?;
    for (index, score) in scores.iter().enumerate().skip(1) {
        if *score > best_score {
            best_index = index;
            best_score = *score;
        }
    }
    Some(RawPrediction::new(labels.name_for(best_index), best_score))
}

/// One scripted inference outcome.
#[derive(Debug, Clone)]
pub enum ScriptedStep {
    Predict(RawPrediction),
    NoDetection,
    Fail(String),
}

impl ScriptedStep {
    pub fn predict(label: impl Into<String>, confidence: f32) -> Self {
        ScriptedStep::Predict(RawPrediction::new(label, confidence))
    }
}

/// Deterministic classifier that replays a prepared step list in order.
///
/// Once the script is exhausted it keeps reporting no detection. Used by the
/// CLI demo session, the benchmark harness, and tests.
pub struct ScriptedClassifier {
    steps: VecDeque<ScriptedStep>,
}

impl ScriptedClassifier {
    pub fn new(steps: impl IntoIterator<Item = ScriptedStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&mut self, _window: &[Vec<f32>]) -> Result<Option<RawPrediction>> {
        match self.steps.pop_front() {
            Some(ScriptedStep::Predict(prediction)) => Ok(Some(prediction)),
            Some(ScriptedStep::NoDetection) | None => Ok(None),
            Some(ScriptedStep::Fail(message)) => Err(anyhow!("{message}")),
        }
    }

    fn name(&self) -> &'static str {
        "scripted_classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(labels: &[&str]) -> LabelCatalog {
        LabelCatalog::from_labels(labels.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn argmax_picks_highest_score() {
        let labels = catalog(&["hola", "gracias", "adios"]);
        let prediction = resolve_scores(&[0.1, 0.7, 0.2], &labels).unwrap();
        assert_eq!(prediction.label, "gracias");
        assert!((prediction.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn argmax_tie_takes_lowest_index() {
        let labels = catalog(&["A", "B"]);
        let prediction = resolve_scores(&[0.5, 0.5], &labels).unwrap();
        assert_eq!(prediction.label, "A");
    }

    #[test]
    fn empty_scores_resolve_to_none() {
        let labels = catalog(&["A"]);
        assert!(resolve_scores(&[], &labels).is_none());
    }

    #[test]
    fn score_index_past_catalog_uses_placeholder() {
        let labels = catalog(&["A"]);
        let prediction = resolve_scores(&[0.1, 0.9], &labels).unwrap();
        assert_eq!(prediction.label, "class 1");
    }

    #[test]
    fn scripted_classifier_replays_in_order_then_reports_no_detection() {
        let mut engine = ScriptedClassifier::new([
            ScriptedStep::predict("A", 0.9),
            ScriptedStep::Fail("backend offline".into()),
            ScriptedStep::NoDetection,
        ]);
        let window: Vec<Vec<f32>> = vec![vec![0.0]];

        let first = engine.classify(&window).unwrap().unwrap();
        assert_eq!(first.label, "A");
        assert!(engine.classify(&window).is_err());
        assert!(engine.classify(&window).unwrap().is_none());
        assert_eq!(engine.remaining(), 0);
        // exhausted script keeps yielding no detection
        assert!(engine.classify(&window).unwrap().is_none());
    }
}
