//! Analyzer module - quiz performance analysis

pub mod classify;
pub mod difficulty;
pub mod engine;
pub mod plans;
pub mod recommend;
pub mod scoring;
pub mod thresholds;

pub use classify::{classify, TopicBuckets};
pub use difficulty::difficulty_breakdown;
pub use engine::{AggregateStats, PerformanceAnalyzer};
pub use plans::SeverityTier;
pub use recommend::{recommend, recommend_with};
pub use scoring::ScoreCalculator;
pub use thresholds::Thresholds;

use crate::{AnswerRecord, PerformanceReport};

/// Analyze answered questions with the default thresholds
pub fn analyze(records: &[AnswerRecord], overall_score: u8) -> PerformanceReport {
    PerformanceAnalyzer::new().analyze(records, overall_score)
}
