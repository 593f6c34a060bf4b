//! Analysis engine - turns submissions into performance reports

use super::classify::{classify, TopicBuckets};
use super::difficulty::difficulty_breakdown;
use super::recommend::recommend_with;
use super::Thresholds;
use crate::submission::{QuizSubmission, SubmissionError};
use crate::{AnswerRecord, PerformanceReport, Score};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main analysis engine
#[derive(Debug, Clone, Default)]
pub struct PerformanceAnalyzer {
    thresholds: Thresholds,
}

impl PerformanceAnalyzer {
    /// Create an analyzer with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom thresholds (e.g. from config)
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Analyze answered questions against an overall score (clamped to 0-100)
    pub fn analyze(&self, records: &[AnswerRecord], overall_score: u8) -> PerformanceReport {
        let score = Score::new(overall_score);
        let topics = classify(records);
        let difficulty = difficulty_breakdown(records);
        let recommendations = recommend_with(&topics, &difficulty, score.value, &self.thresholds);

        let buckets = TopicBuckets::partition(&topics, &self.thresholds);
        let weak_topics = TopicBuckets::names(&buckets.weak);
        let moderate_topics = TopicBuckets::names(&buckets.moderate);
        let strong_topics = TopicBuckets::names(&buckets.strong);

        PerformanceReport {
            source: None,
            score,
            total_questions: records.len(),
            correct_answers: records.iter().filter(|r| r.is_correct).count(),
            topics,
            weak_topics,
            moderate_topics,
            strong_topics,
            difficulty,
            recommendations,
        }
    }

    /// Analyze a loaded submission, computing the score when it carries none
    pub fn analyze_submission(&self, submission: &QuizSubmission) -> PerformanceReport {
        self.analyze(&submission.answers, submission.overall_score())
    }

    /// Load and analyze a submission file
    pub fn analyze_file(&self, path: &Path) -> Result<PerformanceReport, SubmissionError> {
        let submission = QuizSubmission::load(path)?;
        let mut report = self.analyze_submission(&submission);
        report.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            score = report.score.value,
            "analyzed submission"
        );
        Ok(report)
    }

    /// Analyze multiple submission files sequentially
    pub fn analyze_many(&self, paths: &[PathBuf]) -> Vec<Result<PerformanceReport, SubmissionError>> {
        paths.iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Analyze multiple submission files in parallel using rayon
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
    ) -> Vec<Result<PerformanceReport, SubmissionError>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Get aggregate stats from multiple reports
    pub fn aggregate_stats(reports: &[PerformanceReport]) -> AggregateStats {
        if reports.is_empty() {
            return AggregateStats::default();
        }

        // Rounded half up, like a single submission's score
        let total_score: u32 = reports.iter().map(|r| r.score.value as u32).sum();
        let count = reports.len() as u32;
        let avg_score = ((total_score + count / 2) / count) as u8;

        let total_questions: usize = reports.iter().map(|r| r.total_questions).sum();
        let total_correct: usize = reports.iter().map(|r| r.correct_answers).sum();

        let mut weak_counts: HashMap<&str, usize> = HashMap::new();
        for report in reports {
            for topic in &report.weak_topics {
                *weak_counts.entry(topic.as_str()).or_default() += 1;
            }
        }
        let mut recurring_weak_topics: Vec<(String, usize)> = weak_counts
            .into_iter()
            .map(|(topic, count)| (topic.to_string(), count))
            .collect();
        recurring_weak_topics.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        AggregateStats {
            files_analyzed: reports.len(),
            average_score: Score::new(avg_score),
            total_questions,
            total_correct,
            recurring_weak_topics,
        }
    }
}

/// Aggregate statistics from multiple submission analyses
#[derive(Debug, Default)]
pub struct AggregateStats {
    /// Number of submissions analyzed
    pub files_analyzed: usize,
    /// Average score across all submissions
    pub average_score: Score,
    /// Total questions across all submissions
    pub total_questions: usize,
    /// Total correct answers across all submissions
    pub total_correct: usize,
    /// Weak topics with the number of submissions they were weak in, most frequent first
    pub recurring_weak_topics: Vec<(String, usize)>,
}
