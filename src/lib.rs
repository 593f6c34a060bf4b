//! LearnBox: quiz performance analysis
//!
//! This library groups answered MCQ questions by topic and difficulty,
//! buckets topics by accuracy, and turns the result into prioritized study
//! recommendations for the post-quiz results screen.

pub mod analyzer;
pub mod config;
pub mod history;
pub mod reporter;
pub mod submission;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use analyzer::{
    analyze, classify, difficulty_breakdown, recommend, PerformanceAnalyzer, Thresholds,
};
pub use submission::{QuizSubmission, SubmissionError};

/// Topic assigned to questions that carry no topic label
pub const DEFAULT_TOPIC: &str = "General";

/// The full result of analyzing one quiz submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Submission file the report was built from (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Overall quiz score (0-100)
    pub score: Score,
    /// Number of answered questions
    pub total_questions: usize,
    /// Number of correctly answered questions
    pub correct_answers: usize,
    /// Per-topic stats, weakest first
    pub topics: Vec<TopicStat>,
    /// Topics below the weak threshold, weakest first
    pub weak_topics: Vec<String>,
    /// Topics between the weak and strong thresholds
    pub moderate_topics: Vec<String>,
    /// Topics at or above the strong threshold
    pub strong_topics: Vec<String>,
    /// Accuracy per difficulty level
    pub difficulty: DifficultyBreakdown,
    /// Study recommendations in priority order
    pub recommendations: Vec<Recommendation>,
}

/// Quiz score with grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Numeric score (0-100)
    pub value: u8,
    /// Letter grade (A-F)
    pub grade: Grade,
}

impl Score {
    pub fn new(value: u8) -> Self {
        let value = value.min(100);
        let grade = Grade::from_score(value);
        Self { value, grade }
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::new(0)
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a difficulty label case-insensitively. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "EASY" => Some(Difficulty::Easy),
            "MEDIUM" => Some(Difficulty::Medium),
            "HARD" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "EASY"),
            Difficulty::Medium => write!(f, "MEDIUM"),
            Difficulty::Hard => write!(f, "HARD"),
        }
    }
}

/// One answered quiz question
///
/// Deserialization goes through a lenient raw shape: a missing or blank
/// topic becomes [`DEFAULT_TOPIC`], a missing or unknown difficulty becomes
/// `MEDIUM`, and correctness is derived from the answers when the payload
/// has no explicit flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "submission::RawAnswer")]
pub struct AnswerRecord {
    /// Question text
    pub question: String,
    /// Offered options, in display order
    pub options: Vec<String>,
    /// The option the student picked (None when skipped)
    pub selected_answer: Option<String>,
    /// The correct option
    pub correct_answer: String,
    /// Whether the selected answer was correct
    pub is_correct: bool,
    /// Explanation shown after submission
    pub explanation: String,
    /// Topic label used for grouping
    pub topic: String,
    /// Question difficulty
    pub difficulty: Difficulty,
}

impl AnswerRecord {
    /// Create an unanswered record in the default topic and difficulty
    pub fn new(question: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            options: Vec::new(),
            selected_answer: None,
            correct_answer: correct_answer.into(),
            is_correct: false,
            explanation: String::new(),
            topic: DEFAULT_TOPIC.to_string(),
            difficulty: Difficulty::default(),
        }
    }

    /// Record the selected answer and derive correctness from it
    pub fn answered(mut self, selected: impl Into<String>) -> Self {
        let selected = selected.into();
        self.is_correct = answers_match(&selected, &self.correct_answer);
        self.selected_answer = Some(selected);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the topic; blank labels fall back to [`DEFAULT_TOPIC`]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = normalize_topic(Some(topic.into()));
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Topic label used for grouping; blank topics count as [`DEFAULT_TOPIC`]
    pub fn topic_label(&self) -> &str {
        let topic = self.topic.trim();
        if topic.is_empty() {
            DEFAULT_TOPIC
        } else {
            topic
        }
    }
}

pub(crate) fn answers_match(selected: &str, correct: &str) -> bool {
    selected.trim() == correct.trim()
}

pub(crate) fn normalize_topic(topic: Option<String>) -> String {
    match topic {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => DEFAULT_TOPIC.to_string(),
    }
}

/// Accuracy as a percentage rounded to one decimal; 0.0 when nothing was attempted
pub fn accuracy_pct(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = correct as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Per-topic performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStat {
    /// Topic label
    pub topic: String,
    /// Questions attempted in this topic
    pub total: usize,
    /// Correct answers in this topic
    pub correct: usize,
    /// Accuracy percentage (one decimal)
    pub accuracy: f64,
    /// Difficulty of the first question seen in this topic
    pub difficulty: Difficulty,
}

/// Accuracy bucket a topic falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicBucket {
    Weak,
    Moderate,
    Strong,
}

impl std::fmt::Display for TopicBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopicBucket::Weak => write!(f, "weak"),
            TopicBucket::Moderate => write!(f, "moderate"),
            TopicBucket::Strong => write!(f, "strong"),
        }
    }
}

/// Performance on one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyStat {
    pub difficulty: Difficulty,
    pub total: usize,
    pub correct: usize,
    /// Accuracy percentage (one decimal); 0.0 when not attempted
    pub accuracy: f64,
}

impl DifficultyStat {
    pub fn empty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            total: 0,
            correct: 0,
            accuracy: 0.0,
        }
    }

    pub fn attempted(&self) -> bool {
        self.total > 0
    }
}

/// Accuracy split by difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyBreakdown {
    pub easy: DifficultyStat,
    pub medium: DifficultyStat,
    pub hard: DifficultyStat,
}

impl DifficultyBreakdown {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyStat {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Stats for every level, easiest first
    pub fn iter(&self) -> impl Iterator<Item = &DifficultyStat> {
        [&self.easy, &self.medium, &self.hard].into_iter()
    }
}

impl Default for DifficultyBreakdown {
    fn default() -> Self {
        Self {
            easy: DifficultyStat::empty(Difficulty::Easy),
            medium: DifficultyStat::empty(Difficulty::Medium),
            hard: DifficultyStat::empty(Difficulty::Hard),
        }
    }
}

/// Recommendation priority, most urgent display slot first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Success,
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Display order: SUCCESS first, then by urgency
    pub fn rank(self) -> u8 {
        match self {
            Priority::Success => 0,
            Priority::Critical => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Success => write!(f, "SUCCESS"),
            Priority::Critical => write!(f, "CRITICAL"),
            Priority::High => write!(f, "HIGH"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::Low => write!(f, "LOW"),
        }
    }
}

/// What a recommendation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Overall score is high; name the strong topics
    Celebrate,
    /// A weak topic needs focused study
    TopicFocus,
    /// A moderate topic could be pushed to strong
    TopicImprovement,
    /// Easy questions are being missed; go back to basics
    DifficultyFundamentals,
    /// Easy and medium are mastered; try harder questions
    DifficultyChallenge,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationKind::Celebrate => write!(f, "celebrate"),
            RecommendationKind::TopicFocus => write!(f, "topic_focus"),
            RecommendationKind::TopicImprovement => write!(f, "topic_improvement"),
            RecommendationKind::DifficultyFundamentals => write!(f, "difficulty_fundamentals"),
            RecommendationKind::DifficultyChallenge => write!(f, "difficulty_challenge"),
        }
    }
}

/// Expandable study plan attached to a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// Ordered study steps
    pub steps: Vec<String>,
    /// Concepts to concentrate on
    pub focus_points: Vec<String>,
    /// Small actions with immediate payoff
    pub quick_wins: Vec<String>,
    /// Suggested material
    pub resources: Vec<String>,
}

/// A study recommendation for the results screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Headline shown next to the priority badge
    pub message: String,
    /// What the student should do next
    pub action: String,
    /// Rough study time, e.g. "2-3 hours"
    pub estimated_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_plan: Option<StudyPlan>,
}
