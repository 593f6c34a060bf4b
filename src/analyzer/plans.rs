//! Study-plan templates keyed by severity tier

use super::Thresholds;
use crate::StudyPlan;

/// How far a weak topic is from passing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTier {
    /// Below the fundamentals cut-off (default < 20%)
    Fundamentals,
    /// Between fundamentals and critical cut-offs (default 20-40%)
    TargetedReview,
    /// At or above the critical cut-off (default >= 40%)
    PracticeRefinement,
}

impl SeverityTier {
    pub fn for_accuracy(accuracy: f64, thresholds: &Thresholds) -> Self {
        if accuracy < thresholds.fundamentals_below {
            SeverityTier::Fundamentals
        } else if accuracy < thresholds.critical_below {
            SeverityTier::TargetedReview
        } else {
            SeverityTier::PracticeRefinement
        }
    }

    pub fn template(self) -> &'static PlanTemplate {
        match self {
            SeverityTier::Fundamentals => &PLAN_TEMPLATES[0],
            SeverityTier::TargetedReview => &PLAN_TEMPLATES[1],
            SeverityTier::PracticeRefinement => &PLAN_TEMPLATES[2],
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template().label)
    }
}

/// Canned copy for one severity tier. `{topic}` is replaced with the topic name.
#[derive(Debug)]
pub struct PlanTemplate {
    pub label: &'static str,
    pub estimated_time: &'static str,
    pub action: &'static str,
    pub steps: &'static [&'static str],
    pub focus_points: &'static [&'static str],
    pub quick_wins: &'static [&'static str],
    pub resources: &'static [&'static str],
}

static PLAN_TEMPLATES: [PlanTemplate; 3] = [
    PlanTemplate {
        label: "fundamentals",
        estimated_time: "3-4 hours",
        action: "Rebuild {topic} from the fundamentals before attempting more questions",
        steps: &[
            "Read an introductory chapter or watch a beginner video on {topic}",
            "Write down the key definitions and rules of {topic} in your own words",
            "Work through solved examples step by step without looking at the answers",
            "Retake a short EASY-level {topic} quiz",
        ],
        focus_points: &[
            "Core definitions and terminology",
            "The most common patterns in {topic}",
            "Why each wrong option was wrong",
        ],
        quick_wins: &[
            "Re-read the explanations for every missed {topic} question",
            "Make five flashcards for {topic} terms",
        ],
        resources: &[
            "Course notes and introductory material for {topic}",
            "Beginner video tutorials on {topic}",
            "Shared {topic} resources in the LearnBox library",
        ],
    },
    PlanTemplate {
        label: "targeted review",
        estimated_time: "2-3 hours",
        action: "Review the {topic} concepts you missed and practice them deliberately",
        steps: &[
            "List the {topic} questions you got wrong and the concept behind each",
            "Review those concepts in your notes or textbook",
            "Solve 10 practice questions on {topic}",
            "Retake a MEDIUM-level {topic} quiz",
        ],
        focus_points: &[
            "Concepts behind the missed questions",
            "Common traps and misconceptions in {topic}",
        ],
        quick_wins: &[
            "Summarize each missed question in one sentence",
            "Compare your answer with the explanation for each mistake",
        ],
        resources: &[
            "Chapter review questions on {topic}",
            "Topic-wise MCQ sets for {topic}",
        ],
    },
    PlanTemplate {
        label: "practice refinement",
        estimated_time: "1-2 hours",
        action: "Sharpen {topic} with timed practice to close the remaining gaps",
        steps: &[
            "Do a timed set of mixed {topic} questions",
            "Analyze every mistake and note the pattern",
            "Repeat with a fresh set until accuracy passes 80%",
        ],
        focus_points: &[
            "Edge cases and tricky wording in {topic}",
            "Speed and accuracy under time pressure",
        ],
        quick_wins: &["Redo the missed {topic} questions without notes"],
        resources: &[
            "Practice MCQ sets for {topic}",
            "Past papers with {topic} questions",
        ],
    },
];

impl PlanTemplate {
    /// Action text for a topic
    pub fn action_for(&self, topic: &str) -> String {
        fill(self.action, topic)
    }

    /// Concrete study plan for a topic
    pub fn plan_for(&self, topic: &str) -> StudyPlan {
        let fill_all =
            |lines: &[&str]| -> Vec<String> { lines.iter().map(|l| fill(l, topic)).collect() };
        StudyPlan {
            steps: fill_all(self.steps),
            focus_points: fill_all(self.focus_points),
            quick_wins: fill_all(self.quick_wins),
            resources: fill_all(self.resources),
        }
    }
}

fn fill(template: &str, topic: &str) -> String {
    template.replace("{topic}", topic)
}
