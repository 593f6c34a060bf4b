//! Study recommendations from topic and difficulty stats

use super::classify::TopicBuckets;
use super::plans::SeverityTier;
use super::Thresholds;
use crate::{
    DifficultyBreakdown, DifficultyStat, Priority, Recommendation, RecommendationKind, StudyPlan,
    TopicStat,
};
use tracing::debug;

/// Build recommendations using the default thresholds
pub fn recommend(
    topics: &[TopicStat],
    difficulty: &DifficultyBreakdown,
    overall_score: u8,
) -> Vec<Recommendation> {
    recommend_with(topics, difficulty, overall_score, &Thresholds::default())
}

/// Build recommendations, SUCCESS and CRITICAL first, capped at
/// `thresholds.max_recommendations`. No topics means no recommendations.
pub fn recommend_with(
    topics: &[TopicStat],
    difficulty: &DifficultyBreakdown,
    overall_score: u8,
    thresholds: &Thresholds,
) -> Vec<Recommendation> {
    if topics.is_empty() {
        return Vec::new();
    }

    let overall_score = overall_score.min(100);
    let buckets = TopicBuckets::partition(topics, thresholds);
    let mut recs = Vec::new();

    if overall_score >= thresholds.success_score {
        recs.push(celebrate(&buckets.strong, overall_score));
    }

    for stat in buckets.weak.iter().take(thresholds.max_weak_topics) {
        recs.push(topic_focus(stat, thresholds));
    }

    if buckets.weak.is_empty() {
        for stat in buckets.moderate.iter().take(thresholds.max_moderate_topics) {
            recs.push(topic_improvement(stat, thresholds));
        }
    }

    if let Some(rec) = difficulty_adjustment(difficulty, thresholds) {
        recs.push(rec);
    }

    recs.sort_by_key(|r| r.priority.rank());
    recs.truncate(thresholds.max_recommendations);

    debug!(
        score = overall_score,
        weak = buckets.weak.len(),
        moderate = buckets.moderate.len(),
        strong = buckets.strong.len(),
        recommendations = recs.len(),
        "built recommendations"
    );
    recs
}

fn celebrate(strong: &[&TopicStat], score: u8) -> Recommendation {
    let message = if strong.is_empty() {
        format!("Excellent work! You scored {}% overall.", score)
    } else {
        format!(
            "Excellent work! You scored {}%. Strong topics: {}.",
            score,
            TopicBuckets::names(strong).join(", ")
        )
    };

    Recommendation {
        priority: Priority::Success,
        kind: RecommendationKind::Celebrate,
        message,
        action: "Keep the momentum: move on to harder question sets or a new topic".to_string(),
        estimated_time: "Ongoing".to_string(),
        topic: None,
        study_plan: None,
    }
}

fn topic_focus(stat: &TopicStat, thresholds: &Thresholds) -> Recommendation {
    let priority = if stat.accuracy < thresholds.critical_below {
        Priority::Critical
    } else {
        Priority::High
    };
    let template = SeverityTier::for_accuracy(stat.accuracy, thresholds).template();

    Recommendation {
        priority,
        kind: RecommendationKind::TopicFocus,
        message: format!(
            "{} needs attention: {}/{} correct ({:.1}%)",
            stat.topic, stat.correct, stat.total, stat.accuracy
        ),
        action: template.action_for(&stat.topic),
        estimated_time: template.estimated_time.to_string(),
        topic: Some(stat.topic.clone()),
        study_plan: Some(template.plan_for(&stat.topic)),
    }
}

fn topic_improvement(stat: &TopicStat, thresholds: &Thresholds) -> Recommendation {
    let template = SeverityTier::PracticeRefinement.template();

    Recommendation {
        priority: Priority::Medium,
        kind: RecommendationKind::TopicImprovement,
        message: format!(
            "{} is close to mastery at {:.1}% accuracy",
            stat.topic, stat.accuracy
        ),
        action: format!(
            "Practice mixed {} questions to push accuracy above {}%",
            stat.topic, thresholds.strong_from
        ),
        estimated_time: "1 hour".to_string(),
        topic: Some(stat.topic.clone()),
        study_plan: Some(template.plan_for(&stat.topic)),
    }
}

fn difficulty_adjustment(
    difficulty: &DifficultyBreakdown,
    thresholds: &Thresholds,
) -> Option<Recommendation> {
    let easy = &difficulty.easy;
    let medium = &difficulty.medium;
    let hard = &difficulty.hard;

    if easy.attempted() && easy.accuracy < thresholds.easy_floor {
        return Some(Recommendation {
            priority: Priority::High,
            kind: RecommendationKind::DifficultyFundamentals,
            message: format!(
                "Only {}/{} EASY questions correct ({:.1}%)",
                easy.correct, easy.total, easy.accuracy
            ),
            action: "Strengthen the fundamentals before moving on to harder questions"
                .to_string(),
            estimated_time: "2-3 hours".to_string(),
            topic: None,
            study_plan: Some(StudyPlan {
                steps: vec![
                    "Revisit the basic definitions behind each missed EASY question".to_string(),
                    "Practice EASY-level sets until accuracy is above 70%".to_string(),
                    "Only then move on to MEDIUM questions".to_string(),
                ],
                focus_points: vec!["Core concepts and terminology".to_string()],
                quick_wins: vec!["Read the explanation of every missed EASY question".to_string()],
                resources: vec!["Introductory notes and beginner practice sets".to_string()],
            }),
        });
    }

    let mastered = |stat: &DifficultyStat| {
        stat.attempted() && stat.accuracy >= thresholds.mastery_from
    };
    // A perfect HARD run leaves nothing to challenge
    if mastered(easy) && mastered(medium) && hard.attempted() && hard.accuracy < 100.0 {
        return Some(Recommendation {
            priority: Priority::Low,
            kind: RecommendationKind::DifficultyChallenge,
            message: format!(
                "EASY and MEDIUM questions mastered; HARD accuracy is {:.1}%",
                hard.accuracy
            ),
            action: "Challenge yourself with more HARD questions".to_string(),
            estimated_time: "1-2 hours".to_string(),
            topic: None,
            study_plan: Some(StudyPlan {
                steps: vec![
                    "Attempt a HARD-only practice set".to_string(),
                    "Review the reasoning behind each HARD question you missed".to_string(),
                ],
                focus_points: vec!["Multi-step reasoning".to_string()],
                quick_wins: Vec::new(),
                resources: vec!["Advanced practice sets and past papers".to_string()],
            }),
        });
    }

    None
}
