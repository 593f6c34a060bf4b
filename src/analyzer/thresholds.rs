//! Accuracy cut-offs used for bucketing and recommendations

use crate::TopicBucket;
use serde::Deserialize;

/// All numeric cut-offs of the analyzer.
///
/// Every field has a default, so a config file may override any subset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thresholds {
    /// Topics below this accuracy are weak
    pub weak_below: f64,
    /// Topics at or above this accuracy are strong
    pub strong_from: f64,
    /// Weak topics below this accuracy get CRITICAL priority
    pub critical_below: f64,
    /// Weak topics below this accuracy start from the fundamentals plan
    pub fundamentals_below: f64,
    /// Overall score at which a SUCCESS recommendation is emitted
    pub success_score: u8,
    /// Easy-question accuracy below this triggers a fundamentals review
    pub easy_floor: f64,
    /// Easy and medium accuracy at or above this unlocks the challenge
    pub mastery_from: f64,
    /// Weak topics that get their own recommendation
    pub max_weak_topics: usize,
    /// Moderate topics that get their own recommendation
    pub max_moderate_topics: usize,
    /// Hard cap on the recommendation list
    pub max_recommendations: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            weak_below: 60.0,
            strong_from: 80.0,
            critical_below: 40.0,
            fundamentals_below: 20.0,
            success_score: 80,
            easy_floor: 70.0,
            mastery_from: 80.0,
            max_weak_topics: 3,
            max_moderate_topics: 2,
            max_recommendations: 6,
        }
    }
}

impl Thresholds {
    /// Bucket for a (rounded) topic accuracy
    pub fn bucket(&self, accuracy: f64) -> TopicBucket {
        if accuracy < self.weak_below {
            TopicBucket::Weak
        } else if accuracy < self.strong_from {
            TopicBucket::Moderate
        } else {
            TopicBucket::Strong
        }
    }
}
