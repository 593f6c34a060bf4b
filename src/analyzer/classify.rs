//! Topic grouping and accuracy buckets

use super::Thresholds;
use crate::{accuracy_pct, AnswerRecord, Difficulty, TopicBucket, TopicStat};
use std::collections::HashMap;
use tracing::debug;

struct TopicTally<'a> {
    topic: &'a str,
    total: usize,
    correct: usize,
    difficulty: Difficulty,
}

/// Group records by topic and compute per-topic accuracy, weakest first.
///
/// Topics keep the order in which they were first encountered when their
/// accuracy is equal.
pub fn classify(records: &[AnswerRecord]) -> Vec<TopicStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<TopicTally<'_>> = Vec::new();

    for record in records {
        let topic = record.topic_label();
        let slot = *index.entry(topic).or_insert_with(|| {
            tallies.push(TopicTally {
                topic,
                total: 0,
                correct: 0,
                difficulty: record.difficulty,
            });
            tallies.len() - 1
        });
        let tally = &mut tallies[slot];
        tally.total += 1;
        if record.is_correct {
            tally.correct += 1;
        }
    }

    let mut stats: Vec<TopicStat> = tallies
        .into_iter()
        .map(|t| TopicStat {
            topic: t.topic.to_string(),
            total: t.total,
            correct: t.correct,
            accuracy: accuracy_pct(t.correct, t.total),
            difficulty: t.difficulty,
        })
        .collect();

    // sort_by is stable: equal accuracies keep first-encountered order
    stats.sort_by(|a, b| a.accuracy.total_cmp(&b.accuracy));

    debug!(
        records = records.len(),
        topics = stats.len(),
        "classified answers by topic"
    );
    stats
}

/// Topic stats split into accuracy buckets, each weakest first
#[derive(Debug, Default)]
pub struct TopicBuckets<'a> {
    pub weak: Vec<&'a TopicStat>,
    pub moderate: Vec<&'a TopicStat>,
    pub strong: Vec<&'a TopicStat>,
}

impl<'a> TopicBuckets<'a> {
    /// Partition topic stats by the given thresholds, weakest first
    pub fn partition(stats: &'a [TopicStat], thresholds: &Thresholds) -> Self {
        let mut sorted: Vec<&TopicStat> = stats.iter().collect();
        sorted.sort_by(|a, b| a.accuracy.total_cmp(&b.accuracy));

        let mut buckets = TopicBuckets::default();
        for stat in sorted {
            match thresholds.bucket(stat.accuracy) {
                TopicBucket::Weak => buckets.weak.push(stat),
                TopicBucket::Moderate => buckets.moderate.push(stat),
                TopicBucket::Strong => buckets.strong.push(stat),
            }
        }
        buckets
    }

    pub fn names(bucket: &[&TopicStat]) -> Vec<String> {
        bucket.iter().map(|s| s.topic.clone()).collect()
    }
}
