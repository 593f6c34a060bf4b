//! JSON reporter for machine-readable output

use crate::analyzer::AggregateStats;
use crate::PerformanceReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single analysis result as JSON
    pub fn report(&self, report: &PerformanceReport) -> String {
        self.to_json(report, "{}")
    }

    /// Report multiple results as JSON array
    pub fn report_many(&self, reports: &[PerformanceReport]) -> String {
        self.to_json(&reports, "[]")
    }

    /// Report with summary
    pub fn report_with_summary(
        &self,
        reports: &[PerformanceReport],
        stats: &AggregateStats,
    ) -> String {
        let output = JsonOutput {
            results: reports,
            summary: JsonSummary {
                files_analyzed: stats.files_analyzed,
                average_score: stats.average_score.value,
                average_grade: stats.average_score.grade.to_string(),
                total_questions: stats.total_questions,
                total_correct: stats.total_correct,
                recurring_weak_topics: stats
                    .recurring_weak_topics
                    .iter()
                    .map(|(topic, count)| RecurringTopic {
                        topic,
                        submissions: *count,
                    })
                    .collect(),
            },
        };
        self.to_json(&output, "{}")
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [PerformanceReport],
    summary: JsonSummary<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    files_analyzed: usize,
    average_score: u8,
    average_grade: String,
    total_questions: usize,
    total_correct: usize,
    recurring_weak_topics: Vec<RecurringTopic<'a>>,
}

#[derive(Serialize)]
struct RecurringTopic<'a> {
    topic: &'a str,
    submissions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze, PerformanceAnalyzer};
    use crate::AnswerRecord;
    use std::path::PathBuf;

    fn make_report(path: &str, correct: bool) -> PerformanceReport {
        let records = vec![AnswerRecord::new("q", "a")
            .with_topic("Arrays")
            .answered(if correct { "a" } else { "b" })];
        let mut report = analyze(&records, if correct { 100 } else { 0 });
        report.source = Some(PathBuf::from(path));
        report
    }

    #[test]
    fn test_json_report_single() {
        let reporter = JsonReporter::new();
        let json = reporter.report(&make_report("week1.json", false));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["source"], "week1.json");
        assert_eq!(parsed["score"]["value"], 0);
        assert_eq!(parsed["score"]["grade"], "F");
        assert_eq!(parsed["topics"][0]["topic"], "Arrays");
        assert_eq!(parsed["weakTopics"][0], "Arrays");
        assert_eq!(parsed["difficulty"]["medium"]["total"], 1);
        assert_eq!(parsed["recommendations"][0]["priority"], "CRITICAL");
        assert_eq!(parsed["recommendations"][0]["type"], "topic_focus");
    }

    #[test]
    fn test_json_report_many() {
        let reports = vec![make_report("a.json", true), make_report("b.json", false)];
        let json = JsonReporter::new().report_many(&reports);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_report_with_summary() {
        let reports = vec![make_report("a.json", true), make_report("b.json", false)];
        let stats = PerformanceAnalyzer::aggregate_stats(&reports);
        let json = JsonReporter::new()
            .pretty()
            .report_with_summary(&reports, &stats);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["summary"]["filesAnalyzed"], 2);
        assert_eq!(parsed["summary"]["averageScore"], 50);
        assert_eq!(parsed["summary"]["averageGrade"], "F");
        assert_eq!(
            parsed["summary"]["recurringWeakTopics"][0]["topic"],
            "Arrays"
        );
        assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_report_roundtrips() {
        let report = make_report("a.json", true);
        let json = JsonReporter::new().report(&report);
        let back: PerformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
