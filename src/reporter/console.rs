//! Console reporter with colored output

use crate::analyzer::{AggregateStats, ScoreCalculator, Thresholds};
use crate::{Grade, PerformanceReport, Priority, Recommendation, TopicBucket, TopicStat};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
    /// Cut-offs used to color topic bars
    thresholds: Thresholds,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
            thresholds: Thresholds::default(),
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output (expanded study plans)
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Report a single analysis result
    pub fn report(&self, report: &PerformanceReport) {
        print!("{}", self.render(report));
    }

    /// Render a single report to a string
    pub fn render(&self, report: &PerformanceReport) -> String {
        let mut out = String::new();
        self.write_header(&mut out, report);
        self.write_score(&mut out, report);
        if !report.topics.is_empty() {
            self.write_topics(&mut out, &report.topics);
            self.write_difficulty(&mut out, report);
        }
        self.write_recommendations(&mut out, &report.recommendations);
        out.push('\n');
        out
    }

    /// Report multiple results with summary
    pub fn report_many(&self, reports: &[PerformanceReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// One-line summary with an optional trailing note (e.g. history delta)
    pub fn render_quiet(&self, report: &PerformanceReport, suffix: &str) -> String {
        format!(
            "{}: {} ({}){}",
            self.source_label(report),
            report.score.value,
            self.colorize_grade(&report.score.grade),
            suffix
        )
    }

    fn source_label(&self, report: &PerformanceReport) -> String {
        report
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "quiz".to_string())
    }

    fn write_header(&self, out: &mut String, report: &PerformanceReport) {
        out.push('\n');
        let title = format!("📊 Quiz Performance: {}", self.source_label(report));
        out.push_str(&format!("{}\n", self.paint_bold(&title)));
        out.push_str(&format!(
            "   Questions: {} | Correct: {} | Topics: {}\n\n",
            report.total_questions,
            report.correct_answers,
            report.topics.len()
        ));
    }

    fn write_score(&self, out: &mut String, report: &PerformanceReport) {
        let grade_str = self.colorize_grade(&report.score.grade);
        let score_bar = self.create_score_bar(report.score.value);

        out.push_str(&format!("   Score: {} {}\n", score_bar, grade_str));
        let description = ScoreCalculator::grade_description(report.score.grade);
        if self.use_colors {
            out.push_str(&format!("   {}\n\n", description.dimmed()));
        } else {
            out.push_str(&format!("   {}\n\n", description));
        }
    }

    fn write_topics(&self, out: &mut String, topics: &[TopicStat]) {
        out.push_str(&format!("   {}\n", self.paint_bold("Topics (weakest first):")));
        for stat in topics {
            let bar = self.create_mini_bar(stat.accuracy);
            let pct = format!("{:>5.1}%", stat.accuracy);
            let bucket = self.thresholds.bucket(stat.accuracy);
            let pct = if self.use_colors {
                match bucket {
                    TopicBucket::Strong => pct.green().to_string(),
                    TopicBucket::Moderate => pct.yellow().to_string(),
                    TopicBucket::Weak => pct.red().to_string(),
                }
            } else {
                pct
            };
            out.push_str(&format!(
                "   {} {} {} ({}/{}, {})\n",
                bar, pct, stat.topic, stat.correct, stat.total, bucket
            ));
        }
        out.push('\n');
    }

    fn write_difficulty(&self, out: &mut String, report: &PerformanceReport) {
        let attempted: Vec<_> = report.difficulty.iter().filter(|d| d.attempted()).collect();
        if attempted.is_empty() {
            return;
        }
        let parts: Vec<String> = attempted
            .iter()
            .map(|d| {
                format!(
                    "{} {}/{} ({:.1}%)",
                    d.difficulty, d.correct, d.total, d.accuracy
                )
            })
            .collect();
        out.push_str(&format!(
            "   {} {}\n\n",
            self.paint_bold("By difficulty:"),
            parts.join(" | ")
        ));
    }

    fn write_recommendations(&self, out: &mut String, recs: &[Recommendation]) {
        if recs.is_empty() {
            return;
        }
        out.push_str(&format!("   {}\n", self.paint_bold("Recommendations:")));
        for rec in recs {
            out.push_str(&format!(
                "   {} {} ({})\n",
                self.priority_badge(rec.priority),
                rec.message,
                rec.estimated_time
            ));
            out.push_str(&format!("       → {}\n", rec.action));

            if self.verbose {
                if let Some(ref plan) = rec.study_plan {
                    for (i, step) in plan.steps.iter().enumerate() {
                        out.push_str(&format!("         {}. {}\n", i + 1, step));
                    }
                    if !plan.quick_wins.is_empty() {
                        out.push_str(&format!(
                            "         Quick wins: {}\n",
                            plan.quick_wins.join("; ")
                        ));
                    }
                    if !plan.resources.is_empty() {
                        out.push_str(&format!(
                            "         Resources: {}\n",
                            plan.resources.join("; ")
                        ));
                    }
                }
            }
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", self.paint_bold("Summary"));
        println!("{}", "═".repeat(60));
        println!("   Submissions analyzed: {}", stats.files_analyzed);
        println!(
            "   Average score:        {} ({})",
            stats.average_score.value,
            self.colorize_grade(&stats.average_score.grade)
        );
        println!(
            "   Questions:            {} ({} correct)",
            stats.total_questions, stats.total_correct
        );
        if !stats.recurring_weak_topics.is_empty() {
            let topics: Vec<String> = stats
                .recurring_weak_topics
                .iter()
                .take(5)
                .map(|(topic, count)| format!("{} ×{}", topic, count))
                .collect();
            println!("   Recurring weak topics: {}", topics.join(", "));
        }
        println!();
    }

    fn priority_badge(&self, priority: Priority) -> String {
        let label = format!("[{}]", priority);
        if !self.use_colors {
            return label;
        }
        match priority {
            Priority::Success => label.green().bold().to_string(),
            Priority::Critical => label.red().bold().to_string(),
            Priority::High => label.red().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.blue().to_string(),
        }
    }

    fn paint_bold(&self, s: &str) -> String {
        if self.use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn colorize_grade(&self, grade: &Grade) -> String {
        let s = grade.to_string();
        if !self.use_colors {
            return s;
        }
        match grade {
            Grade::A => s.green().bold().to_string(),
            Grade::B => s.green().to_string(),
            Grade::C => s.yellow().to_string(),
            Grade::D => s.red().to_string(),
            Grade::F => s.red().bold().to_string(),
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score);

        if self.use_colors {
            if score >= 80 {
                bar.green().to_string()
            } else if score >= 60 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, accuracy: f64) -> String {
        let filled = ((accuracy.clamp(0.0, 100.0) / 10.0).floor() as usize).min(10);
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::{AnswerRecord, Difficulty};

    fn sample_report() -> PerformanceReport {
        let mut records = vec![
            AnswerRecord::new("q1", "a").with_topic("Arrays").answered("a"),
            AnswerRecord::new("q2", "a").with_topic("Arrays").answered("b"),
            AnswerRecord::new("q3", "a").with_topic("Arrays").answered("b"),
        ];
        records.push(
            AnswerRecord::new("q4", "a")
                .with_topic("Loops")
                .with_difficulty(Difficulty::Easy)
                .answered("a"),
        );
        analyze(&records, 50)
    }

    #[test]
    fn test_render_plain_contains_sections() {
        let out = ConsoleReporter::new().without_colors().render(&sample_report());
        assert!(out.contains("Quiz Performance: quiz"));
        assert!(out.contains("Score: [██████████░░░░░░░░░░]  50% F"));
        assert!(out.contains("Topics (weakest first):"));
        assert!(out.contains(" 33.3% Arrays (1/3, weak)"));
        assert!(out.contains("100.0% Loops (1/1, strong)"));
        assert!(out.contains("By difficulty: EASY 1/1 (100.0%) | MEDIUM 1/3 (33.3%)"));
        assert!(out.contains("[CRITICAL] Arrays needs attention"));
        assert!(!out.contains("Resources:"));
    }

    #[test]
    fn test_render_verbose_expands_study_plan() {
        let out = ConsoleReporter::new()
            .without_colors()
            .verbose()
            .render(&sample_report());
        assert!(out.contains("1. "));
        assert!(out.contains("Resources:"));
    }

    #[test]
    fn test_render_empty_report() {
        let out = ConsoleReporter::new().without_colors().render(&analyze(&[], 0));
        assert!(out.contains("Questions: 0"));
        assert!(!out.contains("Recommendations:"));
        assert!(!out.contains("Topics (weakest first)"));
    }

    #[test]
    fn test_render_quiet_with_suffix() {
        let line = ConsoleReporter::new()
            .without_colors()
            .render_quiet(&sample_report(), " [was 40, up 10]");
        assert_eq!(line, "quiz: 50 (F) [was 40, up 10]");
    }

    #[test]
    fn test_mini_bar_bounds() {
        let reporter = ConsoleReporter::new();
        assert_eq!(reporter.create_mini_bar(0.0), "[░░░░░░░░░░]");
        assert_eq!(reporter.create_mini_bar(100.0), "[▓▓▓▓▓▓▓▓▓▓]");
        assert_eq!(reporter.create_mini_bar(33.3), "[▓▓▓░░░░░░░]");
    }
}
