//! Accuracy per difficulty level

use crate::{accuracy_pct, AnswerRecord, Difficulty, DifficultyBreakdown};

/// Per-difficulty accuracy across all records
pub fn difficulty_breakdown(records: &[AnswerRecord]) -> DifficultyBreakdown {
    let mut breakdown = DifficultyBreakdown::default();

    for record in records {
        let stat = match record.difficulty {
            Difficulty::Easy => &mut breakdown.easy,
            Difficulty::Medium => &mut breakdown.medium,
            Difficulty::Hard => &mut breakdown.hard,
        };
        stat.total += 1;
        if record.is_correct {
            stat.correct += 1;
        }
    }

    for stat in [
        &mut breakdown.easy,
        &mut breakdown.medium,
        &mut breakdown.hard,
    ] {
        stat.accuracy = accuracy_pct(stat.correct, stat.total);
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded(difficulty: Difficulty, correct: bool) -> AnswerRecord {
        AnswerRecord::new("q", "yes")
            .with_difficulty(difficulty)
            .answered(if correct { "yes" } else { "no" })
    }

    #[test]
    fn test_breakdown_counts_each_level() {
        let records = vec![
            graded(Difficulty::Easy, true),
            graded(Difficulty::Easy, false),
            graded(Difficulty::Medium, true),
            graded(Difficulty::Hard, false),
            graded(Difficulty::Hard, false),
            graded(Difficulty::Hard, true),
        ];
        let b = difficulty_breakdown(&records);
        assert_eq!((b.easy.correct, b.easy.total), (1, 2));
        assert_eq!(b.easy.accuracy, 50.0);
        assert_eq!(b.medium.accuracy, 100.0);
        assert_eq!((b.hard.correct, b.hard.total), (1, 3));
        assert_eq!(b.hard.accuracy, 33.3);
    }

    #[test]
    fn test_unattempted_levels_report_zero() {
        let b = difficulty_breakdown(&[graded(Difficulty::Medium, true)]);
        assert!(!b.easy.attempted());
        assert_eq!(b.easy.accuracy, 0.0);
        assert!(!b.hard.attempted());
        assert!(b.get(Difficulty::Medium).attempted());
    }
}
