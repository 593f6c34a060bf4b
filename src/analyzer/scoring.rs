//! Overall quiz score and grade copy

use crate::{AnswerRecord, Grade, Score};

/// Calculator for overall quiz scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Score from answer correctness: percentage of correct answers, rounded
    /// half up. An empty quiz scores 0.
    pub fn from_records(records: &[AnswerRecord]) -> Score {
        let total = records.len();
        if total == 0 {
            return Score::new(0);
        }
        let correct = records.iter().filter(|r| r.is_correct).count();
        let value = (correct * 100 + total / 2) / total;
        Score::new(value as u8)
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent - You have a firm grasp of this material",
            Grade::B => "Good - Solid understanding with a few gaps",
            Grade::C => "Fair - The basics are there but need reinforcing",
            Grade::D => "Poor - Several topics need focused review",
            Grade::F => "Failing - Start again from the fundamentals",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(correct: usize, total: usize) -> Vec<AnswerRecord> {
        (0..total)
            .map(|i| {
                AnswerRecord::new("q", "a").answered(if i < correct { "a" } else { "b" })
            })
            .collect()
    }

    #[test]
    fn test_score_from_records() {
        let score = ScoreCalculator::from_records(&quiz(3, 5));
        assert_eq!(score.value, 60);
        assert_eq!(score.grade, Grade::D);
    }

    #[test]
    fn test_score_rounds_half_up() {
        // 2/3 = 66.67 -> 67, 1/3 = 33.33 -> 33, 1/8 = 12.5 -> 13
        assert_eq!(ScoreCalculator::from_records(&quiz(2, 3)).value, 67);
        assert_eq!(ScoreCalculator::from_records(&quiz(1, 3)).value, 33);
        assert_eq!(ScoreCalculator::from_records(&quiz(1, 8)).value, 13);
    }

    #[test]
    fn test_score_perfect_and_empty() {
        let perfect = ScoreCalculator::from_records(&quiz(4, 4));
        assert_eq!(perfect.value, 100);
        assert_eq!(perfect.grade, Grade::A);
        assert_eq!(ScoreCalculator::from_records(&[]).value, 0);
    }

    #[test]
    fn test_grade_description_all_grades() {
        assert!(ScoreCalculator::grade_description(Grade::A).contains("Excellent"));
        assert!(ScoreCalculator::grade_description(Grade::B).contains("Good"));
        assert!(ScoreCalculator::grade_description(Grade::C).contains("Fair"));
        assert!(ScoreCalculator::grade_description(Grade::D).contains("Poor"));
        assert!(ScoreCalculator::grade_description(Grade::F).contains("Failing"));
    }
}
