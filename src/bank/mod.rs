//! Question-bank sources.
//!
//! Two flat-file sources feed the exam system: a per-exam CSV pool holding
//! every subject's questions unordered, and optional per-subject JSON files
//! with a richer structure. Both normalize into [`Question`] here.

pub mod csv_source;
pub mod json_source;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Question;

pub use csv_source::load_csv_pool;
pub use json_source::load_subject_file;

/// Uniform in-place shuffle of a question pool.
///
/// `SliceRandom::shuffle` is a Fisher–Yates pass, so every permutation is
/// equally likely; a sort-by-random-key would not be.
pub fn shuffle_questions<R: Rng + ?Sized>(questions: &mut [Question], rng: &mut R) {
    questions.shuffle(rng);
}

/// Shuffle with the thread-local RNG.
pub fn shuffle_questions_default(questions: &mut [Question]) {
    shuffle_questions(questions, &mut rand::thread_rng());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(ids: &[&str]) -> Vec<Question> {
        ids.iter()
            .map(|id| Question {
                id: id.to_string(),
                question: format!("soru {}", id),
                options: vec!["A".to_string(), "B".to_string()],
                correct_answer: 0,
                explanation: String::new(),
                subject: "Matematik".to_string(),
                difficulty: Difficulty::Medium,
                year: 2024,
            })
            .collect()
    }

    #[test]
    fn test_shuffle_keeps_the_same_questions() {
        let mut questions = pool(&["1", "2", "3", "4", "5"]);
        let mut rng = StdRng::seed_from_u64(7);
        shuffle_questions(&mut questions, &mut rng);
        let mut ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    /// Chi-square test over all 6 permutations of a 3-question pool. With
    /// 6000 trials the expected count per permutation is 1000; the 1%
    /// critical value for 5 degrees of freedom is ~15.09.
    #[test]
    fn test_shuffle_is_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = std::collections::HashMap::new();
        let trials = 6000;

        for _ in 0..trials {
            let mut questions = pool(&["1", "2", "3"]);
            shuffle_questions(&mut questions, &mut rng);
            let key: String = questions.iter().map(|q| q.id.as_str()).collect();
            *counts.entry(key).or_insert(0u32) += 1;
        }

        assert_eq!(counts.len(), 6, "all permutations should occur");

        let expected = trials as f64 / 6.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(
            chi_square < 15.09,
            "chi-square too high for a uniform shuffle: {}",
            chi_square
        );
    }
}
