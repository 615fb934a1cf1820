use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use triad_core::{CategoryId, QuestionId};

use crate::Question;

/// Body of `POST /quizzes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<QuestionId>,
    pub quiz_category: QuizCategory,
}

/// Category selector sent by the quiz client; id `0` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizCategory {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl QuizCategory {
    /// The concrete category to draw from, `None` for "all".
    pub fn category_id(&self) -> Option<CategoryId> {
        (self.id != 0).then(|| CategoryId::new(self.id))
    }
}

/// Pick a random question that has not been asked yet.
///
/// Returns `None` once every candidate appears in `previous`.
pub fn pick_quiz_question<R: Rng + ?Sized>(
    candidates: &[Question],
    previous: &[QuestionId],
    rng: &mut R,
) -> Option<Question> {
    let remaining: Vec<&Question> = candidates
        .iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    remaining.choose(rng).map(|q| (*q).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: i64, category: i64) -> Question {
        Question {
            id: QuestionId::new(id),
            question: format!("q{id}"),
            answer: format!("a{id}"),
            difficulty: 1,
            category: CategoryId::new(category),
        }
    }

    #[test]
    fn exhausted_pool_yields_none() {
        let pool = vec![question(20, 1), question(21, 1), question(22, 1)];
        let previous = [QuestionId::new(20), QuestionId::new(21), QuestionId::new(22)];
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_quiz_question(&pool, &previous, &mut rng), None);
    }

    #[test]
    fn zero_category_means_all() {
        let all = QuizCategory { id: 0, kind: Some("click".to_string()) };
        assert_eq!(all.category_id(), None);
        let science = QuizCategory { id: 1, kind: None };
        assert_eq!(science.category_id(), Some(CategoryId::new(1)));
    }

    #[test]
    fn request_defaults_previous_questions() {
        let req: QuizRequest =
            serde_json::from_value(serde_json::json!({ "quiz_category": { "id": 5 } })).unwrap();
        assert!(req.previous_questions.is_empty());
        assert_eq!(req.quiz_category.id, 5);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the pick is never a previously asked question, and a
            /// pick exists whenever something is left.
            #[test]
            fn pick_respects_previous_questions(
                ids in proptest::collection::btree_set(1i64..60, 0..20),
                asked in proptest::collection::vec(1i64..60, 0..30),
                seed in any::<u64>(),
            ) {
                let pool: Vec<Question> = ids.iter().map(|id| question(*id, 1)).collect();
                let previous: Vec<QuestionId> = asked.iter().copied().map(QuestionId::new).collect();
                let mut rng = StdRng::seed_from_u64(seed);

                let picked = pick_quiz_question(&pool, &previous, &mut rng);
                let left = ids.iter().filter(|id| !asked.contains(id)).count();

                match picked {
                    Some(q) => {
                        prop_assert!(!previous.contains(&q.id));
                        prop_assert!(ids.contains(&q.id.get()));
                    }
                    None => prop_assert_eq!(left, 0),
                }
            }
        }
    }
}
