//! Reference data the trivia store starts with.

use triad_core::{CategoryId, QuestionId};

use crate::{Category, Question};

/// The six categories, in id order.
pub fn categories() -> Vec<Category> {
    [
        (1, "Science"),
        (2, "Art"),
        (3, "Geography"),
        (4, "History"),
        (5, "Entertainment"),
        (6, "Sports"),
    ]
    .into_iter()
    .map(|(id, kind)| Category::new(id, kind))
    .collect()
}

const QUESTIONS: &[(i64, &str, &str, i32, i64)] = &[
    (2, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 4, 5),
    (4, "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 4, 5),
    (5, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 2, 4),
    (6, "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 3, 5),
    (9, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 1, 4),
    (10, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 3, 6),
    (11, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 4, 6),
    (12, "Who invented Peanut Butter?", "George Washington Carver", 2, 4),
    (13, "What is the largest lake in Africa?", "Lake Victoria", 2, 3),
    (14, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    (15, "The Taj Mahal is located in which Indian city?", "Agra", 2, 3),
    (16, "Which Dutch graphic artist–initials M C was a creator of optical illusions?", "Escher", 1, 2),
    (17, "La Giaconda is better known as what?", "Mona Lisa", 3, 2),
    (18, "How many paintings did Van Gogh sell in his lifetime?", "One", 4, 2),
    (19, "Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
    (20, "What is the heaviest organ in the human body?", "The Liver", 4, 1),
    (21, "Who discovered penicillin?", "Alexander Fleming", 3, 1),
    (22, "Hematology is a branch of medicine involving the study of what?", "Blood", 4, 1),
    (23, "Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

/// The starter question bank, in id order.
pub fn questions() -> Vec<Question> {
    QUESTIONS
        .iter()
        .map(|&(id, question, answer, difficulty, category)| Question {
            id: QuestionId::new(id),
            question: question.to_string(),
            answer: answer.to_string(),
            difficulty,
            category: CategoryId::new(category),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad_core::contains_ignore_case;

    #[test]
    fn seed_is_consistent() {
        let cats = categories();
        let qs = questions();
        assert_eq!(cats.len(), 6);
        assert_eq!(qs.len(), 19);
        assert!(qs.iter().all(|q| cats.iter().any(|c| c.id == q.category)));
        assert!(qs.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn geography_has_three_questions_and_taj_is_unique() {
        let qs = questions();
        assert_eq!(qs.iter().filter(|q| q.category == CategoryId::new(3)).count(), 3);
        let hits: Vec<_> = qs.iter().filter(|q| contains_ignore_case(&q.question, "taj")).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, QuestionId::new(15));
    }
}
