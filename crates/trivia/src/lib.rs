//! Trivia records: categories, questions, quiz selection and seed data.

pub mod category;
pub mod question;
pub mod quiz;
pub mod seed;

pub use category::{Category, categories_to_map};
pub use question::{NewQuestion, Question, ValidQuestion};
pub use quiz::{QuizCategory, QuizRequest, pick_quiz_question};
