//! Normal form assessment and review questions.

mod normal_form;
mod questions;

pub use normal_form::{NormalForm, NormalFormAssessment, assess};
pub use questions::{Question, generate_questions};
