//! The static, ordered question bank.

use std::collections::HashMap;

use crate::error::QuizError;
use crate::model::Question;

/// An ordered, validated, read-only set of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    id: String,
    name: String,
    description: String,
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
}

impl QuestionBank {
    /// Build a bank, refusing empty banks, duplicate ids and any question
    /// whose answer key does not fit its options.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }

        let mut by_id = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            question.validate()?;
            if by_id.insert(question.id.clone(), position).is_some() {
                return Err(QuizError::DuplicateId(question.id.clone()));
            }
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            questions,
            by_id,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The question at `position`.
    pub fn get(&self, position: usize) -> Result<&Question, QuizError> {
        self.questions.get(position).ok_or(QuizError::OutOfRange {
            position,
            size: self.questions.len(),
        })
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Question> {
        self.position_of(id).map(|p| &self.questions[p])
    }

    /// Position of the question with the given id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Number of questions. Never zero.
    pub fn size(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
