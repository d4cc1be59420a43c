use crate::error::{QuizError, Result};
use std::{fmt, str::FromStr};

pub const OPTION_COUNT: usize = 4;

/// One quiz item. The options array length and the correct index are both
/// checked at construction, so a `Question` can always be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_index: usize,
    ) -> Result<Self> {
        let prompt = prompt.into();
        if correct_index >= OPTION_COUNT {
            return Err(QuizError::InvalidQuestion(format!(
                "{prompt:?} has correct option {correct_index}, expected 0..{OPTION_COUNT}"
            )));
        }
        Ok(Self {
            prompt,
            options: options.map(String::from),
            correct_index,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }
}

/// Ordered, immutable list of questions, never empty.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::InvalidQuestion(
                "bank must contain at least one question".into(),
            ));
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Panics on an out-of-range index; the state machine keeps its index in range.
    pub fn get(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

/// The question sets shipped with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuiltinBank {
    #[default]
    General,
    Arithmetic,
}

impl BuiltinBank {
    pub fn load(self) -> Result<QuestionBank> {
        let questions = match self {
            BuiltinBank::General => vec![
                Question::new(
                    "What is the capital of France?",
                    ["Paris", "London", "Berlin", "Madrid"],
                    0,
                )?,
                Question::new("What is 2 + 2?", ["3", "4", "5", "6"], 1)?,
            ],
            BuiltinBank::Arithmetic => vec![
                Question::new("2+2?", ["3", "4", "5", "6"], 1)?,
                Question::new("1+1?", ["1", "2", "3", "4"], 1)?,
            ],
        };
        QuestionBank::new(questions)
    }
}

impl FromStr for BuiltinBank {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "arithmetic" => Ok(Self::Arithmetic),
            _ => Err(()),
        }
    }
}

impl fmt::Display for BuiltinBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinBank::General => f.write_str("general"),
            BuiltinBank::Arithmetic => f.write_str("arithmetic"),
        }
    }
}
