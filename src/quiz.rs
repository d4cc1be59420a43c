//! The quiz session: a two-phase cycle per question.
//!
//! `AwaitingAnswer` accepts a [`Signal::Select`] and moves to `AwaitingAdvance`
//! with feedback shown. `AwaitingAdvance` accepts a [`Signal::Advance`] and moves
//! to the next question, wrapping (and zeroing the score) after the last one.
//! Every other signal is a no-op.

use crate::question::{Question, QuestionBank, OPTION_COUNT};
use log::{debug, trace};

pub const CORRECT_ANSWER_AWARD: u32 = 100;

/// Mutable per-session state, owned by [`Quiz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizState {
    pub current_question: usize,
    pub score: u32,
    pub answer_selected: bool,
    pub feedback_visible: bool,
    /// Only meaningful while `feedback_visible` is set.
    pub last_answer_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAnswer,
    AwaitingAdvance,
}

impl QuizState {
    pub fn phase(&self) -> Phase {
        if self.answer_selected {
            Phase::AwaitingAdvance
        } else {
            Phase::AwaitingAnswer
        }
    }
}

/// What an input adapter asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Select(usize),
    Advance,
}

/// Result of feeding a signal to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignored,
    Answered { correct: bool },
    Advanced { question: usize },
    /// The last question was passed; the session restarted from zero.
    Completed { final_score: u32 },
}

impl Transition {
    /// Console line for the transition, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Transition::Answered { correct: true } => Some("Correct!".to_owned()),
            Transition::Answered { correct: false } => Some("Wrong!".to_owned()),
            Transition::Completed { final_score } => {
                Some(format!("Quiz completed! Final score: {final_score}"))
            }
            Transition::Ignored | Transition::Advanced { .. } => None,
        }
    }
}

pub struct Quiz {
    bank: QuestionBank,
    state: QuizState,
}

impl Quiz {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            state: QuizState::default(),
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn current_question(&self) -> &Question {
        self.bank.get(self.state.current_question)
    }

    pub fn apply(&mut self, signal: Signal) -> Transition {
        let transition = match (self.state.phase(), signal) {
            (Phase::AwaitingAnswer, Signal::Select(option)) => self.select(option),
            (Phase::AwaitingAdvance, Signal::Advance) => self.advance(),
            _ => Transition::Ignored,
        };

        if transition == Transition::Ignored {
            trace!("Ignored {signal:?} in {:?}", self.state.phase());
        } else {
            debug!("{signal:?} -> {transition:?}, state {:?}", self.state);
        }
        transition
    }

    fn select(&mut self, option: usize) -> Transition {
        if option >= OPTION_COUNT {
            return Transition::Ignored;
        }

        let correct = self.current_question().is_correct(option);
        if correct {
            self.state.score += CORRECT_ANSWER_AWARD;
        }
        self.state.last_answer_correct = correct;
        self.state.feedback_visible = true;
        self.state.answer_selected = true;
        Transition::Answered { correct }
    }

    fn advance(&mut self) -> Transition {
        self.state.answer_selected = false;
        self.state.feedback_visible = false;
        self.state.current_question += 1;

        if self.state.current_question >= self.bank.len() {
            let final_score = self.state.score;
            self.state.current_question = 0;
            self.state.score = 0;
            Transition::Completed { final_score }
        } else {
            Transition::Advanced {
                question: self.state.current_question,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{BuiltinBank, Question};

    fn two_question_quiz() -> Quiz {
        Quiz::new(BuiltinBank::Arithmetic.load().unwrap())
    }

    #[test]
    fn starts_awaiting_first_answer() {
        let quiz = two_question_quiz();
        assert_eq!(*quiz.state(), QuizState::default());
        assert_eq!(quiz.state().phase(), Phase::AwaitingAnswer);
        assert_eq!(quiz.current_question().prompt(), "2+2?");
    }

    #[test]
    fn every_option_sets_feedback_and_correctness() {
        for option in 0..OPTION_COUNT {
            let mut quiz = two_question_quiz();
            let correct = option == quiz.current_question().correct_index();

            assert_eq!(
                quiz.apply(Signal::Select(option)),
                Transition::Answered { correct }
            );
            let state = quiz.state();
            assert!(state.answer_selected);
            assert!(state.feedback_visible);
            assert_eq!(state.last_answer_correct, correct);
            assert_eq!(state.score, if correct { CORRECT_ANSWER_AWARD } else { 0 });
        }
    }

    #[test]
    fn selection_after_answer_is_a_no_op() {
        let mut quiz = two_question_quiz();
        quiz.apply(Signal::Select(1));
        let before = *quiz.state();

        for option in 0..OPTION_COUNT {
            assert_eq!(quiz.apply(Signal::Select(option)), Transition::Ignored);
            assert_eq!(*quiz.state(), before);
        }
        assert_eq!(quiz.state().score, CORRECT_ANSWER_AWARD);
    }

    #[test]
    fn advance_before_answer_is_a_no_op() {
        let mut quiz = two_question_quiz();
        assert_eq!(quiz.apply(Signal::Advance), Transition::Ignored);
        assert_eq!(*quiz.state(), QuizState::default());
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut quiz = two_question_quiz();
        assert_eq!(quiz.apply(Signal::Select(OPTION_COUNT)), Transition::Ignored);
        assert_eq!(*quiz.state(), QuizState::default());
    }

    #[test]
    fn advance_keeps_score() {
        let mut quiz = two_question_quiz();
        quiz.apply(Signal::Select(1));
        assert_eq!(quiz.apply(Signal::Advance), Transition::Advanced { question: 1 });
        assert_eq!(quiz.state().score, CORRECT_ANSWER_AWARD);
        assert!(!quiz.state().answer_selected);
        assert!(!quiz.state().feedback_visible);
    }

    #[test]
    fn two_question_session_wraps_and_resets() {
        let mut quiz = two_question_quiz();

        assert_eq!(quiz.apply(Signal::Select(1)), Transition::Answered { correct: true });
        assert_eq!(quiz.state().score, 100);
        assert!(quiz.state().feedback_visible);
        assert!(quiz.state().last_answer_correct);

        quiz.apply(Signal::Advance);
        assert_eq!(quiz.state().current_question, 1);
        assert!(!quiz.state().answer_selected);

        assert_eq!(quiz.apply(Signal::Select(0)), Transition::Answered { correct: false });
        assert_eq!(quiz.state().score, 100);
        assert!(!quiz.state().last_answer_correct);

        assert_eq!(
            quiz.apply(Signal::Advance),
            Transition::Completed { final_score: 100 }
        );
        assert_eq!(*quiz.state(), QuizState::default());
    }

    #[test]
    fn score_never_decreases_within_a_session() {
        let bank = QuestionBank::new(
            (0..8)
                .map(|i| Question::new(format!("q{i}"), ["a", "b", "c", "d"], i % 4).unwrap())
                .collect(),
        )
        .unwrap();
        let mut quiz = Quiz::new(bank);
        let mut last_score = 0;

        for i in 0..7 {
            quiz.apply(Signal::Select(i % 3));
            let score = quiz.state().score;
            assert!(score == last_score || score == last_score + CORRECT_ANSWER_AWARD);
            last_score = score;

            quiz.apply(Signal::Advance);
            assert_eq!(quiz.state().score, last_score);
        }
    }

    #[test]
    fn single_question_bank_completes_on_every_advance() {
        let bank = QuestionBank::new(vec![Question::new("only", ["a", "b", "c", "d"], 3).unwrap()])
            .unwrap();
        let mut quiz = Quiz::new(bank);

        quiz.apply(Signal::Select(3));
        assert_eq!(quiz.apply(Signal::Advance), Transition::Completed { final_score: 100 });
        quiz.apply(Signal::Select(0));
        assert_eq!(quiz.apply(Signal::Advance), Transition::Completed { final_score: 0 });
    }

    #[test]
    fn transition_messages() {
        assert_eq!(Transition::Answered { correct: true }.message().as_deref(), Some("Correct!"));
        assert_eq!(Transition::Answered { correct: false }.message().as_deref(), Some("Wrong!"));
        assert_eq!(
            Transition::Completed { final_score: 200 }.message().as_deref(),
            Some("Quiz completed! Final score: 200")
        );
        assert_eq!(Transition::Advanced { question: 1 }.message(), None);
        assert_eq!(Transition::Ignored.message(), None);
    }
}
