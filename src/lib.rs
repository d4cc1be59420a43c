pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod input_manager;
pub mod layout;
pub mod question;
pub mod quiz;
pub mod scene;
mod window_state;

pub use config::Config;
pub use error::{QuizError, Result};
pub use question::{BuiltinBank, Question, QuestionBank};
pub use quiz::{Quiz, QuizState, Signal, Transition};
