use std::{error::Error as StdError, fmt, io};

use softbuffer::SoftBufferError;
use winit::error::{EventLoopError, OsError};

#[derive(Debug)]
pub enum QuizError {
    EventLoop(EventLoopError),      // winit event loop creation or run failure
    Window(OsError),                // window creation
    Surface(SoftBufferError),       // software framebuffer
    Io(io::Error, String),          // io error + path
    Font(&'static str),             // fontdue parse failure
    Config(String, String),         // variable + offending value
    InvalidQuestion(String),        // bank construction
    Icon(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoop(e) => write!(f, "event loop: {e}"),
            Self::Window(e) => write!(f, "window could not be created: {e}"),
            Self::Surface(e) => write!(f, "software surface: {e}"),
            Self::Io(e, path) => write!(f, "failed to read {path}: {e}"),
            Self::Font(e) => write!(f, "failed to load font: {e}"),
            Self::Config(var, value) => write!(f, "invalid value {value:?} for {var}"),
            Self::InvalidQuestion(msg) => write!(f, "invalid question bank: {msg}"),
            Self::Icon(msg) => write!(f, "window icon: {msg}"),
        }
    }
}

impl StdError for QuizError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::EventLoop(e) => Some(e),
            Self::Window(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Io(e, _) => Some(e),
            _ => None,
        }
    }
}

/// `?` conversions
impl From<EventLoopError> for QuizError {
    fn from(e: EventLoopError) -> Self {
        Self::EventLoop(e)
    }
}
impl From<OsError> for QuizError {
    fn from(e: OsError) -> Self {
        Self::Window(e)
    }
}
impl From<SoftBufferError> for QuizError {
    fn from(e: SoftBufferError) -> Self {
        Self::Surface(e)
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
