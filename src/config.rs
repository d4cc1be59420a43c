use crate::{
    error::{QuizError, Result},
    input_manager::InputMode,
    question::BuiltinBank,
};
use std::{env, path::PathBuf, str::FromStr};

pub const INPUT_VAR: &str = "QUIZ_INPUT";
pub const BANK_VAR: &str = "QUIZ_BANK";
pub const FONT_VAR: &str = "QUIZ_FONT";
pub const FONT_SIZE_VAR: &str = "QUIZ_FONT_SIZE";

const DEFAULT_FONT_PATH: &str = "font.ttf";
const DEFAULT_FONT_SIZE: f32 = 28.0;
/// Larger sizes make glyph bitmaps bigger than any window.
pub const MAX_FONT_SIZE: f32 = 512.0;

/// Startup options, read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: InputMode,
    pub bank: BuiltinBank,
    pub font_path: PathBuf,
    pub font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputMode::default(),
            bank: BuiltinBank::default(),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from any variable source; unset variables keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let font_size = parse_var(&lookup, FONT_SIZE_VAR, defaults.font_size)?;
        if !(font_size > 0.0 && font_size <= MAX_FONT_SIZE) {
            return Err(QuizError::Config(FONT_SIZE_VAR.into(), font_size.to_string()));
        }

        Ok(Self {
            input: parse_var(&lookup, INPUT_VAR, defaults.input)?,
            bank: parse_var(&lookup, BANK_VAR, defaults.bank)?,
            font_path: lookup(FONT_VAR)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.font_path),
            font_size,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| QuizError::Config(var.to_owned(), value)),
    }
}
