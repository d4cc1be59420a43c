use crate::{
    layout::HitRegions,
    quiz::{Phase, Signal},
};
use glam::IVec2;
use std::{fmt, str::FromStr};

/// Raw input as reported by the window, before any quiz meaning is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    Key(KeyPress),
    Click(IVec2),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    /// A key without a character, such as Enter or an arrow key.
    Named,
}

/// Turns raw input into quiz signals. One adapter is chosen at startup and the
/// other modality's events are dropped.
pub trait InputAdapter {
    fn signal(&self, phase: Phase, input: RawInput, regions: &dyn HitRegions) -> Option<Signal>;

    /// Whether a click at `point` would currently do something.
    fn is_actionable(&self, _phase: Phase, _point: IVec2, _regions: &dyn HitRegions) -> bool {
        false
    }
}

/// Digits 1-4 pick an answer, then any key moves on.
#[derive(Debug, Default)]
pub struct KeyboardAdapter;

impl InputAdapter for KeyboardAdapter {
    fn signal(&self, phase: Phase, input: RawInput, _regions: &dyn HitRegions) -> Option<Signal> {
        let RawInput::Key(key) = input else {
            return None;
        };

        match phase {
            Phase::AwaitingAnswer => match key {
                KeyPress::Char(ch @ '1'..='4') => Some(Signal::Select(ch as usize - '1' as usize)),
                _ => None,
            },
            Phase::AwaitingAdvance => Some(Signal::Advance),
        }
    }
}

/// Clicks inside an option pick it; clicks inside the Next control move on.
#[derive(Debug, Default)]
pub struct PointerAdapter;

impl InputAdapter for PointerAdapter {
    fn signal(&self, phase: Phase, input: RawInput, regions: &dyn HitRegions) -> Option<Signal> {
        let RawInput::Click(point) = input else {
            return None;
        };

        match phase {
            Phase::AwaitingAnswer => regions.option_at(point).map(Signal::Select),
            Phase::AwaitingAdvance => regions
                .point_in_advance_region(point)
                .then_some(Signal::Advance),
        }
    }

    fn is_actionable(&self, phase: Phase, point: IVec2, regions: &dyn HitRegions) -> bool {
        self.signal(phase, RawInput::Click(point), regions).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Keyboard,
    Pointer,
}

impl InputMode {
    pub fn adapter(self) -> Box<dyn InputAdapter> {
        match self {
            InputMode::Keyboard => Box::new(KeyboardAdapter),
            InputMode::Pointer => Box::new(PointerAdapter),
        }
    }
}

impl FromStr for InputMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyboard" | "key" => Ok(Self::Keyboard),
            "pointer" | "mouse" => Ok(Self::Pointer),
            _ => Err(()),
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Keyboard => f.write_str("keyboard"),
            InputMode::Pointer => f.write_str("pointer"),
        }
    }
}
