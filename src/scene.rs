//! What one quiz frame shows, as a flat list of draw items.

use crate::{
    canvas::Color,
    input_manager::InputMode,
    layout::{HitRegions, Layout, Rect},
    quiz::{Phase, Quiz},
};
use glam::IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Top-left corner of the text.
    TopLeft(IVec2),
    /// Centred inside the rectangle.
    Centered(Rect),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawItem {
    Panel { rect: Rect, hovered: bool },
    Text { anchor: Anchor, text: String, color: Color },
}

impl DrawItem {
    fn text(anchor: Anchor, text: impl Into<String>, color: Color) -> Self {
        DrawItem::Text {
            anchor,
            text: text.into(),
            color,
        }
    }
}

/// Builds the frame for the current quiz state. Hover highlights only appear
/// where a click would do something, so never in keyboard mode.
pub fn build(layout: &Layout, quiz: &Quiz, mode: InputMode, cursor: Option<IVec2>) -> Vec<DrawItem> {
    let state = quiz.state();
    let question = quiz.current_question();
    let answering = state.phase() == Phase::AwaitingAnswer;
    let pointer = mode == InputMode::Pointer;
    let mut items = vec![DrawItem::text(
        Anchor::TopLeft(layout.prompt),
        question.prompt(),
        Color::WHITE,
    )];

    for (i, (option, rect)) in question.options().iter().zip(&layout.options).enumerate() {
        let hovered =
            pointer && answering && cursor.is_some_and(|p| layout.point_in_option_region(i, p));
        items.push(DrawItem::Panel { rect: *rect, hovered });

        let label = if pointer {
            option.clone()
        } else {
            format!("{}. {option}", i + 1)
        };
        items.push(DrawItem::text(
            Anchor::TopLeft(Layout::label_origin(rect)),
            label,
            Color::WHITE,
        ));
    }

    if !answering {
        if pointer {
            let hovered = cursor.is_some_and(|p| layout.point_in_advance_region(p));
            items.push(DrawItem::Panel {
                rect: layout.advance,
                hovered,
            });
            items.push(DrawItem::text(
                Anchor::Centered(layout.advance),
                "Next",
                Color::WHITE,
            ));
        } else {
            items.push(DrawItem::text(
                Anchor::TopLeft(Layout::label_origin(&layout.advance)),
                "Press any key for the next question",
                Color::OUTLINE,
            ));
        }
    }

    items.push(DrawItem::text(
        Anchor::TopLeft(layout.score),
        format!("Score: {}", state.score),
        Color::WHITE,
    ));

    if state.feedback_visible {
        let (message, color) = if state.last_answer_correct {
            ("Correct!", Color::GREEN)
        } else {
            ("Wrong!", Color::RED)
        };
        items.push(DrawItem::text(Anchor::TopLeft(layout.feedback), message, color));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{question::BuiltinBank, quiz::Signal};

    fn quiz() -> Quiz {
        Quiz::new(BuiltinBank::General.load().unwrap())
    }

    fn texts(items: &[DrawItem]) -> Vec<&str> {
        items
            .iter()
            .filter_map(|item| match item {
                DrawItem::Text { text, .. } => Some(text.as_str()),
                DrawItem::Panel { .. } => None,
            })
            .collect()
    }

    fn hovered_panels(items: &[DrawItem]) -> Vec<Rect> {
        items
            .iter()
            .filter_map(|item| match item {
                DrawItem::Panel { rect, hovered: true } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn center(rect: &Rect) -> IVec2 {
        rect.min + rect.size() / 2
    }

    #[test]
    fn answering_frame_shows_question_options_and_score() {
        let layout = Layout::default();
        let items = build(&layout, &quiz(), InputMode::Keyboard, None);

        assert_eq!(
            texts(&items),
            [
                "What is the capital of France?",
                "1. Paris",
                "2. London",
                "3. Berlin",
                "4. Madrid",
                "Score: 0",
            ]
        );
        let panels = items
            .iter()
            .filter(|item| matches!(item, DrawItem::Panel { .. }))
            .count();
        assert_eq!(panels, 4);
    }

    #[test]
    fn feedback_and_next_follow_the_answer() {
        let layout = Layout::default();
        let mut quiz = quiz();

        quiz.apply(Signal::Select(0));
        let items = build(&layout, &quiz, InputMode::Pointer, None);
        let shown = texts(&items);
        assert!(shown.contains(&"Next"));
        assert!(shown.contains(&"Score: 100"));
        assert_eq!(shown.last(), Some(&"Correct!"));
        assert!(items.contains(&DrawItem::Panel {
            rect: layout.advance,
            hovered: false
        }));

        quiz.apply(Signal::Advance);
        quiz.apply(Signal::Select(3));
        let items = build(&layout, &quiz, InputMode::Pointer, None);
        let shown = texts(&items);
        assert_eq!(shown.last(), Some(&"Wrong!"));
        assert!(shown.contains(&"Score: 100"));

        quiz.apply(Signal::Advance);
        let shown_after_wrap = texts(&build(&layout, &quiz, InputMode::Pointer, None))
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        assert!(!shown_after_wrap.iter().any(|t| t == "Next" || t == "Wrong!"));
        assert!(shown_after_wrap.iter().any(|t| t == "Score: 0"));
    }

    #[test]
    fn keyboard_mode_hints_instead_of_next_control() {
        let layout = Layout::default();
        let mut quiz = quiz();
        quiz.apply(Signal::Select(1));

        let items = build(&layout, &quiz, InputMode::Keyboard, None);
        let shown = texts(&items);
        assert!(!shown.contains(&"Next"));
        assert!(shown.contains(&"Press any key for the next question"));
        assert_eq!(shown.last(), Some(&"Wrong!"));
    }

    #[test]
    fn hover_only_highlights_in_pointer_mode() {
        let layout = Layout::default();
        let cursor = Some(center(&layout.options[2]));

        let keyboard = build(&layout, &quiz(), InputMode::Keyboard, cursor);
        assert!(hovered_panels(&keyboard).is_empty());

        let pointer = build(&layout, &quiz(), InputMode::Pointer, cursor);
        assert_eq!(hovered_panels(&pointer), [layout.options[2]]);
    }

    #[test]
    fn hover_follows_the_phase() {
        let layout = Layout::default();
        let mut quiz = quiz();
        quiz.apply(Signal::Select(0));

        let over_option = build(&layout, &quiz, InputMode::Pointer, Some(center(&layout.options[0])));
        assert!(hovered_panels(&over_option).is_empty());

        let over_next = build(&layout, &quiz, InputMode::Pointer, Some(center(&layout.advance)));
        assert_eq!(hovered_panels(&over_next), [layout.advance]);
    }
}
