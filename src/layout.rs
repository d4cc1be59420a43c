use crate::question::OPTION_COUNT;
use glam::IVec2;

const MARGIN_LEFT: i32 = 50;
const PROMPT_TOP: i32 = 50;
const OPTIONS_TOP: i32 = 100;
const OPTION_SIZE: IVec2 = IVec2::new(200, 50);
const ADVANCE_TOP: i32 = OPTIONS_TOP + OPTION_COUNT as i32 * OPTION_SIZE.y + 20;
const ADVANCE_SIZE: IVec2 = IVec2::new(120, 44);
const LABEL_PADDING: IVec2 = IVec2::new(10, 8);

/// Screen rectangle. Containment is exclusive on every edge, so two regions
/// stacked edge to edge never both claim the shared line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub const fn new(min: IVec2, size: IVec2) -> Self {
        Self {
            min,
            max: IVec2::new(min.x + size.x, min.y + size.y),
        }
    }

    pub fn contains(&self, point: IVec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    pub fn size(&self) -> IVec2 {
        self.max - self.min
    }
}

/// Hit-region predicates the presentation layer hands to the input adapters.
pub trait HitRegions {
    fn point_in_option_region(&self, option: usize, point: IVec2) -> bool;

    fn point_in_advance_region(&self, point: IVec2) -> bool;

    /// First option whose region contains `point`.
    fn option_at(&self, point: IVec2) -> Option<usize> {
        (0..OPTION_COUNT).find(|&option| self.point_in_option_region(option, point))
    }
}

/// Fixed-position layout of the quiz screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub prompt: IVec2,
    pub options: [Rect; OPTION_COUNT],
    pub advance: Rect,
    pub score: IVec2,
    pub feedback: IVec2,
}

impl Default for Layout {
    fn default() -> Self {
        let options = std::array::from_fn(|i| {
            Rect::new(
                IVec2::new(MARGIN_LEFT, OPTIONS_TOP + i as i32 * OPTION_SIZE.y),
                OPTION_SIZE,
            )
        });
        let advance = Rect::new(IVec2::new(MARGIN_LEFT, ADVANCE_TOP), ADVANCE_SIZE);

        Self {
            prompt: IVec2::new(MARGIN_LEFT, PROMPT_TOP),
            options,
            advance,
            score: IVec2::new(MARGIN_LEFT, advance.max.y + 30),
            feedback: IVec2::new(MARGIN_LEFT, advance.max.y + 80),
        }
    }
}

impl Layout {
    /// Top-left corner of the text drawn inside `rect`.
    pub fn label_origin(rect: &Rect) -> IVec2 {
        rect.min + LABEL_PADDING
    }
}

impl HitRegions for Layout {
    fn point_in_option_region(&self, option: usize, point: IVec2) -> bool {
        self.options
            .get(option)
            .is_some_and(|rect| rect.contains(point))
    }

    fn point_in_advance_region(&self, point: IVec2) -> bool {
        self.advance.contains(point)
    }
}
