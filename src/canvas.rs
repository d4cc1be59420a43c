use crate::layout::Rect;
use glam::IVec2;

/// 0RGB colour as stored by the software surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(90, 210, 110);
    pub const RED: Color = Color::rgb(230, 80, 80);
    pub const PANEL: Color = Color::rgb(40, 40, 48);
    pub const PANEL_HOVER: Color = Color::rgb(70, 70, 86);
    pub const OUTLINE: Color = Color::rgb(110, 110, 130);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    fn channels(self) -> [u32; 3] {
        [(self.0 >> 16) & 0xff, (self.0 >> 8) & 0xff, self.0 & 0xff]
    }

    /// Mixes `self` over `dst` with `coverage` in 0..=255.
    pub fn blend_over(self, dst: Color, coverage: u8) -> Color {
        let a = coverage as u32;
        let [sr, sg, sb] = self.channels();
        let [dr, dg, db] = dst.channels();
        let mix = |s: u32, d: u32| (s * a + d * (255 - a) + 127) / 255;
        Color((mix(sr, dr) << 16) | (mix(sg, dg) << 8) | mix(sb, db))
    }
}

/// Borrowed pixel buffer, row-major, `width * height` long.
pub struct Canvas<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Returns `None` if the buffer does not match the dimensions.
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.0);
    }

    fn index(&self, point: IVec2) -> Option<usize> {
        let (x, y) = (usize::try_from(point.x).ok()?, usize::try_from(point.y).ok()?);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    pub fn pixel(&self, point: IVec2) -> Option<Color> {
        self.index(point).map(|i| Color(self.pixels[i]))
    }

    /// Blends one pixel; points outside the canvas are dropped.
    pub fn blend_pixel(&mut self, point: IVec2, color: Color, coverage: u8) {
        if coverage == 0 {
            return;
        }
        if let Some(i) = self.index(point) {
            self.pixels[i] = color.blend_over(Color(self.pixels[i]), coverage).0;
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let bounds = IVec2::new(self.width as i32, self.height as i32);
        let min = rect.min.clamp(IVec2::ZERO, bounds);
        let max = rect.max.clamp(IVec2::ZERO, bounds);
        if min.x >= max.x {
            return;
        }
        for y in min.y..max.y {
            let row = y as usize * self.width;
            self.pixels[row + min.x as usize..row + max.x as usize].fill(color.0);
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let Rect { min, max } = rect;
        let edges = [
            Rect::new(min, IVec2::new(max.x - min.x, 1)),
            Rect::new(IVec2::new(min.x, max.y - 1), IVec2::new(max.x - min.x, 1)),
            Rect::new(min, IVec2::new(1, max.y - min.y)),
            Rect::new(IVec2::new(max.x - 1, min.y), IVec2::new(1, max.y - min.y)),
        ];
        for edge in edges {
            self.fill_rect(edge, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        let mut pixels = vec![0; 10];
        assert!(Canvas::new(&mut pixels, 4, 3).is_none());
        assert!(Canvas::new(&mut pixels, 5, 2).is_some());
    }

    #[test]
    fn blend_extremes() {
        assert_eq!(Color::WHITE.blend_over(Color::BLACK, 255), Color::WHITE);
        assert_eq!(Color::WHITE.blend_over(Color::BLACK, 0), Color::BLACK);
        assert_eq!(Color::WHITE.blend_over(Color::BLACK, 128), Color::rgb(128, 128, 128));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut pixels = vec![0; 16];
        let mut canvas = Canvas::new(&mut pixels, 4, 4).unwrap();
        canvas.fill_rect(Rect::new(IVec2::new(-2, 2), IVec2::new(4, 10)), Color::WHITE);

        assert_eq!(canvas.pixel(IVec2::new(0, 2)), Some(Color::WHITE));
        assert_eq!(canvas.pixel(IVec2::new(1, 3)), Some(Color::WHITE));
        assert_eq!(canvas.pixel(IVec2::new(2, 3)), Some(Color::BLACK));
        assert_eq!(canvas.pixel(IVec2::new(0, 1)), Some(Color::BLACK));
        assert_eq!(canvas.pixel(IVec2::new(0, 4)), None);
    }

    #[test]
    fn fill_rect_fully_outside_draws_nothing() {
        let mut pixels = vec![0; 16];
        let mut canvas = Canvas::new(&mut pixels, 4, 4).unwrap();
        canvas.fill_rect(Rect::new(IVec2::new(10, 10), IVec2::new(3, 3)), Color::WHITE);
        canvas.fill_rect(Rect::new(IVec2::new(-10, -10), IVec2::new(3, 3)), Color::WHITE);
        canvas.fill_rect(Rect::new(IVec2::new(6, 0), IVec2::new(3, 4)), Color::WHITE);
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn stroke_rect_leaves_interior() {
        let mut pixels = vec![0; 25];
        let mut canvas = Canvas::new(&mut pixels, 5, 5).unwrap();
        canvas.stroke_rect(Rect::new(IVec2::ZERO, IVec2::new(5, 5)), Color::RED);

        assert_eq!(canvas.pixel(IVec2::new(0, 0)), Some(Color::RED));
        assert_eq!(canvas.pixel(IVec2::new(4, 4)), Some(Color::RED));
        assert_eq!(canvas.pixel(IVec2::new(2, 0)), Some(Color::RED));
        assert_eq!(canvas.pixel(IVec2::new(2, 2)), Some(Color::BLACK));
    }

    #[test]
    fn blend_pixel_ignores_out_of_bounds() {
        let mut pixels = vec![0; 4];
        let mut canvas = Canvas::new(&mut pixels, 2, 2).unwrap();
        canvas.blend_pixel(IVec2::new(-1, 0), Color::WHITE, 255);
        canvas.blend_pixel(IVec2::new(2, 0), Color::WHITE, 255);
        canvas.blend_pixel(IVec2::new(1, 1), Color::WHITE, 255);
        assert_eq!(pixels, vec![0, 0, 0, Color::WHITE.0]);
    }
}
