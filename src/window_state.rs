use crate::{
    canvas::{Canvas, Color},
    error::Result,
    font::TextRenderer,
    input_manager::{InputAdapter, InputMode},
    layout::Layout,
    quiz::Quiz,
    scene::{self, Anchor, DrawItem},
};
use cursor_icon::CursorIcon;
use glam::IVec2;
use log::{info, warn};
use softbuffer::{Context, Surface};
use std::{num::NonZeroU32, sync::Arc};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    keyboard::ModifiersState,
    window::{Fullscreen, Window},
};

pub struct WindowState {
    /// The actual winit Window.
    pub window: Arc<Window>,
    /// Software framebuffer the quiz is drawn into.
    surface: Surface<Arc<Window>, Arc<Window>>,
    /// Cursor position over the window.
    cursor_position: Option<PhysicalPosition<f64>>,
    /// Window modifiers state.
    pub modifiers: ModifiersState,
    /// Occlusion state of the window.
    occluded: bool,
    pub layout: Layout,
    cursor_icon: CursorIcon,
}

impl WindowState {
    pub fn new(window: Window) -> Result<Self> {
        let window = Arc::new(window);
        let context = Context::new(window.clone())?;
        let mut surface = Surface::new(&context, window.clone())?;

        let size = window.inner_size();
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            surface.resize(width, height)?;
        }
        info!("Window={:?} created at {}x{}", window.id(), size.width, size.height);

        Ok(Self {
            window,
            surface,
            cursor_position: None,
            modifiers: Default::default(),
            occluded: false,
            layout: Layout::default(),
            cursor_icon: CursorIcon::Default,
        })
    }

    /// Last known cursor position, in window pixels.
    pub fn cursor_point(&self) -> Option<IVec2> {
        self.cursor_position
            .map(|p| IVec2::new(p.x.floor() as i32, p.y.floor() as i32))
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor_position = Some(position);
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = None;
    }

    /// Toggle fullscreen.
    pub fn toggle_fullscreen(&self) {
        let fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };

        self.window.set_fullscreen(fullscreen);
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        // Minimised windows report zero; keep the old buffer until restored.
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        if let Err(err) = self.surface.resize(width, height) {
            warn!("Failed to resize surface to {}x{}: {err}", size.width, size.height);
        }
        self.window.request_redraw();
    }

    /// Change window occlusion state.
    pub fn set_occluded(&mut self, occluded: bool) {
        self.occluded = occluded;
        if !occluded {
            self.window.request_redraw();
        }
    }

    /// Shows a pointer cursor over whatever a click would activate.
    pub fn update_cursor(&mut self, quiz: &Quiz, adapter: &dyn InputAdapter) {
        let actionable = self
            .cursor_point()
            .is_some_and(|point| adapter.is_actionable(quiz.state().phase(), point, &self.layout));
        let icon = if actionable {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        };

        if icon != self.cursor_icon {
            self.cursor_icon = icon;
            self.window.set_cursor(icon);
        }
    }

    #[profiling::function]
    pub fn redraw(&mut self, quiz: &Quiz, mode: InputMode, text: &mut TextRenderer) -> Result<()> {
        if self.occluded {
            return Ok(());
        }
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        let items = scene::build(&self.layout, quiz, mode, self.cursor_point());
        let mut buffer = self.surface.buffer_mut()?;
        if let Some(mut canvas) = Canvas::new(&mut buffer, size.width as usize, size.height as usize) {
            paint(&mut canvas, text, &items);
        }

        self.window.pre_present_notify();
        buffer.present()?;
        Ok(())
    }
}

#[profiling::function]
fn paint(canvas: &mut Canvas, text: &mut TextRenderer, items: &[DrawItem]) {
    canvas.clear(Color::BLACK);
    for item in items {
        match item {
            DrawItem::Panel { rect, hovered } => {
                canvas.fill_rect(*rect, if *hovered { Color::PANEL_HOVER } else { Color::PANEL });
                canvas.stroke_rect(*rect, Color::OUTLINE);
            }
            DrawItem::Text { anchor, text: line, color } => {
                let origin = match anchor {
                    Anchor::TopLeft(origin) => *origin,
                    Anchor::Centered(rect) => {
                        let size = IVec2::new(text.measure(line), text.line_height().round() as i32);
                        rect.min + (rect.size() - size) / 2
                    }
                };
                text.draw(canvas, origin, line, *color);
            }
        }
    }
}
