use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::font::TextRenderer;
use crate::input_manager::{InputAdapter, InputMode, KeyPress, RawInput};
use crate::quiz::Quiz;
use crate::window_state::WindowState;
use image::{Rgba, RgbaImage};
use log::{debug, error, info};
use std::fmt;
use std::fmt::Debug;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Icon, Window, WindowId};

const WIN_TITLE: &str = "Quiz Game";
pub const WIN_START_INNER_SIZE: PhysicalSize<u32> = PhysicalSize::new(800, 600);
const ICON_SIZE: u32 = 32;

pub struct Application {
    mode: InputMode,
    adapter: Box<dyn InputAdapter>,
    quiz: Quiz,
    text: TextRenderer,
    icon: Icon,
    window: Option<WindowState>,
    /// Set when the window could not be brought up inside `resumed`.
    startup_error: Option<QuizError>,
}

impl Application {
    /// Loads every startup resource. Any failure here is fatal and happens
    /// before the event loop exists.
    pub fn new(config: &Config) -> Result<Self> {
        info!(
            "Starting with {} input, {} questions, font {}",
            config.input,
            config.bank,
            config.font_path.display()
        );

        let bank = config.bank.load()?;
        let text = TextRenderer::load(&config.font_path, config.font_size)?;
        let icon = build_icon()?;

        Ok(Self {
            mode: config.input,
            adapter: config.input.adapter(),
            quiz: Quiz::new(bank),
            text,
            icon,
            window: None,
            startup_error: None,
        })
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(WIN_TITLE)
            .with_window_icon(Some(self.icon.clone()))
            .with_inner_size(WIN_START_INNER_SIZE);

        let window = event_loop.create_window(window_attributes)?;
        self.window = Some(WindowState::new(window)?);
        Ok(())
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        info!("Executing action: {action}");
        match action {
            Action::CloseWindow => self.close(event_loop),
            Action::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            Action::PrintHelp => self.print_help(),
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.take() {
            info!("Closing Window={:?}", window.window.id());
        }
        event_loop.exit();
    }

    /// Hands raw input to the adapter and applies whatever signal comes out.
    fn dispatch(&mut self, input: RawInput) {
        let Some(window) = self.window.as_mut() else {
            return;
        };

        let phase = self.quiz.state().phase();
        let Some(signal) = self.adapter.signal(phase, input, &window.layout) else {
            log::trace!("Ignored {input:?} in {phase:?}");
            return;
        };

        let transition = self.quiz.apply(signal);
        if let Some(message) = transition.message() {
            println!("{message}");
        }

        window.update_cursor(&self.quiz, self.adapter.as_ref());
        window.window.request_redraw();
    }

    fn dump_monitors(&self, event_loop: &ActiveEventLoop) {
        let primary_monitor = event_loop.primary_monitor();
        for monitor in event_loop.available_monitors() {
            let intro = if primary_monitor.as_ref() == Some(&monitor) {
                "Primary monitor"
            } else {
                "Monitor"
            };

            let PhysicalSize { width, height } = monitor.size();
            let PhysicalPosition { x, y } = monitor.position();
            info!(
                "{intro}: {} {width}x{height} at {x},{y}, scale {}",
                monitor.name().unwrap_or_else(|| "[no name]".to_owned()),
                monitor.scale_factor()
            );
        }
    }

    /// Process the key binding.
    fn process_key_binding(key: &str, mods: &ModifiersState) -> Option<Action> {
        KEY_BINDINGS.iter().find_map(|binding| {
            binding
                .is_triggered_by(&key, mods)
                .then_some(binding.action)
        })
    }

    fn print_help(&self) {
        match self.mode {
            InputMode::Keyboard => {
                info!("Press 1-4 to answer, then any key for the next question")
            }
            InputMode::Pointer => {
                info!("Click an answer, then click Next for the next question")
            }
        }
        info!("Keyboard bindings:");
        for binding in KEY_BINDINGS {
            info!(
                "{}{:<10} - {} ({})",
                modifiers_to_string(binding.mods),
                binding.trigger,
                binding.action,
                binding.action.help(),
            );
        }
        info!("{:<15} - Close window", "Escape");
    }
}

impl ApplicationHandler for Application {
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let window_state = match self.window.as_mut() {
            Some(window) if window.window.id() == window_id => window,
            _ => return,
        };

        match event {
            WindowEvent::Resized(size) => {
                window_state.resize(size);
            }
            WindowEvent::Occluded(occluded) => {
                window_state.set_occluded(occluded);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = window_state.redraw(&self.quiz, self.mode, &mut self.text) {
                    error!("Failed to draw frame: {err}");
                }
            }
            WindowEvent::CloseRequested => {
                self.close(event_loop);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                window_state.modifiers = modifiers.state();
                debug!("Modifiers changed to {:?}", window_state.modifiers);
            }
            WindowEvent::KeyboardInput {
                event,
                is_synthetic: false,
                ..
            } => {
                // Dispatch only on the initial press.
                if !event.state.is_pressed() || event.repeat {
                    return;
                }

                let mods = window_state.modifiers;
                let action = match event.logical_key.as_ref() {
                    Key::Character(ch) => Self::process_key_binding(&ch.to_uppercase(), &mods),
                    Key::Named(NamedKey::Escape) => Some(Action::CloseWindow),
                    _ => None,
                };

                if let Some(action) = action {
                    self.handle_action(event_loop, action);
                } else if let Some(key) = key_press(&event.logical_key) {
                    self.dispatch(RawInput::Key(key));
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(point) = window_state.cursor_point() {
                    self.dispatch(RawInput::Click(point));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                window_state.cursor_moved(position);
                window_state.update_cursor(&self.quiz, self.adapter.as_ref());
                if self.mode == InputMode::Pointer {
                    window_state.window.request_redraw();
                }
            }
            WindowEvent::CursorLeft { .. } => {
                window_state.cursor_left();
                window_state.update_cursor(&self.quiz, self.adapter.as_ref());
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                info!("Window={window_id:?} changed scale to {scale_factor}");
            }
            _ => (),
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        info!("Resumed the event loop");
        self.dump_monitors(event_loop);

        match self.create_window(event_loop) {
            Ok(()) => self.print_help(),
            Err(err) => {
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }
}

/// Runs the quiz until its window is closed.
pub fn run(config: Config) -> Result<()> {
    let mut app = Application::new(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Modifiers pressed on their own are not quiz input; they only start a binding.
fn key_press(key: &Key) -> Option<KeyPress> {
    match key {
        Key::Named(
            NamedKey::Control
            | NamedKey::Shift
            | NamedKey::Alt
            | NamedKey::AltGraph
            | NamedKey::Super
            | NamedKey::Meta,
        ) => None,
        Key::Character(text) => Some(text.chars().next().map_or(KeyPress::Named, KeyPress::Char)),
        _ => Some(KeyPress::Named),
    }
}

struct Binding<T: Eq> {
    trigger: T,
    mods: ModifiersState,
    action: Action,
}

impl<T: Eq> Binding<T> {
    const fn new(trigger: T, mods: ModifiersState, action: Action) -> Self {
        Self {
            trigger,
            mods,
            action,
        }
    }

    fn is_triggered_by(&self, trigger: &T, mods: &ModifiersState) -> bool {
        &self.trigger == trigger && &self.mods == mods
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    CloseWindow,
    ToggleFullscreen,
    PrintHelp,
}

impl Action {
    fn help(&self) -> &'static str {
        match self {
            Action::CloseWindow => "Close window",
            Action::ToggleFullscreen => "Toggle fullscreen",
            Action::PrintHelp => "Print help",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self, f)
    }
}

/// Quiz badge: a filled circle with a lighter ring.
fn icon_image(size: u32) -> RgbaImage {
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let distance = (x as f32 - center).hypot(y as f32 - center);
        if distance > radius {
            Rgba([0, 0, 0, 0])
        } else if distance > radius - 3.0 {
            Rgba([240, 240, 240, 255])
        } else {
            Rgba([60, 110, 220, 255])
        }
    })
}

fn build_icon() -> Result<Icon> {
    let image = icon_image(ICON_SIZE);
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).map_err(|e| QuizError::Icon(e.to_string()))
}

fn modifiers_to_string(mods: ModifiersState) -> String {
    [
        (ModifiersState::SUPER, "Super+"),
        (ModifiersState::ALT, "Alt+"),
        (ModifiersState::CONTROL, "Ctrl+"),
        (ModifiersState::SHIFT, "Shift+"),
    ]
    .iter()
    .filter(|(modifier, _)| mods.contains(*modifier))
    .map(|(_, desc)| *desc)
    .collect::<String>()
}

const KEY_BINDINGS: &[Binding<&'static str>] = &[
    Binding::new("Q", ModifiersState::CONTROL, Action::CloseWindow),
    Binding::new("H", ModifiersState::CONTROL, Action::PrintHelp),
    Binding::new("F", ModifiersState::CONTROL, Action::ToggleFullscreen),
];
