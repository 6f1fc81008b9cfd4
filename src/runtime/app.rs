//! Application state and winit event handling

use std::rc::Rc;
use std::time::Duration;

use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use chipfield::contacts::{Contact, ContactDelegate};
use chipfield::field::Hit;
use chipfield::layout::Rect;
use chipfield::view::text::FontPainter;
use chipfield::worker::SearchDispatcher;
use chipfield::{update, Cmd, FieldMsg, TokenField};

use super::input::key_to_msg;
use super::renderer::Renderer;

/// Gap between the window edge and the field
const MARGIN: f32 = 16.0;

/// How often the loop wakes to collect search results
const POLL_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    field: TokenField<Contact, ContactDelegate>,
    dispatcher: SearchDispatcher<Contact>,
    painter: Rc<FontPainter>,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    cursor: (f32, f32),
}

impl App {
    pub fn new(
        field: TokenField<Contact, ContactDelegate>,
        dispatcher: SearchDispatcher<Contact>,
        painter: Rc<FontPainter>,
    ) -> Self {
        Self {
            field,
            dispatcher,
            painter,
            renderer: None,
            window: None,
            context: None,
            modifiers: ModifiersState::empty(),
            cursor: (0.0, 0.0),
        }
    }

    fn init_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = Window::default_attributes()
            .with_title("chipfield")
            .with_inner_size(LogicalSize::new(480.0, 360.0));
        let window = Rc::new(event_loop.create_window(attributes)?);

        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;
        let renderer = Renderer::new(Rc::clone(&window), &context)?;

        let size = window.inner_size();
        self.window = Some(window);
        self.context = Some(context);
        self.renderer = Some(renderer);

        self.dispatch(FieldMsg::SetArea(field_area(size.width)));
        self.dispatch(FieldMsg::FocusGained);
        Ok(())
    }

    /// Run a message through `update` and carry out the resulting command
    fn dispatch(&mut self, msg: FieldMsg<Contact>) {
        if let Some(cmd) = update(&mut self.field, msg) {
            self.process_cmd(&cmd);
        }
    }

    fn process_cmd(&self, cmd: &Cmd) {
        self.dispatcher.process_cmd(cmd);
        if cmd.needs_redraw() {
            self.request_redraw();
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn render(&mut self) {
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.render(&self.field, &self.painter) {
                tracing::error!("Render failed: {}", e);
            }
        }
    }

    fn handle_click(&mut self) {
        let (x, y) = self.cursor;
        let msg = match self.field.hit_test(x, y) {
            Some(Hit::Row(row)) => FieldMsg::SelectRow(row),
            Some(Hit::Token(id)) => FieldMsg::TapToken(id),
            Some(Hit::Field) => FieldMsg::FocusGained,
            None => FieldMsg::FocusLost,
        };
        self.dispatch(msg);
    }
}

fn field_area(window_width: u32) -> Rect {
    let width = (window_width as f32 - 2.0 * MARGIN).max(0.0);
    Rect::new(MARGIN, MARGIN, width, 0.0)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_renderer(event_loop) {
            tracing::error!("Failed to open window: {:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.dispatch(FieldMsg::SetArea(field_area(size.width)));
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => self.render(),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let results_visible = self.field.results_visible();
                if let Some(msg) = key_to_msg(&event.logical_key, self.modifiers, results_visible) {
                    self.dispatch(msg);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.handle_click(),
            WindowEvent::Focused(false) => self.dispatch(FieldMsg::FocusLost),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.dispatcher.process_pending(&mut self.field) {
            self.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::wait_duration(POLL_INTERVAL));
    }
}
