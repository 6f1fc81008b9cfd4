//! softbuffer-backed window surface

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::Result;
use softbuffer::{Context, Surface};
use winit::window::Window;

use chipfield::delegate::TokenFieldDelegate;
use chipfield::view::frame::Frame;
use chipfield::view::text::FontPainter;
use chipfield::view::{render_field, FrameSurface};
use chipfield::TokenField;

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: Rc<Window>, context: &Context<Rc<Window>>) -> Result<Self> {
        let size = window.inner_size();
        let surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        Ok(Self {
            surface,
            width: size.width,
            height: size.height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn render<T, D>(&mut self, field: &TokenField<T, D>, painter: &FontPainter) -> Result<()>
    where
        T: Clone,
        D: TokenFieldDelegate<T>,
    {
        let (Some(width), Some(height)) = (NonZeroU32::new(self.width), NonZeroU32::new(self.height))
        else {
            return Ok(());
        };

        self.surface
            .resize(width, height)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get buffer: {}", e))?;

        {
            let mut frame = Frame::new(&mut buffer[..], self.width as usize, self.height as usize);
            frame.clear(field.theme().field.background.to_argb_u32());
            let mut surface = FrameSurface::new(frame, painter);
            render_field(&mut surface, field);
        }

        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}
