use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use ch8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use ch8_core::FrameBuffer;

use crate::color::Rgb;

const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error("unable to open window")]
    Window(#[from] WindowBuildError),
    #[error("unable to create canvas")]
    Canvas(#[from] IntegerOrSdlError),
    #[error("unable to create texture")]
    Texture(#[from] TextureValueError),
    #[error("a scale of {0} makes the window too large")]
    Scale(u32),
}

impl From<String> for DisplayError {
    fn from(e: String) -> Self {
        DisplayError::Sdl(e)
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 monochrome pixels.
/// Each one is drawn as a `scale`x`scale` block, in the foreground color when on and black when
/// off. The whole frame is redrawn on every call to `render`.
pub struct Display {
    canvas: WindowCanvas,
    foreground: Rgb,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    /// * `scale` the size multiplier for each pixel
    /// * `foreground` the color of lit pixels
    pub fn new(
        sdl: &sdl2::Sdl,
        title: &str,
        scale: u32,
        foreground: Rgb,
    ) -> Result<Self, DisplayError> {
        let (width, height) = Display::window_size(scale)?;
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()?;
        let mut canvas = window.into_canvas().build()?;
        canvas.set_draw_color(Color::RGB(0, 0, 0));
        canvas.clear();
        canvas.present();

        Ok(Display { canvas, foreground })
    }

    /// The window dimensions in screen pixels for a given `scale`
    pub fn window_size(scale: u32) -> Result<(u32, u32), DisplayError> {
        let width = (DISPLAY_WIDTH as u32).checked_mul(scale);
        let height = (DISPLAY_HEIGHT as u32).checked_mul(scale);
        match (width, height) {
            (Some(width), Some(height)) if scale > 0 => Ok((width, height)),
            _ => Err(DisplayError::Scale(scale)),
        }
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 RGB24 texture.
    ///
    /// An RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    /// Lit pixels take the foreground color and unlit pixels are black.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `foreground` the color of lit pixels
    pub fn frame_to_texture(frame: &FrameBuffer, foreground: Rgb) -> Vec<u8> {
        frame
            .rows()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| match *pixel {
                0 => Rgb::BLACK.bytes(),
                _ => foreground.bytes(),
            })
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_texture(frame, self.foreground);
        let row_len = DISPLAY_WIDTH * BYTES_PER_PIXEL;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (y, row) in pixels.chunks(row_len).enumerate() {
                buffer[y * pitch..y * pitch + row_len].copy_from_slice(row);
            }
        })?;

        // the texture is stretched over the whole window
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
