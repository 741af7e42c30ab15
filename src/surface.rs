//! Drawing surface contract and its adapters.
//!
//! Strategies only ever talk to a [`Surface`]: three primitives in bottom-up grid
//! space. Two implementations ship with the crate:
//!
//! - [`DisplaySurface`] maps the primitives onto any `embedded-graphics`
//!   [`DrawTarget`] (simulator window, SPI panel framebuffer, ...).
//! - [`RecordingSurface`] keeps the calls as [`DrawCommand`]s for inspection.
//!
//! # Axis Flip
//!
//! `embedded-graphics` is top-down (y grows downwards). [`DisplaySurface`] converts
//! every grid-space point with `screen_y = canvas_height - y`.

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Triangle};
use embedded_graphics::text::Text;
#[cfg(not(test))]
use micromath::F32Ext;
use profont::{PROFONT_12_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{BACKGROUND, Color};

/// Minimal drawing contract consumed by cell strategies.
pub trait Surface {
    /// Clear the whole canvas.
    fn clear(&mut self);

    /// Filled triangle with apex `(cx, cy + size)` and base corners
    /// `(cx - size, cy - size)`, `(cx + size, cy - size)`.
    fn draw_triangle(
        &mut self,
        center_x: f32,
        center_y: f32,
        size: f32,
        color: Color,
    );

    /// Text whose baseline starts at `(x, y)`. `scale` 1.0 is the largest font.
    fn render_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
        color: Color,
    );
}

// =============================================================================
// Recording Surface
// =============================================================================

/// One recorded [`Surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Surface::clear`].
    Clear,
    /// [`Surface::draw_triangle`].
    Triangle {
        center_x: f32,
        center_y: f32,
        size: f32,
        color: Color,
    },
    /// [`Surface::render_text`].
    Text {
        text: String,
        x: f32,
        y: f32,
        scale: f32,
        color: Color,
    },
}

/// Surface that stores calls instead of drawing them.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub const fn new() -> Self { Self { commands: Vec::new() } }

    /// Commands recorded so far, oldest first.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] { &self.commands }

    /// Take the recorded commands, leaving the recording empty.
    pub fn take(&mut self) -> Vec<DrawCommand> { core::mem::take(&mut self.commands) }

    /// Colors of all recorded triangles, in draw order.
    pub fn triangle_colors(&self) -> Vec<Color> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Triangle { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) { self.commands.push(DrawCommand::Clear); }

    fn draw_triangle(
        &mut self,
        center_x: f32,
        center_y: f32,
        size: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Triangle {
            center_x,
            center_y,
            size,
            color,
        });
    }

    fn render_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Text {
            text: String::from(text),
            x,
            y,
            scale,
            color,
        });
    }
}

// =============================================================================
// embedded-graphics Surface
// =============================================================================

/// Pick the `ProFont` size closest to a text scale.
pub fn font_for_scale(scale: f32) -> &'static MonoFont<'static> {
    if scale <= 0.5 {
        &PROFONT_12_POINT
    } else if scale <= 0.75 {
        &PROFONT_18_POINT
    } else {
        &PROFONT_24_POINT
    }
}

/// [`Surface`] backed by an `embedded-graphics` draw target.
///
/// Draw errors are dropped per primitive, the same way every widget in the
/// dashboard treats them.
pub struct DisplaySurface<'a, D> {
    target: &'a mut D,
    canvas_height: f32,
}

impl<'a, D> DisplaySurface<'a, D>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    /// Wrap `target`; its height is the canvas height used for the axis flip.
    pub fn new(target: &'a mut D) -> Self {
        let canvas_height = target.bounding_box().size.height as f32;
        Self { target, canvas_height }
    }

    /// Wrap `target` with an explicit canvas height.
    pub fn with_canvas_height(
        target: &'a mut D,
        canvas_height: f32,
    ) -> Self {
        Self { target, canvas_height }
    }

    /// Convert a bottom-up grid-space point to a top-down screen point.
    pub fn to_screen(
        &self,
        x: f32,
        y: f32,
    ) -> Point {
        Point::new(x.round() as i32, (self.canvas_height - y).round() as i32)
    }
}

impl<D> Surface for DisplaySurface<'_, D>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    fn clear(&mut self) { self.target.clear(BACKGROUND.into()).ok(); }

    fn draw_triangle(
        &mut self,
        center_x: f32,
        center_y: f32,
        size: f32,
        color: Color,
    ) {
        let apex = self.to_screen(center_x, center_y + size);
        let left = self.to_screen(center_x - size, center_y - size);
        let right = self.to_screen(center_x + size, center_y - size);
        let fill: D::Color = color.into();
        Triangle::new(apex, left, right)
            .into_styled(PrimitiveStyle::with_fill(fill))
            .draw(&mut *self.target)
            .ok();
    }

    fn render_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
        color: Color,
    ) {
        let color: D::Color = color.into();
        let style = MonoTextStyle::new(font_for_scale(scale), color);
        Text::new(text, self.to_screen(x, y), style).draw(&mut *self.target).ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
