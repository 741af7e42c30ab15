//! Swappable per-cell update and draw behavior.
//!
//! Each [`GridCell`] owns exactly one boxed [`CellStrategy`]. Strategies hold no
//! per-cell state: they read and write the cell handed to them, so the same
//! type can back any number of cells.
//!
//! # Reference Strategies
//!
//! | Strategy | Accent | Update |
//! |----------|--------|--------|
//! | [`TriangleStrategy`] | red | no-op |
//! | [`BlueTriangleStrategy`] | blue | no-op |
//!
//! Both draw a filled triangle centered in the cell, sized at
//! [`TRIANGLE_SCALE`] of the shorter side, then the cell label (if any) near the
//! top-left corner. New variants only need to implement the trait.

use crate::cell::GridCell;
use crate::colors::{BLUE, Color, LABEL, RED};
use crate::config::{LABEL_OFFSET_X, LABEL_OFFSET_Y, LABEL_SCALE, TRIANGLE_SCALE};
use crate::surface::Surface;

/// Behavior object driving one cell's update and draw.
pub trait CellStrategy {
    /// Per-frame update hook. May change text, data or the active flag.
    fn update(
        &self,
        _cell: &mut GridCell,
    ) {
    }

    /// Issue the drawing primitives for `cell`.
    fn draw(
        &self,
        cell: &GridCell,
        surface: &mut dyn Surface,
    );

    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Accent color, if the strategy has one.
    fn accent(&self) -> Option<Color> { None }
}

/// Draw the shared triangle-plus-label layout with the given accent.
pub fn draw_triangle_cell(
    cell: &GridCell,
    surface: &mut dyn Surface,
    accent: Color,
) {
    let center_x = cell.x() + cell.width() / 2.0;
    let center_y = cell.y() + cell.height() / 2.0;
    let size = cell.width().min(cell.height()) * TRIANGLE_SCALE;

    surface.draw_triangle(center_x, center_y, size, accent);

    if !cell.text().is_empty() {
        surface.render_text(
            cell.text(),
            cell.x() + LABEL_OFFSET_X,
            cell.y() + cell.height() - LABEL_OFFSET_Y,
            LABEL_SCALE,
            LABEL,
        );
    }
}

/// Baseline strategy: red triangle.
#[derive(Clone, Copy, Debug, Default)]
pub struct TriangleStrategy;

impl CellStrategy for TriangleStrategy {
    fn draw(
        &self,
        cell: &GridCell,
        surface: &mut dyn Surface,
    ) {
        draw_triangle_cell(cell, surface, RED);
    }

    fn name(&self) -> &'static str { "triangle" }

    fn accent(&self) -> Option<Color> { Some(RED) }
}

/// Alternate strategy: blue triangle.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlueTriangleStrategy;

impl CellStrategy for BlueTriangleStrategy {
    fn draw(
        &self,
        cell: &GridCell,
        surface: &mut dyn Surface,
    ) {
        draw_triangle_cell(cell, surface, BLUE);
    }

    fn name(&self) -> &'static str { "blue-triangle" }

    fn accent(&self) -> Option<Color> { Some(BLUE) }
}

// =============================================================================
// Unit Tests
// =============================================================================
