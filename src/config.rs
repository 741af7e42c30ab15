//! Layout configuration for the dashboard grid.
//!
//! # Pre-computed Layout Constants
//!
//! The default canvas and grid shape are `const`, so the default cell size is
//! known at compile time:
//!
//! ```ignore
//! pub const DEFAULT_CELL_WIDTH: f32 = CANVAS_WIDTH / DEFAULT_COLS as f32;   // 200.0
//! pub const DEFAULT_CELL_HEIGHT: f32 = CANVAS_HEIGHT / DEFAULT_ROWS as f32; // 150.0
//! ```
//!
//! [`GridConfig`] is the runtime value used when the shape comes from the
//! command line or another front-end.
//!
//! # Coordinate Space
//!
//! Grid space is bottom-up: `(0, 0)` is the bottom-left corner of the canvas and
//! row 0 is the bottom row. Surfaces and the input dispatcher flip the vertical
//! axis when talking to top-down devices.

use crate::error::GridError;

// =============================================================================
// Canvas Configuration
// =============================================================================

/// Canvas width in grid units (one unit = one pixel at window scale 1).
pub const CANVAS_WIDTH: f32 = 800.0;

/// Canvas height in grid units.
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Default number of grid rows.
pub const DEFAULT_ROWS: usize = 4;

/// Default number of grid columns.
pub const DEFAULT_COLS: usize = 4;

// =============================================================================
// Pre-computed Layout Constants
// =============================================================================

/// Width of each cell for the default grid (canvas divided into 4 columns).
pub const DEFAULT_CELL_WIDTH: f32 = CANVAS_WIDTH / DEFAULT_COLS as f32;

/// Height of each cell for the default grid (canvas divided into 4 rows).
pub const DEFAULT_CELL_HEIGHT: f32 = CANVAS_HEIGHT / DEFAULT_ROWS as f32;

// =============================================================================
// Cell Drawing Configuration
// =============================================================================

/// Triangle size as a fraction of the shorter cell side.
pub const TRIANGLE_SCALE: f32 = 0.4;

/// Horizontal label offset from the cell's left edge.
pub const LABEL_OFFSET_X: f32 = 10.0;

/// Label baseline distance below the cell's top edge.
pub const LABEL_OFFSET_Y: f32 = 30.0;

/// Label text scale (1.0 = largest font).
pub const LABEL_SCALE: f32 = 0.5;

/// Maximum characters stored in a cell label.
/// Fits `"Data: -2147483648"` with room to spare.
pub const CELL_TEXT_LEN: usize = 32;

// =============================================================================
// Frame Timing
// =============================================================================

/// Target frame time in milliseconds (~60 FPS).
pub const FRAME_TIME_MS: u64 = 16;

// =============================================================================
// Grid Configuration
// =============================================================================

/// Shape of a grid and the canvas it tiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Canvas width in grid units.
    pub canvas_width: f32,
    /// Canvas height in grid units.
    pub canvas_height: f32,
    /// Number of rows (bottom to top).
    pub rows: usize,
    /// Number of columns (left to right).
    pub cols: usize,
}

impl GridConfig {
    /// Grid of the given shape on the default 800x600 canvas.
    pub const fn new(
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            rows,
            cols,
        }
    }

    /// Replace the canvas size.
    #[must_use]
    pub const fn with_canvas(
        mut self,
        width: f32,
        height: f32,
    ) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Check that the shape can tile the canvas.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.canvas_width) || !valid(self.canvas_height) {
            return Err(GridError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        Ok(())
    }

    /// Width of one cell.
    #[inline]
    pub fn cell_width(&self) -> f32 { self.canvas_width / self.cols as f32 }

    /// Height of one cell.
    #[inline]
    pub fn cell_height(&self) -> f32 { self.canvas_height / self.rows as f32 }
}

impl Default for GridConfig {
    fn default() -> Self { Self::new(DEFAULT_ROWS, DEFAULT_COLS) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cell_size() {
        assert_eq!(DEFAULT_CELL_WIDTH, 200.0);
        assert_eq!(DEFAULT_CELL_HEIGHT, 150.0);
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = GridConfig::default();
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.cols, DEFAULT_COLS);
        assert_eq!(config.cell_width(), DEFAULT_CELL_WIDTH);
        assert_eq!(config.cell_height(), DEFAULT_CELL_HEIGHT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        assert_eq!(
            GridConfig::new(0, 4).validate(),
            Err(GridError::EmptyGrid { rows: 0, cols: 4 })
        );
        assert_eq!(
            GridConfig::new(3, 0).validate(),
            Err(GridError::EmptyGrid { rows: 3, cols: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_bad_canvas() {
        assert!(matches!(
            GridConfig::new(2, 2).with_canvas(0.0, 600.0).validate(),
            Err(GridError::InvalidCanvas { .. })
        ));
        assert!(matches!(
            GridConfig::new(2, 2).with_canvas(800.0, f32::NAN).validate(),
            Err(GridError::InvalidCanvas { .. })
        ));
        assert!(matches!(
            GridConfig::new(2, 2).with_canvas(-1.0, 600.0).validate(),
            Err(GridError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn test_label_fits_extreme_values() {
        assert!("Data: -2147483648".len() <= CELL_TEXT_LEN);
    }
}
